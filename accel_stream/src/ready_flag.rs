use core::sync::atomic::{AtomicBool, Ordering};

/// One-bit handoff between the periodic tick interrupt (the only writer of
/// `true`) and the sampling loop (the only writer of `false`).
pub struct ReadyFlag {
    ready: AtomicBool,
}

impl ReadyFlag {
    pub const fn new() -> Self {
        Self {
            ready: AtomicBool::new(false),
        }
    }

    /// Called from the tick interrupt. Plain store, never read-modify-write.
    pub fn set(&self) {
        self.ready.store(true, Ordering::Release);
    }

    pub fn is_set(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Token for a pending tick, if any. Dropping it without
    /// [`ReadyToken::consume`] leaves the flag set for the next pass.
    pub fn pending(&self) -> Option<ReadyToken<'_>> {
        if self.is_set() {
            Some(ReadyToken { flag: self })
        } else {
            None
        }
    }
}

impl Default for ReadyFlag {
    fn default() -> Self {
        Self::new()
    }
}

#[must_use = "an unconsumed token leaves the tick pending"]
pub struct ReadyToken<'a> {
    flag: &'a ReadyFlag,
}

impl ReadyToken<'_> {
    pub fn consume(self) {
        self.flag.ready.store(false, Ordering::Release);
    }
}
