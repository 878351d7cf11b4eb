//! Tick-driven sampling cycle.
//!
//! The tick interrupt only sets the [`ReadyFlag`]. Everything that touches the
//! bus runs here, from the main loop:
//!
//! ```text
//! Idle --tick--> Ready --status ok, ZYXDA--> Reading --burst ok--> Emitting --> Idle
//!                  |                            |
//!                  +-- no new data: clear ------+-- bus error: keep flag --> Idle
//! ```

use core::fmt;

use embedded_hal::i2c::I2c;
use lis3dh::Lis3dh;
use log::{trace, warn};

use crate::conversion::ResolutionMode;
use crate::frame::FrameEncoder;
use crate::ready_flag::ReadyFlag;

/// Destination for finished frames, e.g. a UART transmitter.
pub trait FrameSink {
    type Error: fmt::Debug;

    /// Transmits the whole frame in order, without reframing.
    fn send(&mut self, frame: &[u8]) -> Result<(), Self::Error>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    Idle,
    Ready,
    Reading,
    Emitting,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleOutcome {
    /// No tick pending.
    Idle,
    /// Tick consumed, sensor had nothing new.
    NoNewData,
    /// One frame of `len` bytes went to the sink.
    Emitted { len: usize, overrun: bool },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SamplingStats {
    pub cycles: u32,
    pub frames: u32,
    pub no_data: u32,
    pub bus_errors: u32,
    pub sink_errors: u32,
    /// ZYXOR seen with new data. Diagnostic only, the sample is still sent.
    pub overruns: u32,
}

fn bump(counter: &mut u32) {
    *counter = counter.wrapping_add(1);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error<S> {
    Sensor(lis3dh::Error),
    Sink(S),
}

impl<S: fmt::Debug> fmt::Display for Error<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Sensor(err) => write!(f, "sensor: {}", err),
            Error::Sink(err) => write!(f, "sink: {:?}", err),
        }
    }
}

pub struct SamplingScheduler<'a, I2C, S> {
    sensor: Lis3dh<I2C>,
    encoder: FrameEncoder,
    sink: S,
    ready: &'a ReadyFlag,
    state: State,
    stats: SamplingStats,
}

impl<'a, I2C, S> SamplingScheduler<'a, I2C, S>
where
    I2C: I2c,
    S: FrameSink,
{
    pub fn new(sensor: Lis3dh<I2C>, mode: ResolutionMode, sink: S, ready: &'a ReadyFlag) -> Self {
        Self {
            sensor,
            encoder: FrameEncoder::new(&mode),
            sink,
            ready,
            state: State::Idle,
            stats: SamplingStats::default(),
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn stats(&self) -> &SamplingStats {
        &self.stats
    }

    pub fn mode(&self) -> &ResolutionMode {
        self.encoder.mode()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn release(self) -> (Lis3dh<I2C>, S) {
        (self.sensor, self.sink)
    }

    /// One main-loop pass. The flag is cleared once the sample is consumed
    /// (frame handed to the sink, or no new data). A failed bus transaction
    /// abandons the cycle and leaves the flag set, so the next pass retries.
    pub fn poll(&mut self) -> Result<CycleOutcome, Error<S::Error>> {
        let ready = self.ready;
        let Some(token) = ready.pending() else {
            return Ok(CycleOutcome::Idle);
        };

        self.enter(State::Ready);
        let result = self.run_cycle();
        match result {
            Ok(_) | Err(Error::Sink(_)) => token.consume(),
            Err(Error::Sensor(_)) => drop(token),
        }
        self.enter(State::Idle);
        result
    }

    /// Runs a cycle without waiting for a tick, for builds that poll the
    /// status register back to back. The ready flag is not touched.
    pub fn poll_free_running(&mut self) -> Result<CycleOutcome, Error<S::Error>> {
        self.enter(State::Ready);
        let result = self.run_cycle();
        self.enter(State::Idle);
        result
    }

    /// Main loop. `wait` runs between passes (busy-wait, `wfi`, a host yield).
    pub fn run_forever<W: FnMut()>(&mut self, mut wait: W) -> ! {
        loop {
            // failures are already logged and counted by the cycle
            let _ = self.poll();
            wait();
        }
    }

    fn run_cycle(&mut self) -> Result<CycleOutcome, Error<S::Error>> {
        bump(&mut self.stats.cycles);

        let status = match self.sensor.read_status() {
            Ok(status) => status,
            Err(err) => {
                bump(&mut self.stats.bus_errors);
                warn!("status read failed, cycle abandoned: {}", err);
                return Err(Error::Sensor(err));
            }
        };

        if !status.new_data_available() {
            bump(&mut self.stats.no_data);
            trace!("status {:#04x}: no new data", status.bits());
            return Ok(CycleOutcome::NoNewData);
        }

        let overrun = status.data_overrun();
        if overrun {
            bump(&mut self.stats.overruns);
        }

        self.enter(State::Reading);
        let raw = match self.sensor.read_sample() {
            Ok(raw) => raw,
            Err(err) => {
                bump(&mut self.stats.bus_errors);
                warn!("axis burst read failed, cycle abandoned: {}", err);
                return Err(Error::Sensor(err));
            }
        };

        self.enter(State::Emitting);
        let frame = self.encoder.encode_sample(&raw);
        let len = frame.len();
        if let Err(err) = self.sink.send(frame) {
            bump(&mut self.stats.sink_errors);
            warn!("frame not sent: {:?}", err);
            return Err(Error::Sink(err));
        }
        bump(&mut self.stats.frames);

        Ok(CycleOutcome::Emitted { len, overrun })
    }

    fn enter(&mut self, next: State) {
        trace!("{:?} -> {:?}", self.state, next);
        self.state = next;
    }
}
