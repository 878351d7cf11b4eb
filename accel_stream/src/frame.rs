use lis3dh::RawSample;

use crate::conversion::{OutputRepresentation, ResolutionMode, ScaledSample};

pub const FRAME_HEADER: u8 = 0xA0;
pub const FRAME_FOOTER: u8 = 0xC0;

/// `[A0][X lo,hi][Y lo,hi][Z lo,hi][C0]`
pub const COUNT_FRAME_LEN: usize = 8;
/// `[A0][X b0..b3][Y b0..b3][Z b0..b3][C0]`
pub const PHYSICAL_FRAME_LEN: usize = 14;
pub const MAX_FRAME_LEN: usize = PHYSICAL_FRAME_LEN;

/// Output buffer for one mode. Sentinels are written once at construction and
/// every encode only touches the payload bytes between them.
#[derive(Clone, Debug)]
pub struct FrameEncoder {
    buf: [u8; MAX_FRAME_LEN],
    len: usize,
    mode: ResolutionMode,
}

impl FrameEncoder {
    pub fn new(mode: &ResolutionMode) -> Self {
        let len = mode.frame_len();
        let mut buf = [0u8; MAX_FRAME_LEN];
        buf[0] = FRAME_HEADER;
        buf[len - 1] = FRAME_FOOTER;
        Self {
            buf,
            len,
            mode: *mode,
        }
    }

    pub fn frame_len(&self) -> usize {
        self.len
    }

    pub fn mode(&self) -> &ResolutionMode {
        &self.mode
    }

    /// Last encoded frame (payload zeroed before the first encode).
    pub fn frame(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Scales `raw` with this encoder's mode and packs it.
    pub fn encode_sample(&mut self, raw: &RawSample) -> &[u8] {
        let scaled = self.mode.scale(raw);
        self.write_payload(&scaled);
        self.frame()
    }

    /// Packs X, Y, Z little-endian into the payload. A sample of the other
    /// representation returns `None` and leaves the buffer untouched.
    pub fn encode(&mut self, sample: &ScaledSample) -> Option<&[u8]> {
        if self.write_payload(sample) {
            Some(self.frame())
        } else {
            None
        }
    }

    fn write_payload(&mut self, sample: &ScaledSample) -> bool {
        let payload = &mut self.buf[1..self.len - 1];
        match (self.mode.output, sample) {
            (OutputRepresentation::Counts, ScaledSample::Counts(axes)) => {
                for (chunk, axis) in payload.chunks_exact_mut(2).zip(axes) {
                    chunk.copy_from_slice(&axis.to_le_bytes());
                }
                true
            }
            (OutputRepresentation::MilliPhysical, ScaledSample::MilliPhysical(axes)) => {
                for (chunk, axis) in payload.chunks_exact_mut(4).zip(axes) {
                    chunk.copy_from_slice(&axis.to_le_bytes());
                }
                true
            }
            _ => false,
        }
    }
}
