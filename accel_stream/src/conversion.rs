//! Raw axis words to output units.
//!
//! The sensor left-justifies each axis in a 16-bit word. The number of valid
//! high bits depends on the operating mode, so decoding is an arithmetic right
//! shift followed by a per-mode sensitivity (milli-g per digit).

use lis3dh::{
    ControlConfiguration, RawSample, CONTROL_HIGH_RES_100HZ, CONTROL_LOW_POWER_100HZ,
    CONTROL_NORMAL_100HZ,
};

use crate::frame::{COUNT_FRAME_LEN, PHYSICAL_FRAME_LEN};

/// Standard gravity as used by the sensor datasheet, m/s^2 per g.
pub const STANDARD_GRAVITY: f64 = 9.806;
/// milli-g to g.
pub const MILLI: f64 = 0.001;
/// Fixed-point factor keeping three decimals of the physical value.
pub const FIXED_POINT_SCALE: f32 = 1000.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputRepresentation {
    /// Scaled milli-g counts, two little-endian bytes per axis.
    Counts,
    /// m/s^2 x 1000, four little-endian bytes per axis.
    MilliPhysical,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolutionMode {
    /// Unused low bits of the left-justified word.
    pub shift: u8,
    /// Output units per digit after the shift.
    pub sensitivity: i16,
    pub output: OutputRepresentation,
    /// Register values that put the sensor in this mode.
    pub control: ControlConfiguration,
}

impl ResolutionMode {
    /// Normal mode, 10-bit, ±2 g, 4 mg/digit, counts on the wire.
    pub const NORMAL_COUNTS: ResolutionMode = ResolutionMode {
        shift: 6,
        sensitivity: 4,
        output: OutputRepresentation::Counts,
        control: CONTROL_NORMAL_100HZ,
    };

    /// High-resolution mode, 12-bit, ±4 g, 2 mg/digit, m/s^2 x 1000 on the wire.
    pub const HIGH_RESOLUTION_PHYSICAL: ResolutionMode = ResolutionMode {
        shift: 4,
        sensitivity: 2,
        output: OutputRepresentation::MilliPhysical,
        control: CONTROL_HIGH_RES_100HZ,
    };

    /// Low-power mode, 8-bit, ±2 g, 16 mg/digit, counts on the wire.
    pub const LOW_POWER_COUNTS: ResolutionMode = ResolutionMode {
        shift: 8,
        sensitivity: 16,
        output: OutputRepresentation::Counts,
        control: CONTROL_LOW_POWER_100HZ,
    };

    pub const fn frame_len(&self) -> usize {
        match self.output {
            OutputRepresentation::Counts => COUNT_FRAME_LEN,
            OutputRepresentation::MilliPhysical => PHYSICAL_FRAME_LEN,
        }
    }

    /// Sign-preserving shift down to the mode's resolution. A shift past the
    /// word width leaves only the sign.
    pub fn decode_axis(&self, raw: i16) -> i16 {
        raw.checked_shr(u32::from(self.shift)).unwrap_or(raw >> 15)
    }

    pub fn scale(&self, raw: &RawSample) -> ScaledSample {
        match self.output {
            OutputRepresentation::Counts => {
                ScaledSample::Counts(raw.axes().map(|axis| self.counts(axis)))
            }
            OutputRepresentation::MilliPhysical => {
                ScaledSample::MilliPhysical(raw.axes().map(|axis| self.milli_physical(axis)))
            }
        }
    }

    /// Wraps on overflow, which no valid sensor output reaches.
    pub fn counts(&self, raw: i16) -> i16 {
        self.decode_axis(raw).wrapping_mul(self.sensitivity)
    }

    /// m/s^2 truncated to three decimals and carried as an integer.
    pub fn milli_physical(&self, raw: i16) -> i32 {
        let digits = f64::from(self.decode_axis(raw));
        let mps2 = (digits * f64::from(self.sensitivity) * STANDARD_GRAVITY * MILLI) as f32;
        (mps2 * FIXED_POINT_SCALE) as i32
    }
}

impl Default for ResolutionMode {
    fn default() -> Self {
        Self::NORMAL_COUNTS
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaledSample {
    Counts([i16; 3]),
    MilliPhysical([i32; 3]),
}
