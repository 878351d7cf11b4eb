use embedded_hal::i2c::I2c;
use lis3dh::{BusAddress, Lis3dh, DEFAULT_ADDRESS};

use crate::conversion::ResolutionMode;

pub const DEFAULT_TICK_PERIOD_MS: u32 = 10;

/// Chosen once at startup, never changed while sampling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SamplerConfig {
    pub device: BusAddress,
    pub mode: ResolutionMode,
    pub tick_period_ms: u32,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            device: DEFAULT_ADDRESS,
            mode: ResolutionMode::NORMAL_COUNTS,
            tick_period_ms: DEFAULT_TICK_PERIOD_MS,
        }
    }
}

impl SamplerConfig {
    pub const fn with_mode(self, mode: ResolutionMode) -> Self {
        Self { mode, ..self }
    }

    pub const fn with_device(self, device: BusAddress) -> Self {
        Self { device, ..self }
    }

    pub fn sensor<I2C: I2c>(&self, i2c: I2C) -> Lis3dh<I2C> {
        Lis3dh::new(i2c, self.device)
    }
}
