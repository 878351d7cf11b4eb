use crate::registers::*;
use crate::Error;

/// Values for CTRL_REG1 (rate, power mode, axis enables) and CTRL_REG4
/// (range, resolution, block update).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlConfiguration {
    pub ctrl_reg1: u8,
    pub ctrl_reg4: u8,
}

impl ControlConfiguration {
    pub const fn new(ctrl_reg1: u8, ctrl_reg4: u8) -> Self {
        Self { ctrl_reg1, ctrl_reg4 }
    }

    pub const fn encode(
        rate: DataRate,
        low_power: bool,
        scale: FullScale,
        high_resolution: bool,
        block_update: bool,
    ) -> Self {
        let mut ctrl_reg1 = (rate as u8) << CTRL1_ODR_LOC | CtrlReg1Flags::XYZ_EN.bits();
        if low_power {
            ctrl_reg1 |= CtrlReg1Flags::LPEN.bits();
        }
        let mut ctrl_reg4 = (scale as u8) << CTRL4_FS_LOC;
        if high_resolution {
            ctrl_reg4 |= CtrlReg4Flags::HR.bits();
        }
        if block_update {
            ctrl_reg4 |= CtrlReg4Flags::BDU.bits();
        }
        Self { ctrl_reg1, ctrl_reg4 }
    }
}

// Normal mode 100 Hz, ±2 g, 10-bit, 4 mg/digit
pub const CONTROL_NORMAL_100HZ: ControlConfiguration =
    ControlConfiguration::encode(DataRate::Hz100, false, FullScale::G2, false, false);

// High-resolution mode 100 Hz, ±4 g, 12-bit, 2 mg/digit, BDU
pub const CONTROL_HIGH_RES_100HZ: ControlConfiguration =
    ControlConfiguration::encode(DataRate::Hz100, false, FullScale::G4, true, true);

// Low-power mode 100 Hz, ±2 g, 8-bit, 16 mg/digit
pub const CONTROL_LOW_POWER_100HZ: ControlConfiguration =
    ControlConfiguration::encode(DataRate::Hz100, true, FullScale::G2, false, false);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegisterUpdate {
    /// Stored value already matched, nothing was written.
    Unchanged,
    Written,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlUpdate {
    pub ctrl_reg1: Result<RegisterUpdate, Error>,
    pub ctrl_reg4: Result<RegisterUpdate, Error>,
}

impl ControlUpdate {
    /// Both registers hold the target, whether or not a write was needed.
    pub fn applied(&self) -> bool {
        self.ctrl_reg1.is_ok() && self.ctrl_reg4.is_ok()
    }
}
