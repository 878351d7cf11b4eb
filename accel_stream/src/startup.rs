//! Boot-time diagnostics run once before the sampling loop.
//!
//! Everything here is best effort: each step is logged and recorded in the
//! [`StartupReport`], and no failure stops the remaining steps.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use heapless::Vec;
use lis3dh::registers::Lis3dhReg;
use lis3dh::{BusAddress, ControlUpdate, Error, Lis3dh, WHO_AM_I_VALUE};
use log::{debug, error, info, warn};

use crate::conversion::ResolutionMode;

/// Sensor boot procedure completes about 5 ms after power-up.
pub const BOOT_DELAY_MS: u32 = 5;

/// Read back at debug level once configuration is done.
pub const STARTUP_DUMP_REGS: &[Lis3dhReg] = &[
    Lis3dhReg::CtrlReg1,
    Lis3dhReg::CtrlReg4,
    Lis3dhReg::StatusReg,
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StartupReport {
    pub sensor_address: BusAddress,
    pub devices: Vec<BusAddress, 128>,
    pub who_am_i: Result<u8, Error>,
    pub control: ControlUpdate,
    /// Registers of [`STARTUP_DUMP_REGS`] that answered the read-back.
    pub dumped: usize,
}

impl StartupReport {
    pub fn sensor_acknowledged(&self) -> bool {
        self.devices.contains(&self.sensor_address)
    }

    pub fn identity_ok(&self) -> bool {
        self.who_am_i == Ok(WHO_AM_I_VALUE)
    }

    pub fn configured(&self) -> bool {
        self.control.applied()
    }
}

pub fn run<I2C, D>(sensor: &mut Lis3dh<I2C>, mode: &ResolutionMode, delay: &mut D) -> StartupReport
where
    I2C: I2c,
    D: DelayNs,
{
    delay.delay_ms(BOOT_DELAY_MS);

    let devices = sensor.bus().scan();
    for address in &devices {
        info!("Device {:#04x} is connected", address);
    }
    if !devices.contains(&sensor.address()) {
        warn!("sensor address {:#04x} did not acknowledge", sensor.address());
    }

    let who_am_i = sensor.who_am_i();
    match who_am_i {
        Ok(id) => info!("WHO_AM_I: {:#04x} [expected {:#04x}]", id, WHO_AM_I_VALUE),
        Err(err) => error!("WHO_AM_I read failed: {}", err),
    }

    let control = sensor.apply_control_if_changed(&mode.control);

    debug!("Dumping control registers");
    let dumped = sensor.dump_registers(STARTUP_DUMP_REGS);

    StartupReport {
        sensor_address: sensor.address(),
        devices,
        who_am_i,
        control,
        dumped,
    }
}
