#![cfg_attr(not(test), no_std)]

pub mod bus;
pub mod registers;
pub mod configs;
pub mod types;

use core::fmt;

use embedded_hal::i2c::I2c;
use log::{debug, error, info};

use registers::*;

pub use bus::{BusAddress, RegisterAddress, RegisterBus, TransactionError};
pub use configs::*;
pub use registers::{DEFAULT_ADDRESS, WHO_AM_I_VALUE};
pub use types::*;

pub struct Lis3dh<I2C> {
    bus: RegisterBus<I2C>,
    address: BusAddress,
}

impl<I2C> Lis3dh<I2C> {
    pub fn bus(&mut self) -> &mut RegisterBus<I2C> {
        &mut self.bus
    }

    pub fn address(&self) -> BusAddress {
        self.address
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    Transaction(TransactionError),
    /// WHO_AM_I answered with something other than 0x33.
    InvalidDevice(u8),
}

impl From<TransactionError> for Error {
    fn from(err: TransactionError) -> Self {
        Error::Transaction(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Transaction(err) => write!(f, "I2C transaction failed: {}", err),
            Error::InvalidDevice(id) => write!(
                f,
                "unexpected WHO_AM_I {:#04x} (expected {:#04x})",
                id, WHO_AM_I_VALUE
            ),
        }
    }
}

impl<I2C: I2c> Lis3dh<I2C> {
    pub fn new(i2c: I2C, address: BusAddress) -> Self {
        Self {
            bus: RegisterBus::new(i2c),
            address,
        }
    }

    pub fn default(i2c: I2C) -> Self {
        Self::new(i2c, DEFAULT_ADDRESS)
    }

    pub fn destroy(self) -> I2C {
        self.bus.release()
    }

    pub fn read_reg(&mut self, reg: u8) -> Result<u8, Error> {
        Ok(self.bus.read_register(self.address, reg)?)
    }

    pub fn write_reg(&mut self, reg: u8, val: u8) -> Result<(), Error> {
        Ok(self.bus.write_register(self.address, reg, val)?)
    }

    pub fn read_bytes(&mut self, start_reg: u8, buffer: &mut [u8]) -> Result<(), Error> {
        Ok(self.bus.read_burst_into(self.address, start_reg, buffer)?)
    }

    pub fn who_am_i(&mut self) -> Result<u8, Error> {
        self.read_reg(Lis3dhReg::WhoAmI.into())
    }

    pub fn check_identity(&mut self) -> Result<(), Error> {
        match self.who_am_i()? {
            WHO_AM_I_VALUE => Ok(()),
            other => Err(Error::InvalidDevice(other)),
        }
    }

    pub fn read_status(&mut self) -> Result<StatusFlags, Error> {
        let status = self.read_reg(Lis3dhReg::StatusReg.into())?;
        Ok(StatusFlags::from_bits_truncate(status))
    }

    /// OUT_X_L..OUT_Z_H in a single auto-incrementing read, so all three axes
    /// come from the same latched sample.
    pub fn read_axes_raw(&mut self) -> Result<[u8; AXIS_DATA_LEN], Error> {
        Ok(self.bus.read_burst(self.address, Lis3dhReg::OutXL.into())?)
    }

    pub fn read_sample(&mut self) -> Result<RawSample, Error> {
        self.read_axes_raw().map(|buf| RawSample::from_le_bytes(&buf))
    }

    /// Reads both control registers, then writes the target into each one
    /// whose stored value differs. A register that could not be read is
    /// written anyway. Each register's outcome is reported on its own, so a
    /// fault on one never skips the other.
    pub fn apply_control_if_changed(&mut self, target: &ControlConfiguration) -> ControlUpdate {
        let current_reg1 = self.read_logged(Lis3dhReg::CtrlReg1);
        let current_reg4 = self.read_logged(Lis3dhReg::CtrlReg4);

        ControlUpdate {
            ctrl_reg1: self.write_logged(Lis3dhReg::CtrlReg1, current_reg1, target.ctrl_reg1),
            ctrl_reg4: self.write_logged(Lis3dhReg::CtrlReg4, current_reg4, target.ctrl_reg4),
        }
    }

    fn read_logged(&mut self, reg: Lis3dhReg) -> Option<u8> {
        match self.read_reg(reg.addr()) {
            Ok(value) => {
                info!("{}: {:#04x}", reg.name(), value);
                Some(value)
            }
            Err(err) => {
                error!("{} read failed: {}", reg.name(), err);
                None
            }
        }
    }

    fn write_logged(
        &mut self,
        reg: Lis3dhReg,
        current: Option<u8>,
        target: u8,
    ) -> Result<RegisterUpdate, Error> {
        let update = self.write_if_changed(reg, current, target);
        if let Err(err) = &update {
            error!("{} write of {:#04x} failed: {}", reg.name(), target, err);
        }
        update
    }

    /// Reads and logs every register in `regs` at debug level. Unreadable
    /// registers are logged and skipped. Returns how many could be read.
    pub fn dump_registers(&mut self, regs: &[Lis3dhReg]) -> usize {
        let mut readable = 0;
        for &reg in regs {
            match self.read_reg(reg.addr()) {
                Ok(v) => {
                    readable += 1;
                    debug!("{:<12}({:#04x}) = {:#04x} 0b{:08b}", reg.name(), reg.addr(), v, v);
                }
                Err(err) => debug!("{:<12}({:#04x}) unreadable: {}", reg.name(), reg.addr(), err),
            }
        }
        readable
    }
}
