#![allow(dead_code)]

pub use lis3dh::Lis3dh;

pub use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};
pub use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTrans};

pub const DEV_ADDR: u8 = 0b001_1000;

pub const NACK: ErrorKind = ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address);

pub fn trans_who_am_i(value: u8) -> I2cTrans {
    I2cTrans::write_read(DEV_ADDR, vec![0x0F], vec![value])
}

pub fn trans_read(reg: u8, value: u8) -> I2cTrans {
    I2cTrans::write_read(DEV_ADDR, vec![reg], vec![value])
}

pub fn trans_write(reg: u8, value: u8) -> I2cTrans {
    I2cTrans::write(DEV_ADDR, vec![reg, value])
}

pub fn trans_axes(data: [u8; 6]) -> I2cTrans {
    I2cTrans::write_read(DEV_ADDR, vec![0x28 | 0x80], data.to_vec())
}
