#![allow(dead_code)]

use core::convert::Infallible;

pub use accel_stream::FrameSink;
pub use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};
pub use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTrans};
pub use lis3dh::Lis3dh;

pub const DEV_ADDR: u8 = 0x18;

pub const NACK: ErrorKind = ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address);

pub fn trans_read(reg: u8, value: u8) -> I2cTrans {
    I2cTrans::write_read(DEV_ADDR, vec![reg], vec![value])
}

pub fn trans_write(reg: u8, value: u8) -> I2cTrans {
    I2cTrans::write(DEV_ADDR, vec![reg, value])
}

pub fn trans_status(value: u8) -> I2cTrans {
    trans_read(0x27, value)
}

pub fn trans_axes(data: [u8; 6]) -> I2cTrans {
    I2cTrans::write_read(DEV_ADDR, vec![0x28 | 0x80], data.to_vec())
}

/// One zero-length write per address, acknowledged only for `present`.
pub fn trans_scan(present: &[u8]) -> Vec<I2cTrans> {
    (0u8..=0x7F)
        .map(|addr| {
            let probe = I2cTrans::write(addr, vec![]);
            if present.contains(&addr) {
                probe
            } else {
                probe.with_error(NACK)
            }
        })
        .collect()
}

#[derive(Default)]
pub struct VecSink {
    pub frames: Vec<Vec<u8>>,
}

impl FrameSink for VecSink {
    type Error = Infallible;

    fn send(&mut self, frame: &[u8]) -> Result<(), Self::Error> {
        self.frames.push(frame.to_vec());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxBusy;

#[derive(Default)]
pub struct FailingSink {
    pub attempts: usize,
}

impl FrameSink for FailingSink {
    type Error = TxBusy;

    fn send(&mut self, _frame: &[u8]) -> Result<(), Self::Error> {
        self.attempts += 1;
        Err(TxBusy)
    }
}
