//! Register access over a two-wire bus.
//!
//! [`RegisterBus`] owns the I2C peripheral outright. Every operation is a single
//! bus transaction that either completes or yields a [`TransactionError`];
//! nothing is retried here.

use core::fmt;

use embedded_hal::i2c::{ErrorKind, I2c, SevenBitAddress};
use heapless::Vec;
use log::trace;

use crate::registers::SUB_ADDR_AUTO_INCREMENT;

pub type BusAddress = SevenBitAddress;
pub type RegisterAddress = u8;

pub const MAX_BUS_ADDRESS: BusAddress = 0x7F;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransactionError {
    /// Device absent or not responding.
    NoAck,
    /// Line-level fault (bus error, arbitration loss, overrun).
    BusError,
    /// Reserved, the layer enforces no timeout.
    Timeout,
}

impl TransactionError {
    pub fn from_kind(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::NoAcknowledge(_) => TransactionError::NoAck,
            _ => TransactionError::BusError,
        }
    }
}

impl fmt::Display for TransactionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionError::NoAck => f.write_str("no acknowledge"),
            TransactionError::BusError => f.write_str("bus error"),
            TransactionError::Timeout => f.write_str("timeout"),
        }
    }
}

fn classify<E: embedded_hal::i2c::Error>(err: E) -> TransactionError {
    TransactionError::from_kind(err.kind())
}

pub struct RegisterBus<I2C> {
    i2c: I2C,
}

impl<I2C> RegisterBus<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> RegisterBus<I2C> {
    /// Zero-length write, true if the device acknowledged its address.
    pub fn probe(&mut self, address: BusAddress) -> bool {
        if address > MAX_BUS_ADDRESS {
            return false;
        }
        self.i2c.write(address, &[]).is_ok()
    }

    /// Probes 0x00..=0x7F in order and returns every address that acknowledged.
    pub fn scan(&mut self) -> Vec<BusAddress, 128> {
        let mut found = Vec::new();
        for address in 0..=MAX_BUS_ADDRESS {
            if self.probe(address) {
                // capacity covers the whole address space
                let _ = found.push(address);
            }
        }
        found
    }

    pub fn read_register(
        &mut self,
        device: BusAddress,
        reg: RegisterAddress,
    ) -> Result<u8, TransactionError> {
        let mut buf = [0u8];
        self.i2c
            .write_read(device, &[reg], &mut buf)
            .map_err(classify)?;
        trace!("read  {:#04x}:{:#04x} = {:#04x}", device, reg, buf[0]);
        Ok(buf[0])
    }

    pub fn write_register(
        &mut self,
        device: BusAddress,
        reg: RegisterAddress,
        value: u8,
    ) -> Result<(), TransactionError> {
        self.i2c
            .write(device, &[reg, value])
            .map_err(classify)?;
        trace!("write {:#04x}:{:#04x} = {:#04x}", device, reg, value);
        Ok(())
    }

    /// Reads `N` contiguous registers starting at `start` in one transaction.
    pub fn read_burst<const N: usize>(
        &mut self,
        device: BusAddress,
        start: RegisterAddress,
    ) -> Result<[u8; N], TransactionError> {
        let mut buf = [0u8; N];
        self.read_burst_into(device, start, &mut buf)?;
        Ok(buf)
    }

    /// Same as [`read_burst`](Self::read_burst) into a caller buffer. The
    /// sub-address auto-increment bit is set so registers `start..start + len`
    /// are latched by a single addressed read.
    pub fn read_burst_into(
        &mut self,
        device: BusAddress,
        start: RegisterAddress,
        buf: &mut [u8],
    ) -> Result<(), TransactionError> {
        if buf.is_empty() {
            return Ok(());
        }
        self.i2c
            .write_read(device, &[start | SUB_ADDR_AUTO_INCREMENT], buf)
            .map_err(classify)?;
        trace!("burst {:#04x}:{:#04x} len {}", device, start, buf.len());
        Ok(())
    }
}
