use accel_stream::FrameSink;
use embedded_hal_nb::serial::Write;

/// Blocking UART transmitter for frames. Bytes go out in order and the call
/// returns once the last one has left the shift register.
pub struct SerialSink<TX> {
    tx: TX,
}

impl<TX> SerialSink<TX> {
    pub fn new(tx: TX) -> Self {
        Self { tx }
    }
}

impl<TX> FrameSink for SerialSink<TX>
where
    TX: Write<u8>,
{
    type Error = TX::Error;

    fn send(&mut self, frame: &[u8]) -> Result<(), Self::Error> {
        for &byte in frame {
            nb::block!(self.tx.write(byte))?;
        }
        nb::block!(self.tx.flush())
    }
}
