use crate::registers::AXIS_DATA_LEN;

/// Left-justified axis words as latched in OUT_X_L..OUT_Z_H, before any shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawSample {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl RawSample {
    pub fn from_le_bytes(buf: &[u8; AXIS_DATA_LEN]) -> Self {
        Self {
            x: i16::from_le_bytes([buf[0], buf[1]]),
            y: i16::from_le_bytes([buf[2], buf[3]]),
            z: i16::from_le_bytes([buf[4], buf[5]]),
        }
    }

    /// X, Y, Z order.
    pub fn axes(&self) -> [i16; 3] {
        [self.x, self.y, self.z]
    }
}
