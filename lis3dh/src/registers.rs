use bitflags::bitflags;
use paste::paste;

macro_rules! registers {
    (
        $enum_name:ident, $slice_name:ident {
            $($name:ident = $val:expr),* $(,)?
        }
    ) => {
        #[repr(u8)]
        #[derive(Copy, Clone, Debug, PartialEq, Eq)]
        pub enum $enum_name {
            $($name = $val),*
        }

        pub const $slice_name: &[$enum_name] = &[
            $($enum_name::$name),*
        ];

        impl $enum_name {
            pub fn name(&self) -> &'static str {
                match self {
                    $($enum_name::$name => stringify!($name),)*
                }
            }
        }

        impl Register for $enum_name {
            fn addr(self) -> u8 {
                self as u8
            }
        }

        impl From<$enum_name> for u8 {
            fn from(r: $enum_name) -> u8 {
                r as u8
            }
        }

        paste! {
            /// Reverse lookup of a register name from its address.
            pub fn [<$enum_name:snake _name>](addr: u8) -> Option<&'static str> {
                $slice_name.iter().find(|r| r.addr() == addr).map(|r| r.name())
            }
        }
    };
}

pub trait Register: Copy {
    fn addr(self) -> u8;
}

/// 7-bit address with SA0 pulled low.
pub const DEFAULT_ADDRESS: u8 = 0x18;
/// 7-bit address with SA0 pulled high.
pub const ALT_ADDRESS: u8 = 0x19;

pub const WHO_AM_I_VALUE: u8 = 0x33;

/// OUT_X_L..OUT_Z_H, little-endian per axis.
pub const AXIS_DATA_LEN: usize = 6;

registers! {
    Lis3dhReg, LIS3DH_REGS {
        StatusRegAux    = 0x07,
        OutAdc1L        = 0x08,
        OutAdc1H        = 0x09,
        OutAdc2L        = 0x0A,
        OutAdc2H        = 0x0B,
        OutAdc3L        = 0x0C,
        OutAdc3H        = 0x0D,
        WhoAmI          = 0x0F,
        CtrlReg0        = 0x1E,
        TempCfgReg      = 0x1F,
        CtrlReg1        = 0x20,
        CtrlReg2        = 0x21,
        CtrlReg3        = 0x22,
        CtrlReg4        = 0x23,
        CtrlReg5        = 0x24,
        CtrlReg6        = 0x25,
        Reference       = 0x26,
        StatusReg       = 0x27,
        OutXL           = 0x28,
        OutXH           = 0x29,
        OutYL           = 0x2A,
        OutYH           = 0x2B,
        OutZL           = 0x2C,
        OutZH           = 0x2D,
        FifoCtrlReg     = 0x2E,
        FifoSrcReg      = 0x2F,
        Int1Cfg         = 0x30,
        Int1Src         = 0x31,
        Int1Ths         = 0x32,
        Int1Duration    = 0x33,
        Int2Cfg         = 0x34,
        Int2Src         = 0x35,
        Int2Ths         = 0x36,
        Int2Duration    = 0x37,
        ClickCfg        = 0x38,
        ClickSrc        = 0x39,
        ClickThs        = 0x3A,
        TimeLimit       = 0x3B,
        TimeLatency     = 0x3C,
        TimeWindow      = 0x3D,
        ActThs          = 0x3E,
        ActDur          = 0x3F,
    }
}

/* STATUS_REG
 * B7    B6   B5   B4   B3    B2   B1   B0
 * ZYXOR ZOR  YOR  XOR  ZYXDA ZDA  YDA  XDA
*/
bitflags! {
    pub struct StatusFlags: u8 {
        const ZYXOR = 1 << 7;
        const ZOR   = 1 << 6;
        const YOR   = 1 << 5;
        const XOR   = 1 << 4;
        const ZYXDA = 1 << 3;
        const ZDA   = 1 << 2;
        const YDA   = 1 << 1;
        const XDA   = 1 << 0;
    }
}

/// A new X, Y and Z sample set is latched (ZYXDA, bit 3).
pub const fn is_new_data_available(status: u8) -> bool {
    status & StatusFlags::ZYXDA.bits() != 0
}

/// A new sample set overwrote one that was never read (ZYXOR, bit 7).
pub const fn is_data_overrun(status: u8) -> bool {
    status & StatusFlags::ZYXOR.bits() != 0
}

impl StatusFlags {
    pub fn new_data_available(&self) -> bool {
        is_new_data_available(self.bits())
    }

    pub fn data_overrun(&self) -> bool {
        is_data_overrun(self.bits())
    }
}

/* CTRL_REG1
 * B7   B6   B5   B4   B3   B2   B1   B0
 * ODR3 ODR2 ODR1 ODR0 LPen Zen  Yen  Xen
*/
pub const CTRL1_ODR_LOC: u8 = 4;
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DataRate {
    PowerDown       = 0,
    Hz1             = 1,
    Hz10            = 2,
    Hz25            = 3,
    Hz50            = 4,
    Hz100           = 5,
    Hz200           = 6,
    Hz400           = 7,
    LowPowerHz1600  = 8,
    Hz1344          = 9, // 5376 Hz in low-power mode
}

bitflags! {
    pub struct CtrlReg1Flags: u8 {
        const LPEN  = 1 << 3;
        const ZEN   = 1 << 2;
        const YEN   = 1 << 1;
        const XEN   = 1 << 0;
        const XYZ_EN = Self::XEN.bits | Self::YEN.bits | Self::ZEN.bits;
    }
}

/* CTRL_REG4
 * B7   B6   B5   B4   B3   B2   B1   B0
 * BDU  BLE  FS1  FS0  HR   ST1  ST0  SIM
*/
bitflags! {
    pub struct CtrlReg4Flags: u8 {
        const BDU   = 1 << 7;
        const BLE   = 1 << 6;
        const HR    = 1 << 3;
        const SIM   = 1 << 0;
    }
}

pub const CTRL4_FS_LOC: u8 = 4;
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FullScale {
    G2  = 0,
    G4  = 1,
    G8  = 2,
    G16 = 3,
}

/// Sub-address MSB, asks the device to auto-increment across a multi-byte read.
pub const SUB_ADDR_AUTO_INCREMENT: u8 = 0x80;
