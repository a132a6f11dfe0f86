//! Virtual register map
//!
//! The bridge exposes 11 8-bit registers at addresses 0-10. Only the baud
//! pair, the port-config pair, and the I2C-clock pair are writable with
//! effect; the rest are read-only or accepted-but-ignored.

/// Number of addressable registers
pub const REGISTER_COUNT: usize = 11;

/// The register address space
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    /// Baud-rate code, low byte
    BaudLow = 0,
    /// Baud-rate code, high byte
    BaudHigh = 1,
    /// Port direction config, pins 0-3 (fixed at bootstrap in this bridge)
    PortConfig1 = 2,
    /// Port direction config, pins 4-7 (fixed at bootstrap in this bridge)
    PortConfig2 = 3,
    /// Last sampled GPIO port state
    IoState = 4,
    /// Reserved by the reference chip
    Reserved = 5,
    /// Own I2C address (unused; the bridge is master-only)
    I2cAddress = 6,
    /// I2C clock code, low byte
    I2cClockLow = 7,
    /// I2C clock code, high byte
    I2cClockHigh = 8,
    /// I2C timeout config (accepted, never acted on)
    I2cTimeout = 9,
    /// Last I2C transaction status
    I2cStatus = 10,
}

impl Register {
    /// Decode a register address byte
    pub fn from_addr(addr: u8) -> Option<Self> {
        match addr {
            0 => Some(Register::BaudLow),
            1 => Some(Register::BaudHigh),
            2 => Some(Register::PortConfig1),
            3 => Some(Register::PortConfig2),
            4 => Some(Register::IoState),
            5 => Some(Register::Reserved),
            6 => Some(Register::I2cAddress),
            7 => Some(Register::I2cClockLow),
            8 => Some(Register::I2cClockHigh),
            9 => Some(Register::I2cTimeout),
            10 => Some(Register::I2cStatus),
            _ => None,
        }
    }

    /// The register's address
    pub fn addr(self) -> u8 {
        self as u8
    }
}

/// Reset values, indexed by register address
///
/// These mirror the reference chip's power-on defaults: 9600 baud
/// (code 0x02F0), all port pins input, 100 kHz I2C (code 0x0013).
pub const RESET_VALUES: [u8; REGISTER_COUNT] = [
    0xF0, // BaudLow
    0x02, // BaudHigh
    0x55, // PortConfig1
    0x55, // PortConfig2
    0x00, // IoState
    0x00, // Reserved
    0x26, // I2cAddress
    0x13, // I2cClockLow
    0x00, // I2cClockHigh
    0x66, // I2cTimeout
    status::OK, // I2cStatus
];

/// Wire encoding of the I2C status register
///
/// This bridge deviates from the reference chip's status byte space; the
/// values below are the ones clients of this bridge must expect.
pub mod status {
    /// Transaction acknowledged in full
    pub const OK: u8 = 0xF0;
    /// No acknowledge after the address byte
    pub const NACK_ADDRESS: u8 = 0xF1;
    /// A data byte was not acknowledged
    pub const NACK_DATA: u8 = 0xF2;
    /// Transaction timed out
    pub const TIME_OUT: u8 = 0xF8;
}
