//! Command byte set
//!
//! Each command is a single ASCII byte at the start of a line. The set is
//! closed: anything else is an unsupported command and produces no
//! response.

/// Begin an I2C transaction ('S')
pub const CMD_START: u8 = 0x53;
/// End an I2C transaction ('P'); also the trailing stop marker inside
/// write frames
pub const CMD_STOP: u8 = 0x50;
/// Read an internal register ('R')
pub const CMD_REG_READ: u8 = 0x52;
/// Write internal registers ('W')
pub const CMD_REG_WRITE: u8 = 0x57;
/// Sample the GPIO port ('I')
pub const CMD_GPIO_READ: u8 = 0x49;
/// Drive the GPIO port ('O')
pub const CMD_GPIO_WRITE: u8 = 0x4F;
/// Power down ('Z'); accepted, no effect in this bridge
pub const CMD_POWER_DOWN: u8 = 0x5A;
/// Read the device identity string ('V')
pub const CMD_READ_ID: u8 = 0x56;

/// Device identity returned for [`Command::ReadId`]: 15 ASCII bytes plus NUL
pub const DEVICE_IDENTITY: [u8; 16] = *b"GEPHYRA-700 1.0\0";

/// The closed command set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// I2C transaction; read or write selected by the address byte's LSB
    Start,
    /// Standalone stop marker between transactions
    Stop,
    /// Register read
    RegRead,
    /// Register write
    RegWrite,
    /// GPIO port sample
    GpioRead,
    /// GPIO port drive
    GpioWrite,
    /// Power down (no-op)
    PowerDown,
    /// Identity query
    ReadId,
}

impl Command {
    /// Decode a leading command byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            CMD_START => Some(Command::Start),
            CMD_STOP => Some(Command::Stop),
            CMD_REG_READ => Some(Command::RegRead),
            CMD_REG_WRITE => Some(Command::RegWrite),
            CMD_GPIO_READ => Some(Command::GpioRead),
            CMD_GPIO_WRITE => Some(Command::GpioWrite),
            CMD_POWER_DOWN => Some(Command::PowerDown),
            CMD_READ_ID => Some(Command::ReadId),
            _ => None,
        }
    }

    /// The wire byte for this command
    pub fn byte(self) -> u8 {
        match self {
            Command::Start => CMD_START,
            Command::Stop => CMD_STOP,
            Command::RegRead => CMD_REG_READ,
            Command::RegWrite => CMD_REG_WRITE,
            Command::GpioRead => CMD_GPIO_READ,
            Command::GpioWrite => CMD_GPIO_WRITE,
            Command::PowerDown => CMD_POWER_DOWN,
            Command::ReadId => CMD_READ_ID,
        }
    }
}

/// True if an I2C address byte selects the read direction (LSB set)
pub fn address_is_read(addr_byte: u8) -> bool {
    addr_byte & 0x01 != 0
}

/// Extract the 7-bit device address from a wire address byte
pub fn seven_bit_address(addr_byte: u8) -> u8 {
    addr_byte >> 1
}
