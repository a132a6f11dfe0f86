//! Baud-rate and I2C-clock allow-lists
//!
//! Live rate changes are requested by writing a 16-bit code into a
//! register pair. Only codes in these tables take effect; anything else
//! is ignored, never approximated.

/// Protocol baud code → real UART rate
pub const BAUD_TABLE: [(u16, u32); 10] = [
    (0x02F0, 9_600),
    (0x01F0, 14_400),
    (0x0170, 19_200),
    (0x00F0, 28_800),
    (0x00B0, 38_400),
    (0x0070, 57_600),
    (0x0050, 76_800),
    (0x0030, 115_200),
    (0x0010, 230_400),
    (0x0000, 460_800),
];

/// Protocol clock code → real I2C bus frequency in Hz
pub const I2C_CLOCK_TABLE: [(u16, u32); 2] = [
    (0x0005, 400_000),
    (0x0013, 100_000),
];

/// Look up a baud code; `None` means the code is not allow-listed
pub fn baud_for_code(code: u16) -> Option<u32> {
    BAUD_TABLE
        .iter()
        .find(|&&(c, _)| c == code)
        .map(|&(_, rate)| rate)
}

/// Look up an I2C clock code; `None` means the code is not allow-listed
pub fn i2c_clock_for_code(code: u16) -> Option<u32> {
    I2C_CLOCK_TABLE
        .iter()
        .find(|&&(c, _)| c == code)
        .map(|&(_, hz)| hz)
}
