//! The virtual register file and register-write semantics
//!
//! The file owns the 11 slots and their reset values. Writes arrive as two
//! (address, value) pairs per command; the unordered address pair selects
//! one of three defined actions, everything else is ignored.

use gephyra_protocol::registers::{Register, REGISTER_COUNT, RESET_VALUES};

/// The bridge's 11 addressable 8-bit registers
#[derive(Debug, Clone)]
pub struct RegisterFile {
    slots: [u8; REGISTER_COUNT],
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterFile {
    /// Create a register file holding the reset values
    pub fn new() -> Self {
        Self {
            slots: RESET_VALUES,
        }
    }

    /// Read a register slot
    pub fn get(&self, reg: Register) -> u8 {
        self.slots[reg.addr() as usize]
    }

    /// Overwrite a register slot
    pub fn set(&mut self, reg: Register, value: u8) {
        self.slots[reg.addr() as usize] = value;
    }
}

/// Action selected by a register-write address pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WriteAction {
    /// Port-config pair: acknowledged, no direction change (directions are
    /// fixed at bootstrap in this bridge)
    PortConfig,
    /// Baud pair: carries the combined 16-bit baud code
    SetBaud(u16),
    /// I2C clock pair: carries the combined 16-bit clock code
    SetI2cClock(u16),
    /// Any other address pair: ignored
    Unknown,
}

/// Classify one register-write command
///
/// The pair is unordered: `W 0 lo 1 hi` and `W 1 hi 0 lo` select the same
/// action. The 16-bit codes combine as `high << 8 | low`.
pub fn classify_write(pair0: (u8, u8), pair1: (u8, u8)) -> WriteAction {
    let reg0 = Register::from_addr(pair0.0);
    let reg1 = Register::from_addr(pair1.0);
    let (Some(reg0), Some(reg1)) = (reg0, reg1) else {
        return WriteAction::Unknown;
    };

    // Pull the value written to one specific register of the pair
    let value_for = |reg: Register| -> u8 {
        if reg0 == reg {
            pair0.1
        } else {
            pair1.1
        }
    };

    match (reg0.min(reg1), reg0.max(reg1)) {
        (Register::PortConfig1, Register::PortConfig2) => WriteAction::PortConfig,
        (Register::BaudLow, Register::BaudHigh) => {
            let code = u16::from_be_bytes([value_for(Register::BaudHigh), value_for(Register::BaudLow)]);
            WriteAction::SetBaud(code)
        }
        (Register::I2cClockLow, Register::I2cClockHigh) => {
            let code = u16::from_be_bytes([
                value_for(Register::I2cClockHigh),
                value_for(Register::I2cClockLow),
            ]);
            WriteAction::SetI2cClock(code)
        }
        _ => WriteAction::Unknown,
    }
}
