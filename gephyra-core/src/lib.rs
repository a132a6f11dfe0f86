//! Board-agnostic protocol engine for the Gephyra bridge emulator
//!
//! This crate contains everything between the serial transport and the
//! hardware primitives:
//!
//! - The virtual register file and its write-pair semantics
//! - The GPIO relay (8-bit virtual port over a fixed pin list)
//! - The I2C relay (write/read transactions, last-status tracking)
//! - The baud/I2C-clock negotiator
//! - The dispatcher loop tying it all together ([`Bridge`])
//!
//! All hardware access goes through the `gephyra-hal` traits; all wire
//! semantics come from `gephyra-protocol`.

#![no_std]
#![deny(unsafe_code)]

// This mod MUST go first, so that the others see its macros.
mod fmt;

pub mod bridge;
pub mod clocking;
pub mod i2c;
pub mod port;
pub mod registers;

#[cfg(test)]
pub(crate) mod testutil;

pub use bridge::Bridge;
pub use i2c::I2cRelay;
pub use port::{PortRelay, PORT_WIDTH};
pub use registers::RegisterFile;
