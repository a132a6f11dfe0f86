//! Gephyra bridge wire protocol
//!
//! This crate defines the UART-side protocol of the bridge controller:
//! line framing, the command byte set, the virtual register map, and the
//! baud/I2C-clock allow-list tables. It is deliberately free of hardware
//! concerns; the engine in `gephyra-core` binds these definitions to HAL
//! traits.
//!
//! # Protocol overview
//!
//! Commands arrive as LF-terminated lines; CR is discarded on sight.
//! The first byte of a line selects the command, the rest is payload:
//!
//! ```text
//! ┌─────────┬──────────────────────────┬────┐
//! │ COMMAND │ PAYLOAD                  │ LF │
//! │ 1B      │ 0–63B, command-specific  │ 1B │
//! └─────────┴──────────────────────────┴────┘
//! ```
//!
//! Responses are raw bytes with no framing of their own; a client must
//! know how many bytes each query produces.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod command;
pub mod frame;
pub mod rates;
pub mod registers;

pub use command::{Command, DEVICE_IDENTITY};
pub use frame::{Frame, FrameError, LineFramer, FRAME_CAPACITY};
pub use registers::Register;
