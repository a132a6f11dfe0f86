//! Gephyra Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the bridge engine is written
//! against. Board crates (RP2040, STM32, a host-side loopback for tests)
//! implement them; the engine in `gephyra-core` never touches a peripheral
//! register directly.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Engine (gephyra-core)                  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  gephyra-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  board crate  │       │ test doubles  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`uart::SerialPort`] - The command transport
//! - [`i2c::I2cPort`] - I2C bus transactions

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod i2c;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use gpio::{InputPin, IoPin, OutputPin};
pub use i2c::{I2cOutcome, I2cPort};
pub use uart::SerialPort;
