//! I2C relay: executes the bus side of Start frames and tracks last status
//!
//! Write frame layout on the wire:
//!
//! ```text
//! ┌───┬──────┬─────┬────────────┬─────────────┐
//! │ S │ ADDR │ LEN │ DATA[LEN]  │ P (optional)│
//! └───┴──────┴─────┴────────────┴─────────────┘
//! ```
//!
//! The stop condition is asserted only when the frame is exactly
//! `4 + LEN` bytes long and ends with the stop marker; any other shape
//! leaves the bus transaction open so a following read can continue it
//! with a repeated start.

use gephyra_hal::i2c::{I2cOutcome, I2cPort};
use gephyra_protocol::command::{seven_bit_address, CMD_STOP};
use gephyra_protocol::registers::status;
use gephyra_protocol::Frame;
use heapless::Vec;

/// Maximum bytes one read command can request (the count field is one byte)
pub const READ_MAX: usize = 255;

/// Map a transaction outcome onto the status register's wire encoding
///
/// `None` means the outcome has no encoding and a status read must produce
/// no response byte at all. That asymmetry is part of the bridge's
/// documented behavior.
pub fn status_byte(outcome: I2cOutcome) -> Option<u8> {
    match outcome {
        I2cOutcome::Ok => Some(status::OK),
        I2cOutcome::NackAddress => Some(status::NACK_ADDRESS),
        I2cOutcome::NackData => Some(status::NACK_DATA),
        I2cOutcome::TimedOut => Some(status::TIME_OUT),
        I2cOutcome::Unsupported => None,
    }
}

/// The bus side of the engine
pub struct I2cRelay<B: I2cPort> {
    bus: B,
    last: I2cOutcome,
}

impl<B: I2cPort> I2cRelay<B> {
    /// Create a relay; last status starts as [`I2cOutcome::Ok`]
    pub fn new(bus: B) -> Self {
        Self {
            bus,
            last: I2cOutcome::Ok,
        }
    }

    /// Outcome of the most recent write transaction
    pub fn last_outcome(&self) -> I2cOutcome {
        self.last
    }

    /// Access the underlying bus
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Mutable access to the underlying bus (clock negotiation)
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Execute the write path of a Start frame
    ///
    /// A frame too short for its own length byte is malformed: no bus
    /// activity, last status unchanged.
    pub fn write_transaction(&mut self, frame: &Frame) {
        let bytes = frame.as_bytes();
        let (Some(&addr_byte), Some(&len)) = (bytes.get(1), bytes.get(2)) else {
            warn!("i2c write frame missing header");
            return;
        };
        let len = len as usize;
        let Some(data) = bytes.get(3..3 + len) else {
            warn!("i2c write frame shorter than its length byte");
            return;
        };

        let send_stop = bytes.len() == 4 + len && bytes[3 + len] == CMD_STOP;
        let address = seven_bit_address(addr_byte);

        self.bus.begin(address);
        self.bus.write(data);
        self.last = self.bus.end(send_stop);
        trace!("i2c write done, stop={}", send_stop);
    }

    /// Execute the read path of a Start frame
    ///
    /// Suspends until the first byte arrives (the wait lives in the HAL),
    /// then drains whatever else is already available, up to `count`.
    /// The caller forwards the result to the transport and appends the
    /// NUL terminator.
    pub fn read_transaction(&mut self, addr_byte: u8, count: u8) -> Vec<u8, READ_MAX> {
        let mut data = Vec::new();
        if count == 0 {
            return data;
        }

        let address = seven_bit_address(addr_byte);
        self.bus.request_read(address, count as usize);

        // Unbounded wait for the first byte; a silent device stalls the
        // engine here. Documented limitation of the reference behavior.
        let first = self.bus.wait_byte();
        let _ = data.push(first);

        while data.len() < count as usize {
            match self.bus.read_available() {
                Some(byte) => {
                    let _ = data.push(byte);
                }
                None => break,
            }
        }
        data
    }
}
