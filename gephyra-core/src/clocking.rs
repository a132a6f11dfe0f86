//! Baud/clock negotiator
//!
//! Validates 16-bit codes written to the rate register pairs against the
//! protocol allow-lists and applies matching changes to the live
//! peripherals. Codes outside the lists are ignored, never approximated.

use gephyra_hal::i2c::I2cPort;
use gephyra_hal::uart::SerialPort;
use gephyra_protocol::rates;

/// Apply a baud code to the transport
///
/// Returns the applied rate, or `None` if the code is not allow-listed.
/// Pending output is flushed before the switch so queued bytes keep their
/// framing at the old rate.
pub fn apply_baud<S: SerialPort>(serial: &mut S, code: u16) -> Option<u32> {
    let rate = rates::baud_for_code(code)?;
    if serial.flush().is_err() {
        warn!("flush before baud change failed");
    }
    serial.set_baudrate(rate);
    Some(rate)
}

/// Apply an I2C clock code to the bus
///
/// Returns the applied frequency, or `None` if the code is not
/// allow-listed.
pub fn apply_i2c_clock<B: I2cPort>(bus: &mut B, code: u16) -> Option<u32> {
    let hz = rates::i2c_clock_for_code(code)?;
    bus.set_frequency(hz);
    Some(hz)
}
