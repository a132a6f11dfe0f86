//! I2C bus abstraction
//!
//! The bridge's I2C relay needs finer control than a plain write/read pair:
//! a write transaction may be left open (no stop condition) so a following
//! read can continue it with a repeated start. The trait therefore exposes
//! the transaction phases separately instead of one-shot transfers.

/// Result of a completed I2C write transaction
///
/// Persists in the engine as "last status" until the next write; clients
/// fetch it through a register read, never synchronously.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cOutcome {
    /// Transaction completed, all bytes acknowledged
    Ok,
    /// No acknowledge after the address byte
    NackAddress,
    /// A data byte was not acknowledged
    NackData,
    /// The bus transaction timed out
    ///
    /// The engine never imposes a deadline itself; only an implementation
    /// that bounds its waits will ever report this.
    TimedOut,
    /// The controller could not perform the transaction
    Unsupported,
}

/// I2C bus master
///
/// One transaction is built up as `begin`, any number of `write` calls,
/// then `end`. Reads are requested as a whole and drained byte-wise.
pub trait I2cPort {
    /// Start (or restart) a write transaction to a 7-bit address
    fn begin(&mut self, address: u8);

    /// Queue data bytes for the open transaction
    fn write(&mut self, data: &[u8]);

    /// Execute the queued transaction
    ///
    /// With `send_stop` false the bus is left claimed so the next
    /// transaction begins with a repeated start.
    fn end(&mut self, send_stop: bool) -> I2cOutcome;

    /// Request `count` bytes from a 7-bit address
    fn request_read(&mut self, address: u8, count: usize);

    /// Take the next received byte, suspending until one is available
    ///
    /// This is the relay's read-side suspension point. The wait is
    /// unbounded at this interface; implementations may bound it and
    /// surface the failure as [`I2cOutcome::TimedOut`] from [`I2cPort::end`].
    fn wait_byte(&mut self) -> u8;

    /// Take the next received byte if one has already arrived
    fn read_available(&mut self) -> Option<u8>;

    /// Reconfigure the bus clock
    fn set_frequency(&mut self, hz: u32);
}

/// I2C configuration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self {
            frequency: 100_000, // 100kHz standard mode
        }
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self { frequency: 100_000 };

    /// Fast mode (400 kHz)
    pub const FAST: Self = Self { frequency: 400_000 };
}
