//! Serial transport abstraction
//!
//! The bridge speaks its wire protocol over one serial port. The engine
//! needs byte-at-a-time blocking reads (the framer's suspension point),
//! buffered writes, and a live baud-rate switch for the negotiator.

/// The command transport
///
/// `read_byte` is the engine's main suspension point: it must not return
/// until a byte has arrived. Implementations are free to park the task,
/// wait on an interrupt, or poll internally, as long as the call blocks.
pub trait SerialPort {
    /// Error type for transport operations
    type Error;

    /// Read a single byte, suspending until one is available
    fn read_byte(&mut self) -> Result<u8, Self::Error>;

    /// Write bytes to the transport
    ///
    /// Blocks until all bytes have been accepted (queued or sent).
    fn write_bytes(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Flush any buffered output
    ///
    /// Must complete any in-flight transmission; the negotiator calls this
    /// before a baud-rate switch so queued bytes keep their framing.
    fn flush(&mut self) -> Result<(), Self::Error>;

    /// Reconfigure the line speed
    fn set_baudrate(&mut self, baudrate: u32);
}

/// UART line configuration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baudrate: 9600,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Seven,
    Eight,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}
