//! Shared test doubles for the HAL traits
//!
//! All three peripherals are replaced by recording fakes: the serial port
//! captures everything the engine sends, the I2C bus records transaction
//! phases and serves canned read data, and the pins loop driven levels
//! back to reads.

use gephyra_hal::gpio::{InputPin, OutputPin};
use gephyra_hal::i2c::{I2cOutcome, I2cPort};
use gephyra_hal::uart::SerialPort;
use heapless::{Deque, Vec};

#[derive(Debug, Default)]
pub struct MockSerial {
    pub rx: Deque<u8, 256>,
    pub tx: Vec<u8, 256>,
    pub flushes: usize,
    /// (flushes seen so far, new rate) per baud change
    pub baud_changes: Vec<(usize, u32), 4>,
}

impl SerialPort for MockSerial {
    type Error = ();

    fn read_byte(&mut self) -> Result<u8, ()> {
        self.rx.pop_front().ok_or(())
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<(), ()> {
        self.tx.extend_from_slice(data).map_err(|_| ())
    }

    fn flush(&mut self) -> Result<(), ()> {
        self.flushes += 1;
        Ok(())
    }

    fn set_baudrate(&mut self, baudrate: u32) {
        self.baud_changes
            .push((self.flushes, baudrate))
            .expect("too many baud changes");
    }
}

#[derive(Debug)]
pub struct MockI2c {
    pub begun: Option<u8>,
    pub written: Vec<u8, 64>,
    /// One send_stop flag per completed transaction
    pub ended: Vec<bool, 4>,
    /// Outcome served by `end`
    pub outcome: I2cOutcome,
    /// Bytes served to `wait_byte` / `read_available`
    pub read_data: Deque<u8, 256>,
    pub requested: Option<(u8, usize)>,
    pub frequency: Option<u32>,
}

impl Default for MockI2c {
    fn default() -> Self {
        Self {
            begun: None,
            written: Vec::new(),
            ended: Vec::new(),
            outcome: I2cOutcome::Ok,
            read_data: Deque::new(),
            requested: None,
            frequency: None,
        }
    }
}

impl I2cPort for MockI2c {
    fn begin(&mut self, address: u8) {
        self.begun = Some(address);
    }

    fn write(&mut self, data: &[u8]) {
        self.written
            .extend_from_slice(data)
            .expect("mock write buffer full");
    }

    fn end(&mut self, send_stop: bool) -> I2cOutcome {
        self.ended.push(send_stop).expect("too many transactions");
        self.outcome
    }

    fn request_read(&mut self, address: u8, count: usize) {
        self.requested = Some((address, count));
    }

    fn wait_byte(&mut self) -> u8 {
        self.read_data.pop_front().expect("no i2c read data queued")
    }

    fn read_available(&mut self) -> Option<u8> {
        self.read_data.pop_front()
    }

    fn set_frequency(&mut self, hz: u32) {
        self.frequency = Some(hz);
    }
}

/// A pin that reads back whatever was last driven onto it
#[derive(Debug, Default, Clone, Copy)]
pub struct MockPin {
    pub level: bool,
}

impl OutputPin for MockPin {
    fn set_high(&mut self) {
        self.level = true;
    }

    fn set_low(&mut self) {
        self.level = false;
    }
}

impl InputPin for MockPin {
    fn is_high(&self) -> bool {
        self.level
    }
}

/// Eight loopback pins, all low
pub fn loopback_pins() -> [MockPin; 8] {
    [MockPin::default(); 8]
}
