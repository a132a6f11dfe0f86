//! GPIO relay: an 8-bit virtual port over a fixed ordered pin list
//!
//! Bit i of the port maps to pin i of the list, for reads and writes
//! alike. The list order is configuration chosen at bootstrap, never
//! runtime state.

use gephyra_hal::gpio::IoPin;

/// Width of the virtual port in bits (and pins)
pub const PORT_WIDTH: usize = 8;

/// The virtual port and its cached last-known state
pub struct PortRelay<P: IoPin> {
    pins: [P; PORT_WIDTH],
    cached: u8,
}

impl<P: IoPin> PortRelay<P> {
    /// Create a relay over an ordered pin list
    ///
    /// The cache starts at 0; it only becomes meaningful after the first
    /// sample or drive.
    pub fn new(pins: [P; PORT_WIDTH]) -> Self {
        Self { pins, cached: 0 }
    }

    /// Sample all pins in list order into a mask and cache it
    pub fn sample(&mut self) -> u8 {
        let mut mask = 0u8;
        for (i, pin) in self.pins.iter().enumerate() {
            if pin.is_high() {
                mask |= 1 << i;
            }
        }
        self.cached = mask;
        mask
    }

    /// Drive each pin to its bit's level, in list order, and cache the mask
    pub fn drive(&mut self, mask: u8) {
        for (i, pin) in self.pins.iter_mut().enumerate() {
            pin.set_state(mask & (1 << i) != 0);
        }
        self.cached = mask;
    }

    /// The last sampled or driven state
    pub fn cached(&self) -> u8 {
        self.cached
    }

    /// Access the underlying pins
    pub fn pins(&self) -> &[P; PORT_WIDTH] {
        &self.pins
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{loopback_pins, MockPin};

    #[test]
    fn test_drive_sets_listed_pins() {
        let mut port = PortRelay::new(loopback_pins());
        port.drive(0b0000_0101);
        assert!(port.pins()[0].level);
        assert!(!port.pins()[1].level);
        assert!(port.pins()[2].level);
        for i in 3..PORT_WIDTH {
            assert!(!port.pins()[i].level);
        }
        assert_eq!(port.cached(), 0b0000_0101);
    }

    #[test]
    fn test_sample_reads_loopback() {
        let mut port = PortRelay::new(loopback_pins());
        port.drive(0b1010_0001);
        assert_eq!(port.sample(), 0b1010_0001);
    }

    #[test]
    fn test_sample_caches_external_levels() {
        let mut pins = loopback_pins();
        pins[7] = MockPin { level: true };
        let mut port = PortRelay::new(pins);
        assert_eq!(port.sample(), 0b1000_0000);
        assert_eq!(port.cached(), 0b1000_0000);
    }
}
