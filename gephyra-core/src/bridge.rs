//! The dispatcher: one loop alternating frame acquisition and dispatch
//!
//! Single-threaded and cooperative. All mutable protocol state (register
//! file, port cache, last I2C status) lives inside [`Bridge`]; only one
//! frame is ever in flight, so no synchronization exists or is needed.
//! The engine has no fatal error class: every failure is logged and the
//! loop returns to listening.

use gephyra_hal::gpio::IoPin;
use gephyra_hal::i2c::I2cPort;
use gephyra_hal::uart::SerialPort;
use gephyra_protocol::command::{self, Command, DEVICE_IDENTITY};
use gephyra_protocol::registers::Register;
use gephyra_protocol::{Frame, FrameError, LineFramer};

use crate::clocking;
use crate::i2c::{status_byte, I2cRelay};
use crate::port::{PortRelay, PORT_WIDTH};
use crate::registers::{classify_write, RegisterFile, WriteAction};

/// The protocol engine
///
/// Owns the transport, both relays, the register file, and the framer.
/// Construct it at bootstrap (pin directions already set) and call
/// [`Bridge::run`].
pub struct Bridge<S, B, P>
where
    S: SerialPort,
    B: I2cPort,
    P: IoPin,
{
    serial: S,
    i2c: I2cRelay<B>,
    port: PortRelay<P>,
    regs: RegisterFile,
    framer: LineFramer,
}

impl<S, B, P> Bridge<S, B, P>
where
    S: SerialPort,
    B: I2cPort,
    P: IoPin,
{
    /// Create an engine over its three peripherals
    pub fn new(serial: S, bus: B, pins: [P; PORT_WIDTH]) -> Self {
        Self {
            serial,
            i2c: I2cRelay::new(bus),
            port: PortRelay::new(pins),
            regs: RegisterFile::new(),
            framer: LineFramer::new(),
        }
    }

    /// Run the engine forever
    ///
    /// Never terminates on protocol failures; the bridge is
    /// always-listening by design.
    pub fn run(&mut self) -> ! {
        info!("bridge engine running");
        loop {
            match self.read_frame() {
                Ok(frame) => self.dispatch(&frame),
                Err(FrameError::Overflow) => warn!("frame overflow, line discarded"),
            }
        }
    }

    /// Block until one complete frame or an overflow is available
    ///
    /// The only transport suspension point of the engine.
    fn read_frame(&mut self) -> Result<Frame, FrameError> {
        loop {
            let byte = match self.serial.read_byte() {
                Ok(byte) => byte,
                Err(_) => {
                    warn!("transport read error");
                    continue;
                }
            };
            if let Some(frame) = self.framer.push(byte)? {
                return Ok(frame);
            }
        }
    }

    /// Route one completed frame; all results are transport side effects
    pub fn dispatch(&mut self, frame: &Frame) {
        // Bare (CR)LF lines are valid keep-alive noise
        let Some(byte) = frame.command_byte() else {
            return;
        };
        let Some(cmd) = Command::from_byte(byte) else {
            warn!("unsupported command byte {:#x}", byte);
            return;
        };

        match cmd {
            Command::Start => self.handle_start(frame),
            // A standalone stop marker between transactions; nothing to do
            Command::Stop => trace!("standalone stop marker"),
            Command::RegRead => self.handle_reg_read(frame),
            Command::RegWrite => self.handle_reg_write(frame),
            Command::GpioRead => self.handle_gpio_read(),
            Command::GpioWrite => self.handle_gpio_write(frame),
            Command::PowerDown => debug!("power-down accepted, no effect"),
            Command::ReadId => self.handle_read_id(),
        }
    }

    fn handle_start(&mut self, frame: &Frame) {
        let payload = frame.payload();
        let Some(&addr_byte) = payload.first() else {
            warn!("start frame missing address byte");
            return;
        };

        if command::address_is_read(addr_byte) {
            let Some(&count) = payload.get(1) else {
                warn!("i2c read frame missing count byte");
                return;
            };
            let data = self.i2c.read_transaction(addr_byte, count);
            self.send(&data);
            // NUL terminator: extension of this bridge over the baseline
            // read-data framing
            self.send(&[0x00]);
        } else {
            self.i2c.write_transaction(frame);
        }
    }

    fn handle_reg_read(&mut self, frame: &Frame) {
        let Some(&addr) = frame.payload().first() else {
            warn!("register read missing address byte");
            return;
        };
        match Register::from_addr(addr) {
            Some(Register::IoState) => {
                let state = self.port.cached();
                self.send(&[state]);
            }
            Some(Register::I2cStatus) => {
                match status_byte(self.i2c.last_outcome()) {
                    Some(byte) => self.send(&[byte]),
                    // Outcomes outside the mapped set produce no response
                    // byte at all; documented asymmetry
                    None => debug!("i2c status has no wire encoding, response suppressed"),
                }
            }
            _ => warn!("register read of unsupported address {}", addr),
        }
    }

    fn handle_reg_write(&mut self, frame: &Frame) {
        let payload = frame.payload();
        // Two (address, value) pairs; a trailing stop marker is ignored
        if payload.len() < 4 {
            warn!("register write frame too short");
            return;
        }
        let pair0 = (payload[0], payload[1]);
        let pair1 = (payload[2], payload[3]);

        match classify_write(pair0, pair1) {
            WriteAction::PortConfig => {
                // Pin directions are fixed at bootstrap in this bridge;
                // acknowledge without touching hardware
                self.mirror(pair0);
                self.mirror(pair1);
                debug!("port config accepted, directions unchanged");
            }
            WriteAction::SetBaud(code) => {
                match clocking::apply_baud(&mut self.serial, code) {
                    Some(rate) => {
                        self.mirror(pair0);
                        self.mirror(pair1);
                        info!("baud rate set to {}", rate);
                    }
                    None => debug!("baud code {:#x} not allow-listed", code),
                }
            }
            WriteAction::SetI2cClock(code) => {
                match clocking::apply_i2c_clock(self.i2c.bus_mut(), code) {
                    Some(hz) => {
                        self.mirror(pair0);
                        self.mirror(pair1);
                        info!("i2c clock set to {} Hz", hz);
                    }
                    None => debug!("i2c clock code {:#x} not allow-listed", code),
                }
            }
            WriteAction::Unknown => {
                debug!("register write to unknown pair ignored");
            }
        }
        // No response byte is ever written for register-write
    }

    fn handle_gpio_read(&mut self) {
        let mask = self.port.sample();
        self.send(&[mask]);
    }

    fn handle_gpio_write(&mut self, frame: &Frame) {
        let Some(&mask) = frame.payload().first() else {
            warn!("gpio write missing port mask");
            return;
        };
        self.port.drive(mask);
    }

    fn handle_read_id(&mut self) {
        self.send(&DEVICE_IDENTITY);
    }

    /// Best-effort transport write; failures are logged, never fatal
    fn send(&mut self, bytes: &[u8]) {
        if self.serial.write_bytes(bytes).is_err() {
            warn!("transport write failed");
        }
    }

    /// Mirror an accepted (address, value) pair into the register file
    fn mirror(&mut self, (addr, value): (u8, u8)) {
        if let Some(reg) = Register::from_addr(addr) {
            self.regs.set(reg, value);
        }
    }

    /// The register file (diagnostics)
    pub fn registers(&self) -> &RegisterFile {
        &self.regs
    }

    /// The GPIO relay
    pub fn port(&self) -> &PortRelay<P> {
        &self.port
    }

    /// The I2C relay
    pub fn i2c(&self) -> &I2cRelay<B> {
        &self.i2c
    }

    /// Mutable access to the I2C relay (board bring-up, tests)
    pub fn i2c_mut(&mut self) -> &mut I2cRelay<B> {
        &mut self.i2c
    }

    /// Mutable access to the transport (board bring-up, tests)
    pub fn serial_mut(&mut self) -> &mut S {
        &mut self.serial
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{loopback_pins, MockI2c, MockPin, MockSerial};
    use gephyra_hal::i2c::I2cOutcome;

    fn bridge() -> Bridge<MockSerial, MockI2c, MockPin> {
        Bridge::new(MockSerial::default(), MockI2c::default(), loopback_pins())
    }

    fn dispatch_line(bridge: &mut Bridge<MockSerial, MockI2c, MockPin>, bytes: &[u8]) {
        let frame = Frame::from_slice(bytes).unwrap();
        bridge.dispatch(&frame);
    }

    #[test]
    fn test_read_identity_is_constant() {
        let mut b = bridge();
        dispatch_line(&mut b, b"V");
        dispatch_line(&mut b, b"V");
        let tx = b.serial_mut().tx.clone();
        assert_eq!(tx.len(), 32);
        assert_eq!(&tx[..16], &DEVICE_IDENTITY);
        assert_eq!(&tx[16..], &DEVICE_IDENTITY);
        assert_eq!(tx[15], 0x00);
    }

    #[test]
    fn test_unsupported_command_produces_no_response() {
        let mut b = bridge();
        dispatch_line(&mut b, b"Q\x01\x02");
        assert!(b.serial_mut().tx.is_empty());
        assert!(b.i2c().bus().ended.is_empty());
    }

    #[test]
    fn test_empty_and_bare_stop_frames_are_quiet() {
        let mut b = bridge();
        dispatch_line(&mut b, b"");
        dispatch_line(&mut b, b"P");
        assert!(b.serial_mut().tx.is_empty());
    }

    #[test]
    fn test_power_down_is_a_no_op() {
        let mut b = bridge();
        dispatch_line(&mut b, b"Z");
        assert!(b.serial_mut().tx.is_empty());
        assert!(b.i2c().bus().ended.is_empty());
        assert_eq!(b.port().cached(), 0);
    }

    #[test]
    fn test_gpio_write_then_read_loops_back() {
        let mut b = bridge();
        dispatch_line(&mut b, &[b'O', 0b0000_0101]);
        // Write produces no response byte
        assert!(b.serial_mut().tx.is_empty());
        assert!(b.port().pins()[0].level);
        assert!(b.port().pins()[2].level);
        assert!(!b.port().pins()[1].level);

        dispatch_line(&mut b, b"I");
        assert_eq!(b.serial_mut().tx.as_slice(), &[0b0000_0101]);
    }

    #[test]
    fn test_reg_read_io_state_uses_cache() {
        let mut b = bridge();
        dispatch_line(&mut b, &[b'O', 0xA5]);
        dispatch_line(&mut b, &[b'R', Register::IoState.addr()]);
        assert_eq!(b.serial_mut().tx.as_slice(), &[0xA5]);
    }

    #[test]
    fn test_reg_read_i2c_status_mapping() {
        for (outcome, expected) in [
            (I2cOutcome::Ok, 0xF0),
            (I2cOutcome::NackAddress, 0xF1),
            (I2cOutcome::NackData, 0xF2),
            (I2cOutcome::TimedOut, 0xF8),
        ] {
            let mut b = bridge();
            b.i2c_mut().bus_mut().outcome = outcome;
            dispatch_line(&mut b, &[b'S', 0x48, 0, b'P']);
            dispatch_line(&mut b, &[b'R', Register::I2cStatus.addr()]);
            assert_eq!(b.serial_mut().tx.as_slice(), &[expected]);
        }
    }

    #[test]
    fn test_reg_read_unmapped_status_suppresses_response() {
        let mut b = bridge();
        b.i2c_mut().bus_mut().outcome = I2cOutcome::Unsupported;
        dispatch_line(&mut b, &[b'S', 0x48, 0, b'P']);
        dispatch_line(&mut b, &[b'R', Register::I2cStatus.addr()]);
        assert!(b.serial_mut().tx.is_empty());
    }

    #[test]
    fn test_reg_read_other_addresses_produce_nothing() {
        let mut b = bridge();
        for addr in [0u8, 1, 2, 3, 5, 6, 7, 8, 9, 42] {
            dispatch_line(&mut b, &[b'R', addr]);
        }
        assert!(b.serial_mut().tx.is_empty());
    }

    #[test]
    fn test_baud_write_applies_allow_listed_code() {
        let mut b = bridge();
        dispatch_line(&mut b, &[b'W', 0, 0x30, 1, 0x00, b'P']);
        assert_eq!(b.serial_mut().baud_changes.as_slice(), &[(1, 115_200)]);
        // Accepted values are mirrored into the register file
        assert_eq!(b.registers().get(Register::BaudLow), 0x30);
        assert_eq!(b.registers().get(Register::BaudHigh), 0x00);
        // No response byte for register writes
        assert!(b.serial_mut().tx.is_empty());
    }

    #[test]
    fn test_baud_write_unknown_code_changes_nothing() {
        let mut b = bridge();
        dispatch_line(&mut b, &[b'W', 0, 0x31, 1, 0x00]);
        assert!(b.serial_mut().baud_changes.is_empty());
        assert_eq!(b.registers().get(Register::BaudLow), 0xF0);
    }

    #[test]
    fn test_i2c_clock_write() {
        let mut b = bridge();
        dispatch_line(&mut b, &[b'W', 7, 0x05, 8, 0x00]);
        assert_eq!(b.i2c().bus().frequency, Some(400_000));

        dispatch_line(&mut b, &[b'W', 7, 0x13, 8, 0x00]);
        assert_eq!(b.i2c().bus().frequency, Some(100_000));

        dispatch_line(&mut b, &[b'W', 7, 0x06, 8, 0x00]);
        assert_eq!(b.i2c().bus().frequency, Some(100_000));
    }

    #[test]
    fn test_port_config_write_acknowledged_without_pin_activity() {
        let mut b = bridge();
        dispatch_line(&mut b, &[b'W', 2, 0xFF, 3, 0xFF]);
        assert_eq!(b.registers().get(Register::PortConfig1), 0xFF);
        assert!(b.serial_mut().tx.is_empty());
        assert_eq!(b.port().cached(), 0);
        assert!(b.port().pins().iter().all(|p| !p.level));
    }

    #[test]
    fn test_unknown_register_pair_ignored() {
        let mut b = bridge();
        dispatch_line(&mut b, &[b'W', 4, 0x12, 10, 0x34]);
        assert_eq!(b.registers().get(Register::IoState), 0x00);
        assert_eq!(b.registers().get(Register::I2cStatus), 0xF0);
    }

    #[test]
    fn test_i2c_write_path_repeated_start_and_stop() {
        let mut b = bridge();
        // No trailing stop marker: bus left open
        dispatch_line(&mut b, &[b'S', 0x48, 2, 0x01, 0x02]);
        // With stop marker: stop asserted
        dispatch_line(&mut b, &[b'S', 0x48, 2, 0x01, 0x02, b'P']);
        assert_eq!(b.i2c().bus().ended.as_slice(), &[false, true]);
        assert!(b.serial_mut().tx.is_empty());
    }

    #[test]
    fn test_i2c_read_path_responds_with_data_and_nul() {
        let mut b = bridge();
        for byte in [0x10, 0x20, 0x30] {
            b.i2c_mut().bus_mut().read_data.push_back(byte).unwrap();
        }
        dispatch_line(&mut b, &[b'S', 0x49, 3]);
        assert_eq!(b.serial_mut().tx.as_slice(), &[0x10, 0x20, 0x30, 0x00]);
    }

    #[test]
    fn test_i2c_read_of_zero_bytes_still_terminates() {
        let mut b = bridge();
        dispatch_line(&mut b, &[b'S', 0x49, 0]);
        assert_eq!(b.serial_mut().tx.as_slice(), &[0x00]);
    }

    #[test]
    fn test_malformed_frames_have_no_side_effects() {
        let mut b = bridge();
        dispatch_line(&mut b, b"S"); // no address
        dispatch_line(&mut b, &[b'S', 0x49]); // read without count
        dispatch_line(&mut b, b"R"); // no register address
        dispatch_line(&mut b, &[b'W', 0, 0x30]); // one pair only
        dispatch_line(&mut b, b"O"); // no mask
        assert!(b.serial_mut().tx.is_empty());
        assert!(b.i2c().bus().ended.is_empty());
        assert!(b.serial_mut().baud_changes.is_empty());
    }

    #[test]
    fn test_each_command_routes_to_its_handler_only() {
        // GpioRead responds with one byte and touches nothing else
        let mut b = bridge();
        dispatch_line(&mut b, b"I");
        assert_eq!(b.serial_mut().tx.len(), 1);
        assert!(b.i2c().bus().ended.is_empty());

        // Start drives only the bus
        let mut b = bridge();
        dispatch_line(&mut b, &[b'S', 0x48, 1, 0xEE, b'P']);
        assert!(b.serial_mut().tx.is_empty());
        assert_eq!(b.i2c().bus().ended.len(), 1);
        assert_eq!(b.port().cached(), 0);

        // RegWrite drives neither bus nor port
        let mut b = bridge();
        dispatch_line(&mut b, &[b'W', 2, 0x00, 3, 0x00]);
        assert!(b.serial_mut().tx.is_empty());
        assert!(b.i2c().bus().ended.is_empty());
    }
}
