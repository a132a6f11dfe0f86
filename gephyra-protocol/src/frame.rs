//! Line framing for the bridge protocol
//!
//! Frame format:
//! - COMMAND (1 byte): command identifier, always `frame[0]`
//! - PAYLOAD (0-63 bytes): command-specific data
//! - terminated by LF (0x0A), which is not part of the frame
//! - CR (0x0D) bytes are discarded wherever they appear and never counted

use heapless::Vec;

/// Line feed ends a frame
pub const FRAME_END: u8 = 0x0A;

/// Carriage return is elided from the stream
pub const FRAME_ELIDE: u8 = 0x0D;

/// Maximum frame size in bytes (command byte plus payload)
pub const FRAME_CAPACITY: usize = 64;

/// Errors that can occur while accumulating a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Line exceeded [`FRAME_CAPACITY`] before a line feed arrived
    ///
    /// The partial line is discarded in full; nothing of it may be
    /// dispatched.
    Overflow,
}

/// One complete command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    bytes: Vec<u8, FRAME_CAPACITY>,
}

impl Frame {
    /// Build a frame from raw bytes (used by tests and board tooling)
    ///
    /// Fails with [`FrameError::Overflow`] if `bytes` exceeds capacity.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, FrameError> {
        let mut vec = Vec::new();
        vec.extend_from_slice(bytes).map_err(|_| FrameError::Overflow)?;
        Ok(Self { bytes: vec })
    }

    /// The command byte, if the line was not empty
    pub fn command_byte(&self) -> Option<u8> {
        self.bytes.first().copied()
    }

    /// Everything after the command byte
    pub fn payload(&self) -> &[u8] {
        if self.bytes.is_empty() {
            &[]
        } else {
            &self.bytes[1..]
        }
    }

    /// The whole frame including the command byte
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Total frame length in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True for a bare (CR)LF line
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Push-based accumulator turning a byte stream into [`Frame`]s
///
/// Feed bytes one at a time with [`LineFramer::push`]; a frame is returned
/// exactly when a line feed is seen. After an overflow the framer keeps
/// discarding until the next line feed resynchronizes it, and that line
/// feed does not deliver a frame.
#[derive(Debug, Clone, Default)]
pub struct LineFramer {
    buffer: Vec<u8, FRAME_CAPACITY>,
    discarding: bool,
}

impl LineFramer {
    /// Create a new framer
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a single byte
    ///
    /// Returns `Ok(Some(frame))` when the byte completed a line,
    /// `Ok(None)` when more bytes are needed, and `Err(Overflow)` once
    /// per overflowed line.
    pub fn push(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        match byte {
            FRAME_ELIDE => Ok(None),
            FRAME_END => {
                if self.discarding {
                    self.discarding = false;
                    return Ok(None);
                }
                let bytes = core::mem::take(&mut self.buffer);
                Ok(Some(Frame { bytes }))
            }
            _ if self.discarding => Ok(None),
            _ => {
                if self.buffer.push(byte).is_err() {
                    self.buffer.clear();
                    self.discarding = true;
                    return Err(FrameError::Overflow);
                }
                Ok(None)
            }
        }
    }
}
