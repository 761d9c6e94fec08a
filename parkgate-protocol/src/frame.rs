//! Frame encoding and decoding for the barrier link.
//!
//! Frame format:
//! - START (1 byte): 0xAA synchronization byte
//! - LENGTH (1 byte): command byte + payload length (1-30)
//! - COMMAND (1 byte): command identifier
//! - PAYLOAD (0-29 bytes): command-specific data
//! - CRC (1 byte): CRC-8 over LENGTH, COMMAND and PAYLOAD
//!
//! The legacy host script leaves LENGTH out of the CRC, see [`ChecksumScope`].

use heapless::Vec;

use crate::crc::{crc8_update, CRC8_INIT};

/// Frame synchronization byte
pub const FRAME_START: u8 = 0xAA;

/// Maximum payload size in bytes
pub const MAX_PAYLOAD_SIZE: usize = 29;

/// Largest legal LENGTH byte (COMMAND + MAX_PAYLOAD)
pub const MAX_LENGTH: u8 = MAX_PAYLOAD_SIZE as u8 + 1;

/// Maximum complete frame size (START + LENGTH + COMMAND + MAX_PAYLOAD + CRC)
pub const MAX_FRAME_SIZE: usize = 1 + 1 + 1 + MAX_PAYLOAD_SIZE + 1;

/// Bytes covered by LENGTH (COMMAND + PAYLOAD)
const BODY_CAPACITY: usize = MAX_PAYLOAD_SIZE + 1;

/// Errors that can occur during frame parsing or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
    /// Checksum mismatch
    InvalidChecksum,
    /// LENGTH byte outside 1..=MAX_LENGTH
    InvalidLength(u8),
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// Which bytes the trailing CRC covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChecksumScope {
    /// LENGTH, COMMAND and PAYLOAD
    #[default]
    LengthAndBody,
    /// COMMAND and PAYLOAD only (deployed host script)
    BodyOnly,
}

impl ChecksumScope {
    /// Compute the frame checksum for the given fields
    pub fn checksum(self, length: u8, command: u8, payload: &[u8]) -> u8 {
        let seed = match self {
            ChecksumScope::LengthAndBody => crc8_update(CRC8_INIT, length),
            ChecksumScope::BodyOnly => CRC8_INIT,
        };
        let crc = crc8_update(seed, command);
        payload.iter().fold(crc, |crc, &b| crc8_update(crc, b))
    }
}

/// A parsed or constructed frame
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    /// Command identifier
    pub command: u8,
    /// Payload data
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Frame {
    /// Create a new frame with the given command and payload
    pub fn new(command: u8, payload: &[u8]) -> Result<Self, FrameError> {
        let payload = Vec::from_slice(payload).map_err(|_| FrameError::PayloadTooLarge)?;
        Ok(Self { command, payload })
    }

    /// Create a frame with no payload
    pub fn empty(command: u8) -> Self {
        Self {
            command,
            payload: Vec::new(),
        }
    }

    /// Value of the LENGTH byte for this frame
    pub fn length(&self) -> u8 {
        // payload is bounded by MAX_PAYLOAD_SIZE, so this always fits
        self.payload.len() as u8 + 1
    }

    /// Total number of bytes this frame occupies on the wire
    pub fn wire_len(&self) -> usize {
        4 + self.payload.len()
    }

    /// Encode this frame into a byte buffer using the default checksum scope
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        self.encode_scoped(ChecksumScope::default(), buffer)
    }

    /// Encode this frame into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode_scoped(&self, scope: ChecksumScope, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let frame_len = self.wire_len();
        if buffer.len() < frame_len {
            return Err(FrameError::BufferTooSmall);
        }

        let length = self.length();
        let payload_end = 3 + self.payload.len();

        buffer[0] = FRAME_START;
        buffer[1] = length;
        buffer[2] = self.command;
        buffer[3..payload_end].copy_from_slice(&self.payload);
        buffer[payload_end] = scope.checksum(length, self.command, &self.payload);

        Ok(frame_len)
    }

    /// Encode this frame into a heapless Vec
    pub fn encode_to_vec(&self, scope: ChecksumScope) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        let len = self.encode_scoped(scope, &mut buffer)?;
        Vec::from_slice(&buffer[..len]).map_err(|_| FrameError::BufferTooSmall)
    }
}

/// Build the wire bytes for a command and payload in one step
pub fn encode(command: u8, payload: &[u8]) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
    Frame::new(command, payload)?.encode_to_vec(ChecksumScope::default())
}

/// Decoder progress through a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecoderState {
    /// Discarding bytes until START
    AwaitingStart,
    /// Got START, next byte is LENGTH
    AwaitingLength,
    /// Collecting COMMAND and PAYLOAD bytes
    AccumulatingPayload {
        /// Bytes still expected before the CRC
        remaining: u8,
    },
    /// Body complete, next byte is the CRC
    AwaitingChecksum,
}

/// State machine for parsing incoming frames
///
/// Safe to drive one byte at a time from a receive interrupt: `feed` never
/// blocks, never allocates, and never buffers more than [`MAX_LENGTH`] bytes.
#[derive(Debug, Clone)]
pub struct FrameParser {
    state: DecoderState,
    scope: ChecksumScope,
    length: u8,
    body: Vec<u8, BODY_CAPACITY>,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    /// Create a new frame parser using the default checksum scope
    pub fn new() -> Self {
        Self::with_scope(ChecksumScope::default())
    }

    /// Create a new frame parser for the given checksum scope
    pub fn with_scope(scope: ChecksumScope) -> Self {
        Self {
            state: DecoderState::AwaitingStart,
            scope,
            length: 0,
            body: Vec::new(),
        }
    }

    /// Current decoder state
    pub fn state(&self) -> DecoderState {
        self.state
    }

    /// Checksum scope this parser validates against
    pub fn scope(&self) -> ChecksumScope {
        self.scope
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.state = DecoderState::AwaitingStart;
        self.length = 0;
        self.body.clear();
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(frame))` when a complete valid frame is parsed,
    /// `Ok(None)` when more bytes are needed, or `Err` on parse error.
    /// The parser is back in `AwaitingStart` after any `Err` or frame.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        match self.state {
            DecoderState::AwaitingStart => {
                if byte == FRAME_START {
                    self.state = DecoderState::AwaitingLength;
                }
                // Silently ignore non-START bytes while waiting
                Ok(None)
            }
            DecoderState::AwaitingLength => {
                // 0xAA is above MAX_LENGTH, but a repeated START is line noise
                // ahead of a real frame: stay here instead of rejecting.
                // Recorded under "Resync" in DESIGN.md.
                if byte == FRAME_START {
                    return Ok(None);
                }
                if byte == 0 || byte > MAX_LENGTH {
                    self.reset();
                    return Err(FrameError::InvalidLength(byte));
                }
                self.length = byte;
                self.body.clear();
                self.state = DecoderState::AccumulatingPayload { remaining: byte };
                Ok(None)
            }
            DecoderState::AccumulatingPayload { remaining } => {
                if self.body.push(byte).is_err() {
                    // Unreachable while LENGTH is range-checked
                    let length = self.length;
                    self.reset();
                    return Err(FrameError::InvalidLength(length));
                }
                let remaining = remaining - 1;
                self.state = if remaining == 0 {
                    DecoderState::AwaitingChecksum
                } else {
                    DecoderState::AccumulatingPayload { remaining }
                };
                Ok(None)
            }
            DecoderState::AwaitingChecksum => {
                let (command, payload) = match self.body.split_first() {
                    Some((&command, payload)) => (command, payload),
                    None => {
                        self.reset();
                        return Err(FrameError::InvalidLength(0));
                    }
                };

                if byte != self.scope.checksum(self.length, command, payload) {
                    self.reset();
                    return Err(FrameError::InvalidChecksum);
                }

                let frame = Frame::new(command, payload);
                self.reset();
                frame.map(Some)
            }
        }
    }

    /// Feed multiple bytes to the parser
    ///
    /// Returns the first complete frame found, if any.
    /// Remaining bytes after a complete frame are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<Frame>, FrameError> {
        for &byte in bytes {
            if let Some(frame) = self.feed(byte)? {
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }
}
