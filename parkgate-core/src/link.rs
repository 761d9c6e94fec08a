//! Byte-arrival side of the host link
//!
//! [`LinkReceiver`] owns the frame decoder and is the only code that runs in
//! the byte-arrival context. It never touches the collaborators: it turns
//! each finished frame into a [`Reception`] that says which acknowledgement
//! to send and which command, if any, to hand to the control context.

use parkgate_protocol::{
    Ack, ChecksumScope, Command, DecoderState, FrameError, FrameParser, MessageError,
};

/// Outcome of a finished frame
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reception {
    /// Checksum-correct frame; the command may still fail to decode
    Accepted(Result<Command, MessageError>),
    /// Integrity failure (bad checksum or malformed length)
    Rejected(FrameError),
}

impl Reception {
    /// Acknowledgement owed to the host
    pub fn ack(&self) -> Ack {
        match self {
            Reception::Accepted(_) => Ack::Ok,
            Reception::Rejected(_) => Ack::Err,
        }
    }

    /// Command to hand to the control context
    pub fn command(&self) -> Option<&Command> {
        match self {
            Reception::Accepted(Ok(command)) => Some(command),
            _ => None,
        }
    }

    /// Consume into the command to hand to the control context
    pub fn into_command(self) -> Option<Command> {
        match self {
            Reception::Accepted(Ok(command)) => Some(command),
            _ => None,
        }
    }
}

/// Incremental receiver for host frames
#[derive(Debug, Clone, Default)]
pub struct LinkReceiver {
    parser: FrameParser,
}

impl LinkReceiver {
    pub fn new(scope: ChecksumScope) -> Self {
        Self {
            parser: FrameParser::with_scope(scope),
        }
    }

    /// Feed one received byte
    ///
    /// Returns `Some` once a frame has been completed or rejected.
    pub fn on_byte(&mut self, byte: u8) -> Option<Reception> {
        match self.parser.feed(byte) {
            Ok(None) => None,
            Ok(Some(frame)) => Some(Reception::Accepted(Command::from_frame(&frame))),
            Err(e) => Some(Reception::Rejected(e)),
        }
    }

    pub fn state(&self) -> DecoderState {
        self.parser.state()
    }
}
