//! Barrier Link Protocol
//!
//! This crate defines the UART protocol between the plate-recognition host and
//! the barrier controller. It covers the CRC engine, the frame codec, the
//! command set and the textual acknowledgements.
//!
//! # Protocol Overview
//!
//! All messages use a simple binary frame format:
//! ```text
//! ┌───────┬────────┬─────────┬─────────────┬──────┐
//! │ START │ LENGTH │ COMMAND │ PAYLOAD     │ CRC8 │
//! │ 1B    │ 1B     │ 1B      │ 0–29B       │ 1B   │
//! └───────┴────────┴─────────┴─────────────┴──────┘
//! ```
//!
//! Every frame the decoder finishes is answered with `OK\n` or `ERR\n`.
//! The host owns retries; the controller never retransmits.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod ack;
pub mod crc;
pub mod frame;
pub mod messages;

pub use ack::Ack;
pub use crc::crc8;
pub use frame::{
    encode, ChecksumScope, DecoderState, Frame, FrameError, FrameParser, FRAME_START,
    MAX_FRAME_SIZE, MAX_LENGTH, MAX_PAYLOAD_SIZE,
};
pub use messages::{Command, CommandId, Direction, DisplayText, MessageError};
