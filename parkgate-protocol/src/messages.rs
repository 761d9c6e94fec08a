//! Command messages carried by barrier link frames
//!
//! Every command id has a fixed direction:
//! - Host → Device: Display, SetActuator, PlateStatus, LotFull
//! - Device → Host: SensorState

use core::fmt::Write;

use heapless::String;

use crate::frame::{Frame, FrameError, MAX_PAYLOAD_SIZE};

// Command IDs: Host → Device
pub const CMD_DISPLAY: u8 = 0x01;
pub const CMD_SET_ACTUATOR: u8 = 0x02;
pub const CMD_PLATE_STATUS: u8 = 0x04;
pub const CMD_LOT_FULL: u8 = 0x05;

// Command IDs: Device → Host
pub const CMD_SENSOR_STATE: u8 = 0x03;

/// Placeholder for bytes the display cannot render
const REPLACEMENT_CHAR: char = '?';

/// Display text decoded from a frame payload
pub type DisplayText = String<MAX_PAYLOAD_SIZE>;

/// Which side of the link originates a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    HostToDevice,
    DeviceToHost,
}

/// Closed set of command identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum CommandId {
    Display = CMD_DISPLAY,
    SetActuator = CMD_SET_ACTUATOR,
    SensorState = CMD_SENSOR_STATE,
    PlateStatus = CMD_PLATE_STATUS,
    LotFull = CMD_LOT_FULL,
}

impl CommandId {
    /// Look up a command id from its wire byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            CMD_DISPLAY => Some(CommandId::Display),
            CMD_SET_ACTUATOR => Some(CommandId::SetActuator),
            CMD_SENSOR_STATE => Some(CommandId::SensorState),
            CMD_PLATE_STATUS => Some(CommandId::PlateStatus),
            CMD_LOT_FULL => Some(CommandId::LotFull),
            _ => None,
        }
    }

    /// Wire byte for this command id
    pub fn to_byte(self) -> u8 {
        self as u8
    }

    /// Direction this command travels
    pub fn direction(self) -> Direction {
        match self {
            CommandId::SensorState => Direction::DeviceToHost,
            _ => Direction::HostToDevice,
        }
    }
}

/// Errors decoding a command from a checksum-valid frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MessageError {
    /// Command byte outside the known set
    UnknownCommand(u8),
    /// Command needs a 1-byte payload but none was sent
    MissingPayload(CommandId),
}

/// A decoded link command
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Show text on the status display
    Display(DisplayText),
    /// Move the barrier to an angle in degrees (clamped on use)
    SetActuator(u8),
    /// Debounced vehicle presence
    SensorState(bool),
    /// Plate recognised: open (`true`) or close (`false`) the barrier
    PlateStatus(bool),
    /// Lot occupancy banner
    LotFull(bool),
}

impl Command {
    /// Identifier of this command
    pub fn id(&self) -> CommandId {
        match self {
            Command::Display(_) => CommandId::Display,
            Command::SetActuator(_) => CommandId::SetActuator,
            Command::SensorState(_) => CommandId::SensorState,
            Command::PlateStatus(_) => CommandId::PlateStatus,
            Command::LotFull(_) => CommandId::LotFull,
        }
    }

    /// Build a display command, truncating to what fits in one frame
    pub fn display(text: &str) -> Self {
        Command::Display(sanitize_text(text.as_bytes()))
    }

    /// Parse a command from a frame
    pub fn from_frame(frame: &Frame) -> Result<Self, MessageError> {
        let id = CommandId::from_byte(frame.command)
            .ok_or(MessageError::UnknownCommand(frame.command))?;

        match id {
            CommandId::Display => Ok(Command::Display(sanitize_text(&frame.payload))),
            CommandId::SetActuator => Ok(Command::SetActuator(first_byte(frame, id)?)),
            // Only an exact 1 is true; the deployed host never sends other values
            CommandId::SensorState => Ok(Command::SensorState(first_byte(frame, id)? == 1)),
            CommandId::PlateStatus => Ok(Command::PlateStatus(first_byte(frame, id)? == 1)),
            CommandId::LotFull => Ok(Command::LotFull(first_byte(frame, id)? == 1)),
        }
    }

    /// Encode this command into a frame
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        let id = self.id().to_byte();
        match self {
            Command::Display(text) => Frame::new(id, text.as_bytes()),
            Command::SetActuator(angle) => Frame::new(id, &[*angle]),
            Command::SensorState(flag) | Command::PlateStatus(flag) | Command::LotFull(flag) => {
                Frame::new(id, &[u8::from(*flag)])
            }
        }
    }
}

fn first_byte(frame: &Frame, id: CommandId) -> Result<u8, MessageError> {
    frame
        .payload
        .first()
        .copied()
        .ok_or(MessageError::MissingPayload(id))
}

/// Decode display bytes: stop at the first NUL, replace anything outside
/// printable ASCII
fn sanitize_text(bytes: &[u8]) -> DisplayText {
    let mut text = DisplayText::new();
    for &b in bytes.iter().take_while(|&&b| b != 0) {
        let c = if (0x20..=0x7E).contains(&b) {
            b as char
        } else {
            REPLACEMENT_CHAR
        };
        // Capacity matches MAX_PAYLOAD_SIZE; stop quietly once full
        if text.write_char(c).is_err() {
            break;
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_id_roundtrip() {
        for byte in 0x01..=0x05u8 {
            let id = CommandId::from_byte(byte).unwrap();
            assert_eq!(id.to_byte(), byte);
        }
        assert_eq!(CommandId::from_byte(0x00), None);
        assert_eq!(CommandId::from_byte(0x06), None);
    }

    #[test]
    fn test_directions() {
        assert_eq!(CommandId::SensorState.direction(), Direction::DeviceToHost);
        assert_eq!(CommandId::Display.direction(), Direction::HostToDevice);
        assert_eq!(CommandId::SetActuator.direction(), Direction::HostToDevice);
        assert_eq!(CommandId::PlateStatus.direction(), Direction::HostToDevice);
        assert_eq!(CommandId::LotFull.direction(), Direction::HostToDevice);
    }

    #[test]
    fn test_parse_plate_status() {
        let frame = Frame::new(CMD_PLATE_STATUS, &[1]).unwrap();
        assert_eq!(Command::from_frame(&frame), Ok(Command::PlateStatus(true)));

        let frame = Frame::new(CMD_PLATE_STATUS, &[0]).unwrap();
        assert_eq!(Command::from_frame(&frame), Ok(Command::PlateStatus(false)));
    }

    #[test]
    fn test_only_exact_one_is_true() {
        let frame = Frame::new(CMD_LOT_FULL, &[2]).unwrap();
        assert_eq!(Command::from_frame(&frame), Ok(Command::LotFull(false)));
    }

    #[test]
    fn test_set_actuator_keeps_raw_angle() {
        let frame = Frame::new(CMD_SET_ACTUATOR, &[200]).unwrap();
        assert_eq!(Command::from_frame(&frame), Ok(Command::SetActuator(200)));
    }

    #[test]
    fn test_missing_payload() {
        let frame = Frame::empty(CMD_SET_ACTUATOR);
        assert_eq!(
            Command::from_frame(&frame),
            Err(MessageError::MissingPayload(CommandId::SetActuator))
        );
    }

    #[test]
    fn test_unknown_command() {
        let frame = Frame::new(0x42, &[1]).unwrap();
        assert_eq!(
            Command::from_frame(&frame),
            Err(MessageError::UnknownCommand(0x42))
        );
    }

    #[test]
    fn test_display_text_stops_at_nul() {
        let frame = Frame::new(CMD_DISPLAY, b"Welcome\0junk").unwrap();
        match Command::from_frame(&frame).unwrap() {
            Command::Display(text) => assert_eq!(text.as_str(), "Welcome"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_display_text_replaces_unprintable() {
        let frame = Frame::new(CMD_DISPLAY, &[b'A', 0x07, 0xC3, b'B']).unwrap();
        assert_eq!(Command::from_frame(&frame), Ok(Command::display("A??B")));
    }

    #[test]
    fn test_empty_display_is_valid() {
        let frame = Frame::empty(CMD_DISPLAY);
        assert_eq!(Command::from_frame(&frame), Ok(Command::display("")));
    }

    #[test]
    fn test_display_constructor_truncates() {
        let long = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
        match Command::display(long) {
            Command::Display(text) => assert_eq!(text.len(), MAX_PAYLOAD_SIZE),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_sensor_state_frame() {
        let frame = Command::SensorState(false).to_frame().unwrap();
        assert_eq!(frame.command, CMD_SENSOR_STATE);
        assert_eq!(&frame.payload[..], &[0]);

        let bytes = frame.encode_to_vec(Default::default()).unwrap();
        assert_eq!(&bytes[..], &[0xAA, 0x02, 0x03, 0x00, 0xE9]);
    }

    #[test]
    fn test_command_frame_roundtrip() {
        let commands = [
            Command::display("Hello"),
            Command::SetActuator(90),
            Command::SensorState(true),
            Command::PlateStatus(false),
            Command::LotFull(true),
        ];
        for cmd in commands {
            let frame = cmd.to_frame().unwrap();
            assert_eq!(Command::from_frame(&frame), Ok(cmd));
        }
    }
}
