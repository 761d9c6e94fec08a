//! Configuration type definitions

use heapless::String;

use parkgate_protocol::{ChecksumScope, MAX_PAYLOAD_SIZE};

use crate::actuator::{ActuatorAngle, CLOSED_ANGLE, OPEN_ANGLE};
use crate::debounce::DEFAULT_DEBOUNCE_MS;
use crate::report::DEFAULT_REPORT_INTERVAL_MS;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Longest status text, one frame payload
pub const MAX_TEXT_LEN: usize = MAX_PAYLOAD_SIZE;

/// Status display text
pub type StatusText = String<MAX_TEXT_LEN>;

/// Default link baud rate
pub const DEFAULT_BAUDRATE: u32 = 115_200;

/// Default bound on a single blocking transmit
pub const DEFAULT_TX_TIMEOUT_MS: u32 = 10;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Angle above 180°
    AngleOutOfRange(u16),
    /// Report interval of zero would flood the link
    ZeroReportInterval,
    /// Baud rate of zero
    ZeroBaudrate,
    /// Text longer than one frame payload
    TextTooLong,
}

/// Which bytes the link CRC covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ChecksumMode {
    /// LENGTH, COMMAND and PAYLOAD
    #[default]
    Framed,
    /// COMMAND and PAYLOAD, as the deployed host script computes it
    Legacy,
}

impl From<ChecksumMode> for ChecksumScope {
    fn from(mode: ChecksumMode) -> Self {
        match mode {
            ChecksumMode::Framed => ChecksumScope::LengthAndBody,
            ChecksumMode::Legacy => ChecksumScope::BodyOnly,
        }
    }
}

/// `[gate]` barrier positions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BarrierConfig {
    /// Angle for `PlateStatus(true)`
    pub open_angle: ActuatorAngle,
    /// Angle for `PlateStatus(false)` and at startup
    pub closed_angle: ActuatorAngle,
}

impl Default for BarrierConfig {
    fn default() -> Self {
        Self {
            open_angle: OPEN_ANGLE,
            closed_angle: CLOSED_ANGLE,
        }
    }
}

/// `[link]` host serial link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinkConfig {
    pub baudrate: u32,
    pub tx_timeout_ms: u32,
    pub checksum: ChecksumMode,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            baudrate: DEFAULT_BAUDRATE,
            tx_timeout_ms: DEFAULT_TX_TIMEOUT_MS,
            checksum: ChecksumMode::Framed,
        }
    }
}

/// `[sensor]` presence sensor sampling and reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorConfig {
    pub debounce_ms: u32,
    pub report_interval_ms: u32,
    /// Sensor pulls the line low when a vehicle is present
    pub inverted: bool,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            report_interval_ms: DEFAULT_REPORT_INTERVAL_MS,
            inverted: false,
        }
    }
}

/// `[display]` fixed status texts
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayTexts {
    pub ready: StatusText,
    pub lot_full: StatusText,
    pub spaces: StatusText,
}

impl Default for DisplayTexts {
    fn default() -> Self {
        Self {
            ready: status_text("Ready"),
            lot_full: status_text("Lot Full"),
            spaces: status_text("Spaces Available"),
        }
    }
}

/// Complete controller configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GateConfig {
    pub gate: BarrierConfig,
    pub link: LinkConfig,
    pub sensor: SensorConfig,
    pub display: DisplayTexts,
}

impl GateConfig {
    /// Check cross-field constraints the types cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sensor.report_interval_ms == 0 {
            return Err(ConfigError::ZeroReportInterval);
        }
        if self.link.baudrate == 0 {
            return Err(ConfigError::ZeroBaudrate);
        }
        Ok(())
    }

    /// Checksum scope for the frame codec
    pub fn checksum_scope(&self) -> ChecksumScope {
        self.link.checksum.into()
    }
}

/// Build a status text, truncating at capacity
pub fn status_text(s: &str) -> StatusText {
    let mut text = StatusText::new();
    for c in s.chars() {
        if text.push(c).is_err() {
            break;
        }
    }
    text
}
