//! Minimal TOML parser for gate configuration
//!
//! Handles only the subset the controller needs. It does NOT support the
//! full TOML grammar and needs no allocator.
//!
//! Supported features:
//! - `[gate]`, `[link]`, `[sensor]` and `[display]` section headers
//! - Key = value pairs
//! - Integers: decimal with `_` separators, `0x`/`0o`/`0b` prefixes
//! - Basic strings with escapes (`"a \"b\""`) and literal strings (`'c'`)
//! - Booleans
//! - Comments (# ...), including after a value
//!
//! The firmware build script runs this same parser over `gate.toml`, so a
//! file that builds is a file the firmware accepts.
//!
//! Unknown sections and keys are errors, so typos do not silently fall back
//! to defaults.

use core::str::Chars;

use super::types::{ChecksumMode, ConfigError, GateConfig, StatusText};
use crate::actuator::ActuatorAngle;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header, with its 1-based line
    InvalidSection { line: usize },
    /// Key not valid in the current section
    UnknownKey { line: usize },
    /// Line is not `key = value`, or the value has the wrong type
    InvalidValue { line: usize },
    /// Value parsed but is out of range
    Config(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(e: ConfigError) -> Self {
        ParseError::Config(e)
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Gate,
    Link,
    Sensor,
    Display,
}

/// Parse TOML text into a validated [`GateConfig`]
pub fn parse_config(input: &str) -> Result<GateConfig, ParseError> {
    let mut config = GateConfig::default();
    let mut section = Section::Root;

    for (index, raw) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            section = parse_section_header(line).ok_or(ParseError::InvalidSection { line: line_no })?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidValue { line: line_no })?;
        apply_value(section, key, value, &mut config, line_no)?;
    }

    config.validate()?;
    Ok(config)
}

fn parse_section_header(line: &str) -> Option<Section> {
    let inner = strip_comment(line).strip_prefix('[')?.strip_suffix(']')?;
    match inner.trim() {
        "gate" => Some(Section::Gate),
        "link" => Some(Section::Link),
        "sensor" => Some(Section::Sensor),
        "display" => Some(Section::Display),
        _ => None,
    }
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = strip_comment(line[eq_pos + 1..].trim());

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Remove a trailing `# comment` that is not inside a string
fn strip_comment(value: &str) -> &str {
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (i, c) in value.char_indices() {
        match (quote, c) {
            (Some('"'), _) if escaped => escaped = false,
            (Some('"'), '\\') => escaped = true,
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '#') => return value[..i].trim(),
            (None, _) => {}
        }
    }
    value.trim()
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut GateConfig,
    line: usize,
) -> Result<(), ParseError> {
    let invalid = ParseError::InvalidValue { line };

    match (section, key) {
        (Section::Gate, "open_angle") => {
            config.gate.open_angle = parse_angle(value).ok_or(invalid)??;
        }
        (Section::Gate, "closed_angle") => {
            config.gate.closed_angle = parse_angle(value).ok_or(invalid)??;
        }
        (Section::Link, "baudrate") => {
            config.link.baudrate = parse_int(value).ok_or(invalid)?;
        }
        (Section::Link, "tx_timeout_ms") => {
            config.link.tx_timeout_ms = parse_int(value).ok_or(invalid)?;
        }
        (Section::Link, "checksum_scope") => {
            let scope = parse_text(value).and_then(Result::ok).ok_or(invalid)?;
            config.link.checksum = match scope.as_str() {
                "framed" => ChecksumMode::Framed,
                "legacy" => ChecksumMode::Legacy,
                _ => return Err(invalid),
            };
        }
        (Section::Sensor, "debounce_ms") => {
            config.sensor.debounce_ms = parse_int(value).ok_or(invalid)?;
        }
        (Section::Sensor, "report_interval_ms") => {
            config.sensor.report_interval_ms = parse_int(value).ok_or(invalid)?;
        }
        (Section::Sensor, "inverted") => {
            config.sensor.inverted = parse_bool(value).ok_or(invalid)?;
        }
        (Section::Display, "ready_text") => {
            config.display.ready = parse_text(value).ok_or(invalid)??;
        }
        (Section::Display, "lot_full_text") => {
            config.display.lot_full = parse_text(value).ok_or(invalid)??;
        }
        (Section::Display, "spaces_text") => {
            config.display.spaces = parse_text(value).ok_or(invalid)??;
        }
        _ => return Err(ParseError::UnknownKey { line }),
    }

    Ok(())
}

/// Unsigned integer, rejecting anything TOML would not read as one
fn parse_int<T: TryFrom<u64>>(value: &str) -> Option<T> {
    let (radix, digits) = if let Some(d) = value.strip_prefix("0x") {
        (16, d)
    } else if let Some(d) = value.strip_prefix("0o") {
        (8, d)
    } else if let Some(d) = value.strip_prefix("0b") {
        (2, d)
    } else {
        let d = value.strip_prefix('+').unwrap_or(value);
        // No leading zeros in decimal
        if d.len() > 1 && d.starts_with('0') {
            return None;
        }
        (10, d)
    };

    // `_` only between digits
    if digits.is_empty() || digits.starts_with('_') || digits.ends_with('_') || digits.contains("__") {
        return None;
    }

    let mut n: u64 = 0;
    for c in digits.chars().filter(|&c| c != '_') {
        let digit = c.to_digit(radix)?;
        n = n.checked_mul(u64::from(radix))?.checked_add(u64::from(digit))?;
    }
    T::try_from(n).ok()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn parse_angle(value: &str) -> Option<Result<ActuatorAngle, ConfigError>> {
    let degrees: u16 = parse_int(value)?;
    if degrees > u16::from(ActuatorAngle::MAX_DEGREES) {
        return Some(Err(ConfigError::AngleOutOfRange(degrees)));
    }
    Some(Ok(ActuatorAngle::new(degrees as u8)))
}

/// Decode a basic or literal string into display text
///
/// `None` if the value is not a string, `Some(Err)` if it does not fit.
fn parse_text(value: &str) -> Option<Result<StatusText, ConfigError>> {
    let mut text = StatusText::new();

    if let Some(inner) = value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')) {
        if inner.contains('\'') {
            return None;
        }
        return match text.push_str(inner) {
            Ok(()) => Some(Ok(text)),
            Err(()) => Some(Err(ConfigError::TextTooLong)),
        };
    }

    let inner = value.strip_prefix('"')?.strip_suffix('"')?;
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        let c = match c {
            '\\' => unescape(&mut chars)?,
            '"' => return None,
            c if c.is_control() && c != '\t' => return None,
            c => c,
        };
        if text.push(c).is_err() {
            return Some(Err(ConfigError::TextTooLong));
        }
    }
    Some(Ok(text))
}

fn unescape(chars: &mut Chars<'_>) -> Option<char> {
    match chars.next()? {
        'b' => Some('\u{8}'),
        't' => Some('\t'),
        'n' => Some('\n'),
        'f' => Some('\u{c}'),
        'r' => Some('\r'),
        '"' => Some('"'),
        '\\' => Some('\\'),
        'u' => unicode_escape(chars, 4),
        'U' => unicode_escape(chars, 8),
        _ => None,
    }
}

fn unicode_escape(chars: &mut Chars<'_>, digits: usize) -> Option<char> {
    let mut code = 0u32;
    for _ in 0..digits {
        code = code * 16 + chars.next()?.to_digit(16)?;
    }
    char::from_u32(code)
}
