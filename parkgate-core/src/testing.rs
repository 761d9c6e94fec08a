//! In-memory collaborators for unit tests

use std::collections::VecDeque;
use std::string::{String, ToString};
use std::vec::Vec;

use crate::traits::{Actuator, Display, PresenceSensor, Transport, TransportError};

#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pub shown: Vec<String>,
}

impl RecordingDisplay {
    pub fn last(&self) -> Option<&str> {
        self.shown.last().map(String::as_str)
    }
}

impl Display for RecordingDisplay {
    fn show(&mut self, text: &str) {
        self.shown.push(text.to_string());
    }
}

#[derive(Debug, Default)]
pub struct RecordingActuator {
    pub duties: Vec<u16>,
}

impl RecordingActuator {
    pub fn last(&self) -> Option<u16> {
        self.duties.last().copied()
    }
}

impl Actuator for RecordingActuator {
    fn set_angle_duty(&mut self, duty: u16) {
        self.duties.push(duty);
    }
}

/// Sensor whose level is set directly by the test
#[derive(Debug, Default)]
pub struct FakeSensor {
    pub level: bool,
}

impl PresenceSensor for FakeSensor {
    fn read(&mut self) -> bool {
        self.level
    }
}

/// Transport that records every send and can be told to fail
#[derive(Debug, Default)]
pub struct RecordingTransport {
    pub sent: Vec<Vec<u8>>,
    pub failures: VecDeque<TransportError>,
}

impl RecordingTransport {
    pub fn take_sent(&mut self) -> Vec<Vec<u8>> {
        core::mem::take(&mut self.sent)
    }
}

impl Transport for RecordingTransport {
    fn send(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        if let Some(e) = self.failures.pop_front() {
            return Err(e);
        }
        self.sent.push(bytes.to_vec());
        Ok(())
    }
}
