//! Barrier angle model
//!
//! Maps an angle in degrees onto the servo duty range. The servo timer runs
//! a 20 ms period split into [`SERVO_PERIOD_TICKS`] ticks, so one tick is
//! 20 µs: 50 ticks is a 1 ms pulse (0°) and 150 ticks a 2 ms pulse (180°).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ticks in one servo PWM period
pub const SERVO_PERIOD_TICKS: u16 = 1000;

/// Duty at 0°
pub const DUTY_MIN: u16 = 50;

/// Duty at 180°
pub const DUTY_MAX: u16 = 150;

/// Barrier raised
pub const OPEN_ANGLE: ActuatorAngle = ActuatorAngle::new(90);

/// Barrier lowered
pub const CLOSED_ANGLE: ActuatorAngle = ActuatorAngle::new(0);

/// Actuator angle in whole degrees, always within `0..=180`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "u8"))]
pub struct ActuatorAngle(u8);

impl ActuatorAngle {
    /// Largest representable angle
    pub const MAX_DEGREES: u8 = 180;

    /// Create an angle, clamping anything above 180°
    pub const fn new(degrees: u8) -> Self {
        if degrees > Self::MAX_DEGREES {
            Self(Self::MAX_DEGREES)
        } else {
            Self(degrees)
        }
    }

    /// Angle in degrees
    pub const fn degrees(self) -> u8 {
        self.0
    }

    /// Servo duty in period ticks, `DUTY_MIN..=DUTY_MAX`
    pub const fn duty(self) -> u16 {
        DUTY_MIN + (self.0 as u16 * (DUTY_MAX - DUTY_MIN)) / Self::MAX_DEGREES as u16
    }
}

impl From<u8> for ActuatorAngle {
    fn from(degrees: u8) -> Self {
        Self::new(degrees)
    }
}
