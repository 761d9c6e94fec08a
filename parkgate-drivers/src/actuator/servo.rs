//! Hobby servo on a PWM channel
//!
//! The channel must already run at a 20 ms period. Core duty values are
//! ticks of a 1000-tick period and are rescaled to the channel's compare
//! range here.

use parkgate_core::actuator::{DUTY_MAX, DUTY_MIN, SERVO_PERIOD_TICKS};
use parkgate_core::traits::Actuator;
use parkgate_hal::PwmChannel;

/// Servo actuator
pub struct ServoActuator<P> {
    pwm: P,
    /// Last applied duty in period ticks
    duty: Option<u16>,
}

impl<P: PwmChannel> ServoActuator<P> {
    /// Wrap a PWM channel and start its output
    ///
    /// The compare value is left untouched until the first
    /// `set_angle_duty`.
    pub fn new(mut pwm: P) -> Self {
        pwm.enable();
        Self { pwm, duty: None }
    }

    /// Last applied duty, if any
    pub fn duty(&self) -> Option<u16> {
        self.duty
    }

    /// Stop the output and give the channel back
    pub fn release(mut self) -> P {
        self.pwm.disable();
        self.pwm
    }

    fn compare_for(&self, duty: u16) -> u16 {
        let scaled = u32::from(duty) * u32::from(self.pwm.max_duty()) / u32::from(SERVO_PERIOD_TICKS);
        scaled.min(u32::from(u16::MAX)) as u16
    }
}

impl<P: PwmChannel> Actuator for ServoActuator<P> {
    fn set_angle_duty(&mut self, duty: u16) {
        let duty = duty.clamp(DUTY_MIN, DUTY_MAX);
        let compare = self.compare_for(duty);
        self.pwm.set_duty(compare);
        self.duty = Some(duty);
    }
}
