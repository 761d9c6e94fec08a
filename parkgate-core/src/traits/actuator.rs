//! Barrier actuator trait

/// PWM-driven barrier actuator
///
/// Duty values are ticks of a 1000-tick, 20 ms servo period. The control
/// logic only ever produces values in `[DUTY_MIN, DUTY_MAX]`.
///
/// [`DUTY_MIN`]: crate::actuator::DUTY_MIN
/// [`DUTY_MAX`]: crate::actuator::DUTY_MAX
pub trait Actuator {
    /// Apply a new duty value
    fn set_angle_duty(&mut self, duty: u16);
}

impl<T: Actuator + ?Sized> Actuator for &mut T {
    fn set_angle_duty(&mut self, duty: u16) {
        (**self).set_angle_duty(duty)
    }
}
