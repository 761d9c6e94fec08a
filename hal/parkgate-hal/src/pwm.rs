//! PWM output abstractions
//!
//! A channel is assumed to run at a fixed period chosen when the timer is
//! configured (20 ms for hobby servos). Only the compare value changes at
//! runtime.

/// Single PWM output channel
pub trait PwmChannel {
    /// Compare value equal to a 100% duty cycle
    fn max_duty(&self) -> u16;

    /// Set the compare value, `0..=max_duty()`
    fn set_duty(&mut self, duty: u16);

    /// Start driving the output
    fn enable(&mut self);

    /// Stop driving the output
    fn disable(&mut self);
}
