//! Barrier actuator drivers

pub mod servo;

pub use servo::ServoActuator;
