//! Sensor drivers

pub mod presence;

pub use presence::GpioPresenceSensor;
