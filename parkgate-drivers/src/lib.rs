//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the collaborator traits
//! defined in parkgate-core:
//!
//! - Barrier servo over a [`parkgate_hal::PwmChannel`]
//! - Presence sensor over a [`parkgate_hal::InputPin`]
//! - Host transport over a [`parkgate_hal::UartTx`]
//! - SSD1306 status display over `embedded-hal` I2C

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod actuator;
pub mod display;
pub mod sensor;
pub mod transport;

pub use actuator::ServoActuator;
pub use display::Ssd1306Display;
pub use sensor::GpioPresenceSensor;
pub use transport::UartTransport;
