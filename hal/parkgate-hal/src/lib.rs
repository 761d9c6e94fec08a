//! Parkgate Hardware Abstraction Layer
//!
//! This crate defines the peripheral traits the barrier drivers are written
//! against. Chip-specific crates implement them, so the drivers and the
//! control loop can be tested on the host with in-memory pins.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  parkgate-drivers / parkgate-firmware   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  parkgate-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ parkgate-hal- │
//!             │     stm32     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::InputPin`] - Digital input (presence sensor)
//! - [`pwm::PwmChannel`] - PWM output (barrier servo)
//! - [`uart::UartTx`] - Serial transmit (host link)

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod pwm;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use gpio::InputPin;
pub use pwm::PwmChannel;
pub use uart::{UartError, UartTx};
