//! Board-agnostic control logic for the barrier controller
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Collaborator traits (display, actuator, presence sensor, transport)
//! - Actuator angle model
//! - Sensor debouncing and periodic reporting
//! - Command dispatch
//! - Link receiver, mailbox and control loop
//! - Configuration types and a TOML-subset parser

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod actuator;
pub mod config;
pub mod control;
pub mod debounce;
pub mod dispatch;
pub mod link;
pub mod report;
pub mod traits;

#[cfg(test)]
mod testing;

pub use actuator::ActuatorAngle;
pub use config::GateConfig;
pub use control::{ControlLoop, Gate, Mailbox, TickReport};
pub use debounce::{Debouncer, Edge};
pub use dispatch::{DispatchError, Dispatcher, Effect};
pub use link::{LinkReceiver, Reception};
pub use report::PeriodicReporter;
