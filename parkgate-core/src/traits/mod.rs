//! Collaborator traits
//!
//! These traits define the interface between the control logic and the
//! peripherals it drives. Drivers in `parkgate-drivers` implement them on
//! top of `parkgate-hal`; tests implement them in memory.

pub mod actuator;
pub mod display;
pub mod sensor;
pub mod transport;

pub use actuator::Actuator;
pub use display::Display;
pub use sensor::PresenceSensor;
pub use transport::{Transport, TransportError};
