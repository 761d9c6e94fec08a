//! Host link transports

pub mod uart;

pub use uart::UartTransport;
