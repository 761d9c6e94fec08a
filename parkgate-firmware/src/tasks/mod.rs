//! Embassy async tasks
//!
//! Each task runs independently and communicates via the statics in
//! `channels`.

pub mod controller;
pub mod uart_rx;

pub use controller::{controller_task, now_ms, GateControl};
pub use uart_rx::uart_rx_task;
