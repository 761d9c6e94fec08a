//! Control context and its hand-off from the byte-arrival context
//!
//! ```text
//!  UART RX byte ──► LinkReceiver ──► ack ──► Transport
//!                        │
//!                        ▼
//!                     Mailbox (latest wins)
//!                        │
//!                        ▼
//!  tick(now) ──────► ControlLoop ──► Display / Actuator
//!                        │
//!                        └──► SensorState reports ──► Transport
//! ```

pub mod control_loop;
pub mod gate;
pub mod mailbox;

pub use control_loop::{encode_sensor_state, ControlLoop, TickReport};
pub use gate::{ByteOutcome, Gate, PollOutcome};
pub use mailbox::Mailbox;
