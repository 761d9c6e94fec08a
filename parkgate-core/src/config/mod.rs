//! Gate configuration
//!
//! [`GateConfig`] holds every tunable of the controller. It can be built
//! from a small TOML document with [`parse_config`]; anything not set keeps
//! its default.

pub mod toml;
pub mod types;

pub use self::toml::{parse_config, ParseError};
pub use types::*;
