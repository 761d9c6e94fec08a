//! Configuration loading
//!
//! The configuration is compiled in from `gate.toml`. build.rs runs the
//! same `parse_config` over the same file and fails the build on error, so
//! the default fallback below is not expected to trigger.

use defmt::*;

use parkgate_core::config::{parse_config, GateConfig};

/// Embedded configuration (compiled into firmware)
/// Edit gate.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../gate.toml");

/// Parse the embedded configuration, falling back to defaults
pub fn load() -> GateConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Configuration loaded from gate.toml");
            config
        }
        Err(e) => {
            warn!("gate.toml rejected ({:?}), using defaults", e);
            GateConfig::default()
        }
    }
}
