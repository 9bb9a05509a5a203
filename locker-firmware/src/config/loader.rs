//! Embedded configuration loader
//!
//! Parses and validates the embedded TOML. Falls back to the built-in
//! defaults when either step fails so the kiosk always comes up.

use defmt::*;

use locker_core::config::{parse_config, KioskConfig};

/// Parse and validate `source`, or return the defaults
pub fn load_config(source: &str) -> KioskConfig {
    let config = match parse_config(source) {
        Ok(config) => config,
        Err(e) => {
            error!("Config parse error: {:?}, using defaults", e);
            return KioskConfig::default();
        }
    };

    if let Err(e) = config.validate() {
        error!("Config rejected: {:?}, using defaults", e);
        return KioskConfig::default();
    }

    log_config_summary(&config);
    config
}

fn log_config_summary(config: &KioskConfig) {
    info!("Configuration loaded successfully");
    debug!(
        "  display {}x{} at {} Hz",
        config.display.width, config.display.height, config.display.spi_hz
    );
    debug!(
        "  touch spread={} debounce={} polls",
        config.touch.spread, config.touch.debounce_polls
    );
    debug!(
        "  lock gpio{} pulse={}ms",
        config.lock.pin.pin, config.lock.pulse_ms
    );
    debug!("  {} computers, PIN length {}", config.computers.len(), config.pin_len());
}
