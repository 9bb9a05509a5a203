//! Configuration loading
//!
//! The configuration is `kiosk.toml`, embedded at build time and parsed
//! by the no_std parser in `locker-core`.

pub mod loader;

pub use loader::load_config;
