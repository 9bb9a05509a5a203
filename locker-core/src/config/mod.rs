//! Configuration types
//!
//! The kiosk is configured by a small TOML file embedded in the firmware
//! image. [`parse_config`] reads it without allocating; [`AccessTable`]
//! is the runtime view of the configured computers and their PINs.

pub mod access;
pub mod parse;
pub mod types;

pub use access::AccessTable;
pub use parse::{parse_config, ParseError};
pub use types::*;
