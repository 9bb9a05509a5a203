//! Touch sampling and debounce
//!
//! Drivers deliver calibrated but unfiltered samples. The filter turns a
//! noisy stream into at most one accepted point per press.

pub mod filter;

pub use filter::{FilterConfig, TouchFilter};

use crate::scene::Point;

/// Calibrated screen-space sample before filtering
pub type RawPoint = Point;
