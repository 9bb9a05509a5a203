//! Kiosk controller
//!
//! Glues the scene engine, the touch filter and the access collaborators
//! into the behavior behind every button on screen.

pub mod controller;
pub mod layout;
pub mod pacing;

pub use controller::{Dispatch, Kiosk, Outcome, TOUCH_WINDOW};
pub use layout::Layout;
pub use pacing::FramePacer;
