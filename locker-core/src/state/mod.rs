//! Scene state machine and touch actions
//!
//! Which scene is on screen is a pure function of the previous scene and
//! an event. The controller turns touch actions into events after
//! consulting status and verification.

pub mod actions;
pub mod events;
pub mod scene;

pub use actions::{ComputerId, TouchAction};
pub use events::Event;
pub use scene::Scene;
