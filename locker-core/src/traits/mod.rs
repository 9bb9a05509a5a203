//! Collaborator traits
//!
//! These traits define the seams between the kiosk logic and the pieces
//! that live elsewhere: the panel, the touch controller, the lock relay,
//! the access table and the evidence recorder.

pub mod access;
pub mod canvas;
pub mod lock;
pub mod touch;

pub use access::{
    AccessAttempt, AccessLog, ComputerStatus, EvidenceCapture, StatusSource, Verifier,
};
pub use canvas::{Canvas, DisplayError};
pub use lock::LockActuator;
pub use touch::TouchInput;
