//! Retained scene graph
//!
//! Objects are registered once at startup and mutated in place for the
//! life of the process. The [`Engine`] draws them in ascending priority
//! and hit-tests them in descending priority.

pub mod engine;
pub mod geometry;
pub mod object;
pub mod primitives;
pub mod text;

pub use engine::{Engine, MAX_OBJECTS};
pub use geometry::{Area, Color, Point};
pub use object::{Object, ObjectId, SceneFilter, MAX_PRIMITIVES};
pub use primitives::{FontId, Label, Outline, Rect, TextStyle};
pub use text::{TextBuffer, MASK_CHAR, MAX_TEXT_LEN};

/// Errors raised while building the scene graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SceneError {
    /// The registry already holds `MAX_OBJECTS` objects
    RegistryFull,
    /// An object already holds `MAX_PRIMITIVES` of this primitive kind
    TooManyPrimitives,
    /// Object id does not belong to this engine
    UnknownObject,
}
