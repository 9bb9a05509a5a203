//! Touch controller implementations

pub mod calibration;
pub mod xpt2046;

pub use calibration::Calibration;
pub use xpt2046::{TouchError, Xpt2046};
