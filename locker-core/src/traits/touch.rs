//! Touch controller input

use crate::touch::RawPoint;

/// Source of calibrated touch samples
pub trait TouchInput {
    type Error;

    /// Take one sample; `Ok(None)` means no contact
    fn poll(&mut self) -> Result<Option<RawPoint>, Self::Error>;
}
