//! Access attempt logging and capture trigger over defmt
//!
//! The entered PIN never reaches these sinks.

use defmt::*;

use locker_core::state::ComputerId;
use locker_core::traits::{AccessAttempt, AccessLog, EvidenceCapture};

/// Counts attempts and reports each one on the log
#[derive(Debug, Default)]
pub struct DefmtLog {
    granted: u32,
    denied: u32,
}

impl AccessLog for DefmtLog {
    fn record(&mut self, attempt: &AccessAttempt) {
        if attempt.granted {
            self.granted = self.granted.wrapping_add(1);
            info!(
                "Access granted: computer {} group {} ({} total)",
                attempt.computer.0, attempt.group, self.granted
            );
        } else {
            self.denied = self.denied.wrapping_add(1);
            warn!(
                "Access denied: computer {} group {} ({} total)",
                attempt.computer.0, attempt.group, self.denied
            );
        }
    }
}

/// Marks the start of an evidence recording on the log
///
/// The host side watches for this line and records the locker camera.
#[derive(Debug, Default)]
pub struct DefmtCapture {
    sequence: u32,
}

impl EvidenceCapture for DefmtCapture {
    fn trigger(&mut self, computer: ComputerId) {
        self.sequence = self.sequence.wrapping_add(1);
        info!("Capture start: computer {} (#{})", computer.0, self.sequence);
    }
}
