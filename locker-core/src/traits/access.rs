//! Access control collaborators

use crate::scene::Color;
use crate::state::ComputerId;

/// Availability of a computer slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ComputerStatus {
    /// Slot is empty or the id is unknown
    #[default]
    NoComputer,
    /// Slot has no presence sensor fitted
    NoSensor,
    /// Computer is lent out
    Unavailable,
    /// Computer is in the locker and may be taken
    Available,
}

impl ComputerStatus {
    /// Swatch color shown next to the computer
    pub fn color(&self) -> Color {
        match self {
            ComputerStatus::NoComputer => Color::GREY,
            ComputerStatus::NoSensor => Color::YELLOW,
            ComputerStatus::Unavailable => Color::RED,
            ComputerStatus::Available => Color::GREEN,
        }
    }

    /// Only available computers accept PIN entry
    pub fn accepts_entry(&self) -> bool {
        matches!(self, ComputerStatus::Available)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ComputerStatus::NoComputer => "No computer",
            ComputerStatus::NoSensor => "No sensor",
            ComputerStatus::Unavailable => "Unavailable",
            ComputerStatus::Available => "Available",
        }
    }
}

/// Checks a PIN for a computer
pub trait Verifier {
    fn verify(&self, computer: ComputerId, pin: &str) -> bool;
}

/// Reports the status of each computer
pub trait StatusSource {
    fn status_of(&self, computer: ComputerId) -> ComputerStatus;

    /// Lock bank the computer belongs to
    fn group_of(&self, _computer: ComputerId) -> Option<u8> {
        None
    }
}

impl<T: Verifier + ?Sized> Verifier for &T {
    fn verify(&self, computer: ComputerId, pin: &str) -> bool {
        (**self).verify(computer, pin)
    }
}

impl<T: StatusSource + ?Sized> StatusSource for &T {
    fn status_of(&self, computer: ComputerId) -> ComputerStatus {
        (**self).status_of(computer)
    }

    fn group_of(&self, computer: ComputerId) -> Option<u8> {
        (**self).group_of(computer)
    }
}

/// Outcome of a verified submit
///
/// Deliberately carries no PIN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccessAttempt {
    pub computer: ComputerId,
    pub group: Option<u8>,
    pub granted: bool,
}

/// Sink for access attempts
pub trait AccessLog {
    fn record(&mut self, attempt: &AccessAttempt);
}

/// Discards every attempt
impl AccessLog for () {
    fn record(&mut self, _attempt: &AccessAttempt) {}
}

/// Evidence recorder started when a locker is opened
///
/// Called once per granted submit, after the lock engages.
pub trait EvidenceCapture {
    fn trigger(&mut self, computer: ComputerId);
}

/// No capture hardware fitted
impl EvidenceCapture for () {
    fn trigger(&mut self, _computer: ComputerId) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_colors() {
        assert_eq!(ComputerStatus::NoComputer.color(), Color::GREY);
        assert_eq!(ComputerStatus::NoSensor.color(), Color::YELLOW);
        assert_eq!(ComputerStatus::Unavailable.color(), Color::RED);
        assert_eq!(ComputerStatus::Available.color(), Color::GREEN);
    }

    #[test]
    fn test_only_available_accepts_entry() {
        assert!(ComputerStatus::Available.accepts_entry());
        assert!(!ComputerStatus::Unavailable.accepts_entry());
        assert!(!ComputerStatus::NoSensor.accepts_entry());
        assert!(!ComputerStatus::NoComputer.accepts_entry());
    }
}
