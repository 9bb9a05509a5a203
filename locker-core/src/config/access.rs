//! Runtime access table built from the configured computers

use heapless::Vec;

use super::types::{ComputerConfig, KioskConfig, MAX_COMPUTERS};
use crate::state::ComputerId;
use crate::traits::{ComputerStatus, StatusSource, Verifier};

/// Computers, their status and accepted PINs
#[derive(Debug, Clone, Default)]
pub struct AccessTable {
    computers: Vec<ComputerConfig, MAX_COMPUTERS>,
}

impl AccessTable {
    pub fn from_config(config: &KioskConfig) -> Self {
        Self {
            computers: config.computers.clone(),
        }
    }

    pub fn get(&self, id: ComputerId) -> Option<&ComputerConfig> {
        self.computers.iter().find(|c| c.id == id)
    }
}

impl Verifier for AccessTable {
    fn verify(&self, computer: ComputerId, pin: &str) -> bool {
        let Some(entry) = self.get(computer) else {
            return false;
        };
        // Check every stored code so timing does not reveal which matched
        entry.pins.iter().fold(false, |matched, code| {
            matched | constant_time_eq(code.as_bytes(), pin.as_bytes())
        })
    }
}

impl StatusSource for AccessTable {
    fn status_of(&self, computer: ComputerId) -> ComputerStatus {
        self.get(computer)
            .map(|c| c.status)
            .unwrap_or(ComputerStatus::NoComputer)
    }

    fn group_of(&self, computer: ComputerId) -> Option<u8> {
        self.get(computer).map(|c| c.group)
    }
}

/// Compare two byte strings without an early exit on the first mismatch
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::String;

    fn table() -> AccessTable {
        let mut config = KioskConfig::default();
        let mut pc = ComputerConfig::new(ComputerId(1));
        pc.status = ComputerStatus::Available;
        pc.group = 3;
        pc.pins.push(String::try_from("1234").unwrap()).unwrap();
        pc.pins.push(String::try_from("999999").unwrap()).unwrap();
        config.computers.push(pc).unwrap();
        AccessTable::from_config(&config)
    }

    #[test]
    fn test_verify() {
        let table = table();
        assert!(table.verify(ComputerId(1), "1234"));
        assert!(table.verify(ComputerId(1), "999999"));
        assert!(!table.verify(ComputerId(1), "123"));
        assert!(!table.verify(ComputerId(1), "12345"));
        assert!(!table.verify(ComputerId(1), ""));
        assert!(!table.verify(ComputerId(2), "1234"));
    }

    #[test]
    fn test_unknown_computer_has_no_computer_status() {
        let table = table();
        assert_eq!(table.status_of(ComputerId(1)), ComputerStatus::Available);
        assert_eq!(table.status_of(ComputerId(9)), ComputerStatus::NoComputer);
        assert_eq!(table.group_of(ComputerId(1)), Some(3));
        assert_eq!(table.group_of(ComputerId(9)), None);
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"", b""));
        assert!(constant_time_eq(b"42", b"42"));
        assert!(!constant_time_eq(b"42", b"43"));
        assert!(!constant_time_eq(b"42", b"4"));
    }
}
