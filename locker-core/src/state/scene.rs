//! Scenes of the kiosk UI

use super::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Scene {
    /// Grid of computers with status colors
    #[default]
    Selection,
    /// PIN keypad for the chosen computer
    Entry,
    /// Correct PIN, lock released
    Granted,
    /// Wrong PIN
    Denied,
    /// Usage instructions
    Help,
}

impl Scene {
    /// Index of the header tab this scene highlights
    pub fn tab(&self) -> usize {
        match self {
            Scene::Help => 1,
            _ => 0,
        }
    }

    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use Scene::*;

        match (self, event) {
            // Navigation is unconditional
            (_, Navigate(scene)) => scene,
            (_, ComputerChosen) => Entry,

            (Entry, AccessGranted) => Granted,
            (Entry, AccessDenied) => Denied,

            _ => self,
        }
    }
}
