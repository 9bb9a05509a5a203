//! Events that trigger scene transitions

use super::scene::Scene;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// User tapped a tab or back button
    Navigate(Scene),
    /// User picked a computer
    ComputerChosen,
    /// Submitted PIN matched
    AccessGranted,
    /// Submitted PIN did not match
    AccessDenied,
}
