//! Actions attached to touchable objects

use super::scene::Scene;

/// Computer identifier as configured in `[computer.N]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ComputerId(pub u8);

/// What happens when an object is touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchAction {
    /// Touch is swallowed
    #[default]
    None,
    /// Switch to a scene
    SelectScene(Scene),
    /// Pick a computer and move to PIN entry
    SelectComputer(ComputerId),
    /// Append a keypad digit to the PIN
    AppendDigit(char),
    /// Remove the last PIN digit
    Backspace,
    /// Verify the PIN
    Submit,
}
