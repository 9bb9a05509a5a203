//! Physical lock actuator

/// Trait for the relay that holds a locker closed
pub trait LockActuator {
    /// Engage (`true`, unlocked) or release (`false`) the actuator
    fn set_lock(&mut self, engaged: bool);

    /// Whether the actuator is currently engaged
    fn is_engaged(&self) -> bool;
}
