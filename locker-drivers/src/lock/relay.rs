//! GPIO relay lock
//!
//! The locker latch is held by a relay driven from a single GPIO. Most
//! relay boards close when their input is pulled low.

use locker_core::traits::LockActuator;
use locker_hal::{ActivePin, OutputPin};

/// Relay-driven lock
///
/// The relay starts released and is released again when dropped.
pub struct RelayLock<P: OutputPin> {
    pin: ActivePin<P>,
}

impl<P: OutputPin> RelayLock<P> {
    /// Create a relay lock
    ///
    /// # Arguments
    /// - `pin`: GPIO driving the relay input
    /// - `active_low`: If true, the relay engages when the pin is LOW
    pub fn new(pin: P, active_low: bool) -> Self {
        Self {
            pin: ActivePin::new(pin, active_low),
        }
    }
}

impl<P: OutputPin> LockActuator for RelayLock<P> {
    fn set_lock(&mut self, engaged: bool) {
        if engaged {
            self.pin.assert();
        } else {
            self.pin.deassert();
        }
    }

    fn is_engaged(&self) -> bool {
        self.pin.is_asserted()
    }
}

impl<P: OutputPin> Drop for RelayLock<P> {
    fn drop(&mut self) {
        self.pin.deassert();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use std::rc::Rc;

    /// Mock GPIO pin whose level stays observable after the lock is dropped
    struct MockPin {
        high: Rc<Cell<bool>>,
    }

    impl MockPin {
        fn new(initial: bool) -> (Self, Rc<Cell<bool>>) {
            let high = Rc::new(Cell::new(initial));
            (Self { high: high.clone() }, high)
        }
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) {
            self.high.set(true);
        }

        fn set_low(&mut self) {
            self.high.set(false);
        }

        fn is_set_high(&self) -> bool {
            self.high.get()
        }
    }

    #[test]
    fn test_active_high_relay() {
        let (pin, level) = MockPin::new(true);
        let mut lock = RelayLock::new(pin, false);

        // Starts released
        assert!(!lock.is_engaged());
        assert!(!level.get());

        lock.set_lock(true);
        assert!(lock.is_engaged());
        assert!(level.get());

        lock.set_lock(false);
        assert!(!lock.is_engaged());
        assert!(!level.get());
    }

    #[test]
    fn test_active_low_relay() {
        let (pin, level) = MockPin::new(false);
        let mut lock = RelayLock::new(pin, true);

        // Released means the pin idles high
        assert!(!lock.is_engaged());
        assert!(level.get());

        lock.set_lock(true);
        assert!(lock.is_engaged());
        assert!(!level.get());
    }

    #[test]
    fn test_drop_releases() {
        let (pin, level) = MockPin::new(false);
        let mut lock = RelayLock::new(pin, true);
        lock.set_lock(true);
        assert!(!level.get());

        drop(lock);
        assert!(level.get());
    }

    #[test]
    fn test_lock_trait() {
        let (pin, _) = MockPin::new(false);
        let mut lock = RelayLock::new(pin, false);

        fn pulse<L: LockActuator>(l: &mut L) {
            assert!(!l.is_engaged());
            l.set_lock(true);
            assert!(l.is_engaged());
        }

        pulse(&mut lock);
    }
}
