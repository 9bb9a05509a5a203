//! GPIO pin abstractions
//!
//! Relay coils, chip selects and the panel's data/command line are all
//! plain outputs; the touch controller's pen interrupt is an input.

/// Digital output pin
pub trait OutputPin {
    /// Drive the pin high (logic 1)
    fn set_high(&mut self);

    /// Drive the pin low (logic 0)
    fn set_low(&mut self);

    /// Drive the pin to a specific level
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently driven high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently driven low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Output pin with configurable polarity
///
/// `assert()` drives the active level, so callers reason in terms of
/// "engaged"/"selected" rather than electrical levels.
pub struct ActivePin<P> {
    pin: P,
    active_low: bool,
}

impl<P: OutputPin> ActivePin<P> {
    /// Wrap a pin, leaving it deasserted
    pub fn new(pin: P, active_low: bool) -> Self {
        let mut wrapped = Self { pin, active_low };
        wrapped.deassert();
        wrapped
    }

    /// Drive the active level
    pub fn assert(&mut self) {
        self.pin.set_state(!self.active_low);
    }

    /// Drive the inactive level
    pub fn deassert(&mut self) {
        self.pin.set_state(self.active_low);
    }

    /// Whether the active level is currently driven
    pub fn is_asserted(&self) -> bool {
        self.pin.is_set_high() != self.active_low
    }

    /// Release the underlying pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockPin {
        high: bool,
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) {
            self.high = true;
        }

        fn set_low(&mut self) {
            self.high = false;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    #[test]
    fn test_active_high_pin() {
        let mut pin = ActivePin::new(MockPin { high: true }, false);
        assert!(!pin.is_asserted());

        pin.assert();
        assert!(pin.is_asserted());
        assert!(pin.into_inner().high);
    }

    #[test]
    fn test_active_low_pin() {
        let mut pin = ActivePin::new(MockPin { high: false }, true);
        // Deasserted active-low pin idles high
        assert!(!pin.is_asserted());

        pin.assert();
        assert!(pin.is_asserted());
        assert!(!pin.into_inner().high);
    }
}
