//! Configuration type definitions

use heapless::{String, Vec};

use crate::state::ComputerId;
use crate::touch::FilterConfig;
use crate::traits::ComputerStatus;

/// Maximum label length
pub const MAX_LABEL_LEN: usize = 16;

/// Maximum title length
pub const MAX_TITLE_LEN: usize = 24;

/// Maximum configured computers
pub const MAX_COMPUTERS: usize = 12;

/// Maximum accepted PINs per computer
pub const MAX_PINS_PER_COMPUTER: usize = 4;

/// Hard upper bound on PIN length
pub const MAX_PIN_LEN: usize = 12;

/// GPIO pins on the RP2040
pub const GPIO_COUNT: usize = 30;

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConfig {
    /// GPIO number
    pub pin: u8,
    /// Pin is active-low
    pub inverted: bool,
    /// Enable internal pull-up
    pub pull_up: bool,
}

impl PinConfig {
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: false,
        }
    }

    pub const fn inverted(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
            pull_up: false,
        }
    }

    pub const fn with_pullup(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: true,
        }
    }
}

/// `[display]` section: ILI9341 panel on SPI0
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    pub width: u16,
    pub height: u16,
    pub spi_hz: u32,
    pub dc_pin: PinConfig,
    pub cs_pin: PinConfig,
    pub rst_pin: Option<PinConfig>,
    pub backlight_pin: Option<PinConfig>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 320,
            height: 240,
            spi_hz: 40_000_000,
            dc_pin: PinConfig::new(20),
            cs_pin: PinConfig::new(17),
            rst_pin: Some(PinConfig::new(21)),
            backlight_pin: Some(PinConfig::new(22)),
        }
    }
}

/// `[touch]` section: XPT2046 on SPI1 plus the sample filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchConfig {
    pub spread: u16,
    pub debounce_polls: u16,
    /// Minimum Z1 reading counted as contact
    pub pressure_threshold: u16,
    pub x_raw_min: u16,
    pub x_raw_max: u16,
    pub y_raw_min: u16,
    pub y_raw_max: u16,
    pub invert_x: bool,
    pub invert_y: bool,
    /// Panel is mounted rotated relative to the touch layer
    pub swap_xy: bool,
    pub cs_pin: PinConfig,
    /// Pen interrupt, low while touched
    pub irq_pin: Option<PinConfig>,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            spread: 40,
            debounce_polls: 80,
            pressure_threshold: 300,
            x_raw_min: 205,
            x_raw_max: 3891,
            y_raw_min: 354,
            y_raw_max: 3577,
            invert_x: true,
            invert_y: false,
            swap_xy: false,
            cs_pin: PinConfig::new(13),
            irq_pin: Some(PinConfig::with_pullup(15)),
        }
    }
}

/// `[lock]` section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LockConfig {
    pub pin: PinConfig,
    /// Relay closes when the pin is driven low. Follows a `!` prefix on
    /// the pin unless `active_low` is given explicitly.
    pub active_low: bool,
    /// How long the lock stays released after a granted PIN
    pub pulse_ms: u32,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            pin: PinConfig::new(14),
            active_low: false,
            pulse_ms: 1000,
        }
    }
}

/// `[frame]` section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameConfig {
    pub poll_interval_ms: u32,
    /// Redraw at most once every this many polls
    pub present_every: u16,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1,
            present_every: 50,
        }
    }
}

/// `[entry]` section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EntryConfig {
    /// Digits accepted by the PIN field
    pub pin_len: u8,
}

impl Default for EntryConfig {
    fn default() -> Self {
        Self { pin_len: 6 }
    }
}

/// `[ui]` section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiConfig {
    pub title: String<MAX_TITLE_LEN>,
}

impl Default for UiConfig {
    fn default() -> Self {
        let mut title = String::new();
        let _ = title.push_str("Computer Locker");
        Self { title }
    }
}

/// `[computer.N]` section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputerConfig {
    pub id: ComputerId,
    pub label: String<MAX_LABEL_LEN>,
    pub status: ComputerStatus,
    /// Lock bank the computer sits in
    pub group: u8,
    pub pins: Vec<String<MAX_PIN_LEN>, MAX_PINS_PER_COMPUTER>,
}

impl ComputerConfig {
    pub fn new(id: ComputerId) -> Self {
        Self {
            id,
            label: String::new(),
            status: ComputerStatus::NoComputer,
            group: 0,
            pins: Vec::new(),
        }
    }
}

/// Errors found by [`KioskConfig::validate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ValidationError {
    /// Width or height is zero
    InvalidDisplaySize,
    /// A raw calibration range is empty
    InvalidCalibration,
    /// `present_every` or `poll_interval_ms` is zero
    InvalidFrame,
    /// `pin_len` is zero or above `MAX_PIN_LEN`
    InvalidPinLength,
    /// Two computers share an id
    DuplicateComputer(ComputerId),
    /// A PIN is empty, too long or not all digits
    InvalidPinCode(ComputerId),
    /// A GPIO is out of range or assigned twice
    PinConflict(u8),
}

/// Complete kiosk configuration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KioskConfig {
    pub display: DisplayConfig,
    pub touch: TouchConfig,
    pub lock: LockConfig,
    pub frame: FrameConfig,
    pub entry: EntryConfig,
    pub ui: UiConfig,
    pub computers: Vec<ComputerConfig, MAX_COMPUTERS>,
}

impl KioskConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn computer(&self, id: ComputerId) -> Option<&ComputerConfig> {
        self.computers.iter().find(|c| c.id == id)
    }

    /// Touch filter settings in screen space
    pub fn filter_config(&self) -> FilterConfig {
        FilterConfig {
            width: self.display.width,
            height: self.display.height,
            spread: self.touch.spread,
            debounce_polls: self.touch.debounce_polls,
        }
    }

    /// Effective PIN field length
    pub fn pin_len(&self) -> usize {
        (self.entry.pin_len as usize).min(MAX_PIN_LEN)
    }

    /// Check cross-field constraints the parser cannot see
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.display.width == 0 || self.display.height == 0 {
            return Err(ValidationError::InvalidDisplaySize);
        }
        if self.touch.x_raw_min >= self.touch.x_raw_max
            || self.touch.y_raw_min >= self.touch.y_raw_max
        {
            return Err(ValidationError::InvalidCalibration);
        }
        if self.frame.present_every == 0 || self.frame.poll_interval_ms == 0 {
            return Err(ValidationError::InvalidFrame);
        }
        let pin_len = self.entry.pin_len as usize;
        if pin_len == 0 || pin_len > MAX_PIN_LEN {
            return Err(ValidationError::InvalidPinLength);
        }

        for (i, computer) in self.computers.iter().enumerate() {
            if self.computers[..i].iter().any(|c| c.id == computer.id) {
                return Err(ValidationError::DuplicateComputer(computer.id));
            }
            let bad_code = computer.pins.iter().any(|code| {
                code.is_empty()
                    || code.len() > pin_len
                    || !code.bytes().all(|b| b.is_ascii_digit())
            });
            if bad_code {
                return Err(ValidationError::InvalidPinCode(computer.id));
            }
        }

        self.check_gpio()
    }

    fn check_gpio(&self) -> Result<(), ValidationError> {
        let pins = [
            Some(self.display.dc_pin),
            Some(self.display.cs_pin),
            self.display.rst_pin,
            self.display.backlight_pin,
            Some(self.touch.cs_pin),
            self.touch.irq_pin,
            Some(self.lock.pin),
        ];
        let mut seen: u32 = 0;
        for pin in pins.iter().flatten() {
            let bit = 1u32 << pin.pin.min(31);
            if pin.pin as usize >= GPIO_COUNT || seen & bit != 0 {
                return Err(ValidationError::PinConflict(pin.pin));
            }
            seen |= bit;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn computer(id: u8, pins: &[&str]) -> ComputerConfig {
        let mut c = ComputerConfig::new(ComputerId(id));
        for pin in pins {
            c.pins.push(String::try_from(*pin).unwrap()).unwrap();
        }
        c
    }

    #[test]
    fn test_default_is_valid() {
        assert_eq!(KioskConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_filter_config_uses_display_size() {
        let mut config = KioskConfig::default();
        config.display.width = 480;
        config.display.height = 320;
        let filter = config.filter_config();
        assert_eq!(filter.width, 480);
        assert_eq!(filter.height, 320);
        assert_eq!(filter.spread, 40);
        assert_eq!(filter.debounce_polls, 80);
    }

    #[test]
    fn test_duplicate_computer() {
        let mut config = KioskConfig::default();
        config.computers.push(computer(1, &["1234"])).unwrap();
        config.computers.push(computer(1, &["9999"])).unwrap();
        assert_eq!(
            config.validate(),
            Err(ValidationError::DuplicateComputer(ComputerId(1)))
        );
    }

    #[test]
    fn test_bad_pin_codes() {
        let mut config = KioskConfig::default();
        config.computers.push(computer(2, &["12a4"])).unwrap();
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidPinCode(ComputerId(2)))
        );

        config.computers[0] = computer(2, &["1234567"]);
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidPinCode(ComputerId(2)))
        );
    }

    #[test]
    fn test_pin_code_longer_than_entry_field() {
        let mut config = KioskConfig::default();
        config.entry.pin_len = 4;
        config.computers.push(computer(1, &["1234"])).unwrap();
        assert_eq!(config.validate(), Ok(()));

        config.computers[0] = computer(1, &["1234", "12345"]);
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidPinCode(ComputerId(1)))
        );
    }

    #[test]
    fn test_gpio_conflict() {
        let mut config = KioskConfig::default();
        config.lock.pin = PinConfig::new(13);
        assert_eq!(config.validate(), Err(ValidationError::PinConflict(13)));

        config.lock.pin = PinConfig::new(30);
        assert_eq!(config.validate(), Err(ValidationError::PinConflict(30)));
    }

    #[test]
    fn test_calibration_range() {
        let mut config = KioskConfig::default();
        config.touch.y_raw_max = config.touch.y_raw_min;
        assert_eq!(config.validate(), Err(ValidationError::InvalidCalibration));
    }
}
