//! Config-driven pin allocation
//!
//! Pin numbers come from `kiosk.toml`, so the firmware cannot name
//! `PIN_n` fields at compile time. [`PinBank`] owns every GPIO that is
//! not claimed by a fixed-function peripheral and hands them out by number.

use embassy_rp::gpio::AnyPin;
use embassy_rp::peripherals;
use embassy_rp::{Peri, Peripherals};
use locker_core::config::{PinConfig, GPIO_COUNT};

use crate::gpio::{RpInput, RpOutput};

/// Error when requesting a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-29 valid)
    InvalidPin,
    /// Pin already taken from the bank
    AlreadyTaken,
    /// Pin was claimed by a bus before the bank was built
    Reserved,
}

/// Holds the free GPIOs and lends them out by number
pub struct PinBank {
    pins: [Option<Peri<'static, AnyPin>>; GPIO_COUNT],
    /// Bit n set: pin n never entered the bank
    reserved: u32,
}

impl PinBank {
    /// Build the bank from whatever is left in `p`
    ///
    /// Bus pins, and any pin the caller already took out of `p`, are
    /// recorded as reserved.
    pub fn new(p: &mut PinBankPeripherals) -> Self {
        let pins = p.drain();
        let reserved = pins
            .iter()
            .enumerate()
            .filter(|(_, pin)| pin.is_none())
            .fold(0u32, |mask, (n, _)| mask | (1 << n));
        Self { pins, reserved }
    }

    /// Take a pin by number
    pub fn take(&mut self, pin_num: u8) -> Result<Peri<'static, AnyPin>, PinError> {
        let idx = pin_num as usize;
        if idx >= GPIO_COUNT {
            return Err(PinError::InvalidPin);
        }
        match self.pins[idx].take() {
            Some(pin) => Ok(pin),
            None if self.reserved & (1 << idx) != 0 => Err(PinError::Reserved),
            None => Err(PinError::AlreadyTaken),
        }
    }

    /// Take the pin named by `config` as a push-pull output
    pub fn output(
        &mut self,
        config: &PinConfig,
        initial_high: bool,
    ) -> Result<RpOutput<'static>, PinError> {
        self.take(config.pin).map(|pin| RpOutput::new(pin, initial_high))
    }

    /// Take the pin named by `config` as an input, honouring its pull-up flag
    pub fn input(&mut self, config: &PinConfig) -> Result<RpInput<'static>, PinError> {
        self.take(config.pin).map(|pin| RpInput::new(pin, config))
    }
}

macro_rules! pin_bank_peripherals {
    (
        bank { $($num:literal: $field:ident => $pin:ident),* $(,)? }
        bus { $($bus:ident => $bus_pin:ident),* $(,)? }
    ) => {
        /// GPIOs split off from [`Peripherals`] for the [`PinBank`]
        ///
        /// Pins wired to the SPI buses are not here; they travel in
        /// [`RemainingPeripherals`] with their concrete types.
        pub struct PinBankPeripherals {
            $(pub $field: Option<Peri<'static, peripherals::$pin>>,)*
        }

        /// Non-GPIO peripherals and fixed bus pins left after the split
        pub struct RemainingPeripherals {
            /// Panel bus
            pub spi0: Peri<'static, peripherals::SPI0>,
            /// Touch controller bus
            pub spi1: Peri<'static, peripherals::SPI1>,
            $(pub $bus: Peri<'static, peripherals::$bus_pin>,)*
        }

        impl PinBankPeripherals {
            /// Split the GPIOs and the buses the kiosk uses out of `p`
            pub fn from_peripherals(p: Peripherals) -> (Self, RemainingPeripherals) {
                let pins = Self {
                    $($field: Some(p.$pin),)*
                };
                let remaining = RemainingPeripherals {
                    spi0: p.SPI0,
                    spi1: p.SPI1,
                    $($bus: p.$bus_pin,)*
                };
                (pins, remaining)
            }

            fn drain(&mut self) -> [Option<Peri<'static, AnyPin>>; GPIO_COUNT] {
                let mut pins = [const { None }; GPIO_COUNT];
                $(pins[$num] = self.$field.take().map(Into::into);)*
                pins
            }
        }
    };
}

pin_bank_peripherals! {
    bank {
        0: pin0 => PIN_0, 1: pin1 => PIN_1, 2: pin2 => PIN_2, 3: pin3 => PIN_3,
        4: pin4 => PIN_4, 5: pin5 => PIN_5, 6: pin6 => PIN_6, 7: pin7 => PIN_7,
        8: pin8 => PIN_8, 9: pin9 => PIN_9, 13: pin13 => PIN_13, 14: pin14 => PIN_14,
        15: pin15 => PIN_15, 17: pin17 => PIN_17, 20: pin20 => PIN_20, 21: pin21 => PIN_21,
        22: pin22 => PIN_22, 23: pin23 => PIN_23, 24: pin24 => PIN_24, 25: pin25 => PIN_25,
        26: pin26 => PIN_26, 27: pin27 => PIN_27, 28: pin28 => PIN_28, 29: pin29 => PIN_29,
    }
    bus {
        touch_sck => PIN_10,
        touch_mosi => PIN_11,
        touch_miso => PIN_12,
        panel_miso => PIN_16,
        panel_sck => PIN_18,
        panel_mosi => PIN_19,
    }
}
