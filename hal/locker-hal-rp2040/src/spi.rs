//! Blocking SPI wrapper

use embassy_rp::spi::{Blocking, Config, Instance, Phase, Polarity, Spi};
use locker_hal::{SpiBus, SpiConfig};

/// embassy-rp SPI master in blocking mode
pub struct RpSpi<'d, T: Instance>(Spi<'d, T, Blocking>);

impl<'d, T: Instance> RpSpi<'d, T> {
    pub fn new(spi: Spi<'d, T, Blocking>) -> Self {
        Self(spi)
    }
}

/// Translate the bus-agnostic config into embassy-rp's
pub fn rp_config(config: &SpiConfig) -> Config {
    let mut rp = Config::default();
    rp.frequency = config.frequency;
    rp.polarity = if config.mode.idles_high() {
        Polarity::IdleHigh
    } else {
        Polarity::IdleLow
    };
    rp.phase = if config.mode.captures_on_second() {
        Phase::CaptureOnSecondTransition
    } else {
        Phase::CaptureOnFirstTransition
    };
    rp
}

impl<'d, T: Instance> SpiBus for RpSpi<'d, T> {
    type Error = embassy_rp::spi::Error;

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.0.blocking_write(data)
    }

    fn transfer_in_place(&mut self, data: &mut [u8]) -> Result<(), Self::Error> {
        self.0.blocking_transfer_in_place(data)
    }
}
