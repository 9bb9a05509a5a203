//! SPI bus abstractions
//!
//! The touch controller and the panel each sit on their own bus; chip
//! select is handled by the drivers through an [`OutputPin`](crate::OutputPin).

/// SPI bus master
pub trait SpiBus {
    /// Error type for SPI operations
    type Error;

    /// Write data without reading
    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Transfer data in place
    ///
    /// Writes the buffer out while reading the response into the same buffer.
    fn transfer_in_place(&mut self, data: &mut [u8]) -> Result<(), Self::Error>;
}

/// SPI configuration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
    /// SPI mode
    pub mode: Mode,
}

impl SpiConfig {
    /// XPT2046 touch controllers are specified up to 2.5 MHz; 1 MHz is
    /// what the resistive panel tolerates without extra settling time.
    pub const fn touch() -> Self {
        Self {
            frequency: 1_000_000,
            mode: Mode::Mode0,
        }
    }

    /// ILI9341 accepts writes at up to 10 MHz per datasheet, most modules
    /// run fine at 40 MHz.
    pub const fn panel() -> Self {
        Self {
            frequency: 40_000_000,
            mode: Mode::Mode0,
        }
    }
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self::touch()
    }
}

/// SPI mode (combined polarity and phase)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Mode 0: CPOL=0, CPHA=0
    Mode0,
    /// Mode 1: CPOL=0, CPHA=1
    Mode1,
    /// Mode 2: CPOL=1, CPHA=0
    Mode2,
    /// Mode 3: CPOL=1, CPHA=1
    Mode3,
}

impl Mode {
    /// Clock polarity: true when the clock idles high
    pub fn idles_high(self) -> bool {
        matches!(self, Mode::Mode2 | Mode::Mode3)
    }

    /// Clock phase: true when data is captured on the second transition
    pub fn captures_on_second(self) -> bool {
        matches!(self, Mode::Mode1 | Mode::Mode3)
    }
}
