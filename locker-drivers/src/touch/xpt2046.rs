//! XPT2046 resistive touch controller
//!
//! Each reading is a 3-byte exchange: a control byte selecting the
//! channel, then two bytes carrying the 12-bit result left-aligned after
//! one busy bit.

use locker_core::traits::TouchInput;
use locker_core::touch::RawPoint;
use locker_hal::{ActivePin, InputPin, OutputPin, SpiBus};

use super::calibration::Calibration;

/// Control bytes: start bit, channel, 12-bit differential, power-down
/// between conversions with the pen interrupt enabled.
const READ_X: u8 = 0xD0;
const READ_Y: u8 = 0x90;
const READ_Z1: u8 = 0xB0;

/// Errors from the touch controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchError<E> {
    /// SPI transfer failed
    Spi(E),
}

/// XPT2046 driver
///
/// `IRQ` is the optional pen interrupt; without it every poll reads the
/// pressure channel to detect contact.
pub struct Xpt2046<SPI, CS, IRQ> {
    spi: SPI,
    cs: ActivePin<CS>,
    irq: Option<IRQ>,
    calibration: Calibration,
    pressure_threshold: u16,
}

impl<SPI, CS, IRQ> Xpt2046<SPI, CS, IRQ>
where
    SPI: SpiBus,
    CS: OutputPin,
    IRQ: InputPin,
{
    pub fn new(
        spi: SPI,
        cs: CS,
        irq: Option<IRQ>,
        calibration: Calibration,
        pressure_threshold: u16,
    ) -> Self {
        Self {
            spi,
            // Chip select is active low
            cs: ActivePin::new(cs, true),
            irq,
            calibration,
            pressure_threshold,
        }
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Pen interrupt says nothing is touching the panel
    fn pen_up(&self) -> bool {
        self.irq.as_ref().is_some_and(|irq| irq.is_high())
    }

    /// Read one channel as a 12-bit value
    fn read_channel(&mut self, command: u8) -> Result<u16, TouchError<SPI::Error>> {
        let mut buf = [command, 0, 0];
        self.cs.assert();
        let result = self.spi.transfer_in_place(&mut buf);
        self.cs.deassert();
        result.map_err(TouchError::Spi)?;
        Ok(decode(buf[1], buf[2]))
    }

    /// Raw X, Y and Z1 readings
    pub fn read_raw(&mut self) -> Result<(u16, u16, u16), TouchError<SPI::Error>> {
        let z1 = self.read_channel(READ_Z1)?;
        let x = self.read_channel(READ_X)?;
        let y = self.read_channel(READ_Y)?;
        Ok((x, y, z1))
    }
}

impl<SPI, CS, IRQ> TouchInput for Xpt2046<SPI, CS, IRQ>
where
    SPI: SpiBus,
    CS: OutputPin,
    IRQ: InputPin,
{
    type Error = TouchError<SPI::Error>;

    fn poll(&mut self) -> Result<Option<RawPoint>, Self::Error> {
        if self.pen_up() {
            return Ok(None);
        }
        let (x, y, z1) = self.read_raw()?;
        if z1 < self.pressure_threshold {
            return Ok(None);
        }
        Ok(Some(self.calibration.map(x, y)))
    }
}

/// Strip the busy bit and the three trailing zero bits
fn decode(high: u8, low: u8) -> u16 {
    ((((high as u16) << 8) | low as u16) >> 3) & 0x0FFF
}
