//! ILI9341 TFT panel driver
//!
//! Write-only 4-wire SPI: the D/C pin selects command (low) or data
//! (high) bytes. Pixels are 16-bit RGB565, big-endian on the wire.

use embedded_graphics::pixelcolor::raw::{RawData, RawU16};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_hal::delay::DelayNs;
use locker_hal::{ActivePin, OutputPin, SpiBus};

/// ILI9341 commands
mod cmd {
    pub const SWRESET: u8 = 0x01;
    pub const SLPOUT: u8 = 0x11;
    pub const DISPON: u8 = 0x29;
    pub const CASET: u8 = 0x2A;
    pub const PASET: u8 = 0x2B;
    pub const RAMWR: u8 = 0x2C;
    pub const MADCTL: u8 = 0x36;
    pub const PIXFMT: u8 = 0x3A;
}

/// MADCTL bits
const MADCTL_MX: u8 = 0x40;
const MADCTL_MV: u8 = 0x20;
const MADCTL_BGR: u8 = 0x08;

/// 16 bits per pixel on both interfaces
const PIXFMT_RGB565: u8 = 0x55;

/// Pixels pushed per SPI write
const CHUNK_PIXELS: usize = 32;

/// Panel errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelError<E> {
    /// SPI transfer failed
    Spi(E),
}

/// Panel mounting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Orientation {
    /// 240x320
    Portrait,
    /// 320x240
    Landscape,
}

impl Orientation {
    /// Pick the orientation matching a configured size
    pub fn for_size(width: u16, height: u16) -> Self {
        if width >= height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }

    fn madctl(self) -> u8 {
        match self {
            Orientation::Portrait => MADCTL_MX | MADCTL_BGR,
            Orientation::Landscape => MADCTL_MV | MADCTL_BGR,
        }
    }
}

/// Pulse the panel's hardware reset line
pub fn hard_reset<RST: OutputPin, D: DelayNs>(rst: &mut RST, delay: &mut D) {
    rst.set_high();
    delay.delay_ms(5);
    rst.set_low();
    delay.delay_ms(20);
    rst.set_high();
    delay.delay_ms(150);
}

/// ILI9341 driver
pub struct Ili9341<SPI, DC, CS> {
    spi: SPI,
    dc: DC,
    cs: ActivePin<CS>,
    width: u16,
    height: u16,
    orientation: Orientation,
}

impl<SPI, DC, CS> Ili9341<SPI, DC, CS>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
{
    pub fn new(spi: SPI, dc: DC, cs: CS, width: u16, height: u16) -> Self {
        Self {
            spi,
            dc,
            cs: ActivePin::new(cs, true),
            width,
            height,
            orientation: Orientation::for_size(width, height),
        }
    }

    /// Initialize the controller and turn the panel on
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), PanelError<SPI::Error>> {
        self.command(cmd::SWRESET, &[])?;
        delay.delay_ms(120);
        self.command(cmd::SLPOUT, &[])?;
        delay.delay_ms(120);
        self.command(cmd::PIXFMT, &[PIXFMT_RGB565])?;
        self.command(cmd::MADCTL, &[self.orientation.madctl()])?;
        self.command(cmd::DISPON, &[])?;
        delay.delay_ms(20);
        Ok(())
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Fill an inclusive pixel window with one color
    ///
    /// Reversed corners draw nothing.
    fn fill_window(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
        color: Rgb565,
    ) -> Result<(), PanelError<SPI::Error>> {
        if x1 < x0 || y1 < y0 {
            return Ok(());
        }
        let count = (x1 - x0 + 1) as usize * (y1 - y0 + 1) as usize;
        let raw = RawU16::from(color).into_inner().to_be_bytes();
        let mut chunk = [0u8; CHUNK_PIXELS * 2];
        for pair in chunk.chunks_exact_mut(2) {
            pair.copy_from_slice(&raw);
        }

        self.set_window(x0, y0, x1, y1)?;
        self.dc.set_high();
        self.cs.assert();
        let mut remaining = count;
        let mut result = Ok(());
        while remaining > 0 && result.is_ok() {
            let n = remaining.min(CHUNK_PIXELS);
            result = self.spi.write(&chunk[..n * 2]);
            remaining -= n;
        }
        self.cs.deassert();
        result.map_err(PanelError::Spi)
    }

    fn set_window(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
    ) -> Result<(), PanelError<SPI::Error>> {
        let [x0h, x0l] = x0.to_be_bytes();
        let [x1h, x1l] = x1.to_be_bytes();
        let [y0h, y0l] = y0.to_be_bytes();
        let [y1h, y1l] = y1.to_be_bytes();
        self.command(cmd::CASET, &[x0h, x0l, x1h, x1l])?;
        self.command(cmd::PASET, &[y0h, y0l, y1h, y1l])?;
        self.command(cmd::RAMWR, &[])
    }

    /// Send a command byte followed by its parameters
    fn command(&mut self, command: u8, params: &[u8]) -> Result<(), PanelError<SPI::Error>> {
        self.cs.assert();
        self.dc.set_low();
        let mut result = self.spi.write(&[command]);
        if result.is_ok() && !params.is_empty() {
            self.dc.set_high();
            result = self.spi.write(params);
        }
        self.cs.deassert();
        result.map_err(PanelError::Spi)
    }

    /// Clip a rectangle to the panel, as inclusive corners
    fn clip(&self, area: &Rectangle) -> Option<(u16, u16, u16, u16)> {
        let area = area.intersection(&self.bounding_box());
        let bottom_right = area.bottom_right()?;
        Some((
            area.top_left.x as u16,
            area.top_left.y as u16,
            bottom_right.x as u16,
            bottom_right.y as u16,
        ))
    }
}

impl<SPI, DC, CS> OriginDimensions for Ili9341<SPI, DC, CS> {
    fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }
}

impl<SPI, DC, CS> DrawTarget for Ili9341<SPI, DC, CS>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
{
    type Color = Rgb565;
    type Error = PanelError<SPI::Error>;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let bounds = self.bounding_box();
        for Pixel(point, color) in pixels {
            if !bounds.contains(point) {
                continue;
            }
            let (x, y) = (point.x as u16, point.y as u16);
            self.fill_window(x, y, x, y, color)?;
        }
        Ok(())
    }

    /// Stream a window in one RAMWR burst
    ///
    /// Windows that hang off the panel fall back to per-pixel clipping.
    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        if area.intersection(&self.bounding_box()) != *area {
            let pixels = area.points().zip(colors).map(|(point, color)| Pixel(point, color));
            return self.draw_iter(pixels);
        }
        let Some((x0, y0, x1, y1)) = self.clip(area) else {
            return Ok(());
        };
        let count = area.size.width as usize * area.size.height as usize;

        self.set_window(x0, y0, x1, y1)?;
        self.dc.set_high();
        self.cs.assert();
        let mut chunk = [0u8; CHUNK_PIXELS * 2];
        let mut filled = 0;
        let mut result = Ok(());
        for color in colors.into_iter().take(count) {
            let raw = RawU16::from(color).into_inner().to_be_bytes();
            chunk[filled * 2..filled * 2 + 2].copy_from_slice(&raw);
            filled += 1;
            if filled == CHUNK_PIXELS {
                result = self.spi.write(&chunk);
                filled = 0;
                if result.is_err() {
                    break;
                }
            }
        }
        if result.is_ok() && filled > 0 {
            result = self.spi.write(&chunk[..filled * 2]);
        }
        self.cs.deassert();
        result.map_err(PanelError::Spi)
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        match self.clip(area) {
            Some((x0, y0, x1, y1)) => self.fill_window(x0, y0, x1, y1, color),
            None => Ok(()),
        }
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill_window(0, 0, self.width - 1, self.height - 1, color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::vec::Vec;

    /// Bytes written, tagged with the D/C level at the time
    type Wire = Rc<RefCell<Vec<(bool, u8)>>>;

    struct MockSpi {
        dc: Rc<Cell<bool>>,
        wire: Wire,
    }

    impl SpiBus for MockSpi {
        type Error = ();

        fn write(&mut self, data: &[u8]) -> Result<(), ()> {
            let dc = self.dc.get();
            self.wire.borrow_mut().extend(data.iter().map(|b| (dc, *b)));
            Ok(())
        }

        fn transfer_in_place(&mut self, _data: &mut [u8]) -> Result<(), ()> {
            Ok(())
        }
    }

    struct MockPin {
        high: Rc<Cell<bool>>,
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

    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn panel() -> (Ili9341<MockSpi, MockPin, MockPin>, Wire) {
        let dc = Rc::new(Cell::new(false));
        let wire: Wire = Rc::new(RefCell::new(Vec::new()));
        let spi = MockSpi {
            dc: dc.clone(),
            wire: wire.clone(),
        };
        let panel = Ili9341::new(
            spi,
            MockPin { high: dc },
            MockPin {
                high: Rc::new(Cell::new(true)),
            },
            320,
            240,
        );
        (panel, wire)
    }

    fn commands(wire: &Wire) -> Vec<u8> {
        wire.borrow()
            .iter()
            .filter(|(dc, _)| !dc)
            .map(|(_, b)| *b)
            .collect()
    }

    #[test]
    fn test_init_sequence() {
        let (mut panel, wire) = panel();
        panel.init(&mut NoDelay).unwrap();

        assert_eq!(
            commands(&wire),
            [cmd::SWRESET, cmd::SLPOUT, cmd::PIXFMT, cmd::MADCTL, cmd::DISPON]
        );
        assert_eq!(panel.orientation(), Orientation::Landscape);
        // MADCTL parameter follows its command as data
        let bytes = wire.borrow();
        let madctl = bytes.iter().position(|&(dc, b)| !dc && b == cmd::MADCTL).unwrap();
        assert_eq!(bytes[madctl + 1], (true, MADCTL_MV | MADCTL_BGR));
    }

    #[test]
    fn test_fill_solid_is_clipped() {
        let (mut panel, wire) = panel();
        let area = Rectangle::new(Point::new(310, 230), Size::new(20, 20));
        panel.fill_solid(&area, Rgb565::RED).unwrap();

        assert_eq!(commands(&wire), [cmd::CASET, cmd::PASET, cmd::RAMWR]);
        let data = data(&wire);
        // Window 310..=319 x 230..=239
        assert_eq!(&data[..4], &[0x01, 0x36, 0x01, 0x3F]);
        assert_eq!(&data[4..8], &[0x00, 0xE6, 0x00, 0xEF]);
        // 100 pixels of red
        assert_eq!(data.len() - 8, 200);
        assert_eq!(&data[8..10], &[0xF8, 0x00]);
    }

    #[test]
    fn test_fill_outside_panel_is_noop() {
        let (mut panel, wire) = panel();
        let area = Rectangle::new(Point::new(400, 10), Size::new(5, 5));
        panel.fill_solid(&area, Rgb565::RED).unwrap();
        assert!(wire.borrow().is_empty());
    }

    fn data(wire: &Wire) -> Vec<u8> {
        wire.borrow()
            .iter()
            .filter(|(dc, _)| *dc)
            .map(|(_, b)| *b)
            .collect()
    }

    #[test]
    fn test_reversed_window_draws_nothing() {
        let (mut panel, wire) = panel();
        panel.fill_window(10, 10, 9, 10, Rgb565::RED).unwrap();
        panel.fill_window(10, 10, 10, 9, Rgb565::RED).unwrap();
        assert!(wire.borrow().is_empty());

        panel.fill_window(10, 10, 10, 10, Rgb565::RED).unwrap();
        assert_eq!(data(&wire).len(), 8 + 2);
    }

    #[test]
    fn test_contiguous_fill_is_one_burst() {
        let (mut panel, wire) = panel();
        let area = Rectangle::new(Point::new(0, 0), Size::new(10, 10));
        let colors = (0..100).map(|i| if i == 99 { Rgb565::RED } else { Rgb565::BLACK });
        panel.fill_contiguous(&area, colors).unwrap();

        assert_eq!(commands(&wire), [cmd::CASET, cmd::PASET, cmd::RAMWR]);
        let data = data(&wire);
        assert_eq!(&data[..4], &[0x00, 0x00, 0x00, 0x09]);
        assert_eq!(data.len() - 8, 200);
        assert_eq!(&data[data.len() - 2..], &[0xF8, 0x00]);
    }

    #[test]
    fn test_contiguous_fill_off_panel_is_clipped() {
        let (mut panel, wire) = panel();
        let area = Rectangle::new(Point::new(318, 0), Size::new(4, 1));
        panel
            .fill_contiguous(&area, core::iter::repeat(Rgb565::RED))
            .unwrap();

        // Two on-panel pixels, one window each
        assert_eq!(
            commands(&wire),
            [cmd::CASET, cmd::PASET, cmd::RAMWR, cmd::CASET, cmd::PASET, cmd::RAMWR]
        );
    }

    #[test]
    fn test_portrait_for_tall_sizes() {
        assert_eq!(Orientation::for_size(240, 320), Orientation::Portrait);
        assert_eq!(Orientation::for_size(320, 240), Orientation::Landscape);
    }
}
