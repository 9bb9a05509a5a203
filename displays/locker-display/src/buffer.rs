//! Back buffer in front of the panel
//!
//! Scene drawing lands in RAM; the panel only sees a frame when it is
//! flushed, as one CASET/PASET/RAMWR burst.

use core::convert::Infallible;

use embedded_graphics::framebuffer::{buffer_size, Framebuffer};
use embedded_graphics::image::Image;
use embedded_graphics::pixelcolor::raw::{BigEndian, RawU16};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// Back buffer width in pixels
pub const FRAME_WIDTH: usize = 320;
/// Back buffer height in pixels
pub const FRAME_HEIGHT: usize = 240;

/// Full-screen RGB565 frame, laid out as the panel expects it on the wire
pub type Frame = Framebuffer<
    Rgb565,
    RawU16,
    BigEndian,
    FRAME_WIDTH,
    FRAME_HEIGHT,
    { buffer_size::<Rgb565>(FRAME_WIDTH, FRAME_HEIGHT) },
>;

/// Draw target whose output becomes visible only on `flush`
pub trait Flush {
    type Error;

    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// Panel fronted by a RAM frame
pub struct Buffered<'a, D> {
    frame: &'a mut Frame,
    panel: D,
    flushes: u32,
}

impl<'a, D> Buffered<'a, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub fn new(frame: &'a mut Frame, panel: D) -> Self {
        Self {
            frame,
            panel,
            flushes: 0,
        }
    }

    pub fn panel(&self) -> &D {
        &self.panel
    }

    /// Frames pushed to the panel so far
    pub fn flushes(&self) -> u32 {
        self.flushes
    }
}

fn never<E>(e: Infallible) -> E {
    match e {}
}

impl<D> OriginDimensions for Buffered<'_, D> {
    fn size(&self) -> Size {
        self.frame.size()
    }
}

impl<D> DrawTarget for Buffered<'_, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    type Color = Rgb565;
    type Error = D::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.frame.draw_iter(pixels).map_err(never)
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        self.frame.fill_contiguous(area, colors).map_err(never)
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        self.frame.fill_solid(area, color).map_err(never)
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.frame.clear(color).map_err(never)
    }
}

impl<D> Flush for Buffered<'_, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    type Error = D::Error;

    fn flush(&mut self) -> Result<(), Self::Error> {
        Image::new(&self.frame.as_image(), Point::zero()).draw(&mut self.panel)?;
        self.flushes = self.flushes.wrapping_add(1);
        Ok(())
    }
}
