//! `Canvas` on top of embedded-graphics
//!
//! Zero-alpha colors are skipped; everything else is painted opaque since
//! RGB565 panels have no alpha channel. Drawing goes to a buffered target
//! and only `present` makes it visible.

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10, FONT_8X13};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, StrokeAlignment,
};
use embedded_graphics::text::{Baseline, Text};
use locker_core::scene::{Area, Color, FontId, Point as ScenePoint, TextStyle};
use locker_core::traits::{Canvas, DisplayError};

use crate::buffer::Flush;

/// Adapter from the scene engine to a buffered RGB565 draw target
pub struct GraphicsCanvas<D> {
    target: D,
    frames: u32,
}

impl<D> GraphicsCanvas<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub fn new(target: D) -> Self {
        Self { target, frames: 0 }
    }

    /// Frames presented so far
    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub fn target(&self) -> &D {
        &self.target
    }
}

impl<D> Canvas for GraphicsCanvas<D>
where
    D: DrawTarget<Color = Rgb565> + Flush,
{
    fn fill_rect(&mut self, area: Area, color: Color) -> Result<(), DisplayError> {
        if !color.is_visible() {
            return Ok(());
        }
        rectangle(area)
            .into_styled(PrimitiveStyle::with_fill(to_rgb565(color)))
            .draw(&mut self.target)
            .map_err(|_| DisplayError::Bus)
    }

    fn stroke_box(&mut self, area: Area, color: Color, width: u8) -> Result<(), DisplayError> {
        if !color.is_visible() || width == 0 {
            return Ok(());
        }
        let style = PrimitiveStyleBuilder::new()
            .stroke_color(to_rgb565(color))
            .stroke_width(width as u32)
            .stroke_alignment(StrokeAlignment::Inside)
            .build();
        rectangle(area)
            .into_styled(style)
            .draw(&mut self.target)
            .map_err(|_| DisplayError::Bus)
    }

    fn draw_text(
        &mut self,
        origin: ScenePoint,
        style: &TextStyle,
        text: &str,
    ) -> Result<(), DisplayError> {
        if text.is_empty() || !style.color.is_visible() {
            return Ok(());
        }
        let font = font_for(style)?;
        let character_style = MonoTextStyle::new(font, to_rgb565(style.color));
        Text::with_baseline(
            text,
            Point::new(origin.x, origin.y),
            character_style,
            Baseline::Top,
        )
        .draw(&mut self.target)
        .map(|_| ())
        .map_err(|_| DisplayError::Bus)
    }

    fn present(&mut self) -> Result<(), DisplayError> {
        self.target.flush().map_err(|_| DisplayError::Bus)?;
        self.frames = self.frames.wrapping_add(1);
        Ok(())
    }
}

/// Inclusive scene area to an embedded-graphics rectangle
fn rectangle(area: Area) -> Rectangle {
    Rectangle::with_corners(
        Point::new(area.x1, area.y1),
        Point::new(area.x2, area.y2),
    )
}

fn to_rgb565(color: Color) -> Rgb565 {
    Rgb565::new(color.r >> 3, color.g >> 2, color.b >> 3)
}

/// Largest built-in mono font not taller than the requested size
fn font_for(style: &TextStyle) -> Result<&'static MonoFont<'static>, DisplayError> {
    if style.font != FontId::SANS {
        return Err(DisplayError::UnsupportedFont);
    }
    Ok(match style.size {
        0..=12 => &FONT_6X10,
        13..=19 => &FONT_8X13,
        _ => &FONT_10X20,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    /// Draw target that remembers the last color written to each pixel
    struct FrameBuffer {
        pixels: BTreeMap<(i32, i32), Rgb565>,
        flushes: u32,
    }

    impl FrameBuffer {
        fn new() -> Self {
            Self {
                pixels: BTreeMap::new(),
                flushes: 0,
            }
        }
    }

    impl Flush for FrameBuffer {
        type Error = core::convert::Infallible;

        fn flush(&mut self) -> Result<(), Self::Error> {
            self.flushes += 1;
            Ok(())
        }
    }

    impl OriginDimensions for FrameBuffer {
        fn size(&self) -> Size {
            Size::new(64, 64)
        }
    }

    impl DrawTarget for FrameBuffer {
        type Color = Rgb565;
        type Error = core::convert::Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            for Pixel(point, color) in pixels {
                self.pixels.insert((point.x, point.y), color);
            }
            Ok(())
        }
    }

    #[test]
    fn test_fill_is_inclusive() {
        let mut canvas = GraphicsCanvas::new(FrameBuffer::new());
        canvas
            .fill_rect(Area::new(2, 2, 4, 3), Color::RED)
            .unwrap();
        // 3 x 2 pixels
        assert_eq!(canvas.target().pixels.len(), 6);
        assert!(canvas.target().pixels.contains_key(&(4, 3)));
        assert!(!canvas.target().pixels.contains_key(&(5, 3)));
    }

    #[test]
    fn test_transparent_is_skipped() {
        let mut canvas = GraphicsCanvas::new(FrameBuffer::new());
        canvas
            .fill_rect(Area::new(0, 0, 10, 10), Color::TRANSPARENT)
            .unwrap();
        canvas
            .stroke_box(Area::new(0, 0, 10, 10), Color::TRANSPARENT, 2)
            .unwrap();
        assert!(canvas.target().pixels.is_empty());
    }

    #[test]
    fn test_stroke_leaves_inside_untouched() {
        let mut canvas = GraphicsCanvas::new(FrameBuffer::new());
        canvas
            .stroke_box(Area::new(0, 0, 9, 9), Color::BLACK, 2)
            .unwrap();
        let pixels = &canvas.target().pixels;
        assert!(pixels.contains_key(&(0, 0)));
        assert!(pixels.contains_key(&(1, 1)));
        assert!(!pixels.contains_key(&(2, 2)));
        assert!(!pixels.contains_key(&(5, 5)));
    }

    #[test]
    fn test_text_is_drawn_below_origin() {
        let mut canvas = GraphicsCanvas::new(FrameBuffer::new());
        canvas
            .draw_text(
                ScenePoint::new(10, 10),
                &TextStyle::new(10, Color::WHITE),
                "8",
            )
            .unwrap();
        let pixels = &canvas.target().pixels;
        assert!(!pixels.is_empty());
        assert!(pixels.keys().all(|&(x, y)| x >= 10 && y >= 10 && y < 20));
        assert!(pixels.values().all(|c| *c == Rgb565::WHITE));
    }

    #[test]
    fn test_unknown_font() {
        let mut canvas = GraphicsCanvas::new(FrameBuffer::new());
        let mut style = TextStyle::new(10, Color::WHITE);
        style.font = FontId(7);
        assert_eq!(
            canvas.draw_text(ScenePoint::new(0, 0), &style, "x"),
            Err(DisplayError::UnsupportedFont)
        );
    }

    #[test]
    fn test_color_conversion() {
        assert_eq!(to_rgb565(Color::WHITE), Rgb565::WHITE);
        assert_eq!(to_rgb565(Color::BLACK), Rgb565::BLACK);
        assert_eq!(to_rgb565(Color::rgb(255, 0, 0)), Rgb565::RED);
    }

    #[test]
    fn test_present_flushes_and_counts_frames() {
        let mut canvas = GraphicsCanvas::new(FrameBuffer::new());
        canvas
            .fill_rect(Area::new(0, 0, 3, 3), Color::RED)
            .unwrap();
        assert_eq!(canvas.target().flushes, 0);

        canvas.present().unwrap();
        canvas.present().unwrap();
        assert_eq!(canvas.frames(), 2);
        assert_eq!(canvas.target().flushes, 2);
    }

    #[test]
    fn test_scene_reaches_panel_only_on_present() {
        use crate::buffer::{Buffered, Frame};
        use std::boxed::Box;

        let mut frame = Box::new(Frame::new());
        let mut canvas = GraphicsCanvas::new(Buffered::new(&mut frame, FrameBuffer::new()));
        canvas
            .fill_rect(Area::new(0, 0, 319, 239), Color::WHITE)
            .unwrap();
        canvas
            .draw_text(ScenePoint::new(10, 10), &TextStyle::new(20, Color::BLACK), "1")
            .unwrap();
        assert!(canvas.target().panel().pixels.is_empty());

        canvas.present().unwrap();
        let pixels = &canvas.target().panel().pixels;
        assert_eq!(pixels.len(), 320 * 240);
        assert_eq!(pixels.get(&(0, 0)), Some(&Rgb565::WHITE));
        assert!(pixels.values().any(|c| *c == Rgb565::BLACK));
    }
}
