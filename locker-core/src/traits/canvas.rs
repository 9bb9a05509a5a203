//! Drawing surface

use crate::scene::{Area, Color, Point, TextStyle};

/// Errors reported by a canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus transfer to the panel failed
    Bus,
    /// Control pin could not be driven
    Pin,
    /// No font can render the requested style
    UnsupportedFont,
}

/// Immediate-mode drawing surface used by the scene engine
///
/// Areas are inclusive on both axes. Colors with zero alpha must not be
/// painted.
pub trait Canvas {
    /// Fill an area with a solid color
    fn fill_rect(&mut self, area: Area, color: Color) -> Result<(), DisplayError>;

    /// Stroke the border of an area, growing inwards by `width` pixels
    fn stroke_box(&mut self, area: Area, color: Color, width: u8) -> Result<(), DisplayError>;

    /// Draw a single line of text with its top-left corner at `origin`
    fn draw_text(&mut self, origin: Point, style: &TextStyle, text: &str)
        -> Result<(), DisplayError>;

    /// Push the finished frame to the panel
    ///
    /// Buffered canvases flush their back buffer here; nothing drawn
    /// before this call is required to be visible.
    fn present(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }
}

impl<C: Canvas + ?Sized> Canvas for &mut C {
    fn fill_rect(&mut self, area: Area, color: Color) -> Result<(), DisplayError> {
        (**self).fill_rect(area, color)
    }

    fn stroke_box(&mut self, area: Area, color: Color, width: u8) -> Result<(), DisplayError> {
        (**self).stroke_box(area, color, width)
    }

    fn draw_text(
        &mut self,
        origin: Point,
        style: &TextStyle,
        text: &str,
    ) -> Result<(), DisplayError> {
        (**self).draw_text(origin, style, text)
    }

    fn present(&mut self) -> Result<(), DisplayError> {
        (**self).present()
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::string::{String, ToString};
    use std::vec::Vec;

    #[derive(Debug, Clone, PartialEq)]
    pub enum DrawCall {
        Fill(Area, Color),
        Stroke(Area, Color, u8),
        Text(Point, String),
        Present,
    }

    /// Canvas that records every call
    #[derive(Default)]
    pub struct RecordingCanvas {
        pub calls: Vec<DrawCall>,
    }

    impl RecordingCanvas {
        pub fn texts(&self) -> Vec<&str> {
            self.calls
                .iter()
                .filter_map(|call| match call {
                    DrawCall::Text(_, text) => Some(text.as_str()),
                    _ => None,
                })
                .collect()
        }
    }

    impl Canvas for RecordingCanvas {
        fn fill_rect(&mut self, area: Area, color: Color) -> Result<(), DisplayError> {
            self.calls.push(DrawCall::Fill(area, color));
            Ok(())
        }

        fn stroke_box(&mut self, area: Area, color: Color, width: u8) -> Result<(), DisplayError> {
            self.calls.push(DrawCall::Stroke(area, color, width));
            Ok(())
        }

        fn draw_text(
            &mut self,
            origin: Point,
            _style: &TextStyle,
            text: &str,
        ) -> Result<(), DisplayError> {
            self.calls.push(DrawCall::Text(origin, text.to_string()));
            Ok(())
        }

        fn present(&mut self) -> Result<(), DisplayError> {
            self.calls.push(DrawCall::Present);
            Ok(())
        }
    }
}
