//! Drawable primitives
//!
//! Pure data: each primitive carries its own geometry, color and a
//! `hidden` flag. The canvas decides how they end up on the panel.

use super::geometry::{Area, Color, Point};
use super::text::TextBuffer;

/// Filled rectangle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rect {
    pub area: Area,
    pub color: Color,
    pub hidden: bool,
}

impl Rect {
    pub fn new(area: Area, color: Color) -> Self {
        Self {
            area,
            color,
            hidden: false,
        }
    }
}

/// Stroked rectangle outline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outline {
    pub area: Area,
    pub color: Color,
    /// Stroke width in pixels
    pub width: u8,
    pub hidden: bool,
}

impl Outline {
    pub fn new(area: Area, color: Color, width: u8) -> Self {
        Self {
            area,
            color,
            width,
            hidden: false,
        }
    }
}

/// Font face identifier resolved by the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FontId(pub u8);

impl FontId {
    pub const SANS: FontId = FontId(0);
}

/// How a label is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextStyle {
    pub font: FontId,
    /// Nominal glyph height in pixels
    pub size: u8,
    pub color: Color,
}

impl TextStyle {
    pub const fn new(size: u8, color: Color) -> Self {
        Self {
            font: FontId::SANS,
            size,
            color,
        }
    }
}

/// Text label with its top-left corner at `origin`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub origin: Point,
    pub style: TextStyle,
    pub text: TextBuffer,
    pub hidden: bool,
}

impl Label {
    pub fn new(origin: Point, style: TextStyle, text: TextBuffer) -> Self {
        Self {
            origin,
            style,
            text,
            hidden: false,
        }
    }
}
