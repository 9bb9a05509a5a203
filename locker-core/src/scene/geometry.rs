//! Points, areas and colors

/// A position in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another point
    pub fn manhattan(self, other: Point) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// Axis-aligned rectangle given by two corners
///
/// Both corners are inside the area: containment is inclusive on every
/// edge, so a touch exactly on the border hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Area {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Area {
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Build an area from a top-left corner and a size
    pub const fn from_origin(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x1: x,
            y1: y,
            x2: x + width,
            y2: y + height,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        let inside_x = self.x1 <= point.x && point.x <= self.x2;
        let inside_y = self.y1 <= point.y && point.y <= self.y2;
        inside_x && inside_y
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.x1.min(self.x2), self.y1.min(self.y2))
    }

    pub fn width(&self) -> u32 {
        self.x1.abs_diff(self.x2)
    }

    pub fn height(&self) -> u32 {
        self.y1.abs_diff(self.y2)
    }

    /// Shrink every edge by `by` pixels
    pub const fn inset(&self, by: i32) -> Self {
        Self {
            x1: self.x1 + by,
            y1: self.y1 + by,
            x2: self.x2 - by,
            y2: self.y2 - by,
        }
    }
}

/// RGBA color, 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GREY: Color = Color::rgb(150, 150, 150);
    pub const LIGHT_GREY: Color = Color::rgb(220, 220, 220);
    pub const RED: Color = Color::rgb(200, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 190, 0);
    pub const YELLOW: Color = Color::rgb(230, 200, 0);
    pub const BLUE: Color = Color::rgb(30, 90, 200);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully transparent colors are skipped by the canvas
    pub fn is_visible(&self) -> bool {
        self.a != 0
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_inclusive() {
        let area = Area::new(10, 20, 30, 40);
        assert!(area.contains(Point::new(10, 20)));
        assert!(area.contains(Point::new(30, 40)));
        assert!(area.contains(Point::new(30, 20)));
        assert!(!area.contains(Point::new(9, 20)));
        assert!(!area.contains(Point::new(30, 41)));
    }

    #[test]
    fn test_manhattan() {
        assert_eq!(Point::new(0, 0).manhattan(Point::new(3, -4)), 7);
        assert_eq!(Point::new(-2, 5).manhattan(Point::new(-2, 5)), 0);
    }

    #[test]
    fn test_from_origin_and_inset() {
        let area = Area::from_origin(5, 5, 10, 20);
        assert_eq!(area, Area::new(5, 5, 15, 25));
        assert_eq!(area.inset(2), Area::new(7, 7, 13, 23));
        assert_eq!(area.width(), 10);
        assert_eq!(area.height(), 20);
    }
}
