//! Linear raw-to-screen mapping

use locker_core::config::{DisplayConfig, TouchConfig};
use locker_core::scene::Point;

/// Maps 12-bit ADC readings onto screen pixels
///
/// Readings outside the calibrated range map outside the screen, where
/// the touch filter treats them as no contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calibration {
    pub x_raw_min: u16,
    pub x_raw_max: u16,
    pub y_raw_min: u16,
    pub y_raw_max: u16,
    pub invert_x: bool,
    pub invert_y: bool,
    /// Swap the raw axes before mapping
    pub swap_xy: bool,
    pub width: u16,
    pub height: u16,
}

impl Calibration {
    pub fn from_config(touch: &TouchConfig, display: &DisplayConfig) -> Self {
        Self {
            x_raw_min: touch.x_raw_min,
            x_raw_max: touch.x_raw_max,
            y_raw_min: touch.y_raw_min,
            y_raw_max: touch.y_raw_max,
            invert_x: touch.invert_x,
            invert_y: touch.invert_y,
            swap_xy: touch.swap_xy,
            width: display.width,
            height: display.height,
        }
    }

    pub fn map(&self, raw_x: u16, raw_y: u16) -> Point {
        let (raw_x, raw_y) = if self.swap_xy {
            (raw_y, raw_x)
        } else {
            (raw_x, raw_y)
        };
        Point::new(
            scale(raw_x, self.x_raw_min, self.x_raw_max, self.width, self.invert_x),
            scale(raw_y, self.y_raw_min, self.y_raw_max, self.height, self.invert_y),
        )
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self::from_config(&TouchConfig::default(), &DisplayConfig::default())
    }
}

fn scale(raw: u16, min: u16, max: u16, size: u16, invert: bool) -> i32 {
    let span = (max as i32 - min as i32).max(1);
    let last = size as i32 - 1;
    let pos = (raw as i32 - min as i32) * last / span;
    if invert {
        last - pos
    } else {
        pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_corners() {
        let cal = Calibration::default();
        // X is inverted on the reference panel
        assert_eq!(cal.map(205, 354), Point::new(319, 0));
        assert_eq!(cal.map(3891, 3577), Point::new(0, 239));
    }

    #[test]
    fn test_midpoint() {
        let cal = Calibration {
            invert_x: false,
            ..Calibration::default()
        };
        let mid_x = (205 + 3891) / 2;
        let mid_y = (354 + 3577) / 2;
        assert_eq!(cal.map(mid_x, mid_y), Point::new(159, 119));
    }

    #[test]
    fn test_outside_range_maps_off_screen() {
        let cal = Calibration::default();
        let p = cal.map(4095, 0);
        assert!(p.x < 0);
        assert!(p.y < 0);
    }

    #[test]
    fn test_swap_axes() {
        let cal = Calibration {
            invert_x: false,
            swap_xy: true,
            ..Calibration::default()
        };
        // Raw X now drives screen Y
        assert_eq!(cal.map(3577, 205), Point::new(0, 239));
    }

    proptest! {
        #[test]
        fn prop_calibrated_range_stays_on_screen(x in 205u16..=3891, y in 354u16..=3577) {
            let p = Calibration::default().map(x, y);
            prop_assert!((0..320).contains(&p.x));
            prop_assert!((0..240).contains(&p.y));
        }
    }
}
