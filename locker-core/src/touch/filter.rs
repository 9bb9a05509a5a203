//! Windowed averaging and press debounce

use super::RawPoint;
use crate::scene::Point;

/// Filter tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FilterConfig {
    /// Screen width; samples with `x >= width` are out of range
    pub width: u16,
    /// Screen height; samples with `y >= height` are out of range
    pub height: u16,
    /// Max Manhattan distance between any two samples of a stable window
    pub spread: u16,
    /// Unstable polls required before the next press is accepted
    pub debounce_polls: u16,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            width: 320,
            height: 240,
            spread: 40,
            debounce_polls: 80,
        }
    }
}

/// Sliding window over the last `N` samples
///
/// `None` samples (no contact) stay in the window, so a release is only
/// forgotten once `N` fresh contact samples have arrived.
pub struct TouchFilter<const N: usize> {
    config: FilterConfig,
    window: [Option<RawPoint>; N],
    next: usize,
    countdown: u16,
}

impl<const N: usize> TouchFilter<N> {
    pub fn new(config: FilterConfig) -> Self {
        Self {
            config,
            window: [None; N],
            next: 0,
            countdown: 0,
        }
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Polls left before another press can be dispatched
    pub fn countdown(&self) -> u16 {
        self.countdown
    }

    /// Forget all samples and re-arm immediately
    pub fn reset(&mut self) {
        self.window = [None; N];
        self.next = 0;
        self.countdown = 0;
    }

    /// Feed one sample; returns a point when a new press is accepted
    pub fn update(&mut self, sample: Option<RawPoint>) -> Option<Point> {
        if N == 0 {
            return None;
        }

        let sample = sample.filter(|p| self.in_range(*p));
        self.window[self.next] = sample;
        self.next = (self.next + 1) % N;

        match self.stable_mean() {
            Some(mean) => {
                let fire = self.countdown == 0;
                self.countdown = self.config.debounce_polls;
                fire.then_some(mean)
            }
            None => {
                self.countdown = self.countdown.saturating_sub(1);
                None
            }
        }
    }

    fn in_range(&self, p: RawPoint) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.config.width as i32 && p.y < self.config.height as i32
    }

    fn stable_mean(&self) -> Option<Point> {
        let spread = self.config.spread as u32;
        let (mut sum_x, mut sum_y) = (0i64, 0i64);

        for (i, a) in self.window.iter().enumerate() {
            let a = (*a)?;
            for b in self.window[i + 1..].iter().flatten() {
                if a.manhattan(*b) > spread {
                    return None;
                }
            }
            sum_x += a.x as i64;
            sum_y += a.y as i64;
        }

        Some(Point::new((sum_x / N as i64) as i32, (sum_y / N as i64) as i32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(debounce_polls: u16) -> FilterConfig {
        FilterConfig {
            width: 320,
            height: 240,
            spread: 40,
            debounce_polls,
        }
    }

    /// Feed `count` copies of a sample, collecting accepted points
    fn feed<const N: usize>(
        filter: &mut TouchFilter<N>,
        sample: Option<Point>,
        count: usize,
    ) -> usize {
        (0..count).filter(|_| filter.update(sample).is_some()).count()
    }

    #[test]
    fn test_twenty_stable_samples_yield_mean() {
        let mut filter: TouchFilter<20> = TouchFilter::new(config(4));
        let mut result = None;
        for i in 0..20 {
            // x alternates 100/101, y walks 50..=69
            let sample = Point::new(100 + (i % 2), 50 + i);
            result = filter.update(Some(sample));
            if i < 19 {
                assert_eq!(result, None);
            }
        }
        // mean x = 100.5 -> 100, mean y = 59.5 -> 59
        assert_eq!(result, Some(Point::new(100, 59)));
    }

    #[test]
    fn test_single_dispatch_per_press_and_release() {
        let mut filter: TouchFilter<4> = TouchFilter::new(config(10));
        let press = Some(Point::new(10, 10));

        // Held contact fires once
        assert_eq!(feed(&mut filter, press, 50), 1);

        // A short lift (2 empty polls plus 3 refill polls) does not re-arm
        feed(&mut filter, None, 2);
        assert_eq!(feed(&mut filter, press, 10), 0);

        // A full release does
        feed(&mut filter, None, 10);
        assert_eq!(filter.countdown(), 0);
        assert_eq!(feed(&mut filter, press, 10), 1);
    }

    #[test]
    fn test_outlier_breaks_stability() {
        let mut filter: TouchFilter<4> = TouchFilter::new(config(0));
        feed(&mut filter, Some(Point::new(10, 10)), 3);
        assert_eq!(filter.update(Some(Point::new(60, 10))), None);

        // Window recovers once the outlier slides out
        assert_eq!(feed(&mut filter, Some(Point::new(10, 10)), 3), 0);
        assert!(filter.update(Some(Point::new(10, 10))).is_some());
    }

    #[test]
    fn test_out_of_range_is_no_contact() {
        let mut filter: TouchFilter<2> = TouchFilter::new(config(0));
        assert_eq!(feed(&mut filter, Some(Point::new(320, 10)), 5), 0);
        assert_eq!(feed(&mut filter, Some(Point::new(10, 240)), 5), 0);
        assert_eq!(feed(&mut filter, Some(Point::new(-1, 10)), 5), 0);
        assert!(filter.update(Some(Point::new(319, 239))).is_none());
        assert_eq!(
            filter.update(Some(Point::new(319, 239))),
            Some(Point::new(319, 239))
        );
    }

    #[test]
    fn test_none_never_dispatches() {
        let mut filter: TouchFilter<20> = TouchFilter::new(config(80));
        assert_eq!(feed(&mut filter, None, 100), 0);
        assert_eq!(filter.countdown(), 0);
    }

    #[test]
    fn test_reset_rearms() {
        let mut filter: TouchFilter<2> = TouchFilter::new(config(10));
        assert_eq!(feed(&mut filter, Some(Point::new(5, 5)), 3), 1);
        filter.reset();
        assert_eq!(feed(&mut filter, Some(Point::new(5, 5)), 2), 1);
    }
}
