//! Frame pacing

/// Yields `true` once every `every` polls
#[derive(Debug, Clone)]
pub struct FramePacer {
    every: u16,
    count: u16,
}

impl FramePacer {
    /// `every` of zero is treated as one (draw on every poll)
    pub fn new(every: u16) -> Self {
        Self {
            every: every.max(1),
            count: 0,
        }
    }

    pub fn tick(&mut self) -> bool {
        self.count += 1;
        if self.count >= self.every {
            self.count = 0;
            true
        } else {
            false
        }
    }
}
