use crate::constants::{NAV_MAX, NAV_MIN};

/// Circular cursor over the frame indices shown on the jukebox wall.
///
/// Driven by explicit "move" events (arrow keys, control clicks), never by
/// the per-frame loop. The wrap is a single snap to the opposite bound, not
/// modular reduction: stepping past either end lands exactly on the other
/// end, whatever the step size.
#[derive(Clone, Copy, Debug)]
pub struct NavCursor {
    current: u32,
}

impl Default for NavCursor {
    fn default() -> Self {
        Self { current: NAV_MIN }
    }
}

impl NavCursor {
    /// Out-of-range starts (e.g. corrupt persisted state) snap to the first
    /// frame.
    pub fn new(start: u32) -> Self {
        let current = if (NAV_MIN..=NAV_MAX).contains(&start) {
            start
        } else {
            NAV_MIN
        };
        Self { current }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    /// Advance by a signed step and return the new index.
    pub fn step(&mut self, step: i32) -> u32 {
        let next = self.current as i64 + step as i64;
        self.current = if next <= 0 {
            NAV_MAX
        } else if next > NAV_MAX as i64 {
            NAV_MIN
        } else {
            next as u32
        };
        self.current
    }
}
