use rand::Rng;

use crate::constants::{
    FLICKER_EXPOSURE_POWER, FLICKER_FACTOR_MAX, FLICKER_FACTOR_MIN, FLICKER_FIRST_INTERVAL_SEC,
    FLICKER_INTERVAL_MAX_SEC,
};

/// Irregular candle-like exposure flicker.
///
/// Accumulates frame deltas and, once the current interval is exceeded, draws
/// a fresh factor and a fresh interval. Intervals are uniform in
/// \[0, `FLICKER_INTERVAL_MAX_SEC`) so the flicker never settles into a
/// periodic rhythm. The RNG is supplied by the caller so firing is
/// reproducible under a fixed seed.
#[derive(Clone, Debug)]
pub struct Flicker {
    pub elapsed_sec: f32,
    pub next_interval_sec: f32,
    /// Tone-mapping exposure currently in effect, `factor^4` of the last draw.
    pub exposure: f32,
}

impl Default for Flicker {
    fn default() -> Self {
        Self::new()
    }
}

impl Flicker {
    pub fn new() -> Self {
        Self {
            elapsed_sec: 0.0,
            next_interval_sec: FLICKER_FIRST_INTERVAL_SEC,
            exposure: 1.0,
        }
    }

    /// Advance by `dt_sec`; returns the raw factor when a flicker fires.
    pub fn advance<R: Rng>(&mut self, dt_sec: f32, rng: &mut R) -> Option<f32> {
        self.elapsed_sec += dt_sec;
        if self.elapsed_sec <= self.next_interval_sec {
            return None;
        }
        let factor = rng.gen_range(FLICKER_FACTOR_MIN..FLICKER_FACTOR_MAX);
        self.exposure = factor.powf(FLICKER_EXPOSURE_POWER);
        self.elapsed_sec = 0.0;
        self.next_interval_sec = rng.gen::<f32>() * FLICKER_INTERVAL_MAX_SEC;
        Some(factor)
    }
}
