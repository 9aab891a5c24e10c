use crate::constants::{REFERENCE_LOUDNESS, VOLUME_CEILING, VOLUME_RAMP_SEC};

/// Map the analyser's rolling average loudness to bloom pass strength.
///
/// Straight division by the reference loudness, no smoothing or clamping:
/// the analyser's own averaging is the only filter, and a missing sample
/// arrives here as 0 (silence).
#[inline]
pub fn bloom_strength(avg_loudness: f32) -> f32 {
    avg_loudness / REFERENCE_LOUDNESS
}

/// Linear playback fade-in, capped at the ceiling once the ramp completes.
#[inline]
pub fn ramped_volume(elapsed_sec: f32) -> f32 {
    (elapsed_sec / VOLUME_RAMP_SEC).min(VOLUME_CEILING)
}
