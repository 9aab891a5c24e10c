use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

use crate::camera::Camera;
use crate::flicker::Flicker;
use crate::levels;
use crate::pick::TargetSet;

/// Notification pushed to the caller's event vector each frame.
///
/// `Update` is emitted on every advance; `Factor` only when the flicker
/// fires, carrying the raw (pre-power) factor. The frame driver drains the
/// vector after each advance and forwards events to whoever listens.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SceneEvent {
    Update { delta_sec: f32 },
    Factor { factor: f32 },
}

/// Host-supplied inputs for one frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameInput {
    /// Pointer in normalized device coordinates, `None` until the pointer
    /// has entered the window.
    pub pointer_ndc: Option<Vec2>,
    /// Rolling average loudness from the audio analyser; 0 when no audio
    /// data is available yet (silence, not a fault).
    pub avg_loudness: f32,
}

/// All per-frame animated visual state of the jukebox scene.
///
/// Owned by the frame driver and mutated exactly once per frame from the
/// animation callback; there is no other writer. The RNG is seeded per
/// instance so flicker timing replays deterministically in tests.
pub struct SceneState {
    pub camera: Camera,
    pub targets: TargetSet,
    pub flicker: Flicker,
    /// Bloom pass strength for the current frame, driven by loudness.
    pub bloom_strength: f32,
    /// Playback volume for the current frame, ramping up from silence.
    pub volume: f32,
    elapsed_sec: f64,
    rng: StdRng,
}

impl SceneState {
    pub fn new(camera: Camera, targets: TargetSet, seed: u64) -> Self {
        Self {
            camera,
            targets,
            flicker: Flicker::new(),
            bloom_strength: 0.0,
            volume: 0.0,
            elapsed_sec: 0.0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Tone-mapping exposure currently in effect.
    pub fn exposure(&self) -> f32 {
        self.flicker.exposure
    }

    /// Wall-clock seconds accumulated since the scene started.
    pub fn elapsed_sec(&self) -> f64 {
        self.elapsed_sec
    }

    /// Advance every animated quantity by one tick.
    ///
    /// Single-threaded and infallible: all inputs are pre-validated by the
    /// host, and missing audio reads as silence. Ordering mirrors the
    /// original scene: flicker, hover pick, volume ramp, bloom, broadcast.
    pub fn advance(&mut self, dt: Duration, input: &FrameInput, out_events: &mut Vec<SceneEvent>) {
        let dt_sec = dt.as_secs_f32();
        self.elapsed_sec += dt.as_secs_f64();

        if let Some(factor) = self.flicker.advance(dt_sec, &mut self.rng) {
            out_events.push(SceneEvent::Factor { factor });
        }

        if let Some(ndc) = input.pointer_ndc {
            let (ro, rd) = self.camera.ndc_ray(ndc);
            let hit = self.targets.pick(ro, rd);
            self.targets.update_hover(hit);
        }

        self.volume = levels::ramped_volume(self.elapsed_sec as f32);
        self.bloom_strength = levels::bloom_strength(input.avg_loudness);

        out_events.push(SceneEvent::Update { delta_sec: dt_sec });
    }
}
