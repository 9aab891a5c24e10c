/// Scene tuning constants shared by the update loop and the web frontend.
///
/// These express intended behavior (factor ranges, ramp lengths, clamp
/// limits) and keep magic numbers out of the loop body.
// Exposure flicker
pub const FLICKER_FACTOR_MIN: f32 = 0.98;
pub const FLICKER_FACTOR_MAX: f32 = 0.99;
pub const FLICKER_EXPOSURE_POWER: f32 = 4.0; // compresses toward darker exposures
pub const FLICKER_FIRST_INTERVAL_SEC: f32 = 1.0;
pub const FLICKER_INTERVAL_MAX_SEC: f32 = 0.3;

// Audio-reactive bloom
pub const REFERENCE_LOUDNESS: f32 = 100.0; // analyser average that maps to full bloom
pub const BLOOM_THRESHOLD: f32 = 0.0;
pub const BLOOM_RADIUS: f32 = 0.0;

// Playback volume ramp
pub const VOLUME_CEILING: f32 = 0.5;
pub const VOLUME_RAMP_SEC: f32 = 10.0; // ceiling is reached after 5s at 0.5

// Navigation cursor bounds (frame index shown on the wall)
pub const NAV_MIN: u32 = 1;
pub const NAV_MAX: u32 = 100;

// Camera
// Z distance used by both rendering and picking.
pub const CAMERA_Z: f32 = 15.0;
pub const CAMERA_FOVY_DEG: f32 = 75.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;

// Interaction
pub const HOVER_SCALE_BOOST: f32 = 1.15; // applied to a hovered control, restored on leave

// Post-processing
pub const AFTERIMAGE_DAMP: f32 = 0.7;
