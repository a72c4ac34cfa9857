//! Scene tuning constants.
//!
//! Every author-chosen scalar lives here so the rest of the code stays free
//! of magic numbers.

use std::f32::consts::PI;

/// Convert a packed `0xRRGGBB` value to linear-ish rgb floats.
pub const fn rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
    ]
}

// Camera
pub const CAMERA_DISTANCE_COMPACT: f32 = 8.0;
pub const CAMERA_DISTANCE_WIDE: f32 = 6.0;
pub const CAMERA_FOVY: f32 = 75.0 * PI / 180.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 100.0;

// Viewports narrower than this are "compact" (read once at mount)
pub const COMPACT_VIEWPORT_MAX_WIDTH: f64 = 768.0;

// Pointer-reactive rotation
// Full pointer deflection maps to pi/10 of yaw/pitch.
pub const ROTATION_RANGE: f32 = PI / 10.0;
// Fraction of the remaining distance closed per frame at the reference rate.
pub const ROTATION_LERP_PER_FRAME: f32 = 0.05;
pub const REFERENCE_FRAME_RATE: f32 = 60.0;

// Material tuning applied once when the logo model resolves
pub const TUNED_ROUGHNESS: f32 = 0.1;
pub const TUNED_METALNESS: f32 = 0.9;
pub const TUNED_ENV_INTENSITY: f32 = 1.2;

// Placeholder wireframe cube shown until the model resolves
pub const PLACEHOLDER_COLOR: [f32; 3] = rgb(0x0866FF);

// Floating-label animation (identical for every label)
pub const FLOAT_SPEED: f32 = 5.0;
pub const FLOAT_ROTATION_INTENSITY: f32 = 0.7;
pub const FLOAT_INTENSITY: f32 = 2.5;
// Base seed for per-label phase offsets
pub const LABEL_PHASE_SEED: u64 = 42;

// Backdrop
pub const BACKGROUND_COLOR: [f32; 3] = rgb(0x080E1A);
pub const FOG_NEAR: f32 = 5.0;
pub const FOG_FAR: f32 = 20.0;
pub const ENVIRONMENT_INTENSITY: f32 = 1.0;

// Light rig
pub const AMBIENT_INTENSITY: f32 = 0.3;
pub const ACCENT_LIGHT_COLOR: [f32; 3] = rgb(0x4285F4);

// Label palette (two alternating greens from the brand sheet)
pub const LABEL_GREEN_BRIGHT: u32 = 0x1DA851;
pub const LABEL_GREEN_DEEP: u32 = 0x1C8D4C;
