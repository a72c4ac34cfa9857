//! Floating oscillation for the label wrappers.
//!
//! Continuous pseudo-random drift in position and rotation. Each wrapper owns
//! a phase offset; the curve itself is shared (same speed, rotation and float
//! intensity for every label).

use glam::Vec3;

use crate::constants::{FLOAT_INTENSITY, FLOAT_ROTATION_INTENSITY, FLOAT_SPEED};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatParams {
    pub speed: f32,
    pub rotation_intensity: f32,
    pub float_intensity: f32,
}

impl Default for FloatParams {
    fn default() -> Self {
        Self {
            speed: FLOAT_SPEED,
            rotation_intensity: FLOAT_ROTATION_INTENSITY,
            float_intensity: FLOAT_INTENSITY,
        }
    }
}

/// Per-wrapper random phase offset, in seconds.
#[derive(Clone, Copy, Debug, Default)]
pub struct FloatPhase(pub f32);

/// Position offset and rotation of one wrapper at a point in time.
#[derive(Clone, Copy, Debug, Default)]
pub struct FloatPose {
    pub offset: Vec3,
    pub rotation: Vec3,
}

/// Evaluate the oscillation at `elapsed` seconds. Stateless aside from the
/// phase, so repeated evaluation at the same time yields the same pose.
pub fn float_pose(phase: FloatPhase, params: &FloatParams, elapsed: f32) -> FloatPose {
    let t = (phase.0 + elapsed) / 4.0 * params.speed;
    let rotation = Vec3::new(
        t.cos() / 8.0 * params.rotation_intensity,
        t.sin() / 8.0 * params.rotation_intensity,
        t.sin() / 20.0 * params.rotation_intensity,
    );
    // Vertical drift: sin mapped to [-0.1, 0.1] scene units, then scaled.
    let offset = Vec3::new(0.0, t.sin() / 10.0 * params.float_intensity, 0.0);
    FloatPose { offset, rotation }
}

impl FloatPose {
    /// Largest vertical excursion the curve can produce for `params`.
    pub fn max_offset(params: &FloatParams) -> f32 {
        params.float_intensity / 10.0
    }
}
