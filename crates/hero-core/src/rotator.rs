//! Pointer-reactive rotation easing.
//!
//! The logo group eases toward a rotation target derived from the normalized
//! pointer position: yaw from x, pitch from y, each scaled to pi/10 at full
//! deflection. Smoothing is exponential (a fixed fraction of the remaining
//! distance per reference frame), scaled by elapsed time so convergence looks
//! the same at any refresh rate.

use glam::Vec2;

use crate::constants::{REFERENCE_FRAME_RATE, ROTATION_LERP_PER_FRAME, ROTATION_RANGE};

/// Rotation target for a normalized pointer position. `x` maps to yaw,
/// `y` to pitch.
pub fn target_rotation(pointer: Vec2) -> Vec2 {
    pointer * ROTATION_RANGE
}

/// Smoothing factor for an elapsed-time step, calibrated so a step of one
/// reference frame (1/60 s) closes exactly `ROTATION_LERP_PER_FRAME` of the
/// remaining distance.
pub fn smoothing_alpha(dt_sec: f32) -> f32 {
    1.0 - (1.0 - ROTATION_LERP_PER_FRAME).powf(dt_sec * REFERENCE_FRAME_RATE)
}

/// One easing step: `(current, pointer, dt) -> next`. Pure, so the easing is
/// testable without a live rendering context.
pub fn ease_toward(current: Vec2, pointer: Vec2, dt_sec: f32) -> Vec2 {
    if dt_sec <= 0.0 {
        return current;
    }
    let target = target_rotation(pointer);
    current + (target - current) * smoothing_alpha(dt_sec)
}

/// Current (yaw, pitch) of the logo group, advanced once per frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerRotator {
    rotation: Vec2,
}

impl PointerRotator {
    /// Advance toward the pointer target and return the new (yaw, pitch).
    pub fn step(&mut self, pointer: Vec2, dt_sec: f32) -> Vec2 {
        self.rotation = ease_toward(self.rotation, pointer, dt_sec);
        self.rotation
    }

    pub fn rotation(&self) -> Vec2 {
        self.rotation
    }
}
