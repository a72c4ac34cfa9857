//! Camera description shared with the web renderer.
//!
//! Platform-free on purpose: the web frontend only consumes the matrices.

use glam::{Mat4, Vec3};

use crate::constants::{
    CAMERA_DISTANCE_COMPACT, CAMERA_DISTANCE_WIDE, CAMERA_FOVY, CAMERA_ZFAR, CAMERA_ZNEAR,
};

/// Distance from the origin picked once at mount from the viewport class.
pub fn camera_distance(compact: bool) -> f32 {
    if compact {
        CAMERA_DISTANCE_COMPACT
    } else {
        CAMERA_DISTANCE_WIDE
    }
}

/// Simple right-handed camera with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// The hero camera: on the +Z axis looking at the origin, with the
    /// distance fixed by the viewport classification.
    pub fn hero(aspect: f32, compact: bool) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, camera_distance(compact)),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOVY,
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
