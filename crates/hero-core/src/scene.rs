//! Scene composition and the per-frame update.
//!
//! `Scene::compose` assembles the light rig, backdrop, model slot, label
//! field and camera; `Scene::advance` is the whole per-frame step and returns
//! a plain snapshot for the renderer, so the frame logic runs and tests
//! without any rendering context.

use glam::{Vec2, Vec3};

use crate::camera::Camera;
use crate::constants::{
    ACCENT_LIGHT_COLOR, AMBIENT_INTENSITY, BACKGROUND_COLOR, ENVIRONMENT_INTENSITY, FOG_FAR,
    FOG_NEAR,
};
use crate::labels::{LabelField, LabelPose};
use crate::model::{ModelSlot, RetryPolicy};
use crate::rotator::PointerRotator;

/// A light in the scene graph.
#[derive(Clone, Copy, Debug)]
pub enum Light {
    Ambient {
        color: [f32; 3],
        intensity: f32,
    },
    Spot {
        position: Vec3,
        angle: f32,
        penumbra: f32,
        intensity: f32,
        color: [f32; 3],
        cast_shadows: bool,
    },
    Point {
        position: Vec3,
        intensity: f32,
        color: [f32; 3],
    },
}

/// Environment backdrop: clear color, fog band, environment intensity.
#[derive(Clone, Copy, Debug)]
pub struct Backdrop {
    pub background: [f32; 3],
    pub fog_near: f32,
    pub fog_far: f32,
    pub env_intensity: f32,
}

impl Default for Backdrop {
    fn default() -> Self {
        Self {
            background: BACKGROUND_COLOR,
            fog_near: FOG_NEAR,
            fog_far: FOG_FAR,
            env_intensity: ENVIRONMENT_INTENSITY,
        }
    }
}

/// Snapshot handed to the renderer each frame.
#[derive(Clone, Debug)]
pub struct FrameState {
    /// (yaw, pitch) of the logo group.
    pub model_rotation: Vec2,
    pub label_poses: Vec<LabelPose>,
    pub show_placeholder: bool,
    pub elapsed: f32,
}

pub struct Scene {
    pub camera: Camera,
    pub lights: Vec<Light>,
    pub backdrop: Backdrop,
    pub model: ModelSlot,
    pub labels: LabelField,
    rotator: PointerRotator,
    elapsed: f32,
}

impl Scene {
    /// Assemble the hero scene. The compact-viewport flag is read once here,
    /// at mount, and never re-evaluated.
    pub fn compose(aspect: f32, compact: bool, labels: LabelField, policy: RetryPolicy) -> Self {
        Self {
            camera: Camera::hero(aspect, compact),
            lights: hero_lights(),
            backdrop: Backdrop::default(),
            model: ModelSlot::new(policy),
            labels,
            rotator: PointerRotator::default(),
            elapsed: 0.0,
        }
    }

    /// Advance the scene by `dt_sec` with the current normalized pointer.
    /// O(1) per label, never blocks: this runs inside the frame callback.
    pub fn advance(&mut self, pointer: Vec2, dt_sec: f32) -> FrameState {
        self.elapsed += dt_sec.max(0.0);
        let model_rotation = self.rotator.step(pointer, dt_sec);
        FrameState {
            model_rotation,
            label_poses: self.labels.poses(self.elapsed),
            show_placeholder: self.model.shows_placeholder(),
            elapsed: self.elapsed,
        }
    }

    /// Track canvas resizes. Only the aspect reacts; the camera distance is
    /// fixed at mount.
    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.camera.aspect = aspect;
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn model_rotation(&self) -> Vec2 {
        self.rotator.rotation()
    }
}

/// The fixed light rig: one ambient, two spots (one shadow-casting), two
/// points.
fn hero_lights() -> Vec<Light> {
    vec![
        Light::Ambient {
            color: [1.0, 1.0, 1.0],
            intensity: AMBIENT_INTENSITY,
        },
        Light::Spot {
            position: Vec3::new(5.0, 5.0, 5.0),
            angle: 0.15,
            penumbra: 1.0,
            intensity: 1.5,
            color: [1.0, 1.0, 1.0],
            cast_shadows: true,
        },
        Light::Spot {
            position: Vec3::new(-5.0, 5.0, 3.0),
            angle: 0.3,
            penumbra: 0.8,
            intensity: 1.2,
            color: [1.0, 1.0, 1.0],
            cast_shadows: false,
        },
        Light::Point {
            position: Vec3::new(0.0, 3.0, 5.0),
            intensity: 0.6,
            color: [1.0, 1.0, 1.0],
        },
        Light::Point {
            position: Vec3::new(0.0, -3.0, -5.0),
            intensity: 0.4,
            color: ACCENT_LIGHT_COLOR,
        },
    ]
}
