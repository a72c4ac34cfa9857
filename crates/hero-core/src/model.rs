//! Load gate and tuning pass for the logo model.
//!
//! The gate is a three-phase state machine: `Loading` until the fetch
//! settles, then `Loaded` (terminal) or `Failed`. Whether a failed fetch is
//! retried is caller configuration, not a guess.

use std::fmt::Display;

use glam::{Quat, Vec3};

use crate::asset::ModelData;
use crate::constants::{TUNED_ENV_INTENSITY, TUNED_METALNESS, TUNED_ROUGHNESS};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadPhase {
    Loading,
    Loaded,
    Failed,
}

/// What to do when the asset fetch fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RetryPolicy {
    /// Keep the placeholder forever after the first failure.
    #[default]
    FailOpen,
    /// Allow up to `max_attempts` fetches before failing open.
    Retry { max_attempts: u32 },
}

/// Owns the load phase and, once resolved, the tuned model.
pub struct ModelSlot {
    phase: LoadPhase,
    model: Option<ModelData>,
    policy: RetryPolicy,
    attempts: u32,
}

impl Default for ModelSlot {
    fn default() -> Self {
        Self::new(RetryPolicy::FailOpen)
    }
}

impl ModelSlot {
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            phase: LoadPhase::Loading,
            model: None,
            policy,
            attempts: 0,
        }
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn is_loaded(&self) -> bool {
        self.phase == LoadPhase::Loaded
    }

    /// The placeholder is shown exactly when the model is not loaded.
    pub fn shows_placeholder(&self) -> bool {
        !self.is_loaded()
    }

    pub fn model(&self) -> Option<&ModelData> {
        self.model.as_ref()
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// One-time transition to `Loaded`. Tunes the model, then swaps it in.
    /// Resolutions arriving in any other phase are ignored.
    pub fn resolve(&mut self, mut model: ModelData) {
        if self.phase != LoadPhase::Loading {
            log::warn!("[model] resolve in phase {:?} ignored", self.phase);
            return;
        }
        tune_model(&mut model);
        log::info!("[model] resolved with {} meshes", model.meshes.len());
        self.model = Some(model);
        self.phase = LoadPhase::Loaded;
    }

    /// Record a failed fetch. Returns `true` when the caller should try
    /// again under the configured policy.
    pub fn fail<E: Display>(&mut self, err: E) -> bool {
        if self.phase != LoadPhase::Loading {
            log::warn!("[model] failure in phase {:?} ignored: {err}", self.phase);
            return false;
        }
        self.attempts += 1;
        match self.policy {
            RetryPolicy::Retry { max_attempts } if self.attempts < max_attempts => {
                log::warn!(
                    "[model] load attempt {}/{} failed, retrying: {err}",
                    self.attempts,
                    max_attempts
                );
                true
            }
            _ => {
                log::warn!("[model] load failed, keeping placeholder: {err}");
                self.phase = LoadPhase::Failed;
                false
            }
        }
    }
}

/// One-time pass over the resolved model: shadow flags on every mesh, PBR
/// parameters clamped to the tuned values, transform normalized.
pub fn tune_model(model: &mut ModelData) {
    model.scale = Vec3::ONE;
    model.rotation = Quat::IDENTITY;
    for mesh in &mut model.meshes {
        mesh.cast_shadow = true;
        mesh.receive_shadow = true;
        mesh.material.roughness = TUNED_ROUGHNESS;
        mesh.material.metalness = TUNED_METALNESS;
        mesh.material.env_map_intensity = TUNED_ENV_INTENSITY;
    }
}
