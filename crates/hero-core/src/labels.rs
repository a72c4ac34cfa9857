//! The floating label field around the logo.
//!
//! The label table is data, not logic: the default set below mirrors the
//! landing-page copy, but any table can be injected into [`LabelField`].

use glam::Vec3;
use rand::prelude::*;

use crate::constants::{rgb, LABEL_GREEN_BRIGHT, LABEL_GREEN_DEEP, LABEL_PHASE_SEED};
use crate::float::{float_pose, FloatParams, FloatPhase};

/// One floating text label: immutable author-chosen content.
#[derive(Clone, Debug)]
pub struct Label {
    pub text: String,
    pub position: Vec3,
    pub color: [f32; 3],
    pub font_size: f32,
}

/// Pose of one label for the current frame. `index` refers back to the
/// label table entry the pose belongs to.
#[derive(Clone, Copy, Debug)]
pub struct LabelPose {
    pub index: usize,
    pub position: Vec3,
    pub rotation: Vec3,
    pub color: [f32; 3],
    pub font_size: f32,
}

// (text, position, bright palette entry, font size)
const LABEL_TABLE: &[(&str, [f32; 3], bool, f32)] = &[
    ("WhatsApp", [6.0, 1.0, -5.0], true, 0.8),
    ("Cloud API", [8.0, 2.5, -4.0], true, 0.8),
    ("Messages", [-8.0, 0.5, -3.0], false, 0.6),
    ("Webhooks", [0.0, 2.0, -6.0], true, 0.7),
    ("Phone Numbers", [-7.0, -1.5, -5.0], false, 0.6),
    ("Block Users", [7.0, -3.0, -4.0], false, 0.6),
    ("Payments API", [4.0, -4.0, -3.0], true, 0.7),
    ("Products & Services", [-6.0, 3.5, -5.0], false, 0.6),
    ("Graph API", [9.0, 0.0, -4.0], true, 0.65),
    ("Business Portfolio", [-9.0, 2.0, -4.0], false, 0.55),
    ("WABA", [0.0, -3.0, -4.5], true, 0.7),
    ("Templates", [-4.0, 4.0, -5.0], false, 0.6),
    ("Throughput", [6.0, -2.0, -3.5], true, 0.65),
    ("Rate Limits", [-6.0, -2.0, -4.0], false, 0.65),
    ("Encryption", [5.0, 3.0, -3.0], true, 0.65),
    ("WhatsApp Manager", [-5.0, -4.0, -4.0], false, 0.6),
    ("Authentication", [0.0, -5.0, -5.0], true, 0.6),
    ("HTTP Protocol", [10.0, -1.5, -5.0], false, 0.6),
    ("Access Tokens", [-10.0, 3.0, -6.0], true, 0.6),
    ("Permissions", [7.0, 4.0, -4.0], false, 0.6),
    ("System User Tokens", [-8.5, 1.0, -4.0], true, 0.5),
    ("Business Integration", [9.5, 1.0, -6.0], false, 0.5),
    ("Quality Rating", [2.0, 5.0, -6.0], true, 0.55),
    ("Security", [-3.0, -6.0, -5.0], false, 0.65),
    ("Versioning", [8.0, -4.0, -6.0], true, 0.55),
    ("Data Privacy", [-7.0, -3.0, -7.0], false, 0.55),
    ("Message Templates", [9.0, 3.0, -7.0], true, 0.55),
    ("Template Messages", [-5.0, 0.0, -8.0], false, 0.55),
    ("Signal Protocol", [4.0, -5.0, -7.0], true, 0.55),
    ("Media Messages", [-8.0, -5.0, -6.0], false, 0.55),
    ("Pair Rate Limit", [10.0, -2.0, -8.0], true, 0.5),
    ("Test Resources", [-9.0, 4.0, -7.0], false, 0.5),
    ("Scaling", [7.0, 6.0, -6.0], true, 0.6),
    ("WhatsApp Business", [-4.0, 5.0, -8.0], false, 0.55),
    ("Higher Throughput", [3.0, -7.0, -6.0], true, 0.5),
    ("Capacity Limit", [-6.0, 6.0, -9.0], false, 0.5),
    ("Free-form Messages", [8.0, 5.0, -10.0], true, 0.5),
    ("Metrics", [-10.0, -1.0, -8.0], false, 0.65),
    ("TLS Encryption", [-10.0, 5.0, -7.0], true, 0.5),
    ("Business Management", [10.0, 6.0, -9.0], false, 0.55),
    ("App Dashboard", [-7.0, 7.0, -10.0], true, 0.55),
    ("Meta Business Suite", [9.0, -6.0, -8.0], false, 0.5),
    ("Webhook Servers", [-9.0, -6.0, -9.0], true, 0.55),
    ("Message Status", [7.0, 0.0, -10.0], false, 0.55),
    ("Business Phone Number", [-10.0, 0.0, -5.0], true, 0.45),
    ("Test WABA", [10.0, 3.0, -6.0], false, 0.55),
];

/// The landing-page label set.
pub fn default_labels() -> Vec<Label> {
    LABEL_TABLE
        .iter()
        .map(|&(text, position, bright, font_size)| Label {
            text: text.to_string(),
            position: Vec3::from_array(position),
            color: rgb(if bright {
                LABEL_GREEN_BRIGHT
            } else {
                LABEL_GREEN_DEEP
            }),
            font_size,
        })
        .collect()
}

/// Renders one floating wrapper per table entry. Construction derives a phase
/// per label from the base seed so the field is deterministic for a seed.
pub struct LabelField {
    labels: Vec<Label>,
    phases: Vec<FloatPhase>,
    params: FloatParams,
}

impl Default for LabelField {
    fn default() -> Self {
        Self::new(default_labels(), FloatParams::default(), LABEL_PHASE_SEED)
    }
}

impl LabelField {
    pub fn new(labels: Vec<Label>, params: FloatParams, seed: u64) -> Self {
        // Derive per-label phases from the base seed, one RNG per label so
        // table edits leave the other phases untouched.
        let phases = (0..labels.len())
            .map(|i| {
                let mix = seed ^ (i as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
                let mut rng = StdRng::seed_from_u64(mix);
                FloatPhase(rng.gen::<f32>() * 10_000.0)
            })
            .collect();
        Self {
            labels,
            phases,
            params,
        }
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn params(&self) -> &FloatParams {
        &self.params
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Evaluate every wrapper at `elapsed` seconds: exactly one pose per
    /// table entry, base positions preserved.
    pub fn poses(&self, elapsed: f32) -> Vec<LabelPose> {
        self.labels
            .iter()
            .zip(&self.phases)
            .enumerate()
            .map(|(index, (label, &phase))| {
                let fp = float_pose(phase, &self.params, elapsed);
                LabelPose {
                    index,
                    position: label.position + fp.offset,
                    rotation: fp.rotation,
                    color: label.color,
                    font_size: label.font_size,
                }
            })
            .collect()
    }
}
