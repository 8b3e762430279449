// Perceptual similarity between consecutive color samples

use serde::{Deserialize, Serialize};

use crate::sampler::Hsv;

/// Per-channel HSV distance under which two consecutive samples merge
/// into one sustained note.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    #[serde(default = "default_threshold")]
    pub hue: f32,
    #[serde(default = "default_threshold")]
    pub saturation: f32,
    #[serde(default = "default_threshold")]
    pub value: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            hue: default_threshold(),
            saturation: default_threshold(),
            value: default_threshold(),
        }
    }
}

fn default_threshold() -> f32 {
    15.0
}

/// Check whether two HSV colors are within the thresholds on every
/// channel. All three conditions must hold; this is a conjunction, not
/// a weighted distance.
pub fn colors_are_close(a: Hsv, b: Hsv, thresholds: Thresholds) -> bool {
    // Hue is circular: 0 and 360 degrees are the same color.
    let mut hue_diff = (a.h - b.h).abs();
    if hue_diff > 180.0 {
        hue_diff = 360.0 - hue_diff;
    }

    hue_diff <= thresholds.hue
        && (a.s - b.s).abs() <= thresholds.saturation
        && (a.v - b.v).abs() <= thresholds.value
}
