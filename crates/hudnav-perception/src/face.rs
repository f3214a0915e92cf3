use serde::{Deserialize, Serialize};

use crate::landmark::Landmark;

const NOSE_TIP: usize = 1;
const LEFT_EYE_OUTER: usize = 33;
const RIGHT_EYE_OUTER: usize = 263;
const POSE_GAIN: f64 = 5.0;

/// Smallest face mesh that still carries both eye corners.
pub const FACE_LANDMARK_COUNT: usize = RIGHT_EYE_OUTER + 1;

/// Head pose proxy used for gaze pointing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GazeSample {
    pub present: bool,
    pub x: f64,
    pub y: f64,
    pub yaw: f64,
    pub pitch: f64,
}

impl Default for GazeSample {
    fn default() -> Self {
        Self {
            present: false,
            x: 0.5,
            y: 0.5,
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct FaceEstimator;

impl FaceEstimator {
    pub fn estimate(&self, landmarks: &[Landmark]) -> GazeSample {
        if landmarks.len() < FACE_LANDMARK_COUNT {
            return GazeSample::default();
        }
        let nose = landmarks[NOSE_TIP];
        let eye_mid = landmarks[LEFT_EYE_OUTER].midpoint(landmarks[RIGHT_EYE_OUTER]);
        if !nose.is_finite() || !eye_mid.is_finite() {
            return GazeSample::default();
        }
        GazeSample {
            present: true,
            x: nose.x,
            y: nose.y,
            yaw: (nose.x - eye_mid.x) * POSE_GAIN,
            pitch: (nose.y - eye_mid.y) * POSE_GAIN,
        }
    }
}
