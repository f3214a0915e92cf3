use serde::{Deserialize, Serialize};

use crate::landmark::{HAND_LANDMARK_COUNT, Landmark, hand};

/// Thumb-to-index distance below which a hand counts as pinching.
pub const DEFAULT_PINCH_THRESHOLD: f64 = 0.05;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gesture {
    #[default]
    Idle,
    Pinch,
}

/// Latest pointer reading of one hand.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerSample {
    pub present: bool,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub scale: f64,
    pub gesture: Gesture,
}

impl Default for PointerSample {
    fn default() -> Self {
        Self {
            present: false,
            x: 0.5,
            y: 0.5,
            z: 0.0,
            scale: 0.0,
            gesture: Gesture::Idle,
        }
    }
}

impl PointerSample {
    /// Same reading with tracking dropped. Position is kept so cursors do not jump on recovery.
    pub fn lost(self) -> Self {
        Self {
            present: false,
            gesture: Gesture::Idle,
            ..self
        }
    }

    pub fn is_pinching(&self) -> bool {
        self.present && self.gesture == Gesture::Pinch
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureClassifier {
    pinch_threshold: f64,
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_PINCH_THRESHOLD)
    }
}

impl GestureClassifier {
    pub fn new(pinch_threshold: f64) -> Self {
        let pinch_threshold = if pinch_threshold.is_finite() && pinch_threshold > 0.0 {
            pinch_threshold
        } else {
            DEFAULT_PINCH_THRESHOLD
        };
        Self { pinch_threshold }
    }

    pub fn pinch_threshold(&self) -> f64 {
        self.pinch_threshold
    }

    /// Classifies one hand. Missing or incomplete landmarks yield an absent sample.
    pub fn classify(&self, landmarks: &[Landmark]) -> PointerSample {
        if landmarks.len() < HAND_LANDMARK_COUNT {
            return PointerSample::default();
        }
        let index_tip = landmarks[hand::INDEX_TIP];
        let thumb_tip = landmarks[hand::THUMB_TIP];
        let wrist = landmarks[hand::WRIST];
        let middle_mcp = landmarks[hand::MIDDLE_MCP];
        if ![index_tip, thumb_tip, wrist, middle_mcp]
            .iter()
            .all(|point| point.is_finite())
        {
            return PointerSample::default();
        }

        let gesture = if index_tip.planar_distance(thumb_tip) < self.pinch_threshold {
            Gesture::Pinch
        } else {
            Gesture::Idle
        };

        PointerSample {
            present: true,
            x: index_tip.x,
            y: index_tip.y,
            z: index_tip.z,
            scale: wrist.planar_distance(middle_mcp),
            gesture,
        }
    }
}
