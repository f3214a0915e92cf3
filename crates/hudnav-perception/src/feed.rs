use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::face::{FaceEstimator, GazeSample};
use crate::gesture::{GestureClassifier, PointerSample};
use crate::landmark::Landmark;

/// Seconds without a present hand before pointing falls back to gaze.
pub const DEFAULT_HAND_TIMEOUT: f64 = 5.0;

/// The user's hand.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hand {
    Left,
    Right,
}

/// Handedness label reported by the detector, which sees a mirrored image.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum HandLabel {
    Left,
    Right,
}

impl HandLabel {
    pub fn user_hand(self) -> Hand {
        match self {
            Self::Left => Hand::Right,
            Self::Right => Hand::Left,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectedHand {
    pub label: HandLabel,
    pub landmarks: Vec<Landmark>,
}

/// Most recent perception output. Written by the perception loop, read by the frame tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct PerceptionFeed {
    pub left: PointerSample,
    pub right: PointerSample,
    pub face: GazeSample,
    last_hand_activity: Option<f64>,
}

impl PerceptionFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hand(&self, hand: Hand) -> &PointerSample {
        match hand {
            Hand::Left => &self.left,
            Hand::Right => &self.right,
        }
    }

    /// Replaces one hand's reading. A present sample refreshes hand activity.
    pub fn set_hand(&mut self, hand: Hand, sample: PointerSample, now: f64) {
        if sample.present {
            self.last_hand_activity = Some(now);
        }
        let slot = match hand {
            Hand::Left => &mut self.left,
            Hand::Right => &mut self.right,
        };
        if slot.present && !sample.present {
            debug!(?hand, "hand tracking lost");
        }
        *slot = sample;
    }

    /// Applies one detector frame. Hands missing from the frame are marked lost.
    pub fn ingest_hands(
        &mut self,
        classifier: &GestureClassifier,
        detected: &[DetectedHand],
        now: f64,
    ) {
        let mut seen_left = false;
        let mut seen_right = false;
        for detection in detected {
            let hand = detection.label.user_hand();
            let sample = classifier.classify(&detection.landmarks);
            match hand {
                Hand::Left => seen_left |= sample.present,
                Hand::Right => seen_right |= sample.present,
            }
            self.set_hand(hand, sample, now);
        }
        if !seen_left {
            let lost = self.left.lost();
            self.set_hand(Hand::Left, lost, now);
        }
        if !seen_right {
            let lost = self.right.lost();
            self.set_hand(Hand::Right, lost, now);
        }
    }

    pub fn set_face(&mut self, face: GazeSample) {
        self.face = face;
    }

    /// Applies one face-mesh frame; `None` means no face was found.
    pub fn ingest_face(&mut self, estimator: &FaceEstimator, landmarks: Option<&[Landmark]>) {
        self.face = match landmarks {
            Some(points) => estimator.estimate(points),
            None => GazeSample {
                present: false,
                ..self.face
            },
        };
    }

    pub fn last_hand_activity(&self) -> Option<f64> {
        self.last_hand_activity
    }

    pub fn hands_active(&self, now: f64, timeout: f64) -> bool {
        match self.last_hand_activity {
            Some(at) => now - at < timeout,
            None => false,
        }
    }

    /// Hand used for pointing: the left one when tracked, otherwise the right.
    pub fn active_hand(&self) -> &PointerSample {
        if self.left.present {
            &self.left
        } else {
            &self.right
        }
    }
}
