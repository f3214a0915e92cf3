mod face;
mod feed;
mod gesture;
mod landmark;

pub use face::{FACE_LANDMARK_COUNT, FaceEstimator, GazeSample};
pub use feed::{DEFAULT_HAND_TIMEOUT, DetectedHand, Hand, HandLabel, PerceptionFeed};
pub use gesture::{DEFAULT_PINCH_THRESHOLD, Gesture, GestureClassifier, PointerSample};
pub use landmark::{HAND_LANDMARK_COUNT, Landmark, hand};
