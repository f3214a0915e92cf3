use anyhow::Result;
use hudnav_perception::{
    DEFAULT_HAND_TIMEOUT, DEFAULT_PINCH_THRESHOLD, DetectedHand, FACE_LANDMARK_COUNT,
    FaceEstimator, Gesture, GestureClassifier, HAND_LANDMARK_COUNT, Hand, HandLabel, Landmark,
    PerceptionFeed, hand,
};

fn open_hand() -> Vec<Landmark> {
    let mut points = vec![Landmark::new(0.5, 0.5, 0.0); HAND_LANDMARK_COUNT];
    points[hand::WRIST] = Landmark::new(0.50, 0.80, 0.0);
    points[hand::MIDDLE_MCP] = Landmark::new(0.50, 0.60, 0.0);
    points[hand::THUMB_TIP] = Landmark::new(0.40, 0.50, 0.0);
    points[hand::INDEX_TIP] = Landmark::new(0.55, 0.30, -0.02);
    points
}

fn pinching_hand() -> Vec<Landmark> {
    let mut points = open_hand();
    points[hand::THUMB_TIP] = Landmark::new(0.56, 0.32, 0.0);
    points
}

fn face_mesh(nose: Landmark) -> Vec<Landmark> {
    let mut points = vec![Landmark::default(); FACE_LANDMARK_COUNT];
    points[1] = nose;
    points[33] = Landmark::new(0.40, 0.40, 0.0);
    points[263] = Landmark::new(0.60, 0.40, 0.0);
    points
}

#[test]
fn open_hand_is_idle_and_reports_index_tip() {
    let sample = GestureClassifier::default().classify(&open_hand());
    assert!(sample.present);
    assert_eq!(sample.gesture, Gesture::Idle);
    assert_eq!((sample.x, sample.y, sample.z), (0.55, 0.30, -0.02));
    assert!((sample.scale - 0.2).abs() < 1.0e-12);
}

#[test]
fn close_thumb_and_index_is_a_pinch() {
    let sample = GestureClassifier::default().classify(&pinching_hand());
    assert_eq!(sample.gesture, Gesture::Pinch);
    assert!(sample.is_pinching());
}

#[test]
fn stricter_threshold_rejects_loose_pinch() {
    let strict = GestureClassifier::new(0.01);
    assert_eq!(strict.classify(&pinching_hand()).gesture, Gesture::Idle);
    assert_eq!(strict.pinch_threshold(), 0.01);
}

#[test]
fn unusable_threshold_falls_back_to_default() {
    for threshold in [0.0, -0.2, f64::NAN] {
        let classifier = GestureClassifier::new(threshold);
        assert_eq!(classifier.pinch_threshold(), DEFAULT_PINCH_THRESHOLD);
    }
}

#[test]
fn missing_landmarks_mean_not_present() {
    let sample = GestureClassifier::default().classify(&open_hand()[..10]);
    assert!(!sample.present);
    assert_eq!(sample.gesture, Gesture::Idle);
    assert!(!GestureClassifier::default().classify(&[]).present);
}

#[test]
fn detector_labels_are_mirrored() {
    let classifier = GestureClassifier::default();
    let mut feed = PerceptionFeed::new();
    feed.ingest_hands(
        &classifier,
        &[DetectedHand {
            label: HandLabel::Left,
            landmarks: pinching_hand(),
        }],
        1.0,
    );
    assert!(feed.hand(Hand::Right).is_pinching());
    assert!(!feed.hand(Hand::Left).present);
    assert_eq!(feed.last_hand_activity(), Some(1.0));
}

#[test]
fn hands_missing_from_a_frame_are_released() {
    let classifier = GestureClassifier::default();
    let mut feed = PerceptionFeed::new();
    let detected = [DetectedHand {
        label: HandLabel::Right,
        landmarks: pinching_hand(),
    }];
    feed.ingest_hands(&classifier, &detected, 0.0);
    assert!(feed.left.is_pinching());

    feed.ingest_hands(&classifier, &[], 0.1);
    assert!(!feed.left.present);
    assert_eq!(feed.left.gesture, Gesture::Idle);
    assert_eq!(feed.left.x, 0.55);
    assert_eq!(feed.last_hand_activity(), Some(0.0));
}

#[test]
fn hand_activity_times_out() {
    let mut feed = PerceptionFeed::new();
    assert!(!feed.hands_active(0.0, DEFAULT_HAND_TIMEOUT));
    let sample = GestureClassifier::default().classify(&open_hand());
    feed.set_hand(Hand::Right, sample, 2.0);
    assert!(feed.hands_active(6.9, DEFAULT_HAND_TIMEOUT));
    assert!(!feed.hands_active(7.0, DEFAULT_HAND_TIMEOUT));
}

#[test]
fn active_hand_prefers_left() {
    let classifier = GestureClassifier::default();
    let mut feed = PerceptionFeed::new();
    let mut right = classifier.classify(&open_hand());
    right.x = 0.9;
    feed.set_hand(Hand::Right, right, 0.0);
    assert_eq!(feed.active_hand().x, 0.9);
    feed.set_hand(Hand::Left, classifier.classify(&pinching_hand()), 0.0);
    assert_eq!(feed.active_hand().x, 0.55);
}

#[test]
fn face_pose_follows_nose_offset() {
    let estimator = FaceEstimator;
    let gaze = estimator.estimate(&face_mesh(Landmark::new(0.52, 0.46, 0.0)));
    assert!(gaze.present);
    assert!((gaze.yaw - 0.1).abs() < 1.0e-9);
    assert!((gaze.pitch - 0.3).abs() < 1.0e-9);
    assert!(!estimator.estimate(&face_mesh(Landmark::default())[..100]).present);
}

#[test]
fn losing_the_face_keeps_last_position() {
    let estimator = FaceEstimator;
    let mut feed = PerceptionFeed::new();
    let mesh = face_mesh(Landmark::new(0.3, 0.6, 0.0));
    feed.ingest_face(&estimator, Some(&mesh));
    assert!(feed.face.present);
    feed.ingest_face(&estimator, None);
    assert!(!feed.face.present);
    assert_eq!(feed.face.x, 0.3);
}

#[test]
fn detected_hand_reads_from_json() -> Result<()> {
    let hand: DetectedHand =
        serde_json::from_str(r#"{ "label": "Left", "landmarks": [{ "x": 0.1, "y": 0.2 }] }"#)?;
    assert_eq!(hand.label, HandLabel::Left);
    assert_eq!(hand.landmarks[0].z, 0.0);
    Ok(())
}
