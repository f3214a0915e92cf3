use anyhow::Result;
use hudnav_base::{ObjectId, TrackingMode};
use hudnav_geometry::{MetricSpace, vec2, vec3};
use hudnav_interact::{
    ActivePointer, HoverArbiter, HoverTuning, InteractionEvent, InteractiveObject, Modality,
    PointerSources, Viewport, resolve_pointer,
};
use hudnav_perception::{GazeSample, Gesture, Hand, PerceptionFeed, PointerSample};

const DT: f64 = 1.0 / 60.0;

fn scene() -> Vec<InteractiveObject> {
    vec![
        InteractiveObject::new("alpha", vec3(0.0, 0.0, 0.0)),
        InteractiveObject::new("beta", vec3(0.3, 0.0, 0.0)),
        InteractiveObject::button("toggle", vec3(-3.0, 0.0, 0.0)),
    ]
}

fn at(modality: Modality, x: f64, y: f64, pinching: bool) -> ActivePointer {
    ActivePointer {
        modality,
        position: vec2(x, y),
        pinching,
    }
}

fn selections(events: &[InteractionEvent]) -> usize {
    events
        .iter()
        .filter(|event| matches!(event, InteractionEvent::Selected { .. }))
        .count()
}

#[test]
fn first_object_in_order_claims_overlapping_hover() {
    let mut arbiter = HoverArbiter::default();
    let pointer = at(Modality::Hand, 0.15, 0.0, false);
    let events = arbiter.update(&scene(), Some(&pointer), false, DT);

    assert_eq!(
        events,
        vec![InteractionEvent::HoverEnter {
            id: ObjectId::from("alpha")
        }]
    );
    assert_eq!(arbiter.hovered(), Some(&ObjectId::from("alpha")));
}

#[test]
fn invisible_objects_are_skipped() {
    let mut objects = scene();
    objects[0].visible = false;
    let mut arbiter = HoverArbiter::default();
    let pointer = at(Modality::Hand, 0.15, 0.0, false);
    arbiter.update(&objects, Some(&pointer), false, DT);
    assert_eq!(arbiter.hovered(), Some(&ObjectId::from("beta")));
}

#[test]
fn pinch_selects_once_while_held() {
    let mut arbiter = HoverArbiter::default();
    let pinching = at(Modality::Hand, 0.0, 0.0, true);

    let events = arbiter.update(&scene(), Some(&pinching), false, DT);
    assert_eq!(selections(&events), 1);
    assert_eq!(arbiter.selected(), Some(&ObjectId::from("alpha")));

    for _ in 0..10 {
        let events = arbiter.update(&scene(), Some(&pinching), false, DT);
        assert!(events.is_empty());
    }

    // re-pinching an already selected object stays quiet
    let open = at(Modality::Hand, 0.0, 0.0, false);
    arbiter.update(&scene(), Some(&open), false, DT);
    let events = arbiter.update(&scene(), Some(&pinching), false, DT);
    assert_eq!(selections(&events), 0);
}

#[test]
fn pinch_away_from_objects_selects_nothing() {
    let mut arbiter = HoverArbiter::default();
    let pointer = at(Modality::Hand, 2.0, 2.0, true);
    let events = arbiter.update(&scene(), Some(&pointer), false, DT);
    assert!(events.is_empty());
    assert!(arbiter.selected().is_none());
}

#[test]
fn one_second_of_gaze_dwell_selects_exactly_once() {
    let mut arbiter = HoverArbiter::default();
    let gaze = at(Modality::Gaze, 0.0, 0.0, false);

    let mut selected = 0;
    let mut last_progress = 0.0;
    for frame in 1..=60 {
        let events = arbiter.update(&scene(), Some(&gaze), false, DT);
        selected += selections(&events);
        let progress = arbiter.state().dwell_progress;
        if frame < 60 {
            assert!(progress > last_progress);
            assert!(progress <= 1.0);
            last_progress = progress;
        }
    }
    assert_eq!(selected, 1);
    assert_eq!(arbiter.state().dwell_progress, 0.0);
    assert_eq!(arbiter.selected(), Some(&ObjectId::from("alpha")));
}

#[test]
fn losing_hover_resets_dwell() {
    let mut arbiter = HoverArbiter::default();
    let gaze = at(Modality::Gaze, 0.0, 0.0, false);
    for _ in 0..30 {
        arbiter.update(&scene(), Some(&gaze), false, DT);
    }
    assert!(arbiter.state().dwell_progress > 0.45);

    let events = arbiter.update(&scene(), None, false, DT);
    assert_eq!(
        events,
        vec![InteractionEvent::HoverLeave {
            id: ObjectId::from("alpha")
        }]
    );
    assert_eq!(arbiter.state().dwell_progress, 0.0);
    assert!(arbiter.hovered().is_none());

    arbiter.update(&scene(), Some(&gaze), false, DT);
    assert!((arbiter.state().dwell_progress - 1.0 / 60.0).abs() < 1.0e-9);
}

#[test]
fn buttons_activate_on_every_dwell_without_holding_selection() {
    let mut arbiter = HoverArbiter::default();
    let gaze = at(Modality::Gaze, -3.0, 0.0, false);

    let mut activations = 0;
    for _ in 0..120 {
        let events = arbiter.update(&scene(), Some(&gaze), false, DT);
        activations += events
            .iter()
            .filter(|event| matches!(event, InteractionEvent::Activated { .. }))
            .count();
    }
    assert_eq!(activations, 2);
    assert!(arbiter.selected().is_none());
}

#[test]
fn device_press_selects_hovered_object() {
    let mut arbiter = HoverArbiter::default();
    let mouse = at(Modality::Device, 0.3, 0.1, false);

    let events = arbiter.update(&scene(), Some(&mouse), false, DT);
    assert_eq!(selections(&events), 0);
    let events = arbiter.update(&scene(), Some(&mouse), true, DT);
    assert_eq!(
        events,
        vec![InteractionEvent::Selected {
            id: ObjectId::from("alpha"),
            modality: Modality::Device,
        }]
    );
}

fn pinch_sample(x: f64, y: f64) -> PointerSample {
    PointerSample {
        present: true,
        x,
        y,
        z: 0.0,
        scale: 0.2,
        gesture: Gesture::Pinch,
    }
}

fn face(x: f64, y: f64) -> GazeSample {
    GazeSample {
        present: true,
        x,
        y,
        yaw: 0.0,
        pitch: 0.0,
    }
}

fn sources(feed: &PerceptionFeed, now: f64) -> PointerSources<'_> {
    PointerSources {
        feed,
        now,
        mouse: Some(vec2(0.75, 0.25)),
        remote_cursor: vec2(0.5, 0.5),
    }
}

#[test]
fn recent_hand_owns_the_pointer_and_is_mirrored() {
    let mut feed = PerceptionFeed::new();
    feed.set_hand(Hand::Left, pinch_sample(0.25, 0.5), 0.0);
    feed.set_face(face(0.6, 0.5));

    let viewport = Viewport::default();
    let tuning = HoverTuning::default();
    let pointer = resolve_pointer(TrackingMode::Hand, &sources(&feed, 4.9), &viewport, &tuning);
    let pointer = pointer.unwrap();
    assert_eq!(pointer.modality, Modality::Hand);
    assert!(pointer.pinching);
    assert!(pointer.position.distance(vec2(3.0, 0.0)) < 1.0e-9);
}

#[test]
fn stale_hand_falls_back_to_gaze() {
    let mut feed = PerceptionFeed::new();
    feed.set_hand(Hand::Left, pinch_sample(0.25, 0.5), 0.0);
    feed.set_face(face(0.6, 0.5));

    let pointer = resolve_pointer(
        TrackingMode::Eye,
        &sources(&feed, 5.0),
        &Viewport::default(),
        &HoverTuning::default(),
    )
    .unwrap();
    assert_eq!(pointer.modality, Modality::Gaze);
    assert!(pointer.position.distance(vec2(-3.0, 0.0)) < 1.0e-9);
}

#[test]
fn momentarily_lost_hand_keeps_gaze_out() {
    let mut feed = PerceptionFeed::new();
    feed.set_hand(Hand::Left, pinch_sample(0.25, 0.5), 0.0);
    feed.set_hand(Hand::Left, PointerSample::default(), 1.0);
    feed.set_face(face(0.6, 0.5));

    let pointer = resolve_pointer(
        TrackingMode::Hand,
        &sources(&feed, 1.0),
        &Viewport::default(),
        &HoverTuning::default(),
    );
    assert!(pointer.is_none());
}

#[test]
fn device_modes_use_unmirrored_projection() {
    let feed = PerceptionFeed::new();
    let viewport = Viewport::default();
    let tuning = HoverTuning::default();

    let mouse = resolve_pointer(TrackingMode::Mouse, &sources(&feed, 0.0), &viewport, &tuning)
        .unwrap();
    assert_eq!(mouse.modality, Modality::Device);
    assert!(mouse.position.distance(vec2(3.0, 2.0)) < 1.0e-9);

    let remote = resolve_pointer(TrackingMode::Remote, &sources(&feed, 0.0), &viewport, &tuning)
        .unwrap();
    assert!(remote.position.distance(vec2(0.0, 0.0)) < 1.0e-9);
}

#[test]
fn interaction_events_serialize_with_type_tag() -> Result<()> {
    let event = InteractionEvent::Selected {
        id: ObjectId::from("alpha"),
        modality: Modality::Gaze,
    };
    let json = serde_json::to_value(&event)?;
    assert_eq!(json["type"], "selected");
    assert_eq!(json["id"], "alpha");
    assert_eq!(json["modality"], "gaze");

    let object: InteractiveObject =
        serde_json::from_str(r#"{"id":"eve","position":[1.0,2.0,0.0]}"#)?;
    assert!(object.visible);
    Ok(())
}
