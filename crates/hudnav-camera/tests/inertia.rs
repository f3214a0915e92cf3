use hudnav_camera::{ChannelState, GestureChannel, InertiaParams, Tuning, VelocityHistory};

fn params() -> InertiaParams {
    Tuning::default().orbit_inertia()
}

#[test]
fn history_keeps_only_the_newest_samples() {
    let mut history = VelocityHistory::new(5);
    for step in 0..8 {
        history.push(step as f64, step as f64 * 0.1);
    }
    assert_eq!(history.len(), 5);
    // oldest kept sample is 3.0, newest 7.0
    let velocity = history.velocity(0.01).unwrap();
    assert!((velocity - 1.0).abs() < 1.0e-12);
}

#[test]
fn single_sample_has_no_velocity() {
    let history = VelocityHistory::starting_at(5, 1.0_f64, 0.0);
    assert!(history.velocity(0.01).is_none());
}

#[test]
fn too_short_time_span_has_no_velocity() {
    let mut history = VelocityHistory::starting_at(5, 0.0_f64, 1.0);
    history.push(1.0, 1.004);
    history.push(2.0, 1.008);
    assert!(history.velocity(0.01).is_none());
}

#[test]
fn release_boosts_and_coasting_decays_geometrically() {
    let mut channel: GestureChannel<(), f64> = GestureChannel::new(params());
    channel.begin((), 0.0, 0.0);
    for frame in 1..=4 {
        channel.track(frame as f64 * 0.025, frame as f64 / 60.0);
    }

    let throw = channel.release().unwrap();
    assert!((throw - 0.0375).abs() < 1.0e-12);

    let mut travelled = 0.0;
    for n in 0..10 {
        let step = channel.coast().unwrap();
        assert!((step - 0.0375 * 0.95_f64.powi(n)).abs() < 1.0e-12);
        travelled += step;
    }
    let series = 0.0375 * (1.0 - 0.95_f64.powi(10)) / (1.0 - 0.95);
    assert!((travelled - series).abs() < 1.0e-12);
}

#[test]
fn coasting_stops_below_rest_threshold() {
    let mut channel: GestureChannel<(), f64> = GestureChannel::new(params());
    channel.begin((), 0.0, 0.0);
    channel.track(0.01, 0.5);
    channel.release();

    let mut frames = 0;
    while channel.coast().is_some() {
        frames += 1;
        assert!(frames < 1_000);
    }
    assert!(matches!(channel.state(), ChannelState::Idle));
    assert_eq!(channel.velocity(), 0.0);
}

#[test]
fn new_session_drops_residual_momentum() {
    let mut channel: GestureChannel<(), f64> = GestureChannel::new(params());
    channel.begin((), 0.0, 0.0);
    channel.track(1.0, 0.5);
    channel.release();
    assert!(channel.velocity() > 0.0);

    channel.begin((), 1.0, 1.0);
    assert!(channel.is_dragging());
    assert_eq!(channel.velocity(), 0.0);
    assert!(channel.coast().is_none());
}

#[test]
fn release_without_history_goes_idle() {
    let mut channel: GestureChannel<(), f64> = GestureChannel::new(params());
    channel.begin((), 0.0, 0.0);
    assert!(channel.release().is_none());
    assert!(matches!(channel.state(), ChannelState::Idle));
}
