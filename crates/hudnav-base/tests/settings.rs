use anyhow::Result;
use hudnav_base::{Error, ObjectId, RemoteMode, Settings, TrackingMode};

#[test]
fn out_of_range_settings_are_clamped_on_read() {
    let settings = Settings {
        sensitivity: 9.0,
        gravity: -0.5,
        min_height: 12.0,
        ..Settings::default()
    };
    assert_eq!(settings.sensitivity(), 3.0);
    assert_eq!(settings.gravity_scale(), 0.0);
    assert_eq!(settings.min_height(), 5.0);
    assert_eq!(settings.sensitivity, 9.0);
}

#[test]
fn nan_settings_fall_back_to_defaults() {
    let settings = Settings {
        sensitivity: f64::NAN,
        ..Settings::default()
    };
    assert_eq!(settings.sensitivity(), 1.0);
}

#[test]
fn partial_json_keeps_defaults() -> Result<()> {
    let settings = Settings::from_json_str(r#"{ "gravity": 0.5, "tracking_mode": "eye" }"#)?;
    assert_eq!(settings.gravity_scale(), 0.5);
    assert_eq!(settings.tracking_mode, TrackingMode::Eye);
    assert_eq!(settings.remote_mode, RemoteMode::Cursor);
    assert_eq!(settings.sensitivity(), 1.0);
    Ok(())
}

#[test]
fn malformed_json_is_an_error() {
    assert!(Settings::from_json_str("{ gravity: }").is_err());
}

#[test]
fn tracking_toggle_cycles_eye_hand_mouse() {
    assert_eq!(TrackingMode::Eye.next(), TrackingMode::Hand);
    assert_eq!(TrackingMode::Hand.next(), TrackingMode::Mouse);
    assert_eq!(TrackingMode::Mouse.next(), TrackingMode::Eye);
    assert_eq!(TrackingMode::Remote.next(), TrackingMode::Eye);
}

#[test]
fn object_id_serializes_as_plain_string() -> Result<()> {
    let id = ObjectId::from("System");
    assert_eq!(serde_json::to_string(&id)?, "\"System\"");
    assert_eq!(id.to_string(), "System");
    Ok(())
}

#[test]
fn missing_settings_file_is_an_io_error() {
    let result = Settings::load("/nonexistent/hudnav/settings.json");
    assert!(matches!(result, Err(Error::Io(_))));
}
