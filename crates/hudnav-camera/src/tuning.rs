use serde::{Deserialize, Serialize};

use crate::inertia::InertiaParams;

/// Navigation constants. Tuned by feel; none of them is load-bearing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Per-frame low-pass factor from goal to rendered state.
    pub smoothing: f64,
    /// Per-frame blend factor toward a cinematic goal.
    pub cinematic_rate: f64,
    pub pan_sensitivity: f64,
    pub rotate_sensitivity: f64,
    pub tilt_sensitivity: f64,
    pub tilt_min: f64,
    pub tilt_max: f64,
    pub damping: f64,
    pub release_boost: f64,
    pub history_len: usize,
    pub min_release_span: f64,
    pub azimuth_rest: f64,
    pub pan_rest: f64,
    pub mouse_rotate: f64,
    pub mouse_tilt: f64,
    pub touch_rotate: f64,
    pub touch_tilt: f64,
    pub keyboard_step: f64,
    pub joystick_speed: f64,
    pub remote_rotate: f64,
    pub remote_tilt: f64,
    pub pulse_duration: f64,
    pub gravity_accel: f64,
    pub float_speed: f64,
    pub jump_impulse: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            smoothing: 0.1,
            cinematic_rate: 0.04,
            pan_sensitivity: 20.0,
            rotate_sensitivity: 5.0,
            tilt_sensitivity: 10.0,
            tilt_min: -1.0,
            tilt_max: 8.0,
            damping: 0.95,
            release_boost: 1.5,
            history_len: 5,
            min_release_span: 0.01,
            azimuth_rest: 1.0e-4,
            pan_rest: 1.0e-3,
            mouse_rotate: 5.0,
            mouse_tilt: 10.0,
            touch_rotate: 4.0,
            touch_tilt: 8.0,
            keyboard_step: 0.5,
            joystick_speed: 0.1,
            remote_rotate: 0.02,
            remote_tilt: 0.05,
            pulse_duration: 0.1,
            gravity_accel: 0.015,
            float_speed: 0.08,
            jump_impulse: 0.3,
        }
    }
}

impl Tuning {
    pub fn smoothing(&self) -> f64 {
        unit_factor(self.smoothing, 0.1)
    }

    pub fn cinematic_rate(&self) -> f64 {
        unit_factor(self.cinematic_rate, 0.04)
    }

    pub fn orbit_inertia(&self) -> InertiaParams {
        InertiaParams {
            damping: unit_factor(self.damping, 0.95).min(0.999),
            boost: self.release_boost,
            min_span: self.min_release_span,
            rest: self.azimuth_rest,
            capacity: self.history_len,
        }
    }

    pub fn pan_inertia(&self) -> InertiaParams {
        InertiaParams {
            rest: self.pan_rest,
            ..self.orbit_inertia()
        }
    }
}

fn unit_factor(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value.min(1.0)
    } else {
        fallback
    }
}
