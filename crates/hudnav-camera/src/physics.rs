use serde::Serialize;
use tracing::debug;

use crate::tuning::Tuning;

/// Held vertical controls for the current frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VerticalControls {
    pub ascend: bool,
    pub descend: bool,
    /// One-shot request, honoured only while grounded in gravity mode.
    pub jump: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct PhysicsState {
    pub vertical_velocity: f64,
    pub grounded: bool,
}

/// Vertical motion of the camera height: float mode at zero gravity, ballistic otherwise.
#[derive(Clone, Debug, Default)]
pub struct VerticalPhysics {
    state: PhysicsState,
}

impl VerticalPhysics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PhysicsState {
        self.state
    }

    /// Zeroes vertical velocity, e.g. when a scripted height stops driving the camera.
    pub fn halt(&mut self) {
        self.state.vertical_velocity = 0.0;
    }

    pub fn step(
        &mut self,
        height: &mut f64,
        controls: VerticalControls,
        gravity_scale: f64,
        min_height: f64,
        tuning: &Tuning,
    ) {
        if !height.is_finite() {
            *height = min_height;
        }
        if gravity_scale <= 0.0 {
            self.step_float(height, controls, min_height, tuning);
        } else {
            self.step_gravity(height, controls, gravity_scale, min_height, tuning);
        }
    }

    fn step_float(
        &mut self,
        height: &mut f64,
        controls: VerticalControls,
        min_height: f64,
        tuning: &Tuning,
    ) {
        self.state.vertical_velocity = 0.0;
        if controls.ascend {
            *height += tuning.float_speed;
        }
        if controls.descend {
            *height -= tuning.float_speed;
        }
        if *height <= min_height {
            *height = min_height;
            self.state.grounded = true;
        } else {
            self.state.grounded = false;
        }
    }

    fn step_gravity(
        &mut self,
        height: &mut f64,
        controls: VerticalControls,
        gravity_scale: f64,
        min_height: f64,
        tuning: &Tuning,
    ) {
        if controls.jump && self.state.grounded {
            self.state.vertical_velocity = tuning.jump_impulse;
            self.state.grounded = false;
            debug!(impulse = tuning.jump_impulse, "jump");
        }

        self.state.vertical_velocity -= tuning.gravity_accel * gravity_scale;
        *height += self.state.vertical_velocity;

        if *height <= min_height {
            *height = min_height;
            self.state.vertical_velocity = 0.0;
            if !self.state.grounded {
                debug!(height = min_height, "landed");
            }
            self.state.grounded = true;
        } else {
            self.state.grounded = false;
        }
    }
}
