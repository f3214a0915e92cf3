use hudnav_geometry::{Vec3, Zero, orbit_position, vec3};
use serde::{Deserialize, Serialize};

use crate::input::NavigationDelta;

/// Where the camera should be. Inputs write here; nothing renders from it directly.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavigationGoal {
    pub target: Vec3,
    pub radius: f64,
    pub azimuth: f64,
    pub height: f64,
}

impl Default for NavigationGoal {
    fn default() -> Self {
        Self {
            target: Vec3::zero(),
            radius: 5.0,
            azimuth: 0.0,
            height: 5.0,
        }
    }
}

impl NavigationGoal {
    pub fn apply(&mut self, delta: &NavigationDelta) {
        self.target += delta.pan;
        self.azimuth += delta.azimuth;
        self.height += delta.height;
    }
}

/// Smoothed camera description used for rendering.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderedCameraState {
    pub target: Vec3,
    pub radius: f64,
    pub azimuth: f64,
    pub height: f64,
}

impl From<NavigationGoal> for RenderedCameraState {
    fn from(goal: NavigationGoal) -> Self {
        Self {
            target: goal.target,
            radius: goal.radius,
            azimuth: goal.azimuth,
            height: goal.height,
        }
    }
}

impl RenderedCameraState {
    pub fn position(&self) -> Vec3 {
        orbit_position(self.target, self.radius, self.azimuth, self.height)
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose {
            position: self.position(),
            look_at: self.target,
            up: vec3(0.0, 1.0, 0.0),
        }
    }
}

/// Cartesian camera placement handed to the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
    pub up: Vec3,
}
