use hudnav_geometry::{Vec3, is_finite3, lerp, lerp_vec3};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::state::NavigationGoal;

/// Scripted camera placement from an external agent. Absent fields leave that axis alone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CinematicGoal {
    pub target: Option<Vec3>,
    pub radius: Option<f64>,
    pub azimuth: Option<f64>,
    pub height: Option<f64>,
}

impl CinematicGoal {
    pub fn new(target: Vec3, radius: f64, azimuth: f64) -> Self {
        Self {
            target: Some(target),
            radius: Some(radius),
            azimuth: Some(azimuth),
            height: None,
        }
    }

    pub fn with_height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    /// Drops fields that cannot be blended toward: non-finite numbers, non-positive radius.
    pub fn sanitized(self) -> Self {
        Self {
            target: self.target.filter(|target| is_finite3(*target)),
            radius: self
                .radius
                .filter(|radius| radius.is_finite() && *radius > 0.0),
            azimuth: self.azimuth.filter(|azimuth| azimuth.is_finite()),
            height: self.height.filter(|height| height.is_finite()),
        }
    }

    pub fn overrides_height(&self) -> bool {
        self.height.is_some()
    }
}

/// Pulls the navigation goal toward an active cinematic goal at a slow fixed rate.
#[derive(Clone, Debug)]
pub struct CinematicController {
    goal: Option<CinematicGoal>,
    rate: f64,
}

impl CinematicController {
    pub fn new(rate: f64) -> Self {
        Self { goal: None, rate }
    }

    pub fn goal(&self) -> Option<&CinematicGoal> {
        self.goal.as_ref()
    }

    pub fn set(&mut self, goal: Option<CinematicGoal>) {
        match goal {
            Some(goal) => {
                let goal = goal.sanitized();
                info!(
                    goal_target = ?goal.target,
                    radius = ?goal.radius,
                    azimuth = ?goal.azimuth,
                    height = ?goal.height,
                    "cinematic goal set"
                );
                self.goal = Some(goal);
            }
            None => self.release("external release"),
        }
    }

    pub fn release(&mut self, reason: &str) {
        if self.goal.take().is_some() {
            info!(reason, "cinematic goal cleared");
        }
    }

    /// Blends `nav` toward the active goal. Returns true when the goal drove the height.
    pub fn step(&self, nav: &mut NavigationGoal) -> bool {
        let Some(goal) = self.goal else {
            return false;
        };
        if let Some(target) = goal.target {
            nav.target = lerp_vec3(nav.target, target, self.rate);
        }
        if let Some(radius) = goal.radius {
            nav.radius = lerp(nav.radius, radius, self.rate);
        }
        if let Some(azimuth) = goal.azimuth {
            nav.azimuth = lerp(nav.azimuth, azimuth, self.rate);
        }
        match goal.height {
            Some(height) => {
                nav.height = lerp(nav.height, height, self.rate);
                true
            }
            None => false,
        }
    }
}
