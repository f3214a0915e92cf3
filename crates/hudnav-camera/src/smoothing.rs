use hudnav_geometry::{lerp, lerp_angle, lerp_vec3};

use crate::state::{NavigationGoal, RenderedCameraState};

/// Exponential low-pass from goal to rendered state.
#[derive(Clone, Debug)]
pub struct Smoother {
    alpha: f64,
    current: Option<RenderedCameraState>,
}

impl Smoother {
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha,
            current: None,
        }
    }

    pub fn current(&self) -> Option<&RenderedCameraState> {
        self.current.as_ref()
    }

    /// Moves the rendered state one frame toward `goal`. The first call snaps to the goal.
    pub fn step(&mut self, goal: &NavigationGoal) -> RenderedCameraState {
        let next = match self.current {
            None => RenderedCameraState::from(*goal),
            Some(current) => RenderedCameraState {
                target: lerp_vec3(current.target, goal.target, self.alpha),
                radius: lerp(current.radius, goal.radius, self.alpha),
                azimuth: lerp_angle(current.azimuth, goal.azimuth, self.alpha),
                height: lerp(current.height, goal.height, self.alpha),
            },
        };
        self.current = Some(next);
        next
    }
}
