use hudnav_base::Settings;
use hudnav_perception::PerceptionFeed;
use tracing::debug;

use crate::arbitration::InputArbiter;
use crate::cinematic::{CinematicController, CinematicGoal};
use crate::gestures::{GestureStep, HandOrbit, HandPan};
use crate::input::InputEvent;
use crate::physics::{PhysicsState, VerticalPhysics};
use crate::smoothing::Smoother;
use crate::state::{NavigationGoal, RenderedCameraState};
use crate::tuning::Tuning;

/// Everything the camera reads during one frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameInputs<'a> {
    pub feed: &'a PerceptionFeed,
    pub events: &'a [InputEvent],
    /// An interactive object holds the hover slot this frame.
    pub hovered: bool,
}

/// Per-frame view of the navigation goal handed to each subsystem. Only `goal` is writable.
#[derive(Debug)]
pub struct NavigationContext<'a> {
    pub goal: &'a mut NavigationGoal,
    /// Azimuth of the rendered camera, used as the basis for camera-relative motion.
    pub view_azimuth: f64,
    pub time: f64,
    pub sensitivity: f64,
    pub tuning: &'a Tuning,
}

/// Owns the navigation goal and every piece of state that persists between frames.
#[derive(Clone, Debug)]
pub struct CameraController {
    settings: Settings,
    tuning: Tuning,
    goal: NavigationGoal,
    clock: f64,
    pan: HandPan,
    orbit: HandOrbit,
    devices: InputArbiter,
    cinematic: CinematicController,
    physics: VerticalPhysics,
    height_overridden: bool,
    smoother: Smoother,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(Settings::default(), Tuning::default())
    }
}

impl CameraController {
    pub fn new(settings: Settings, tuning: Tuning) -> Self {
        Self::with_goal(settings, tuning, NavigationGoal::default())
    }

    pub fn with_goal(settings: Settings, tuning: Tuning, goal: NavigationGoal) -> Self {
        Self {
            pan: HandPan::new(&tuning),
            orbit: HandOrbit::new(&tuning),
            devices: InputArbiter::new(),
            cinematic: CinematicController::new(tuning.cinematic_rate()),
            physics: VerticalPhysics::new(),
            height_overridden: false,
            smoother: Smoother::new(tuning.smoothing()),
            settings,
            tuning,
            goal,
            clock: 0.0,
        }
    }

    pub fn goal(&self) -> &NavigationGoal {
        &self.goal
    }

    /// Rendered state of the last frame, or the goal before the first one.
    pub fn rendered(&self) -> RenderedCameraState {
        self.smoother
            .current()
            .copied()
            .unwrap_or_else(|| RenderedCameraState::from(self.goal))
    }

    pub fn physics_state(&self) -> PhysicsState {
        self.physics.state()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn pan(&self) -> &HandPan {
        &self.pan
    }

    pub fn orbit(&self) -> &HandOrbit {
        &self.orbit
    }

    pub fn cinematic_goal(&self) -> Option<&CinematicGoal> {
        self.cinematic.goal()
    }

    /// Sets or clears the scripted shot. A new shot also drops leftover throw momentum.
    pub fn set_cinematic_goal(&mut self, goal: Option<CinematicGoal>) {
        if goal.is_some() {
            self.pan.halt();
            self.orbit.halt();
        }
        self.cinematic.set(goal);
    }

    /// Advances one frame and returns the state to render.
    pub fn update(&mut self, dt: f64, inputs: FrameInputs<'_>) -> RenderedCameraState {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        self.clock += dt;

        let remote_mode = self.settings.remote_mode;
        for event in inputs.events {
            if self
                .devices
                .handle(event, inputs.hovered, remote_mode, &self.tuning)
            {
                self.cinematic.release("manual input");
            }
        }

        let view_azimuth = self.rendered().azimuth;
        let device = self
            .devices
            .frame(view_azimuth, dt, inputs.hovered, &self.tuning);
        if device.orbiting {
            self.orbit.halt();
        }

        if !inputs.hovered {
            let mut ctx = NavigationContext {
                goal: &mut self.goal,
                view_azimuth,
                time: self.clock,
                sensitivity: self.settings.sensitivity(),
                tuning: &self.tuning,
            };
            let pan = self.pan.update(&inputs.feed.right, &mut ctx);
            let orbit = self.orbit.update(&inputs.feed.left, &mut ctx);
            if pan.started() || orbit.started() {
                self.cinematic.release("gesture start");
            }
            if pan == GestureStep::Released || orbit == GestureStep::Released {
                debug!(?pan, ?orbit, "hand gesture released");
            }
        }

        self.goal.apply(&device.delta);

        let height_overridden = self.cinematic.step(&mut self.goal);
        if height_overridden {
            self.height_overridden = true;
        } else {
            if self.height_overridden {
                self.physics.halt();
                self.height_overridden = false;
            }
            self.physics.step(
                &mut self.goal.height,
                device.vertical,
                self.settings.gravity_scale(),
                self.settings.min_height(),
                &self.tuning,
            );
        }

        self.smoother.step(&self.goal)
    }
}
