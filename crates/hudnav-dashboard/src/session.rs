use std::collections::{BTreeMap, HashMap};

use hudnav_base::{ObjectId, RemoteMode, Settings, TrackingMode};
use hudnav_camera::{
    CameraController, CameraPose, CinematicGoal, FrameInputs, InputEvent, NavigationGoal,
    PhysicsState, RenderedCameraState, Tuning,
};
use hudnav_geometry::{Vec2, vec3};
use hudnav_interact::{
    ActivePointer, HoverArbiter, HoverState, HoverTuning, InteractionEvent, InteractiveObject,
    PointerSources, Viewport, resolve_pointer,
};
use hudnav_perception::{
    DEFAULT_PINCH_THRESHOLD, DetectedHand, FaceEstimator, GestureClassifier, Landmark,
    PerceptionFeed,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::command::{
    ASSISTANT_ID, AgentCommand, CommandOutcome, DEFAULT_FOCUS_AZIMUTH, DEFAULT_FOCUS_RADIUS,
};
use crate::remote::{RemoteCursor, translate};

/// What selecting a button object does to the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectAction {
    /// Cycles eye, hand and mouse tracking.
    ToggleTrackingMode,
    /// Cycles remote cursor, camera and rotate modes.
    CycleRemoteMode,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectSpec {
    #[serde(flatten)]
    pub object: InteractiveObject,
    #[serde(default)]
    pub action: Option<ObjectAction>,
}

impl From<InteractiveObject> for ObjectSpec {
    fn from(object: InteractiveObject) -> Self {
        Self {
            object,
            action: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub settings: Settings,
    pub tuning: Tuning,
    pub hover: HoverTuning,
    pub viewport: Viewport,
    pub pinch_threshold: f64,
    pub start: NavigationGoal,
    pub objects: Vec<ObjectSpec>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            tuning: Tuning::default(),
            hover: HoverTuning::default(),
            viewport: Viewport::default(),
            pinch_threshold: DEFAULT_PINCH_THRESHOLD,
            start: NavigationGoal::default(),
            objects: Vec::new(),
        }
    }
}

/// Everything the renderer and UI overlays consume after one tick.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FrameOutput {
    pub time: f64,
    pub pose: CameraPose,
    pub rendered: RenderedCameraState,
    pub goal: NavigationGoal,
    pub physics: PhysicsState,
    pub cinematic: Option<CinematicGoal>,
    pub hover: HoverState,
    pub selected: Option<ObjectId>,
    pub pointer: Option<ActivePointer>,
    pub tracking_mode: TrackingMode,
    pub remote_mode: RemoteMode,
    pub remote_cursor: RemoteCursor,
    pub events: Vec<InteractionEvent>,
}

/// One running dashboard: perception feed, camera, interaction and agent hooks.
#[derive(Debug)]
pub struct Dashboard {
    settings: Settings,
    viewport: Viewport,
    classifier: GestureClassifier,
    estimator: FaceEstimator,
    feed: PerceptionFeed,
    controller: CameraController,
    arbiter: HoverArbiter,
    objects: Vec<InteractiveObject>,
    actions: HashMap<ObjectId, ObjectAction>,
    /// Visibility of scene objects that are not interactive, such as the assistant avatar.
    scenery: BTreeMap<String, bool>,
    remote_cursor: RemoteCursor,
    mouse: Option<Vec2>,
    clock: f64,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(DashboardConfig::default())
    }
}

impl Dashboard {
    pub fn new(config: DashboardConfig) -> Self {
        let mut objects = Vec::with_capacity(config.objects.len());
        let mut actions = HashMap::new();
        for spec in config.objects {
            if let Some(action) = spec.action {
                actions.insert(spec.object.id.clone(), action);
            }
            objects.push(spec.object);
        }

        Self {
            controller: CameraController::with_goal(config.settings, config.tuning, config.start),
            arbiter: HoverArbiter::new(config.hover),
            classifier: GestureClassifier::new(config.pinch_threshold),
            estimator: FaceEstimator,
            feed: PerceptionFeed::new(),
            settings: config.settings,
            viewport: config.viewport,
            objects,
            actions,
            scenery: BTreeMap::new(),
            remote_cursor: RemoteCursor::default(),
            mouse: None,
            clock: 0.0,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        if settings.tracking_mode != self.settings.tracking_mode {
            info!(mode = settings.tracking_mode.label(), "tracking mode changed");
        }
        self.settings = settings;
        self.controller.set_settings(settings);
    }

    pub fn feed(&self) -> &PerceptionFeed {
        &self.feed
    }

    pub fn controller(&self) -> &CameraController {
        &self.controller
    }

    pub fn arbiter(&self) -> &HoverArbiter {
        &self.arbiter
    }

    pub fn objects(&self) -> &[InteractiveObject] {
        &self.objects
    }

    pub fn remote_cursor(&self) -> RemoteCursor {
        self.remote_cursor
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    /// Visibility of an interactive object or a named piece of scenery. Unknown names are hidden.
    pub fn is_visible(&self, name: &str) -> bool {
        match self.objects.iter().find(|object| object.id.as_str() == name) {
            Some(object) => object.visible,
            None => self.scenery.get(name).copied().unwrap_or(false),
        }
    }

    pub fn set_visibility(&mut self, name: &str, visible: bool) {
        match self
            .objects
            .iter_mut()
            .find(|object| object.id.as_str() == name)
        {
            Some(object) => object.visible = visible,
            None => {
                self.scenery.insert(name.to_string(), visible);
            }
        }
        debug!(name, visible, "visibility changed");
    }

    /// Latest hand detections from the perception loop. Hands missing from the list are lost.
    pub fn ingest_hands(&mut self, hands: &[DetectedHand]) {
        self.feed.ingest_hands(&self.classifier, hands, self.clock);
    }

    /// Latest face mesh. `None` means the face was not found.
    pub fn ingest_face(&mut self, landmarks: Option<&[Landmark]>) {
        self.feed.ingest_face(&self.estimator, landmarks);
    }

    pub fn execute(&mut self, command: &AgentCommand) -> CommandOutcome {
        info!(command = command.name(), "agent command");
        match command {
            AgentCommand::FocusAssistant {
                target_id,
                position,
                radius,
                theta,
                cam_y,
            } => {
                let Some([x, y, z]) = *position else {
                    return CommandOutcome::rejected("Position required");
                };
                let goal = CinematicGoal {
                    target: Some(vec3(x, y, z)),
                    radius: Some(radius.unwrap_or(DEFAULT_FOCUS_RADIUS)),
                    azimuth: Some(theta.unwrap_or(DEFAULT_FOCUS_AZIMUTH)),
                    height: *cam_y,
                };
                self.controller.set_cinematic_goal(Some(goal));
                if target_id == ASSISTANT_ID {
                    self.set_visibility(ASSISTANT_ID, true);
                }
                CommandOutcome::ok(format!("Focused on {target_id}"))
            }
            AgentCommand::ResetCamera => {
                self.controller.set_cinematic_goal(None);
                CommandOutcome::ok("Camera released")
            }
            AgentCommand::SetVisibility { name, visible } => {
                self.set_visibility(name, *visible);
                CommandOutcome::ok(format!(
                    "{name} {}",
                    if *visible { "shown" } else { "hidden" }
                ))
            }
        }
    }

    /// Runs one frame: device input, hover and selection, then camera.
    pub fn tick(&mut self, dt: f64, events: &[InputEvent]) -> FrameOutput {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        self.clock += dt;

        let input = translate(events, self.settings.tracking_mode);
        if input.remote_used && self.settings.tracking_mode != TrackingMode::Remote {
            self.set_settings(Settings {
                tracking_mode: TrackingMode::Remote,
                ..self.settings
            });
        }
        if let Some(mouse) = input.mouse {
            self.mouse = Some(mouse);
        }
        if self.settings.remote_mode == RemoteMode::Cursor {
            for event in &input.events {
                if let InputEvent::Remote { direction, source } = event {
                    self.remote_cursor.step(*direction, *source);
                }
            }
        }

        let sources = PointerSources {
            feed: &self.feed,
            now: self.clock,
            mouse: self.mouse,
            remote_cursor: self.remote_cursor.position(),
        };
        let pointer = resolve_pointer(
            self.settings.tracking_mode,
            &sources,
            &self.viewport,
            self.arbiter.tuning(),
        );
        let interactions = self
            .arbiter
            .update(&self.objects, pointer.as_ref(), input.press, dt);
        self.run_actions(&interactions);

        let rendered = self.controller.update(
            dt,
            FrameInputs {
                feed: &self.feed,
                events: &input.events,
                hovered: self.arbiter.hovered().is_some(),
            },
        );

        FrameOutput {
            time: self.clock,
            pose: rendered.pose(),
            rendered,
            goal: *self.controller.goal(),
            physics: self.controller.physics_state(),
            cinematic: self.controller.cinematic_goal().copied(),
            hover: self.arbiter.state().clone(),
            selected: self.arbiter.selected().cloned(),
            pointer,
            tracking_mode: self.settings.tracking_mode,
            remote_mode: self.settings.remote_mode,
            remote_cursor: self.remote_cursor,
            events: interactions,
        }
    }

    fn run_actions(&mut self, interactions: &[InteractionEvent]) {
        for event in interactions {
            let InteractionEvent::Activated { id, .. } = event else {
                continue;
            };
            match self.actions.get(id).copied() {
                Some(ObjectAction::ToggleTrackingMode) => {
                    self.set_settings(Settings {
                        tracking_mode: self.settings.tracking_mode.next(),
                        ..self.settings
                    });
                }
                Some(ObjectAction::CycleRemoteMode) => {
                    let remote_mode = self.settings.remote_mode.next();
                    info!(?remote_mode, "remote mode changed");
                    self.set_settings(Settings {
                        remote_mode,
                        ..self.settings
                    });
                }
                None => {}
            }
        }
    }
}
