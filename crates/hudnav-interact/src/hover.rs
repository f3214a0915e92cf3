use hudnav_base::ObjectId;
use hudnav_geometry::{MetricSpace, Vec3, vec2};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::pointer::{ActivePointer, Modality};

const DWELL_EPSILON: f64 = 1.0e-9;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoverTuning {
    /// Plane distance under which the pointer is over an object.
    pub radius: f64,
    /// Continuous gaze hover needed to select.
    pub dwell: f64,
    /// Time without a tracked hand before gaze takes over.
    pub hand_timeout: f64,
    pub gaze_sensitivity: f64,
}

impl Default for HoverTuning {
    fn default() -> Self {
        Self {
            radius: 0.6,
            dwell: 1.0,
            hand_timeout: 5.0,
            gaze_sensitivity: 2.5,
        }
    }
}

/// Selecting a `Selectable` object makes it the current selection; a `Button` fires once
/// per trigger and never holds the selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    #[default]
    Selectable,
    Button,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InteractiveObject {
    pub id: ObjectId,
    pub position: Vec3,
    #[serde(default)]
    pub kind: ObjectKind,
    #[serde(default = "visible_by_default")]
    pub visible: bool,
}

fn visible_by_default() -> bool {
    true
}

impl InteractiveObject {
    pub fn new(id: impl Into<ObjectId>, position: Vec3) -> Self {
        Self {
            id: id.into(),
            position,
            kind: ObjectKind::Selectable,
            visible: true,
        }
    }

    pub fn button(id: impl Into<ObjectId>, position: Vec3) -> Self {
        Self {
            kind: ObjectKind::Button,
            ..Self::new(id, position)
        }
    }
}

/// The shared hover slot. At most one object owns it.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct HoverState {
    pub hovered_id: Option<ObjectId>,
    /// Gaze dwell completion in [0, 1].
    pub dwell_progress: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InteractionEvent {
    HoverEnter { id: ObjectId },
    HoverLeave { id: ObjectId },
    Selected { id: ObjectId, modality: Modality },
    Activated { id: ObjectId, modality: Modality },
}

/// Resolves hover and selection across all interactive objects once per frame.
#[derive(Clone, Debug)]
pub struct HoverArbiter {
    tuning: HoverTuning,
    state: HoverState,
    selected: Option<ObjectId>,
    dwell_elapsed: f64,
    /// A held pinch triggers once per hovered object.
    pinch_armed: bool,
}

impl Default for HoverArbiter {
    fn default() -> Self {
        Self::new(HoverTuning::default())
    }
}

impl HoverArbiter {
    pub fn new(tuning: HoverTuning) -> Self {
        Self {
            tuning,
            state: HoverState::default(),
            selected: None,
            dwell_elapsed: 0.0,
            pinch_armed: true,
        }
    }

    pub fn tuning(&self) -> &HoverTuning {
        &self.tuning
    }

    pub fn state(&self) -> &HoverState {
        &self.state
    }

    pub fn hovered(&self) -> Option<&ObjectId> {
        self.state.hovered_id.as_ref()
    }

    pub fn selected(&self) -> Option<&ObjectId> {
        self.selected.as_ref()
    }

    /// First visible object, in slice order, within the hover radius of `pointer`.
    fn claim<'a>(
        &self,
        objects: &'a [InteractiveObject],
        pointer: &ActivePointer,
    ) -> Option<&'a InteractiveObject> {
        objects.iter().filter(|object| object.visible).find(|object| {
            let center = vec2(object.position.x, object.position.y);
            center.distance(pointer.position) < self.tuning.radius
        })
    }

    /// Evaluates one frame. `press` is a discrete device click or remote confirm.
    pub fn update(
        &mut self,
        objects: &[InteractiveObject],
        pointer: Option<&ActivePointer>,
        press: bool,
        dt: f64,
    ) -> Vec<InteractionEvent> {
        let mut events = Vec::new();
        let claimed = pointer.and_then(|pointer| self.claim(objects, pointer));

        let next_id = claimed.map(|object| object.id.clone());
        if next_id != self.state.hovered_id {
            if let Some(id) = self.state.hovered_id.take() {
                debug!(id = %id, "hover leave");
                events.push(InteractionEvent::HoverLeave { id });
            }
            if let Some(id) = &next_id {
                debug!(id = %id, "hover enter");
                events.push(InteractionEvent::HoverEnter { id: id.clone() });
            }
            self.state.hovered_id = next_id;
            self.reset_dwell();
            self.pinch_armed = true;
        }

        let pinching = pointer.is_some_and(|pointer| pointer.pinching);
        let (Some(pointer), Some(object)) = (pointer, claimed) else {
            self.reset_dwell();
            self.pinch_armed = !pinching;
            return events;
        };

        let triggered = match pointer.modality {
            Modality::Hand => pinching && self.pinch_armed,
            Modality::Gaze => self.advance_dwell(dt),
            Modality::Device => press,
        };
        self.pinch_armed = !pinching;

        if triggered {
            if let Some(event) = self.trigger(object, pointer.modality) {
                events.push(event);
            }
        }
        events
    }

    fn advance_dwell(&mut self, dt: f64) -> bool {
        let dwell = if self.tuning.dwell > 0.0 {
            self.tuning.dwell
        } else {
            HoverTuning::default().dwell
        };
        if dt.is_finite() && dt > 0.0 {
            self.dwell_elapsed += dt;
        }
        if self.dwell_elapsed + DWELL_EPSILON >= dwell {
            self.reset_dwell();
            return true;
        }
        self.state.dwell_progress = (self.dwell_elapsed / dwell).clamp(0.0, 1.0);
        false
    }

    fn reset_dwell(&mut self) {
        self.dwell_elapsed = 0.0;
        self.state.dwell_progress = 0.0;
    }

    fn trigger(
        &mut self,
        object: &InteractiveObject,
        modality: Modality,
    ) -> Option<InteractionEvent> {
        match object.kind {
            ObjectKind::Button => {
                info!(id = %object.id, ?modality, "activated");
                Some(InteractionEvent::Activated {
                    id: object.id.clone(),
                    modality,
                })
            }
            ObjectKind::Selectable => {
                if self.selected.as_ref() == Some(&object.id) {
                    return None;
                }
                info!(id = %object.id, ?modality, "selected");
                self.selected = Some(object.id.clone());
                Some(InteractionEvent::Selected {
                    id: object.id.clone(),
                    modality,
                })
            }
        }
    }
}
