use hudnav_base::TrackingMode;
use hudnav_geometry::{Vec2, vec2};
use hudnav_perception::PerceptionFeed;
use serde::{Deserialize, Serialize};

use crate::hover::HoverTuning;

/// Visible extent of the interaction plane in world units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 12.0,
            height: 8.0,
        }
    }
}

impl Viewport {
    /// Normalized screen coordinates (y down) to plane coordinates (y up, origin at centre).
    pub fn project(&self, x: f64, y: f64) -> Vec2 {
        vec2((x - 0.5) * self.width, -(y - 0.5) * self.height)
    }

    /// Same as [`Viewport::project`] for camera-facing sources whose image is mirrored.
    pub fn project_mirrored(&self, x: f64, y: f64, gain: f64) -> Vec2 {
        vec2(
            -(x - 0.5) * self.width * gain,
            -(y - 0.5) * self.height * gain,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    Hand,
    Gaze,
    Device,
}

/// The one pointer the hover arbiter evaluates this frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ActivePointer {
    pub modality: Modality,
    pub position: Vec2,
    pub pinching: bool,
}

/// Raw positions every modality could point from.
#[derive(Clone, Copy, Debug)]
pub struct PointerSources<'a> {
    pub feed: &'a PerceptionFeed,
    pub now: f64,
    /// Last known mouse position, normalized. `None` until the mouse moves.
    pub mouse: Option<Vec2>,
    pub remote_cursor: Vec2,
}

/// Picks the active pointer for `mode`.
///
/// Hand and eye modes share one fallback chain: a hand seen within the activity timeout
/// owns the pointer (even while momentarily lost), otherwise the face does.
pub fn resolve_pointer(
    mode: TrackingMode,
    sources: &PointerSources<'_>,
    viewport: &Viewport,
    tuning: &HoverTuning,
) -> Option<ActivePointer> {
    match mode {
        TrackingMode::Hand | TrackingMode::Eye => {
            let feed = sources.feed;
            if feed.hands_active(sources.now, tuning.hand_timeout) {
                let hand = feed.active_hand();
                return hand.present.then(|| ActivePointer {
                    modality: Modality::Hand,
                    position: viewport.project_mirrored(hand.x, hand.y, 1.0),
                    pinching: hand.is_pinching(),
                });
            }
            feed.face.present.then(|| ActivePointer {
                modality: Modality::Gaze,
                position: viewport.project_mirrored(
                    feed.face.x,
                    feed.face.y,
                    tuning.gaze_sensitivity,
                ),
                pinching: false,
            })
        }
        TrackingMode::Mouse => sources.mouse.map(|mouse| ActivePointer {
            modality: Modality::Device,
            position: viewport.project(mouse.x, mouse.y),
            pinching: false,
        }),
        TrackingMode::Remote => Some(ActivePointer {
            modality: Modality::Device,
            position: viewport.project(sources.remote_cursor.x, sources.remote_cursor.y),
            pinching: false,
        }),
    }
}
