use serde::{Deserialize, Serialize};

/// Scene object the assistant focus command reveals when it targets it.
pub const ASSISTANT_ID: &str = "eve";

pub const DEFAULT_FOCUS_RADIUS: f64 = 3.5;
pub const DEFAULT_FOCUS_AZIMUTH: f64 = -0.2;

/// Requests from the external agent. Unknown or missing optional fields never fail a command.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum AgentCommand {
    FocusAssistant {
        #[serde(default)]
        target_id: String,
        #[serde(default)]
        position: Option<[f64; 3]>,
        #[serde(default)]
        radius: Option<f64>,
        /// Orbit azimuth of the shot.
        #[serde(default)]
        theta: Option<f64>,
        /// Camera height of the shot. Absent leaves height to physics.
        #[serde(default)]
        cam_y: Option<f64>,
    },
    ResetCamera,
    SetVisibility {
        name: String,
        visible: bool,
    },
}

impl AgentCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::FocusAssistant { .. } => "focus_assistant",
            Self::ResetCamera => "reset_camera",
            Self::SetVisibility { .. } => "set_visibility",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOutcome {
    pub success: bool,
    pub message: String,
}

impl CommandOutcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
