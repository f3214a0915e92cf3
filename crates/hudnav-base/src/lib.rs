use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const SENSITIVITY_RANGE: (f64, f64) = (0.1, 3.0);
pub const GRAVITY_RANGE: (f64, f64) = (0.0, 1.0);
pub const MIN_HEIGHT_RANGE: (f64, f64) = (0.0, 5.0);

/// Stable identifier of an interactive scene object.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ObjectId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ObjectId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which modality drives the interaction pointer.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingMode {
    #[default]
    Hand,
    Eye,
    Mouse,
    Remote,
}

impl TrackingMode {
    /// Order used by the in-scene tracking toggle. Remote falls back into the cycle at Eye.
    pub fn next(self) -> Self {
        match self {
            Self::Eye => Self::Hand,
            Self::Hand => Self::Mouse,
            Self::Mouse | Self::Remote => Self::Eye,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Hand => "HAND",
            Self::Eye => "EYE",
            Self::Mouse => "MOUSE",
            Self::Remote => "REMOTE",
        }
    }
}

/// What a remote D-pad press does.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteMode {
    #[default]
    Cursor,
    Camera,
    Rotate,
}

impl RemoteMode {
    pub fn next(self) -> Self {
        match self {
            Self::Cursor => Self::Camera,
            Self::Camera => Self::Rotate,
            Self::Rotate => Self::Cursor,
        }
    }
}

/// User-adjustable settings. Values are stored as given and clamped when read.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub sensitivity: f64,
    pub gravity: f64,
    pub min_height: f64,
    pub tracking_mode: TrackingMode,
    pub remote_mode: RemoteMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sensitivity: 1.0,
            gravity: 0.0,
            min_height: 0.0,
            tracking_mode: TrackingMode::Hand,
            remote_mode: RemoteMode::Cursor,
        }
    }
}

impl Settings {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn sensitivity(&self) -> f64 {
        clamp_or(self.sensitivity, SENSITIVITY_RANGE, 1.0)
    }

    pub fn gravity_scale(&self) -> f64 {
        clamp_or(self.gravity, GRAVITY_RANGE, 0.0)
    }

    pub fn min_height(&self) -> f64 {
        clamp_or(self.min_height, MIN_HEIGHT_RANGE, 0.0)
    }
}

fn clamp_or(value: f64, range: (f64, f64), fallback: f64) -> f64 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(range.0, range.1)
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown key: {0}")]
    UnknownKey(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
