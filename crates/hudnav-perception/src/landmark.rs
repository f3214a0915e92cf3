use serde::{Deserialize, Serialize};

pub const HAND_LANDMARK_COUNT: usize = 21;

/// Indices into the standard 21-point hand topology.
pub mod hand {
    pub const WRIST: usize = 0;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_TIP: usize = 8;
    pub const MIDDLE_MCP: usize = 9;
}

/// One tracked point in normalized image space (x, y in [0, 1], z relative depth).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Landmark {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Distance in the image plane. Depth from monocular trackers is on a different scale.
    pub fn planar_distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn midpoint(self, other: Self) -> Self {
        Self::new(
            (self.x + other.x) * 0.5,
            (self.y + other.y) * 0.5,
            (self.z + other.z) * 0.5,
        )
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}
