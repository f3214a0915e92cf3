use hudnav_base::Error;
use hudnav_geometry::{Vec3, Zero, is_finite3};
use serde::{Deserialize, Serialize};

/// Keys with a fixed navigation meaning. Anything else still counts as manual input.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    W,
    A,
    S,
    D,
    Space,
    Shift,
    Enter,
    /// Numeric keypad digit, used by TV remotes.
    Digit(u8),
    Other(String),
}

impl Key {
    pub fn name(&self) -> String {
        match self {
            Self::ArrowUp => "ArrowUp".to_string(),
            Self::ArrowDown => "ArrowDown".to_string(),
            Self::ArrowLeft => "ArrowLeft".to_string(),
            Self::ArrowRight => "ArrowRight".to_string(),
            Self::W => "w".to_string(),
            Self::A => "a".to_string(),
            Self::S => "s".to_string(),
            Self::D => "d".to_string(),
            Self::Space => " ".to_string(),
            Self::Shift => "Shift".to_string(),
            Self::Enter => "Enter".to_string(),
            Self::Digit(digit) => digit.to_string(),
            Self::Other(name) => name.clone(),
        }
    }

    /// Camera-relative step for translation keys: (right, forward).
    pub fn translation(&self) -> Option<(f64, f64)> {
        match self {
            Self::ArrowUp | Self::W => Some((0.0, 1.0)),
            Self::ArrowDown | Self::S => Some((0.0, -1.0)),
            Self::ArrowLeft | Self::A => Some((-1.0, 0.0)),
            Self::ArrowRight | Self::D => Some((1.0, 0.0)),
            _ => None,
        }
    }

    pub fn arrow_direction(&self) -> Option<Direction> {
        match self {
            Self::ArrowUp => Some(Direction::Up),
            Self::ArrowDown => Some(Direction::Down),
            Self::ArrowLeft => Some(Direction::Left),
            Self::ArrowRight => Some(Direction::Right),
            _ => None,
        }
    }

    /// Keypad layout of a TV remote: 2/4/6/8 move, 5 confirms.
    pub fn keypad_direction(&self) -> Option<Direction> {
        match self {
            Self::Digit(2) => Some(Direction::Up),
            Self::Digit(8) => Some(Direction::Down),
            Self::Digit(4) => Some(Direction::Left),
            Self::Digit(6) => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn is_confirm(&self) -> bool {
        matches!(self, Self::Enter | Self::Digit(5))
    }
}

impl std::str::FromStr for Key {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let key = match text {
            "ArrowUp" => Self::ArrowUp,
            "ArrowDown" => Self::ArrowDown,
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            "w" | "W" => Self::W,
            "a" | "A" => Self::A,
            "s" | "S" => Self::S,
            "d" | "D" => Self::D,
            " " | "Space" => Self::Space,
            "Shift" => Self::Shift,
            "Enter" => Self::Enter,
            "" => return Err(Error::UnknownKey(text.to_string())),
            _ => match text.parse::<u8>() {
                Ok(digit) if digit <= 9 => Self::Digit(digit),
                _ => Self::Other(text.to_string()),
            },
        };
        Ok(key)
    }
}

impl TryFrom<String> for Key {
    type Error = Error;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        text.parse()
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.name()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Screen-space unit step, y pointing down.
    pub fn screen_step(self) -> (f64, f64) {
        match self {
            Self::Up => (0.0, -1.0),
            Self::Down => (0.0, 1.0),
            Self::Left => (-1.0, 0.0),
            Self::Right => (1.0, 0.0),
        }
    }
}

/// Origin of a D-pad press. The hardware keypad steps further than the on-screen pad.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteSource {
    #[default]
    Keypad,
    OnScreen,
}

impl RemoteSource {
    pub fn cursor_step(self) -> f64 {
        match self {
            Self::Keypad => 0.15,
            Self::OnScreen => 0.05,
        }
    }

    pub fn pulse_strength(self) -> f64 {
        match self {
            Self::Keypad => 2.0,
            Self::OnScreen => 0.5,
        }
    }
}

/// Discrete device and UI events. Pointer and touch coordinates are normalized to [0, 1].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    PointerDown {
        x: f64,
        y: f64,
    },
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerUp,
    TouchStart {
        x: f64,
        y: f64,
    },
    TouchMove {
        x: f64,
        y: f64,
    },
    TouchEnd,
    KeyDown {
        key: Key,
    },
    KeyUp {
        key: Key,
    },
    Joystick {
        x: f64,
        y: f64,
    },
    Remote {
        direction: Direction,
        #[serde(default)]
        source: RemoteSource,
    },
    Confirm,
}

impl InputEvent {
    /// Events that take control away from a cinematic goal.
    pub fn is_manual(&self) -> bool {
        match self {
            Self::PointerDown { .. }
            | Self::TouchStart { .. }
            | Self::KeyDown { .. }
            | Self::Remote { .. }
            | Self::Confirm => true,
            Self::Joystick { x, y } => *x != 0.0 || *y != 0.0,
            _ => false,
        }
    }
}

/// One frame's worth of goal change from a single source, merged before applying.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavigationDelta {
    pub pan: Vec3,
    pub azimuth: f64,
    pub height: f64,
}

impl Default for NavigationDelta {
    fn default() -> Self {
        Self {
            pan: Vec3::zero(),
            azimuth: 0.0,
            height: 0.0,
        }
    }
}

impl NavigationDelta {
    pub fn pan(pan: Vec3) -> Self {
        Self {
            pan,
            ..Self::default()
        }
    }

    pub fn orbit(azimuth: f64, height: f64) -> Self {
        Self {
            azimuth,
            height,
            ..Self::default()
        }
    }

    /// Drops non-finite components so a bad sample never poisons the goal.
    pub fn sanitized(self) -> Self {
        let pan = if is_finite3(self.pan) {
            self.pan
        } else {
            Vec3::zero()
        };
        Self {
            pan,
            azimuth: if self.azimuth.is_finite() { self.azimuth } else { 0.0 },
            height: if self.height.is_finite() { self.height } else { 0.0 },
        }
    }
}

impl std::ops::Add for NavigationDelta {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self {
            pan: self.pan + other.pan,
            azimuth: self.azimuth + other.azimuth,
            height: self.height + other.height,
        }
    }
}

impl std::ops::AddAssign for NavigationDelta {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}
