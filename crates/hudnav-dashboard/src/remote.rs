use hudnav_base::TrackingMode;
use hudnav_camera::{Direction, InputEvent, Key, RemoteSource};
use hudnav_geometry::{Vec2, vec2};
use serde::Serialize;

/// Crosshair steered by the remote D-pad in cursor mode. Normalized screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RemoteCursor {
    pub x: f64,
    pub y: f64,
}

impl Default for RemoteCursor {
    fn default() -> Self {
        Self { x: 0.5, y: 0.5 }
    }
}

impl RemoteCursor {
    pub fn position(&self) -> Vec2 {
        vec2(self.x, self.y)
    }

    pub fn step(&mut self, direction: Direction, source: RemoteSource) {
        let (dx, dy) = direction.screen_step();
        let speed = source.cursor_step();
        self.x = (self.x + dx * speed).clamp(0.0, 1.0);
        self.y = (self.y + dy * speed).clamp(0.0, 1.0);
    }
}

/// Device events after keypad translation, plus what the session needs to know about them.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct TranslatedInput {
    pub events: Vec<InputEvent>,
    /// A remote button was used; the session switches to remote tracking.
    pub remote_used: bool,
    /// Click or confirm for device-modality selection.
    pub press: bool,
    pub mouse: Option<Vec2>,
}

/// Maps TV keypad digits to remote presses, and arrows too once the remote is in use.
/// Everything else passes through unchanged.
pub(crate) fn translate(events: &[InputEvent], mode: TrackingMode) -> TranslatedInput {
    let mut out = TranslatedInput::default();
    let mut remote = mode == TrackingMode::Remote;

    for event in events {
        match event {
            InputEvent::KeyDown { key } => {
                if let Some(direction) = key.keypad_direction() {
                    remote = true;
                    out.remote_used = true;
                    out.events.push(keypad_press(direction));
                } else if *key == Key::Digit(5) || (remote && key.is_confirm()) {
                    remote = true;
                    out.remote_used = true;
                    out.press = true;
                    out.events.push(InputEvent::Confirm);
                } else if let Some(direction) = key.arrow_direction().filter(|_| remote) {
                    out.events.push(keypad_press(direction));
                } else {
                    out.events.push(event.clone());
                }
            }
            InputEvent::Remote { .. } => {
                remote = true;
                out.remote_used = true;
                out.events.push(event.clone());
            }
            InputEvent::Confirm => {
                out.press = true;
                out.events.push(event.clone());
            }
            InputEvent::PointerDown { x, y } => {
                out.mouse = Some(vec2(*x, *y));
                out.press |= mode == TrackingMode::Mouse;
                out.events.push(event.clone());
            }
            InputEvent::PointerMove { x, y } => {
                out.mouse = Some(vec2(*x, *y));
                out.events.push(event.clone());
            }
            _ => out.events.push(event.clone()),
        }
    }
    out
}

fn keypad_press(direction: Direction) -> InputEvent {
    InputEvent::Remote {
        direction,
        source: RemoteSource::Keypad,
    }
}
