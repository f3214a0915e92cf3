use hudnav_base::RemoteMode;
use hudnav_geometry::{PlanarBasis, Vec2, Zero, vec2};
use tracing::debug;

use crate::input::{Direction, InputEvent, Key, NavigationDelta, RemoteSource};
use crate::physics::VerticalControls;
use crate::tuning::Tuning;

/// Pointer or touch drag in progress.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum DeviceDrag {
    #[default]
    Idle,
    Dragging {
        last: Vec2,
        accumulated: Vec2,
    },
}

impl DeviceDrag {
    fn start(at: Vec2) -> Self {
        Self::Dragging {
            last: at,
            accumulated: Vec2::zero(),
        }
    }

    fn moved(&mut self, to: Vec2) {
        if let Self::Dragging { last, accumulated } = self {
            *accumulated += to - *last;
            *last = to;
        }
    }

    fn take(&mut self) -> Option<Vec2> {
        match self {
            Self::Dragging { accumulated, .. } => {
                let delta = *accumulated;
                *accumulated = Vec2::zero();
                Some(delta)
            }
            Self::Idle => None,
        }
    }
}

/// Timed auto-releasing input, e.g. one remote D-pad press.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Pulse {
    value: Vec2,
    remaining: f64,
}

/// What the device layer contributes to one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DeviceFrame {
    pub delta: NavigationDelta,
    pub vertical: VerticalControls,
    /// A device is rotating the orbit this frame; orbit momentum must yield.
    pub orbiting: bool,
}

/// Collects discrete device events between frames and turns them into goal deltas.
#[derive(Clone, Debug)]
pub struct InputArbiter {
    mouse: DeviceDrag,
    touch: DeviceDrag,
    joystick: Vec2,
    joystick_pulse: Option<Pulse>,
    orbit_pulse: Option<Pulse>,
    key_steps: Vec2,
    ascend_held: bool,
    descend_held: bool,
    jump_requested: bool,
}

impl Default for InputArbiter {
    fn default() -> Self {
        Self {
            mouse: DeviceDrag::Idle,
            touch: DeviceDrag::Idle,
            joystick: Vec2::zero(),
            joystick_pulse: None,
            orbit_pulse: None,
            key_steps: Vec2::zero(),
            ascend_held: false,
            descend_held: false,
            jump_requested: false,
        }
    }
}

impl InputArbiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one event. Returns true when the event is a manual override.
    pub fn handle(
        &mut self,
        event: &InputEvent,
        hovered: bool,
        remote_mode: RemoteMode,
        tuning: &Tuning,
    ) -> bool {
        match event {
            InputEvent::PointerDown { x, y } => {
                if !hovered {
                    self.mouse = DeviceDrag::start(vec2(*x, *y));
                }
            }
            InputEvent::PointerMove { x, y } => self.mouse.moved(vec2(*x, *y)),
            InputEvent::PointerUp => self.mouse = DeviceDrag::Idle,
            InputEvent::TouchStart { x, y } => {
                if !hovered {
                    self.touch = DeviceDrag::start(vec2(*x, *y));
                }
            }
            InputEvent::TouchMove { x, y } => self.touch.moved(vec2(*x, *y)),
            InputEvent::TouchEnd => self.touch = DeviceDrag::Idle,
            InputEvent::KeyDown { key } => self.key_down(key),
            InputEvent::KeyUp { key } => self.key_up(key),
            InputEvent::Joystick { x, y } => {
                self.joystick = vec2(x.clamp(-1.0, 1.0), y.clamp(-1.0, 1.0));
            }
            InputEvent::Remote { direction, source } => {
                self.remote(*direction, *source, remote_mode, tuning);
            }
            InputEvent::Confirm => {}
        }
        event.is_manual()
    }

    fn key_down(&mut self, key: &Key) {
        if let Some((right, forward)) = key.translation() {
            self.key_steps += vec2(right, forward);
        }
        match key {
            Key::Space => {
                self.ascend_held = true;
                self.jump_requested = true;
            }
            Key::Shift => self.descend_held = true,
            _ => {}
        }
    }

    fn key_up(&mut self, key: &Key) {
        match key {
            Key::Space => self.ascend_held = false,
            Key::Shift => self.descend_held = false,
            _ => {}
        }
    }

    fn remote(
        &mut self,
        direction: Direction,
        source: RemoteSource,
        mode: RemoteMode,
        tuning: &Tuning,
    ) {
        let (dx, dy) = direction.screen_step();
        let strength = source.pulse_strength();
        match mode {
            RemoteMode::Cursor => {}
            RemoteMode::Camera => {
                self.joystick_pulse = Some(Pulse {
                    value: vec2(dx * strength, -dy * strength),
                    remaining: tuning.pulse_duration,
                });
            }
            RemoteMode::Rotate => {
                self.orbit_pulse = Some(Pulse {
                    value: vec2(dx * strength, dy * strength),
                    remaining: tuning.pulse_duration,
                });
            }
        }
        debug!(?direction, ?mode, "remote press");
    }

    /// Turns everything recorded since the last frame into a delta on the `view_azimuth` basis.
    /// Pointer-like drags are discarded while an object is hovered.
    pub fn frame(
        &mut self,
        view_azimuth: f64,
        dt: f64,
        hovered: bool,
        tuning: &Tuning,
    ) -> DeviceFrame {
        let basis = PlanarBasis::from_azimuth(view_azimuth);
        let mut delta = NavigationDelta::default();
        let mut orbiting = false;

        let mouse = self.mouse.take();
        let touch = self.touch.take();
        if !hovered {
            if let Some(drag) = mouse {
                delta += NavigationDelta::orbit(
                    -drag.x * tuning.mouse_rotate,
                    drag.y * tuning.mouse_tilt,
                );
                orbiting |= !drag.is_zero();
            }
            if let Some(drag) = touch {
                delta += NavigationDelta::orbit(
                    -drag.x * tuning.touch_rotate,
                    drag.y * tuning.touch_tilt,
                );
                orbiting |= !drag.is_zero();
            }
        }

        let stick = match self.joystick_pulse {
            Some(pulse) => pulse.value,
            None => self.joystick,
        };
        if !stick.is_zero() {
            delta += NavigationDelta::pan(basis.planar(stick.x, stick.y) * tuning.joystick_speed);
        }

        if let Some(pulse) = self.orbit_pulse {
            delta += NavigationDelta::orbit(
                pulse.value.x * tuning.remote_rotate,
                -pulse.value.y * tuning.remote_tilt,
            );
            orbiting = true;
        }

        if !self.key_steps.is_zero() {
            let steps = std::mem::replace(&mut self.key_steps, Vec2::zero());
            delta += NavigationDelta::pan(basis.planar(steps.x, steps.y) * tuning.keyboard_step);
        }

        self.joystick_pulse = advance(self.joystick_pulse, dt);
        self.orbit_pulse = advance(self.orbit_pulse, dt);

        let vertical = VerticalControls {
            ascend: self.ascend_held,
            descend: self.descend_held,
            jump: std::mem::take(&mut self.jump_requested),
        };

        DeviceFrame {
            delta: delta.sanitized(),
            vertical,
            orbiting,
        }
    }
}

fn advance(pulse: Option<Pulse>, dt: f64) -> Option<Pulse> {
    let pulse = pulse?;
    let remaining = pulse.remaining - dt;
    if remaining > 1.0e-9 {
        Some(Pulse { remaining, ..pulse })
    } else {
        None
    }
}
