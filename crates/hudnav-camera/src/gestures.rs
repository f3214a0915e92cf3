use hudnav_geometry::{PlanarBasis, Vec3};
use hudnav_perception::PointerSample;
use tracing::debug;

use crate::controller::NavigationContext;
use crate::inertia::GestureChannel;
use crate::tuning::Tuning;

/// What a hand channel did this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureStep {
    Idle,
    Started,
    Moved,
    /// The pinch ended this frame. Momentum, if any, already moved the goal once.
    Released,
    Coasting,
}

impl GestureStep {
    pub fn started(self) -> bool {
        self == Self::Started
    }
}

/// Snapshot taken when a pan pinch begins. Deltas are measured against it, not the previous frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanSession {
    pub start_x: f64,
    pub start_y: f64,
    pub start_target: Vec3,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitSession {
    pub start_x: f64,
    pub start_y: f64,
    pub start_azimuth: f64,
    pub start_height: f64,
}

/// Right-hand pinch: planar translation of the look-at target.
#[derive(Clone, Debug)]
pub struct HandPan {
    channel: GestureChannel<PanSession, Vec3>,
}

impl HandPan {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            channel: GestureChannel::new(tuning.pan_inertia()),
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.channel.is_dragging()
    }

    pub fn velocity(&self) -> Vec3 {
        self.channel.velocity()
    }

    pub fn halt(&mut self) {
        self.channel.halt();
    }

    pub fn update(&mut self, sample: &PointerSample, ctx: &mut NavigationContext<'_>) -> GestureStep {
        if sample.present && sample.is_pinching() {
            let Some(session) = self.channel.session().copied() else {
                let session = PanSession {
                    start_x: sample.x,
                    start_y: sample.y,
                    start_target: ctx.goal.target,
                };
                self.channel.begin(session, ctx.goal.target, ctx.time);
                debug!(x = sample.x, y = sample.y, "pan started");
                return GestureStep::Started;
            };

            let scale = ctx.tuning.pan_sensitivity * ctx.sensitivity;
            let offset = PlanarBasis::from_azimuth(ctx.view_azimuth).planar(
                (sample.x - session.start_x) * scale,
                (sample.y - session.start_y) * scale,
            );
            ctx.goal.target = session.start_target + offset;
            self.channel.track(ctx.goal.target, ctx.time);
            return GestureStep::Moved;
        }

        let released = self.channel.is_dragging();
        if released {
            let throw = self.channel.release();
            debug!(?throw, "pan released");
        }
        match (self.channel.coast(), released) {
            (Some(step), released) => {
                ctx.goal.target += step;
                if released {
                    GestureStep::Released
                } else {
                    GestureStep::Coasting
                }
            }
            (None, true) => GestureStep::Released,
            (None, false) => GestureStep::Idle,
        }
    }
}

/// Left-hand pinch: azimuth orbit from horizontal motion, height tilt from vertical motion.
#[derive(Clone, Debug)]
pub struct HandOrbit {
    channel: GestureChannel<OrbitSession, f64>,
}

impl HandOrbit {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            channel: GestureChannel::new(tuning.orbit_inertia()),
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.channel.is_dragging()
    }

    pub fn velocity(&self) -> f64 {
        self.channel.velocity()
    }

    pub fn halt(&mut self) {
        self.channel.halt();
    }

    pub fn update(&mut self, sample: &PointerSample, ctx: &mut NavigationContext<'_>) -> GestureStep {
        if sample.present && sample.is_pinching() {
            let Some(session) = self.channel.session().copied() else {
                let session = OrbitSession {
                    start_x: sample.x,
                    start_y: sample.y,
                    start_azimuth: ctx.goal.azimuth,
                    start_height: ctx.goal.height,
                };
                self.channel.begin(session, ctx.goal.azimuth, ctx.time);
                debug!(azimuth = ctx.goal.azimuth, "orbit started");
                return GestureStep::Started;
            };

            let tuning = ctx.tuning;
            ctx.goal.azimuth = session.start_azimuth
                + (sample.x - session.start_x) * tuning.rotate_sensitivity * ctx.sensitivity;
            let tilt = session.start_height
                + (sample.y - session.start_y) * tuning.tilt_sensitivity * ctx.sensitivity;
            ctx.goal.height = tilt.clamp(tuning.tilt_min, tuning.tilt_max.max(tuning.tilt_min));
            self.channel.track(ctx.goal.azimuth, ctx.time);
            return GestureStep::Moved;
        }

        let released = self.channel.is_dragging();
        if released {
            let throw = self.channel.release();
            debug!(?throw, "orbit released");
        }
        match (self.channel.coast(), released) {
            (Some(step), released) => {
                ctx.goal.azimuth += step;
                if released {
                    GestureStep::Released
                } else {
                    GestureStep::Coasting
                }
            }
            (None, true) => GestureStep::Released,
            (None, false) => GestureStep::Idle,
        }
    }
}
