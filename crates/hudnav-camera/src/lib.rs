//! Orbital camera navigation: goal state, input arbitration, inertia, vertical physics,
//! cinematic blending and render smoothing.

mod arbitration;
mod cinematic;
mod controller;
mod gestures;
mod inertia;
mod input;
mod physics;
mod smoothing;
mod state;
mod tuning;

pub use arbitration::{DeviceFrame, InputArbiter};
pub use cinematic::{CinematicController, CinematicGoal};
pub use controller::{CameraController, FrameInputs, NavigationContext};
pub use gestures::{GestureStep, HandOrbit, HandPan, OrbitSession, PanSession};
pub use inertia::{ChannelState, GestureChannel, InertiaParams, Momentum, VelocityHistory};
pub use input::{Direction, InputEvent, Key, NavigationDelta, RemoteSource};
pub use physics::{PhysicsState, VerticalControls, VerticalPhysics};
pub use smoothing::Smoother;
pub use state::{CameraPose, NavigationGoal, RenderedCameraState};
pub use tuning::Tuning;
