mod command;
mod remote;
mod session;

pub use command::{
    ASSISTANT_ID, AgentCommand, CommandOutcome, DEFAULT_FOCUS_AZIMUTH, DEFAULT_FOCUS_RADIUS,
};
pub use remote::RemoteCursor;
pub use session::{Dashboard, DashboardConfig, FrameOutput, ObjectAction, ObjectSpec};
