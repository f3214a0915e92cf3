use std::path::Path;

use anyhow::{Context, Result, bail};
use hudnav_base::Settings;
use hudnav_camera::InputEvent;
use hudnav_dashboard::{AgentCommand, CommandOutcome, Dashboard, DashboardConfig, FrameOutput};
use hudnav_perception::{DetectedHand, Landmark};
use serde::{Deserialize, Serialize};

pub const DEFAULT_DT: f64 = 1.0 / 60.0;

/// A recorded session: dashboard setup plus the inputs of every frame.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Scenario {
    #[serde(flatten)]
    pub config: DashboardConfig,
    pub dt: Option<f64>,
    pub frames: Vec<ScenarioFrame>,
}

/// Inputs of one frame. Perception fields left out keep the previous perception state.
#[derive(Debug, Deserialize)]
pub struct ScenarioFrame {
    #[serde(default)]
    pub hands: Option<Vec<DetectedHand>>,
    /// Face mesh; an empty list means the face was lost.
    #[serde(default)]
    pub face: Option<Vec<Landmark>>,
    #[serde(default)]
    pub events: Vec<InputEvent>,
    #[serde(default)]
    pub commands: Vec<AgentCommand>,
    /// Runs the frame this many times. Events and commands apply to the first run only.
    #[serde(default = "single")]
    pub repeat: usize,
}

fn single() -> usize {
    1
}

#[derive(Debug, Serialize)]
pub struct FrameLine {
    pub frame: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub outcomes: Vec<CommandOutcome>,
    #[serde(flatten)]
    pub output: FrameOutput,
}

impl Scenario {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let scenario: Self = serde_json::from_str(text).context("invalid scenario JSON")?;
        if let Some(dt) = scenario.dt {
            if !dt.is_finite() || dt <= 0.0 {
                bail!("scenario dt must be a positive number, got {dt}");
            }
        }
        Ok(scenario)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("in {}", path.display()))
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.config.settings = settings;
        self
    }

    /// Replays every frame, handing each output line to `emit` as it is produced.
    pub fn run(self, dt: Option<f64>, mut emit: impl FnMut(FrameLine) -> Result<()>) -> Result<()> {
        let dt = dt.or(self.dt).unwrap_or(DEFAULT_DT);
        let mut dashboard = Dashboard::new(self.config);
        let mut index = 0;

        for frame in &self.frames {
            for run in 0..frame.repeat {
                if let Some(hands) = &frame.hands {
                    dashboard.ingest_hands(hands);
                }
                if let Some(face) = &frame.face {
                    let landmarks = (!face.is_empty()).then_some(face.as_slice());
                    dashboard.ingest_face(landmarks);
                }

                let first = run == 0;
                let outcomes = if first {
                    frame
                        .commands
                        .iter()
                        .map(|command| dashboard.execute(command))
                        .collect()
                } else {
                    Vec::new()
                };
                let events: &[InputEvent] = if first { &frame.events } else { &[] };
                let output = dashboard.tick(dt, events);

                emit(FrameLine {
                    frame: index,
                    outcomes,
                    output,
                })?;
                index += 1;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_defaults_to_one_and_events_fire_once() -> Result<()> {
        let scenario = Scenario::from_json_str(
            r#"{
                "objects": [{"id": "alpha", "position": [0.0, 0.0, 0.0]}],
                "frames": [
                    {"events": [{"type": "key_down", "key": "d"}], "repeat": 3},
                    {"commands": [{"command": "reset_camera"}]}
                ]
            }"#,
        )?;
        assert_eq!(scenario.frames[0].repeat, 3);
        assert_eq!(scenario.frames[1].repeat, 1);
        assert_eq!(scenario.config.objects.len(), 1);

        let mut lines = Vec::new();
        scenario.run(None, |line| {
            lines.push(line);
            Ok(())
        })?;
        assert_eq!(lines.len(), 4);
        let first = lines[0].output.goal.target;
        assert_eq!(lines[2].output.goal.target, first);
        assert_eq!(lines[3].outcomes.len(), 1);
        Ok(())
    }

    #[test]
    fn rejects_non_positive_dt() {
        assert!(Scenario::from_json_str(r#"{"dt": 0.0}"#).is_err());
    }
}
