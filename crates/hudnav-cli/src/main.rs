mod scenario;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use hudnav_base::Settings;
use hudnav_dashboard::DashboardConfig;
use tracing::info;

use crate::scenario::Scenario;

#[derive(Parser)]
#[command(name = "hudnav")]
#[command(about = "Headless runner for the hudnav camera and interaction core")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay a scenario file and print one JSON line per frame.
    Simulate(SimulateArgs),
    /// Print the default configuration as JSON.
    Defaults,
}

#[derive(Args)]
struct SimulateArgs {
    #[arg(long)]
    scenario: PathBuf,
    /// Settings file replacing the scenario's own settings.
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Frame time step, overriding the scenario.
    #[arg(long)]
    dt: Option<f64>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Simulate(args) => simulate(args),
        Command::Defaults => defaults(),
    }
}

fn simulate(args: SimulateArgs) -> Result<()> {
    if let Some(dt) = args.dt {
        if !dt.is_finite() || dt <= 0.0 {
            bail!("--dt expects a positive number of time units, got {dt}");
        }
    }

    let mut scenario = Scenario::load(&args.scenario)?;
    if let Some(path) = &args.settings {
        let settings = Settings::load(path)
            .with_context(|| format!("failed to load settings {}", path.display()))?;
        scenario = scenario.with_settings(settings);
    }
    info!(
        path = %args.scenario.display(),
        frames = scenario.frames.len(),
        "replaying scenario"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut count = 0usize;
    scenario.run(args.dt, |line| {
        serde_json::to_writer(&mut out, &line).context("failed to encode frame")?;
        writeln!(out).context("failed to write frame")?;
        count += 1;
        Ok(())
    })?;
    out.flush().context("failed to flush output")?;
    info!(frames = count, "scenario complete");
    Ok(())
}

fn defaults() -> Result<()> {
    let config = DashboardConfig::default();
    let text = serde_json::to_string_pretty(&config).context("failed to encode defaults")?;
    println!("{text}");
    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
