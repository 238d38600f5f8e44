use anyhow::{Context, Result};
use clap::Parser;
use deviation_engine::HealthMonitor;
use physio_core::{MonitorConfig, Observation};
use prometheus::{Encoder, Registry, TextEncoder};
use prometheus_bridge::MonitorMetrics;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Establish a physiological baseline, score one follow-up observation and
/// print the result as JSON.
#[derive(Debug, Parser)]
#[command(name = "health-demo", version)]
struct Cli {
    /// JSON object with the baseline observation.
    #[arg(long)]
    baseline: Option<PathBuf>,

    /// JSON object with the observation to score.
    #[arg(long)]
    observation: Option<PathBuf>,

    /// JSON monitor config; omitted fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print Prometheus text exposition after the report.
    #[arg(long)]
    metrics: bool,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match &cli.config {
        Some(path) => MonitorConfig::from_json_str(&read(path)?)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => MonitorConfig::default(),
    };

    let baseline_obs = match &cli.baseline {
        Some(path) => load_observation(path)?,
        None => Observation::default(),
    };
    let current_obs = match &cli.observation {
        Some(path) => load_observation(path)?,
        None => demo_observation()?,
    };

    let mut monitor = HealthMonitor::with_config(config)?;
    info!(session_id = %monitor.session_id(), "monitoring session started");

    let baseline = monitor.initialize_baseline(&baseline_obs).clone();
    let report = monitor.real_time_monitoring(&current_obs)?;
    let metabolic = monitor.non_invasive_metabolic_analysis(&current_obs);

    let output = json!({
        "baseline": serde_json::to_value(&baseline)?,
        "current_state": report.to_json()?,
        "metabolic_analysis": serde_json::to_value(metabolic)?,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    if cli.metrics {
        let registry = Registry::new();
        let metrics = MonitorMetrics::new(&registry)?;
        metrics.observe_report(&report);

        let mut buf = Vec::new();
        TextEncoder::new().encode(&registry.gather(), &mut buf)?;
        print!("{}", String::from_utf8(buf)?);
    }

    Ok(())
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn load_observation(path: &Path) -> Result<Observation> {
    let value: Value = serde_json::from_str(&read(path)?)
        .with_context(|| format!("parsing {}", path.display()))?;
    Observation::from_json(&value).with_context(|| format!("validating {}", path.display()))
}

/// Slight stress response: elevated heart rate, suppressed HRV.
fn demo_observation() -> Result<Observation> {
    let value = json!({
        "heart_rate": 78,
        "hrv": 38,
        "blood_oxygen": 96,
        "skin_conductance": 3.2,
        "temperature": 36.9,
        "impedance": 475,
    });
    Ok(Observation::from_json(&value)?)
}
