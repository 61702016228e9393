use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use win_reveal::{
    format_amount, format_multiplier, run_headless, HistoryEntry, HistorySummary, OutcomeSource,
    RevealConfig, RevealStage, ScheduledReveal, SilentHaptics, SpeedMode, SpeedSetting,
    SteppedOutcomes,
};

#[derive(Parser)]
#[command(author, version, about = "Win reveal timing and simulation CLI")]
struct Cli {
    /// TOML config; defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the reveal duration for a multiplier.
    Duration {
        #[arg(long)]
        multiplier: f64,
        #[arg(long)]
        speed: Option<SpeedMode>,
    },
    /// Run one reveal headless and emit the frame trace.
    Simulate {
        #[arg(long)]
        multiplier: f64,
        #[arg(long, default_value_t = 100.0)]
        bet: f64,
        #[arg(long)]
        speed: Option<SpeedMode>,
        #[arg(long, default_value_t = 60)]
        fps: u32,
        /// Write the full YAML trace here instead of printing highlights.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Play seeded rounds back to back and print the history as JSON.
    Play {
        #[arg(long, default_value_t = 10)]
        rounds: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 100.0)]
        bet: f64,
        #[arg(long)]
        speed: Option<SpeedMode>,
        #[arg(long, default_value_t = 60)]
        fps: u32,
    },
    /// Write the default config to a TOML file.
    ConfigInit {
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Serialize)]
struct TraceEnvelope {
    trace_format_version: u16,
    multiplier: f64,
    speed: SpeedMode,
    duration_ms: f64,
    trace: win_reveal::RevealTrace,
}

#[derive(Serialize)]
struct PlayReport {
    seed: u64,
    speed: SpeedMode,
    /// Oldest first.
    rounds: Vec<HistoryEntry>,
    summary: HistorySummary,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Command::Duration { multiplier, speed } => {
            let speed = speed.unwrap_or(config.speed_mode);
            let duration_ms = config.timing.duration_ms(multiplier, speed);
            println!(
                "{} {} => {duration_ms:.0} ms",
                format_multiplier(multiplier),
                speed.label()
            );
            Ok(())
        }
        Command::Simulate {
            multiplier,
            bet,
            speed,
            fps,
            output,
        } => simulate(config, multiplier, bet, speed, fps, output.as_deref()),
        Command::Play {
            rounds,
            seed,
            bet,
            speed,
            fps,
        } => play(config, rounds, seed, bet, speed, fps),
        Command::ConfigInit { output } => {
            if let Some(parent) = output.parent() {
                fs::create_dir_all(parent)?;
            }
            config
                .save(&output)
                .with_context(|| format!("write {}", output.display()))?;
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<RevealConfig> {
    match path {
        Some(path) => {
            RevealConfig::load(path).with_context(|| format!("load config {}", path.display()))
        }
        None => Ok(RevealConfig::default()),
    }
}

fn frame_step_ms(fps: u32) -> Result<f64> {
    if fps == 0 {
        anyhow::bail!("fps must be at least 1");
    }
    Ok(1_000.0 / f64::from(fps))
}

fn simulate(
    mut config: RevealConfig,
    multiplier: f64,
    bet: f64,
    speed: Option<SpeedMode>,
    fps: u32,
    output: Option<&Path>,
) -> Result<()> {
    if let Some(speed) = speed {
        config.speed_mode = speed;
    }
    let speed = config.speed_mode;
    let duration_ms = config.timing.duration_ms(multiplier, speed);
    let reveal = ScheduledReveal {
        at_ms: 0.0,
        multiplier,
        bet_amount: bet,
    };
    let trace = run_headless(config, &[reveal], frame_step_ms(fps)?).context("run reveal")?;

    match output {
        Some(out) => {
            let envelope = TraceEnvelope {
                trace_format_version: 1,
                multiplier,
                speed,
                duration_ms,
                trace,
            };
            let yaml = serde_yaml::to_string(&envelope)?;
            if let Some(parent) = out.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(out, yaml).with_context(|| format!("write {}", out.display()))?;
        }
        None => {
            for line in trace.highlights() {
                println!("{line}");
            }
            println!(
                "frames={} commits={:?} duration_ms={duration_ms:.0}",
                trace.frames.len(),
                trace.commit_frames()
            );
        }
    }
    Ok(())
}

fn play(
    config: RevealConfig,
    rounds: usize,
    seed: u64,
    bet: f64,
    speed: Option<SpeedMode>,
    fps: u32,
) -> Result<()> {
    let step_ms = frame_step_ms(fps)?;
    let speed = speed.unwrap_or(config.speed_mode);
    let mut outcomes = SteppedOutcomes::new(ChaCha8Rng::seed_from_u64(seed));
    let mut stage = RevealStage::new(config, SpeedSetting::new(speed), SilentHaptics);

    let mut now = 0.0;
    for round in 0..rounds {
        let multiplier = outcomes.next_multiplier();
        stage
            .reveal(multiplier, bet, now)
            .with_context(|| format!("round {round}"))?;
        while stage.is_busy() {
            now += step_ms;
            stage.frame(now);
        }
        info!(round, multiplier, "round committed");
    }

    let history = stage.history();
    let summary = history.summary();
    let report = PlayReport {
        seed,
        speed,
        rounds: history.in_commit_order().cloned().collect(),
        summary,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    eprintln!(
        "{} rounds, wagered {}, returned {}, net {}",
        summary.rounds,
        format_amount(summary.wagered),
        format_amount(summary.returned),
        format_amount(summary.net)
    );
    Ok(())
}
