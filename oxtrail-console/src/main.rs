mod frame;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use oxtrail_game::{SharedSimulation, SimConfig, Simulation};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{Instant, MissedTickBehavior};

#[derive(Debug, Parser)]
#[command(name = "oxtrail", version = "0.1.0")]
#[command(about = "Lead a wagon party down the trail from your terminal")]
struct Args {
    /// JSON file with simulation settings; unset fields keep their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for a reproducible journey
    #[arg(long)]
    seed: Option<u64>,

    /// Length of one simulated day in milliseconds
    #[arg(long)]
    pulse_ms: Option<u64>,

    /// How often the host clock ticks the simulation, in milliseconds
    #[arg(long, default_value_t = 50)]
    host_tick_ms: u64,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    print_config: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    if args.no_color {
        colored::control::set_override(false);
    }

    let config = load_config(&args)?;
    if args.print_config {
        let json = serde_json::to_string_pretty(&config).context("serializing config")?;
        println!("{json}");
        return Ok(());
    }

    announce_banner();
    let sim = Simulation::new(config).context("starting the simulation")?;
    run(SharedSimulation::new(sim), &args).await?;
    println!("{}", "Thanks for playing.".cyan());
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn load_config(args: &Args) -> Result<SimConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            SimConfig::from_json(&json)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => SimConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(pulse_ms) = args.pulse_ms {
        config.pulse_interval_ms = pulse_ms;
    }
    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn announce_banner() {
    println!("{}", "🐂 Oxtrail".bright_cyan().bold());
    println!("{}", "================================".cyan());
}

/// Host loop: tick the clock on a fixed interval and feed stdin lines in
/// between. Redraws whenever the screen text changes.
async fn run(sim: SharedSimulation, args: &Args) -> Result<()> {
    let color = !args.no_color;
    let mut ticker = tokio::time::interval(Duration::from_millis(args.host_tick_ms.max(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last_tick = Instant::now();
    let mut shown = String::new();

    loop {
        redraw(&sim, &mut shown, color).await;
        if sim.is_closed().await {
            break;
        }
        tokio::select! {
            now = ticker.tick() => {
                let elapsed = now.duration_since(last_tick);
                last_tick = now;
                sim.on_tick(elapsed).await.context("advancing the simulation")?;
            }
            line = lines.next_line() => {
                match line.context("reading stdin")? {
                    Some(line) => {
                        log::debug!("input: {line:?}");
                        sim.send_input(&line).await.context("applying input")?;
                    }
                    None => {
                        log::info!("stdin closed");
                        break;
                    }
                }
            }
        }
    }
    Ok(())
}

async fn redraw(sim: &SharedSimulation, shown: &mut String, color: bool) {
    let text = sim.display_text().await;
    if text != *shown {
        println!("{}", frame::render(&text, color));
        *shown = text;
    }
}
