use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;

use sandpile::{Simulation, SimulationParams};

#[derive(Debug, Parser)]
#[command(author, version, about = "Sandpile avalanche simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Drop grains on a square pile and report the falls histogram.
    Simulate(SimulateArgs),
}

#[derive(Debug, Args)]
struct SimulateArgs {
    /// Grid side length.
    #[arg(long, default_value_t = 12)]
    size: usize,

    /// Number of grains to drop.
    #[arg(long, default_value_t = 100)]
    steps: u64,

    /// Seed for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Largest tolerated height difference between neighbors.
    #[arg(long, default_value_t = 2)]
    stability_threshold: u32,

    /// Standard deviation of the drop position, in grid widths.
    #[arg(long, default_value_t = 0.1)]
    drop_variance: f64,

    /// Falls a single cascade may perform before the run is aborted.
    #[arg(long)]
    fall_limit: Option<u64>,

    /// Log parameters, the final pile and the histogram.
    #[arg(long)]
    info: bool,

    /// Also log every step.
    #[arg(long)]
    debug: bool,
}

impl From<&SimulateArgs> for SimulationParams {
    fn from(args: &SimulateArgs) -> Self {
        Self {
            size: args.size,
            steps: args.steps,
            seed: args.seed,
            stability_threshold: args.stability_threshold,
            drop_variance: args.drop_variance,
            fall_limit: args.fall_limit,
        }
    }
}

fn init_logging(info: bool, debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_level(LevelFilter::Debug);
    } else if info {
        builder.filter_level(LevelFilter::Info);
    }
    builder.format_target(false).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Simulate(args) => {
            init_logging(args.info, args.debug);
            let simulation =
                Simulation::new(SimulationParams::from(&args)).context("invalid parameters")?;
            simulation
                .simulate(args.steps)
                .context("simulation aborted")?;
        }
    }
    Ok(())
}
