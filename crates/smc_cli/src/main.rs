//! SMC CLI - Particle Filter Demonstration
//!
//! # Commands
//!
//! - `smc filter` - Track a synthetic target with a bootstrap particle filter
//! - `smc check` - Validate and print the active configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use smc_cli::commands;
use smc_cli::config::{build_config, CliArgs, LogLevel};
use smc_core::MatrixLayout;
use smc_random::ResampleScheme;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Sequential Monte Carlo toolkit CLI
#[derive(Parser)]
#[command(name = "smc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "SMC_LOG_LEVEL")]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a particle filter over a synthetic constant-velocity track
    Filter {
        /// Number of particles
        #[arg(short = 'n', long)]
        particles: Option<usize>,

        /// Number of observations
        #[arg(short, long)]
        steps: Option<usize>,

        /// Population layout (row_major, col_major)
        #[arg(short, long)]
        layout: Option<MatrixLayout>,

        /// Resampling scheme (multinomial, stratified, systematic, residual, ...)
        #[arg(short = 'r', long)]
        scheme: Option<ResampleScheme>,

        /// Resample when ESS drops below this fraction of the population
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Master seed
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Validate and print the active configuration
    Check,
}

impl Cli {
    fn config_args(&self) -> CliArgs {
        let mut args = CliArgs {
            config_file: self.config.clone(),
            log_level: self.log_level,
            ..CliArgs::default()
        };
        if let Commands::Filter {
            particles,
            steps,
            layout,
            scheme,
            threshold,
            seed,
        } = &self.command
        {
            args.particles = *particles;
            args.steps = *steps;
            args.layout = *layout;
            args.scheme = *scheme;
            args.threshold = *threshold;
            args.seed = *seed;
        }
        args
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = build_config(&cli.config_args())?;

    // Initialise tracing
    init_tracing(config.log_level.as_filter_str());
    tracing::info!("SMC toolkit v{}", smc_cli::VERSION);

    match cli.command {
        Commands::Filter { .. } => {
            commands::filter::run(&config)?;
        }
        Commands::Check => commands::check::run(&config)?,
    }
    Ok(())
}
