//! Spatial Dilemma - command line driver
//!
//! Loads a run config (TOML, optional), applies command line overrides and
//! runs either a single grid or a sweep over costs, writing trajectory CSVs
//! and a `summary.json` under `<results_dir>/<save_name>/`.

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use spatial_dilemma::core::config::{InitialPattern, RunConfig};
use spatial_dilemma::core::error::Result;
use spatial_dilemma::simulation::simulate;

/// Evolutionary spatial Prisoner's Dilemma
#[derive(Parser, Debug)]
#[command(name = "spatial-dilemma")]
#[command(about = "Run best-neighbor imitation on a grid until it stabilises")]
struct Args {
    /// TOML run config; defaults are used for anything it omits
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Grid rows
    #[arg(long)]
    rows: Option<usize>,

    /// Grid columns
    #[arg(long)]
    cols: Option<usize>,

    /// Random initial state with this cooperator fraction
    #[arg(long, conflicts_with = "single_defector")]
    cooperation: Option<f64>,

    /// Start from all cooperators with one defector in the centre
    #[arg(long)]
    single_defector: bool,

    /// Cost paid by cooperators
    #[arg(long)]
    cost: Option<i64>,

    /// Benefit given by cooperators
    #[arg(long)]
    benefit: Option<i64>,

    /// Maximum steps per grid
    #[arg(long)]
    iterations: Option<u64>,

    /// Random seed for deterministic initial states
    #[arg(long)]
    seed: Option<u64>,

    /// Folder name under the results directory
    #[arg(long)]
    save_name: Option<String>,

    /// Results directory
    #[arg(long)]
    results_dir: Option<PathBuf>,

    /// Sweep cost from --min-cost to --max-cost (inclusive, default 0 to benefit)
    #[arg(long)]
    sweep: bool,

    #[arg(long)]
    min_cost: Option<i64>,

    #[arg(long)]
    max_cost: Option<i64>,
}

impl Args {
    fn into_config(self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::load(path)?,
            None => RunConfig::default(),
        };

        if let Some(rows) = self.rows {
            config.grid.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.grid.cols = cols;
        }
        if let Some(cooperation) = self.cooperation {
            config.initial = InitialPattern::Random { cooperation };
        }
        if self.single_defector {
            config.initial = InitialPattern::SingleDefector;
        }
        if let Some(cost) = self.cost {
            config.game.cost = cost;
        }
        if let Some(benefit) = self.benefit {
            config.game.benefit = benefit;
        }
        if let Some(iterations) = self.iterations {
            config.run.iterations = iterations;
        }
        if self.seed.is_some() {
            config.run.seed = self.seed;
        }
        if let Some(save_name) = self.save_name {
            config.run.save_name = save_name;
        }
        if let Some(results_dir) = self.results_dir {
            config.run.results_dir = results_dir;
        }
        if self.sweep && !config.sweep.enabled {
            // Reference batch: every cost from 0 up to the benefit
            config.sweep.enabled = true;
            config.sweep.max_cost = config.game.benefit;
        }
        if let Some(min_cost) = self.min_cost {
            config.sweep.min_cost = min_cost;
        }
        if let Some(max_cost) = self.max_cost {
            config.sweep.max_cost = max_cost;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = Args::parse().into_config()?;

    tracing::info!(
        rows = config.grid.rows,
        cols = config.grid.cols,
        benefit = config.game.benefit,
        iterations = config.run.iterations,
        sweep = config.sweep.enabled,
        "Starting Spatial Dilemma"
    );

    let start = Instant::now();
    let output = simulate(&config)?;

    println!("{}", output.summary());
    println!("Actual time: {:.2}ms", start.elapsed().as_secs_f64() * 1000.0);
    println!(
        "\nTrajectories written to {}",
        config.save_dir().join("trajectories").display()
    );

    Ok(())
}
