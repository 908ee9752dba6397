//! Driving grids to completion

use std::fs;
use std::time::Instant;

use crate::core::config::RunConfig;
use crate::core::error::Result;
use crate::core::types::Iteration;
use crate::persistence::{CsvTrajectorySink, SnapshotSink};
use crate::simulation::generate::initial_state;
use crate::simulation::grid::SimulationGrid;
use crate::simulation::matrix::StrategyMatrix;
use crate::simulation::output::{RunSummary, SimulationOutput};

/// Step `grid` until `budget` steps have been taken or it becomes stable.
///
/// The initial state is emitted first unless the grid already emitted it or
/// has stepped, then every new state after each step.
pub fn run_grid<S: SnapshotSink + ?Sized>(
    grid: &mut SimulationGrid,
    budget: Iteration,
    sink: &mut S,
) -> Result<RunSummary> {
    let initial_population = grid.population();
    grid.emit_initial(sink)?;

    for _ in 0..budget {
        if !grid.advance(sink)? {
            break;
        }
    }

    let summary = RunSummary::new(grid, initial_population);
    tracing::info!(
        cost = summary.cost,
        benefit = summary.benefit,
        iterations = summary.iterations,
        stable = summary.stable,
        cooperators = summary.final_population.cooperators(),
        "run finished"
    );
    Ok(summary)
}

/// Run one grid per configured cost against `sink`, each starting from a
/// copy of `initial`.
///
/// Runs are independent and execute one after another.
pub fn run_costs<S: SnapshotSink + ?Sized>(
    config: &RunConfig,
    initial: &StrategyMatrix,
    sink: &mut S,
) -> Result<Vec<RunSummary>> {
    let mut runs = Vec::new();
    for cost in config.costs() {
        let mut grid = SimulationGrid::new(initial.clone(), cost, config.game.benefit)?;
        runs.push(run_grid(&mut grid, config.run.iterations, sink)?);
    }
    Ok(runs)
}

/// Run everything a config describes, writing trajectories and
/// `summary.json` under its save folder
pub fn simulate(config: &RunConfig) -> Result<SimulationOutput> {
    config.validate()?;
    let start = Instant::now();

    let initial = initial_state(config)?;
    let mut sink = CsvTrajectorySink::new(&config.run.results_dir, &config.run.save_name)?;

    tracing::info!(
        rows = initial.rows(),
        cols = initial.cols(),
        grids = config.costs().len(),
        save_dir = %sink.save_dir().display(),
        "starting simulation"
    );

    let runs = run_costs(config, &initial, &mut sink)?;
    let output = SimulationOutput::new(config.run.save_name.clone(), runs, start.elapsed());

    let summary_path = sink.save_dir().join("summary.json");
    fs::write(&summary_path, output.to_json())?;
    tracing::info!(
        files = sink.files_written(),
        summary = %summary_path.display(),
        "simulation written"
    );

    Ok(output)
}
