//! Run output and serialization

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::types::{Iteration, Payoff};
use crate::simulation::grid::SimulationGrid;
use crate::simulation::stats::PopulationStats;

/// Outcome of driving one grid
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub cost: Payoff,
    pub benefit: Payoff,
    pub rows: usize,
    pub cols: usize,
    /// Steps actually taken
    pub iterations: Iteration,
    pub stable: bool,
    /// Iteration at which the grid first matched its history
    pub stabilized_at: Option<Iteration>,
    pub initial_population: PopulationStats,
    pub final_population: PopulationStats,
}

impl RunSummary {
    pub fn new(grid: &SimulationGrid, initial_population: PopulationStats) -> Self {
        let stable = grid.is_stable();
        Self {
            cost: grid.cost(),
            benefit: grid.benefit(),
            rows: grid.state().rows(),
            cols: grid.state().cols(),
            iterations: grid.iteration_count(),
            stable,
            stabilized_at: stable.then(|| grid.iteration_count()),
            initial_population,
            final_population: grid.population(),
        }
    }

    pub fn final_cooperation(&self) -> f64 {
        self.final_population.cooperation_fraction()
    }
}

/// Complete output of a single run or a cost sweep
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationOutput {
    pub save_name: String,
    pub runs: Vec<RunSummary>,
    pub statistics: SimulationStats,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationStats {
    pub grids_simulated: u32,
    pub grids_stabilized: u32,
    pub total_iterations: u64,
    pub simulation_time_ms: u64,
}

impl SimulationOutput {
    pub fn new(save_name: impl Into<String>, runs: Vec<RunSummary>, elapsed: Duration) -> Self {
        let grids_stabilized = runs.iter().filter(|r| r.stable).count() as u32;
        let total_iterations = runs.iter().map(|r| r.iterations).sum();

        Self {
            save_name: save_name.into(),
            statistics: SimulationStats {
                grids_simulated: runs.len() as u32,
                grids_stabilized,
                total_iterations,
                simulation_time_ms: elapsed.as_millis() as u64,
            },
            runs,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn summary(&self) -> String {
        let mut text = format!(
            "Simulated {} grids ({} stable) over {} iterations in {}ms",
            self.statistics.grids_simulated,
            self.statistics.grids_stabilized,
            self.statistics.total_iterations,
            self.statistics.simulation_time_ms,
        );

        for run in &self.runs {
            let status = match run.stabilized_at {
                Some(iteration) => format!("stable at {}", iteration),
                None => "still changing".to_string(),
            };
            text.push_str(&format!(
                "\n  cost {:>3} benefit {:>3}: {:>5.1}% cooperating, {}",
                run.cost,
                run.benefit,
                run.final_cooperation() * 100.0,
                status,
            ));
        }

        text
    }
}
