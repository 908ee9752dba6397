//! Spatial Prisoner's Dilemma simulation
//!
//! A grid of cells plays the game against its orthogonal neighbors each
//! step, then every cell copies the behavior of the best earner around it.

pub mod generate;
pub mod grid;
pub mod history;
pub mod imitation;
pub mod matrix;
pub mod output;
pub mod payoff;
pub mod runner;
pub mod stats;

pub use generate::{centred_state, generate_state, initial_state};
pub use grid::SimulationGrid;
pub use history::{StateHistory, HISTORY_CAPACITY};
pub use matrix::StrategyMatrix;
pub use output::{RunSummary, SimulationOutput};
pub use payoff::PayoffTable;
pub use runner::{run_costs, run_grid, simulate};
pub use stats::PopulationStats;
