//! Run configuration loaded from TOML
//!
//! Every section is optional; missing values fall back to the defaults
//! below, which reproduce the reference single run (25x25 grid, 99%
//! cooperators, cost 1, benefit 100, 50 iterations).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::error::{DilemmaError, Result};
use crate::core::types::{Iteration, Payoff, MAX_PAYOFF_PARAMETER};

/// Grid dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { rows: 25, cols: 25 }
    }
}

/// How the first state is built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "pattern", rename_all = "snake_case")]
pub enum InitialPattern {
    /// Sampled cooperators at the given fraction, defectors elsewhere
    Random { cooperation: f64 },
    /// All cooperators except one defector in the centre
    SingleDefector,
    /// All defectors except one cooperator in the centre
    SingleCooperator,
    /// Matrix of strategy codes read from a trajectory-style CSV file
    Csv { path: PathBuf },
    /// Matrix of strategy codes written inline
    Explicit { rows: Vec<Vec<u8>> },
}

impl Default for InitialPattern {
    fn default() -> Self {
        Self::Random { cooperation: 0.99 }
    }
}

/// Game parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Paid by a cooperator for each neighbor
    pub cost: Payoff,
    /// Received from each cooperating neighbor
    pub benefit: Payoff,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cost: 1,
            benefit: 100,
        }
    }
}

/// Driver settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSettings {
    /// Step budget per grid; a grid may stop earlier once stable
    pub iterations: Iteration,
    /// Folder name under `results_dir` for this batch
    pub save_name: String,
    pub results_dir: PathBuf,
    /// Seed for random initial states; drawn from entropy when absent
    pub seed: Option<u64>,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            iterations: 50,
            save_name: "test".to_string(),
            results_dir: PathBuf::from("results"),
            seed: None,
        }
    }
}

/// Batch over a range of costs with the benefit held fixed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub enabled: bool,
    pub min_cost: Payoff,
    pub max_cost: Payoff,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            min_cost: 0,
            max_cost: 100,
        }
    }
}

/// Complete configuration for one run or sweep
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub grid: GridConfig,
    pub initial: InitialPattern,
    pub game: GameConfig,
    pub run: RunSettings,
    pub sweep: SweepConfig,
}

impl RunConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        tracing::debug!(path = %path.display(), "loaded run config");
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Costs a sweep visits, or the single configured cost
    pub fn costs(&self) -> Vec<Payoff> {
        if self.sweep.enabled {
            (self.sweep.min_cost..=self.sweep.max_cost).collect()
        } else {
            vec![self.game.cost]
        }
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.grid.rows == 0 || self.grid.cols == 0 {
            return Err(DilemmaError::Configuration(format!(
                "grid must be at least 1x1, got {}x{}",
                self.grid.rows, self.grid.cols
            )));
        }
        if self.grid.rows.checked_mul(self.grid.cols).is_none() {
            return Err(DilemmaError::Configuration(format!(
                "grid of {}x{} cells is too large",
                self.grid.rows, self.grid.cols
            )));
        }

        if self.game.cost < 0 || self.game.benefit < 0 {
            return Err(DilemmaError::Configuration(format!(
                "cost ({}) and benefit ({}) must be non-negative",
                self.game.cost, self.game.benefit
            )));
        }

        let largest = if self.sweep.enabled {
            self.game.cost.max(self.game.benefit).max(self.sweep.max_cost)
        } else {
            self.game.cost.max(self.game.benefit)
        };
        if largest > MAX_PAYOFF_PARAMETER {
            return Err(DilemmaError::Configuration(format!(
                "cost and benefit must not exceed {}, got {}",
                MAX_PAYOFF_PARAMETER, largest
            )));
        }

        if let InitialPattern::Random { cooperation } = self.initial {
            if !(0.0..=1.0).contains(&cooperation) {
                return Err(DilemmaError::Configuration(format!(
                    "initial cooperation must be within [0, 1], got {}",
                    cooperation
                )));
            }
        }

        if self.sweep.enabled {
            if self.sweep.min_cost < 0 {
                return Err(DilemmaError::Configuration(format!(
                    "sweep min_cost ({}) must be non-negative",
                    self.sweep.min_cost
                )));
            }
            if self.sweep.min_cost > self.sweep.max_cost {
                return Err(DilemmaError::Configuration(format!(
                    "sweep min_cost ({}) exceeds max_cost ({})",
                    self.sweep.min_cost, self.sweep.max_cost
                )));
            }
        }

        if self.run.save_name.trim().is_empty() {
            return Err(DilemmaError::Configuration("save_name must not be empty".into()));
        }

        Ok(())
    }

    /// Folder holding this batch's trajectories and summary
    pub fn save_dir(&self) -> PathBuf {
        self.run.results_dir.join(&self.run.save_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = RunConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.grid.rows, 25);
        assert_eq!(config.game.benefit, 100);
        assert_eq!(config.initial, InitialPattern::Random { cooperation: 0.99 });
        assert_eq!(config.costs(), vec![1]);
    }

    #[test]
    fn test_parse_partial_toml() {
        let config = RunConfig::from_toml_str(
            r#"
            [grid]
            rows = 51
            cols = 51

            [initial]
            pattern = "single_defector"

            [sweep]
            enabled = true
            max_cost = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.grid.rows, 51);
        assert_eq!(config.initial, InitialPattern::SingleDefector);
        assert_eq!(config.run.iterations, 50);
        assert_eq!(config.costs(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_parse_random_and_explicit() {
        let config = RunConfig::from_toml_str(
            r#"
            [initial]
            pattern = "random"
            cooperation = 0.5
            "#,
        )
        .unwrap();
        assert_eq!(config.initial, InitialPattern::Random { cooperation: 0.5 });

        let config = RunConfig::from_toml_str(
            r#"
            [initial]
            pattern = "explicit"
            rows = [[1, 3], [3, 1]]
            "#,
        )
        .unwrap();
        assert_eq!(
            config.initial,
            InitialPattern::Explicit {
                rows: vec![vec![1, 3], vec![3, 1]]
            }
        );
    }

    #[test]
    fn test_demo_configs_parse() {
        let sweep = RunConfig::from_toml_str(include_str!("../../demos/single_defector_sweep.toml")).unwrap();
        assert_eq!(sweep.costs().len(), 101);
        assert_eq!(sweep.save_dir(), PathBuf::from("results/51x51-single-defector"));

        let random = RunConfig::from_toml_str(include_str!("../../demos/random_start.toml")).unwrap();
        assert_eq!(random.run.seed, Some(12345));
        assert!(!random.sweep.enabled);
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(RunConfig::from_toml_str("[game]\ncost = -1\n").is_err());
        assert!(RunConfig::from_toml_str("[grid]\nrows = 0\n").is_err());
        assert!(RunConfig::from_toml_str(
            "[initial]\npattern = \"random\"\ncooperation = 1.5\n"
        )
        .is_err());
        assert!(RunConfig::from_toml_str("[sweep]\nenabled = true\nmin_cost = 5\nmax_cost = 2\n").is_err());
        assert!(RunConfig::from_toml_str("[initial]\npattern = \"checkerboard\"\n").is_err());
    }

    #[test]
    fn test_rejects_overflowing_payoff_parameters() {
        let mut config = RunConfig::default();
        config.game.benefit = Payoff::MAX / 2;
        assert!(matches!(config.validate(), Err(DilemmaError::Configuration(_))));

        let mut config = RunConfig::default();
        config.game.benefit = MAX_PAYOFF_PARAMETER;
        assert!(config.validate().is_ok());
        config.sweep.enabled = true;
        config.sweep.max_cost = MAX_PAYOFF_PARAMETER + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_grid_too_large_to_address() {
        let mut config = RunConfig::default();
        config.grid.rows = usize::MAX;
        config.grid.cols = 2;
        assert!(matches!(config.validate(), Err(DilemmaError::Configuration(_))));
    }
}
