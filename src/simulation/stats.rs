//! Population counts per strategy

use serde::{Deserialize, Serialize};

use crate::core::types::Strategy;
use crate::simulation::matrix::StrategyMatrix;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationStats {
    pub cooperate_cooperate: usize,
    pub cooperate_defect: usize,
    pub defect_defect: usize,
    pub defect_cooperate: usize,
}

impl PopulationStats {
    pub fn from_matrix(matrix: &StrategyMatrix) -> Self {
        let mut stats = Self::default();
        for strategy in matrix.cells() {
            match strategy {
                Strategy::CooperateCooperate => stats.cooperate_cooperate += 1,
                Strategy::CooperateDefect => stats.cooperate_defect += 1,
                Strategy::DefectDefect => stats.defect_defect += 1,
                Strategy::DefectCooperate => stats.defect_cooperate += 1,
            }
        }
        stats
    }

    pub fn total(&self) -> usize {
        self.cooperate_cooperate + self.cooperate_defect + self.defect_defect + self.defect_cooperate
    }

    /// Cells currently cooperating
    pub fn cooperators(&self) -> usize {
        self.cooperate_cooperate + self.defect_cooperate
    }

    pub fn defectors(&self) -> usize {
        self.cooperate_defect + self.defect_defect
    }

    /// Cells whose behavior changed in the last step
    pub fn switched(&self) -> usize {
        self.cooperate_defect + self.defect_cooperate
    }

    pub fn cooperation_fraction(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.cooperators() as f64 / total as f64,
        }
    }
}
