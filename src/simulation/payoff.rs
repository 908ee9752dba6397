//! Two-player Prisoner's Dilemma payoffs

use serde::{Deserialize, Serialize};

use crate::core::error::{DilemmaError, Result};
use crate::core::types::{Behavior, Payoff, MAX_PAYOFF_PARAMETER};
use crate::simulation::matrix::StrategyMatrix;

/// Cost paid by a cooperator and benefit handed to its partner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoffTable {
    pub cost: Payoff,
    pub benefit: Payoff,
}

impl PayoffTable {
    pub fn new(cost: Payoff, benefit: Payoff) -> Result<Self> {
        if cost < 0 || benefit < 0 {
            return Err(DilemmaError::Configuration(format!(
                "cost and benefit must be non-negative (cost={}, benefit={})",
                cost, benefit
            )));
        }
        if cost > MAX_PAYOFF_PARAMETER || benefit > MAX_PAYOFF_PARAMETER {
            return Err(DilemmaError::Configuration(format!(
                "cost and benefit must not exceed {} (cost={}, benefit={})",
                MAX_PAYOFF_PARAMETER, cost, benefit
            )));
        }
        Ok(Self { cost, benefit })
    }

    /// Payoff to a cell behaving as `own` against one neighbor behaving as `other`
    pub fn payoff(&self, own: Behavior, other: Behavior) -> Payoff {
        match (own, other) {
            (Behavior::Cooperate, Behavior::Cooperate) => self.benefit - self.cost,
            (Behavior::Cooperate, Behavior::Defect) => -self.cost,
            (Behavior::Defect, Behavior::Cooperate) => self.benefit,
            (Behavior::Defect, Behavior::Defect) => 0,
        }
    }

    /// Total payoff for every cell against its existing orthogonal neighbors,
    /// row-major, all computed from the same matrix
    pub fn round_payoffs(&self, matrix: &StrategyMatrix) -> Vec<Payoff> {
        let cols = matrix.cols();
        let cells = matrix.cells();
        cells
            .iter()
            .enumerate()
            .map(|(index, cell)| {
                matrix
                    .neighbors(index / cols, index % cols)
                    .map(|(r, c)| self.payoff(cell.current(), cells[r * cols + c].current()))
                    .sum::<Payoff>()
            })
            .collect()
    }
}
