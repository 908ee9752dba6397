//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

use crate::core::error::{DilemmaError, Result};

/// Accumulated payoff for one cell over one round
pub type Payoff = i64;

/// Largest cost or benefit accepted. A round sums at most four neighbor
/// payoffs, each bounded by the larger of the two, so totals cannot overflow.
pub const MAX_PAYOFF_PARAMETER: Payoff = Payoff::MAX / 8;

/// Simulation time unit (one synchronous grid update)
pub type Iteration = u64;

/// What a cell does this round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Behavior {
    Cooperate,
    Defect,
}

impl Behavior {
    pub fn is_cooperating(self) -> bool {
        matches!(self, Self::Cooperate)
    }
}

/// Cell state: what the cell did last round and what it does now
///
/// Only the current behavior takes part in payoffs and imitation. The prior
/// half lets a renderer tell stable cooperation/defection apart from a cell
/// that just switched.
///
/// The numeric codes (1-4) are the on-disk encoding used by trajectory files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// Was cooperating, still cooperating
    CooperateCooperate,
    /// Was cooperating, now defecting
    CooperateDefect,
    /// Was defecting, still defecting
    DefectDefect,
    /// Was defecting, now cooperating
    DefectCooperate,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Self::CooperateCooperate,
        Self::CooperateDefect,
        Self::DefectDefect,
        Self::DefectCooperate,
    ];

    /// Build a strategy from its prior and current behavior
    pub fn from_behaviors(prior: Behavior, current: Behavior) -> Self {
        match (prior, current) {
            (Behavior::Cooperate, Behavior::Cooperate) => Self::CooperateCooperate,
            (Behavior::Cooperate, Behavior::Defect) => Self::CooperateDefect,
            (Behavior::Defect, Behavior::Defect) => Self::DefectDefect,
            (Behavior::Defect, Behavior::Cooperate) => Self::DefectCooperate,
        }
    }

    pub fn prior(self) -> Behavior {
        match self {
            Self::CooperateCooperate | Self::CooperateDefect => Behavior::Cooperate,
            Self::DefectDefect | Self::DefectCooperate => Behavior::Defect,
        }
    }

    /// Behavior that governs payoff and imitation (the cell's category)
    pub fn current(self) -> Behavior {
        match self {
            Self::CooperateCooperate | Self::DefectCooperate => Behavior::Cooperate,
            Self::CooperateDefect | Self::DefectDefect => Behavior::Defect,
        }
    }

    pub fn is_cooperator(self) -> bool {
        self.current().is_cooperating()
    }

    /// The state a cell moves to when it picks `next` as its new behavior.
    /// What the cell was doing before the step becomes the prior half.
    pub fn transition(self, next: Behavior) -> Self {
        Self::from_behaviors(self.current(), next)
    }

    pub fn code(self) -> u8 {
        match self {
            Self::CooperateCooperate => 1,
            Self::CooperateDefect => 2,
            Self::DefectDefect => 3,
            Self::DefectCooperate => 4,
        }
    }

    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            1 => Ok(Self::CooperateCooperate),
            2 => Ok(Self::CooperateDefect),
            3 => Ok(Self::DefectDefect),
            4 => Ok(Self::DefectCooperate),
            other => Err(DilemmaError::Configuration(format!(
                "unknown strategy code {} (expected 1-4)",
                other
            ))),
        }
    }

    /// Short label matching the trajectory legend (C_C, C_D, D_D, D_C)
    pub fn label(self) -> &'static str {
        match self {
            Self::CooperateCooperate => "C_C",
            Self::CooperateDefect => "C_D",
            Self::DefectDefect => "D_D",
            Self::DefectCooperate => "D_C",
        }
    }
}

impl TryFrom<u8> for Strategy {
    type Error = DilemmaError;

    fn try_from(code: u8) -> Result<Self> {
        Self::from_code(code)
    }
}
