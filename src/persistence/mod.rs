//! Snapshot sinks
//!
//! A grid hands an immutable view of its matrix to a sink after it is
//! created and after every step. Sinks own any on-disk representation.

pub mod csv;

pub use self::csv::{
    iteration_file_name, read_state_csv, trajectory_dir_name, write_state_csv, CsvTrajectorySink,
};

use crate::core::error::Result;
use crate::core::types::{Iteration, Payoff};
use crate::simulation::matrix::StrategyMatrix;

/// Read-only view of a grid at one iteration
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub iteration: Iteration,
    pub cost: Payoff,
    pub benefit: Payoff,
    pub matrix: &'a StrategyMatrix,
}

impl Snapshot<'_> {
    pub fn to_record(&self) -> SnapshotRecord {
        SnapshotRecord {
            iteration: self.iteration,
            cost: self.cost,
            benefit: self.benefit,
            matrix: self.matrix.clone(),
        }
    }
}

/// Owned copy of a [`Snapshot`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotRecord {
    pub iteration: Iteration,
    pub cost: Payoff,
    pub benefit: Payoff,
    pub matrix: StrategyMatrix,
}

/// Receives grid snapshots
pub trait SnapshotSink {
    fn emit(&mut self, snapshot: &Snapshot<'_>) -> Result<()>;
}

/// Discards every snapshot
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl SnapshotSink for NullSink {
    fn emit(&mut self, _snapshot: &Snapshot<'_>) -> Result<()> {
        Ok(())
    }
}

/// Keeps every snapshot in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub records: Vec<SnapshotRecord>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&SnapshotRecord> {
        self.records.last()
    }
}

impl SnapshotSink for MemorySink {
    fn emit(&mut self, snapshot: &Snapshot<'_>) -> Result<()> {
        self.records.push(snapshot.to_record());
        Ok(())
    }
}
