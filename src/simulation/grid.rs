//! The simulation grid and its synchronous update rule

use crate::core::error::Result;
use crate::core::types::{Iteration, Payoff};
use crate::persistence::{Snapshot, SnapshotSink};
use crate::simulation::history::StateHistory;
use crate::simulation::imitation::{select_behavior, Candidate};
use crate::simulation::matrix::StrategyMatrix;
use crate::simulation::payoff::PayoffTable;
use crate::simulation::stats::PopulationStats;

/// A grid of strategies evolving by best-neighbor imitation.
///
/// Once the grid revisits a state held in its history it is marked stable
/// and every further step is a no-op.
#[derive(Debug, Clone)]
pub struct SimulationGrid {
    state: StrategyMatrix,
    payoffs: PayoffTable,
    iteration_count: Iteration,
    stable: bool,
    history: StateHistory,
    initial_emitted: bool,
}

impl SimulationGrid {
    /// Create a grid without emitting anything
    pub fn new(state: StrategyMatrix, cost: Payoff, benefit: Payoff) -> Result<Self> {
        let payoffs = PayoffTable::new(cost, benefit)?;
        Ok(Self {
            state,
            payoffs,
            iteration_count: 0,
            stable: false,
            history: StateHistory::new(),
            initial_emitted: false,
        })
    }

    /// Create a grid and hand its initial state to `sink`
    pub fn with_sink<S: SnapshotSink + ?Sized>(
        state: StrategyMatrix,
        cost: Payoff,
        benefit: Payoff,
        sink: &mut S,
    ) -> Result<Self> {
        let mut grid = Self::new(state, cost, benefit)?;
        grid.emit_initial(sink)?;
        Ok(grid)
    }

    pub fn state(&self) -> &StrategyMatrix {
        &self.state
    }

    pub fn cost(&self) -> Payoff {
        self.payoffs.cost
    }

    pub fn benefit(&self) -> Payoff {
        self.payoffs.benefit
    }

    pub fn payoff_table(&self) -> PayoffTable {
        self.payoffs
    }

    pub fn iteration_count(&self) -> Iteration {
        self.iteration_count
    }

    pub fn is_stable(&self) -> bool {
        self.stable
    }

    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    pub fn population(&self) -> PopulationStats {
        PopulationStats::from_matrix(&self.state)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            iteration: self.iteration_count,
            cost: self.payoffs.cost,
            benefit: self.payoffs.benefit,
            matrix: &self.state,
        }
    }

    pub fn emit<S: SnapshotSink + ?Sized>(&self, sink: &mut S) -> Result<()> {
        sink.emit(&self.snapshot())
    }

    /// Emit the iteration 0 snapshot unless it already went out or the grid
    /// has moved past it. Returns whether anything was emitted.
    pub fn emit_initial<S: SnapshotSink + ?Sized>(&mut self, sink: &mut S) -> Result<bool> {
        if self.initial_emitted || self.iteration_count > 0 {
            return Ok(false);
        }
        self.emit(sink)?;
        self.initial_emitted = true;
        Ok(true)
    }

    /// Advance one synchronous step.
    ///
    /// Returns `false` without touching any state if the grid is already
    /// stable. Every cell's update reads only the pre-step matrix.
    pub fn step(&mut self) -> bool {
        if self.stable {
            return false;
        }

        let payoffs = self.payoffs.round_payoffs(&self.state);
        self.history.push(self.state.clone());

        let rows = self.state.rows();
        let cols = self.state.cols();
        let cells = self.state.cells();
        let mut next = Vec::with_capacity(cells.len());
        let mut candidates = Vec::with_capacity(5);

        for (index, &current) in cells.iter().enumerate() {
            candidates.clear();
            candidates.push(Candidate::new(payoffs[index], current.current()));
            for (r, c) in self.state.neighbors(index / cols, index % cols) {
                let neighbor = r * cols + c;
                candidates.push(Candidate::new(payoffs[neighbor], cells[neighbor].current()));
            }

            let behavior = select_behavior(current.current(), &candidates);
            next.push(current.transition(behavior));
        }

        self.state = StrategyMatrix::from_cells(rows, cols, next);
        self.iteration_count += 1;

        tracing::debug!(
            iteration = self.iteration_count,
            cooperators = self.population().cooperators(),
            cost = self.payoffs.cost,
            benefit = self.payoffs.benefit,
            "grid stepped"
        );

        if self.history.contains(&self.state) {
            self.stable = true;
            tracing::info!(
                iteration = self.iteration_count,
                cost = self.payoffs.cost,
                benefit = self.payoffs.benefit,
                "grid reached a stable configuration"
            );
        }

        true
    }

    /// Step and, if the grid advanced, hand the new state to `sink`
    pub fn advance<S: SnapshotSink + ?Sized>(&mut self, sink: &mut S) -> Result<bool> {
        if !self.step() {
            return Ok(false);
        }
        self.emit(sink)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Strategy;
    use crate::persistence::MemorySink;

    use Strategy::{
        CooperateCooperate as CC, CooperateDefect as CD, DefectCooperate as DC,
        DefectDefect as DD,
    };

    #[test]
    fn test_new_grid_starts_fresh() {
        let grid = SimulationGrid::new(StrategyMatrix::filled(2, 3, CC).unwrap(), 1, 5).unwrap();
        assert_eq!(grid.iteration_count(), 0);
        assert!(!grid.is_stable());
        assert!(grid.history().is_empty());
    }

    #[test]
    fn test_rejects_negative_cost() {
        let state = StrategyMatrix::filled(2, 2, CC).unwrap();
        assert!(SimulationGrid::new(state.clone(), -1, 5).is_err());
        assert!(SimulationGrid::new(state, 1, -5).is_err());
    }

    #[test]
    fn test_lone_cooperator_defects() {
        let mut state = StrategyMatrix::filled(3, 3, DD).unwrap();
        state.set(1, 1, CC);
        let mut grid = SimulationGrid::new(state, 1, 10).unwrap();

        assert!(grid.step());

        let expected = StrategyMatrix::from_rows(vec![
            vec![DD, DD, DD],
            vec![DD, CD, DD],
            vec![DD, DD, DD],
        ])
        .unwrap();
        assert_eq!(grid.state(), &expected);
        assert_eq!(grid.iteration_count(), 1);
        assert!(!grid.is_stable());
    }

    #[test]
    fn test_lone_cooperator_settles_into_defection() {
        let mut state = StrategyMatrix::filled(3, 3, DD).unwrap();
        state.set(1, 1, CC);
        let mut grid = SimulationGrid::new(state, 1, 10).unwrap();

        grid.step();
        grid.step();
        assert_eq!(grid.state(), &StrategyMatrix::filled(3, 3, DD).unwrap());
        assert!(!grid.is_stable());

        grid.step();
        assert!(grid.is_stable());
        assert_eq!(grid.iteration_count(), 3);
    }

    #[test]
    fn test_cooperative_fixed_point_is_stable_after_one_step() {
        let mut grid = SimulationGrid::new(StrategyMatrix::filled(4, 4, CC).unwrap(), 0, 10).unwrap();
        assert!(grid.step());
        assert!(grid.is_stable());
        assert_eq!(grid.state(), &StrategyMatrix::filled(4, 4, CC).unwrap());
    }

    #[test]
    fn test_stable_grid_ignores_steps() {
        let mut grid = SimulationGrid::new(StrategyMatrix::filled(2, 2, DD).unwrap(), 1, 3).unwrap();
        grid.step();
        assert!(grid.is_stable());

        let before = grid.state().clone();
        let history_len = grid.history().len();
        for _ in 0..10 {
            assert!(!grid.step());
        }
        assert_eq!(grid.iteration_count(), 1);
        assert_eq!(grid.state(), &before);
        assert_eq!(grid.history().len(), history_len);
    }

    #[test]
    fn test_single_cell_keeps_behavior() {
        for strategy in Strategy::ALL {
            let state = StrategyMatrix::filled(1, 1, strategy).unwrap();
            let mut grid = SimulationGrid::new(state, 4, 9).unwrap();
            grid.step();
            let next = grid.state().get(0, 0).unwrap();
            assert_eq!(next.current(), strategy.current());
            assert_eq!(next.prior(), strategy.current());
        }
    }

    #[test]
    fn test_defector_invades_cheap_cooperation() {
        // Centre defector among cooperators: it earns 4b, each neighbor 2(b-c) - c.
        let mut state = StrategyMatrix::filled(3, 3, CC).unwrap();
        state.set(1, 1, DD);
        let mut grid = SimulationGrid::new(state, 1, 100).unwrap();
        grid.step();

        let expected = StrategyMatrix::from_rows(vec![
            vec![CC, CD, CC],
            vec![CD, DD, CD],
            vec![CC, CD, CC],
        ])
        .unwrap();
        assert_eq!(grid.state(), &expected);
    }

    #[test]
    fn test_switched_cell_records_prior_behavior() {
        // With c=0 a defector column earns 10 per cell while the cooperators
        // next to it earn 20 or 30, so the whole column starts cooperating.
        let state = StrategyMatrix::from_rows(vec![
            vec![DD, CC, CC],
            vec![DD, CC, CC],
            vec![DD, CC, CC],
        ])
        .unwrap();
        let mut grid = SimulationGrid::new(state, 0, 10).unwrap();
        grid.step();

        let expected = StrategyMatrix::from_rows(vec![
            vec![DC, CC, CC],
            vec![DC, CC, CC],
            vec![DC, CC, CC],
        ])
        .unwrap();
        assert_eq!(grid.state(), &expected);
    }

    #[test]
    fn test_period_two_cycle_is_stable() {
        // Behaviors flip between two patterns; the prior halves are chosen so
        // the state two steps on is the initial state exactly.
        let initial = StrategyMatrix::from_rows(vec![
            vec![DD, CD, DD],
            vec![CD, CC, DC],
            vec![DD, DC, DD],
        ])
        .unwrap();
        let mut grid = SimulationGrid::new(initial.clone(), 1, 5).unwrap();

        grid.step();
        let expected = StrategyMatrix::from_rows(vec![
            vec![DD, DC, DD],
            vec![DC, CC, CD],
            vec![DD, CD, DD],
        ])
        .unwrap();
        assert_eq!(grid.state(), &expected);
        assert!(!grid.is_stable());

        grid.step();
        assert_eq!(grid.state(), &initial);
        assert!(grid.is_stable());
        assert_eq!(grid.iteration_count(), 2);

        // Matched the older entry, not the most recent one
        let recent: Vec<_> = grid.history().iter().collect();
        assert_eq!(recent, vec![&initial, &expected]);
        assert_ne!(recent[1], grid.state());
    }

    #[test]
    fn test_initial_snapshot_emitted_once() {
        let mut sink = MemorySink::new();
        let mut grid =
            SimulationGrid::with_sink(StrategyMatrix::filled(2, 2, CC).unwrap(), 0, 5, &mut sink).unwrap();

        assert!(!grid.emit_initial(&mut sink).unwrap());
        grid.advance(&mut sink).unwrap();
        assert!(!grid.emit_initial(&mut sink).unwrap());

        let iterations: Vec<_> = sink.records.iter().map(|r| r.iteration).collect();
        assert_eq!(iterations, vec![0, 1]);
    }

    #[test]
    fn test_history_holds_pre_step_states() {
        let mut state = StrategyMatrix::filled(3, 3, DD).unwrap();
        state.set(1, 1, CC);
        let initial = state.clone();
        let mut grid = SimulationGrid::new(state, 1, 10).unwrap();
        grid.step();
        assert_eq!(grid.history().len(), 1);
        assert!(grid.history().contains(&initial));
        assert!(!grid.history().contains(grid.state()));
    }

    #[test]
    fn test_sink_receives_initial_and_each_step() {
        let mut sink = MemorySink::new();
        let mut state = StrategyMatrix::filled(3, 3, DD).unwrap();
        state.set(1, 1, CC);
        let mut grid = SimulationGrid::with_sink(state, 1, 10, &mut sink).unwrap();

        while grid.advance(&mut sink).unwrap() {}

        let iterations: Vec<_> = sink.records.iter().map(|r| r.iteration).collect();
        assert_eq!(iterations, vec![0, 1, 2, 3]);
        assert!(sink.records.iter().all(|r| r.cost == 1 && r.benefit == 10));
        assert_eq!(&sink.last().unwrap().matrix, grid.state());
    }
}
