//! Sliding window of recent grid states used for cycle detection

use std::collections::VecDeque;

use crate::simulation::matrix::StrategyMatrix;

/// Number of pre-step states remembered by a grid
pub const HISTORY_CAPACITY: usize = 5;

/// Fixed-capacity queue of recent states; the oldest entry is evicted first
#[derive(Debug, Clone)]
pub struct StateHistory {
    entries: VecDeque<StrategyMatrix>,
    capacity: usize,
}

impl Default for StateHistory {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

impl StateHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, state: StrategyMatrix) {
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(state);
    }

    /// Whether `state` equals any remembered entry
    pub fn contains(&self, state: &StrategyMatrix) -> bool {
        self.entries.iter().any(|entry| entry == state)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest first
    pub fn iter(&self) -> impl Iterator<Item = &StrategyMatrix> {
        self.entries.iter()
    }
}
