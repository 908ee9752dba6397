//! Rectangular strategy matrix

use serde::{Deserialize, Serialize};

use crate::core::error::{DilemmaError, Result};
use crate::core::types::Strategy;

/// Fixed-size `rows × cols` matrix of strategies, stored row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyMatrix {
    rows: usize,
    cols: usize,
    cells: Vec<Strategy>,
}

impl StrategyMatrix {
    /// Matrix with every cell set to `value`
    pub fn filled(rows: usize, cols: usize, value: Strategy) -> Result<Self> {
        let len = cell_count(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            cells: vec![value; len],
        })
    }

    /// Build from nested rows; every row must have the same non-zero length
    pub fn from_rows(rows: Vec<Vec<Strategy>>) -> Result<Self> {
        let row_count = rows.len();
        let col_count = rows.first().map_or(0, Vec::len);
        let len = cell_count(row_count, col_count)?;

        let mut cells = Vec::with_capacity(len);
        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != col_count {
                return Err(DilemmaError::Configuration(format!(
                    "row {} has {} cells, expected {}",
                    index,
                    row.len(),
                    col_count
                )));
            }
            cells.extend(row);
        }

        Ok(Self {
            rows: row_count,
            cols: col_count,
            cells,
        })
    }

    /// Build from nested rows of on-disk codes (1-4)
    pub fn from_codes(rows: &[Vec<u8>]) -> Result<Self> {
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|&code| Strategy::from_code(code)).collect())
            .collect::<Result<Vec<Vec<Strategy>>>>()?;
        Self::from_rows(rows)
    }

    pub(crate) fn from_cells(rows: usize, cols: usize, cells: Vec<Strategy>) -> Self {
        debug_assert_eq!(cells.len(), rows * cols);
        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<Strategy> {
        if row < self.rows && col < self.cols {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: Strategy) {
        if row < self.rows && col < self.cols {
            self.cells[row * self.cols + col] = value;
        }
    }

    /// Set a cell by flat row-major index
    #[inline]
    pub fn set_flat(&mut self, index: usize, value: Strategy) {
        if let Some(cell) = self.cells.get_mut(index) {
            *cell = value;
        }
    }

    /// Cells in row-major order
    pub fn cells(&self) -> &[Strategy] {
        &self.cells
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[Strategy]> {
        self.cells.chunks(self.cols)
    }

    /// Orthogonal neighbors that exist, in the order up, down, left, right.
    /// No wraparound at the edges.
    pub fn neighbors(&self, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> {
        let up = row.checked_sub(1).map(|r| (r, col));
        let down = (row + 1 < self.rows).then(|| (row + 1, col));
        let left = col.checked_sub(1).map(|c| (row, c));
        let right = (col + 1 < self.cols).then(|| (row, col + 1));
        [up, down, left, right].into_iter().flatten()
    }

    /// Nested code rows, the inverse of [`StrategyMatrix::from_codes`]
    pub fn to_codes(&self) -> Vec<Vec<u8>> {
        self.iter_rows()
            .map(|row| row.iter().map(|s| s.code()).collect())
            .collect()
    }
}

/// Number of cells in a `rows × cols` grid, rejecting empty or unaddressable shapes
fn cell_count(rows: usize, cols: usize) -> Result<usize> {
    if rows == 0 || cols == 0 {
        return Err(DilemmaError::Configuration(format!(
            "grid must have at least one row and one column, got {}x{}",
            rows, cols
        )));
    }
    rows.checked_mul(cols).ok_or_else(|| {
        DilemmaError::Configuration(format!("grid of {}x{} cells is too large", rows, cols))
    })
}
