//! Initial state generation

use rand::seq::index;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::config::{InitialPattern, RunConfig};
use crate::core::error::{DilemmaError, Result};
use crate::core::types::Strategy;
use crate::persistence::read_state_csv;
use crate::simulation::matrix::StrategyMatrix;

/// Random matrix with exactly `floor(rows * cols * cooperation)` cooperators.
///
/// Cooperator positions are a uniform sample of distinct cells; every other
/// cell is a defector.
pub fn generate_state<R: Rng + ?Sized>(
    rows: usize,
    cols: usize,
    cooperation: f64,
    rng: &mut R,
) -> Result<StrategyMatrix> {
    if !(0.0..=1.0).contains(&cooperation) {
        return Err(DilemmaError::Configuration(format!(
            "initial cooperation must be within [0, 1], got {}",
            cooperation
        )));
    }

    let mut state = StrategyMatrix::filled(rows, cols, Strategy::DefectDefect)?;
    let total = state.len();
    let cooperators = ((total as f64 * cooperation).floor() as usize).min(total);

    for cell in index::sample(rng, total, cooperators).into_iter() {
        state.set_flat(cell, Strategy::CooperateCooperate);
    }

    Ok(state)
}

/// Uniform matrix of `background` with `centre` placed in the middle cell
pub fn centred_state(
    rows: usize,
    cols: usize,
    background: Strategy,
    centre: Strategy,
) -> Result<StrategyMatrix> {
    let mut state = StrategyMatrix::filled(rows, cols, background)?;
    state.set(rows / 2, cols / 2, centre);
    Ok(state)
}

/// Build the initial matrix a run config asks for
pub fn initial_state(config: &RunConfig) -> Result<StrategyMatrix> {
    let rows = config.grid.rows;
    let cols = config.grid.cols;

    match &config.initial {
        InitialPattern::Random { cooperation } => {
            let seed = config.run.seed.unwrap_or_else(rand::random);
            tracing::debug!(seed, cooperation, "generating random initial state");
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            generate_state(rows, cols, *cooperation, &mut rng)
        }
        InitialPattern::SingleDefector => centred_state(
            rows,
            cols,
            Strategy::CooperateCooperate,
            Strategy::DefectDefect,
        ),
        InitialPattern::SingleCooperator => centred_state(
            rows,
            cols,
            Strategy::DefectDefect,
            Strategy::CooperateCooperate,
        ),
        InitialPattern::Csv { path } => loaded_state(read_state_csv(path)?, rows, cols),
        InitialPattern::Explicit { rows: codes } => {
            loaded_state(StrategyMatrix::from_codes(codes)?, rows, cols)
        }
    }
}

/// Hand-authored states keep their own shape over the configured one
fn loaded_state(state: StrategyMatrix, rows: usize, cols: usize) -> Result<StrategyMatrix> {
    if state.rows() != rows || state.cols() != cols {
        tracing::warn!(
            configured = %format!("{}x{}", rows, cols),
            loaded = %format!("{}x{}", state.rows(), state.cols()),
            "initial state shape differs from [grid] settings, using the loaded shape"
        );
    }
    Ok(state)
}
