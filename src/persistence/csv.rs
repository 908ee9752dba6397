//! Trajectory CSV files
//!
//! One file per iteration, one comma-separated line of strategy codes per
//! row. Layout under the save folder:
//!
//! ```text
//! <results>/<save_name>/trajectories/<ccc>_<bbb>/<iii>.csv
//! <results>/<save_name>/renders/
//! <results>/<save_name>/frames/
//! ```
//!
//! `renders/` and `frames/` are created empty for downstream tools.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::core::error::{DilemmaError, Result};
use crate::core::types::{Iteration, Payoff, Strategy};
use crate::persistence::{Snapshot, SnapshotSink};
use crate::simulation::matrix::StrategyMatrix;

/// `ccc_bbb` folder name for a cost/benefit pair
pub fn trajectory_dir_name(cost: Payoff, benefit: Payoff) -> String {
    format!("{:03}_{:03}", cost, benefit)
}

/// `iii.csv` file name for an iteration
pub fn iteration_file_name(iteration: Iteration) -> String {
    format!("{:03}.csv", iteration)
}

/// Write a matrix as comma-separated strategy codes
pub fn write_state_csv<P: AsRef<Path>>(matrix: &StrategyMatrix, path: P) -> Result<()> {
    let mut file = BufWriter::new(File::create(path)?);

    for row in matrix.iter_rows() {
        let line = row
            .iter()
            .map(|s| s.code().to_string())
            .collect::<Vec<_>>()
            .join(",");
        writeln!(file, "{}", line)?;
    }

    file.flush()?;
    Ok(())
}

/// Read a matrix written by [`write_state_csv`]; blank lines are skipped
pub fn read_state_csv<P: AsRef<Path>>(path: P) -> Result<StrategyMatrix> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let mut rows = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let row = line
            .split(',')
            .map(|field| {
                let field = field.trim();
                field
                    .parse::<u8>()
                    .map_err(|e| format!("bad strategy code {:?}: {}", field, e))
                    .and_then(|code| Strategy::from_code(code).map_err(|e| e.to_string()))
            })
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|message| DilemmaError::Csv {
                path: path.to_path_buf(),
                line: index + 1,
                message,
            })?;
        rows.push(row);
    }

    StrategyMatrix::from_rows(rows).map_err(|e| DilemmaError::Csv {
        path: path.to_path_buf(),
        line: 0,
        message: e.to_string(),
    })
}

/// Writes every snapshot to its own CSV file under a save folder
#[derive(Debug, Clone)]
pub struct CsvTrajectorySink {
    save_dir: PathBuf,
    files_written: usize,
}

impl CsvTrajectorySink {
    /// Create the save folder layout if it does not exist yet
    pub fn new(results_dir: impl AsRef<Path>, save_name: &str) -> Result<Self> {
        let save_dir = results_dir.as_ref().join(save_name);
        for sub in ["trajectories", "renders", "frames"] {
            fs::create_dir_all(save_dir.join(sub))?;
        }
        Ok(Self {
            save_dir,
            files_written: 0,
        })
    }

    pub fn save_dir(&self) -> &Path {
        &self.save_dir
    }

    pub fn trajectory_dir(&self, cost: Payoff, benefit: Payoff) -> PathBuf {
        self.save_dir
            .join("trajectories")
            .join(trajectory_dir_name(cost, benefit))
    }

    pub fn snapshot_path(&self, cost: Payoff, benefit: Payoff, iteration: Iteration) -> PathBuf {
        self.trajectory_dir(cost, benefit)
            .join(iteration_file_name(iteration))
    }

    pub fn files_written(&self) -> usize {
        self.files_written
    }
}

impl SnapshotSink for CsvTrajectorySink {
    fn emit(&mut self, snapshot: &Snapshot<'_>) -> Result<()> {
        let dir = self.trajectory_dir(snapshot.cost, snapshot.benefit);
        fs::create_dir_all(&dir)?;
        write_state_csv(snapshot.matrix, dir.join(iteration_file_name(snapshot.iteration)))?;
        self.files_written += 1;
        Ok(())
    }
}
