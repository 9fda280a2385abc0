use std::path::PathBuf;
use std::time::Instant;

use log::{debug, info};
use thiserror::Error;

pub mod config;
pub mod export;
pub mod matrix;
pub mod scoring;
pub mod sequence;

pub use config::RunConfig;
pub use export::{export, export_to_path};
pub use matrix::ScoreMatrix;
pub use scoring::{AlignmentScore, AlignmentStats, Position};
pub use sequence::{normalize, normalize_file, Normalizer, Sequence};

// Scoring defaults of the similarity tool
pub const MATCH_BONUS: i32 = 1;
pub const GAP_PENALTY: i32 = 2;
pub const SUBSTITUTION_PENALTY: i32 = 1;
pub const WILDCARD: u8 = b'?';

pub const DEFAULT_OUTPUT: &str = "test.txt";

#[derive(Debug, Error)]
pub enum AlignerError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("I/O error: {0}")]
    Stream(#[from] std::io::Error),
    #[error("Memory allocation failed: {0}")]
    Allocation(String),
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Score overflow at cell ({i}, {j})")]
    ScoreOverflow { i: usize, j: usize },
}

pub type Result<T> = std::result::Result<T, AlignerError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreParams {
    pub match_bonus: i32,
    pub gap_penalty: i32,
    pub substitution_penalty: i32,
    pub wildcard: u8,
}

impl Default for ScoreParams {
    fn default() -> Self {
        Self {
            match_bonus: MATCH_BONUS,
            gap_penalty: GAP_PENALTY,
            substitution_penalty: SUBSTITUTION_PENALTY,
            wildcard: WILDCARD,
        }
    }
}

impl ScoreParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_match_bonus(mut self, bonus: i32) -> Result<Self> {
        if bonus <= 0 {
            return Err(AlignerError::InvalidParameter(format!(
                "match bonus must be positive, got {bonus}"
            )));
        }
        self.match_bonus = bonus;
        Ok(self)
    }

    pub fn with_gap_penalty(mut self, penalty: i32) -> Result<Self> {
        if penalty < 0 {
            return Err(AlignerError::InvalidParameter(format!(
                "gap penalty cannot be negative, got {penalty}"
            )));
        }
        self.gap_penalty = penalty;
        Ok(self)
    }

    pub fn with_substitution_penalty(mut self, penalty: i32) -> Result<Self> {
        if penalty < 0 {
            return Err(AlignerError::InvalidParameter(format!(
                "substitution penalty cannot be negative, got {penalty}"
            )));
        }
        self.substitution_penalty = penalty;
        Ok(self)
    }

    pub fn with_wildcard(mut self, wildcard: u8) -> Result<Self> {
        self.wildcard = Normalizer::new().with_wildcard(wildcard)?.wildcard();
        Ok(self)
    }

    /// The normalizer that keeps this wildcard.
    pub fn normalizer(&self) -> Normalizer {
        Normalizer::from_wildcard(self.wildcard)
    }

    #[inline]
    fn is_match(&self, a: u8, b: u8) -> bool {
        a == b || a == self.wildcard || b == self.wildcard
    }
}

/// Local-alignment scorer.
///
/// Fills a `(reference.len() + 1) x (primary.len() + 1)` matrix in
/// row-major order. A match extends the upper-left score by the match
/// bonus; a mismatch takes the best positive of the two gap candidates
/// and the substitution candidate, or restarts at zero.
#[derive(Debug, Clone, Default)]
pub struct LocalAligner {
    params: ScoreParams,
}

impl LocalAligner {
    pub fn new(params: ScoreParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ScoreParams {
        &self.params
    }

    pub fn align(&self, reference: &Sequence, primary: &Sequence) -> Result<ScoreMatrix> {
        self.fill(reference.as_bytes(), primary.as_bytes(), &mut AlignmentStats::default())
    }

    /// Like [`LocalAligner::align`], also returning fill counters and the
    /// elapsed wall-clock time.
    pub fn align_with_stats(
        &self,
        reference: &Sequence,
        primary: &Sequence,
    ) -> Result<(ScoreMatrix, AlignmentStats)> {
        let start_time = Instant::now();
        let mut stats = AlignmentStats::default();
        let matrix = self.fill(reference.as_bytes(), primary.as_bytes(), &mut stats)?;
        stats.execution_time = start_time.elapsed();

        info!(
            "Aligned {}x{} in {:.6}s ({} matches, {} mismatches)",
            reference.len(),
            primary.len(),
            stats.execution_secs(),
            stats.matches,
            stats.mismatches
        );
        Ok((matrix, stats))
    }

    fn fill(
        &self,
        reference: &[u8],
        primary: &[u8],
        stats: &mut AlignmentStats,
    ) -> Result<ScoreMatrix> {
        let p = &self.params;
        let mut matrix = ScoreMatrix::new(reference.len() + 1, primary.len() + 1)?;
        debug!(
            "Allocated {}x{} score matrix",
            matrix.rows(),
            matrix.cols()
        );

        // Row 0 and column 0 stay at zero from allocation.
        for (i, &r) in reference.iter().enumerate().map(|(k, c)| (k + 1, c)) {
            for (j, &q) in primary.iter().enumerate().map(|(k, c)| (k + 1, c)) {
                let value = if p.is_match(r, q) {
                    stats.matches += 1;
                    matrix
                        .get(i - 1, j - 1)
                        .checked_add(p.match_bonus)
                        .ok_or(AlignerError::ScoreOverflow { i, j })?
                } else {
                    let left = matrix.get(i - 1, j) - p.gap_penalty;
                    let up = matrix.get(i, j - 1) - p.gap_penalty;
                    let diag = matrix.get(i - 1, j - 1) - p.substitution_penalty;

                    let best = scoring::best_candidate(left, up, diag);
                    stats.record(best.map(|(_, step)| step));
                    best.map_or(0, |(value, _)| value)
                };
                matrix.set(i, j, value);
            }
        }

        Ok(matrix)
    }
}

/// Aligns `reference` against `primary` with the default scores.
pub fn align(reference: &Sequence, primary: &Sequence) -> Result<ScoreMatrix> {
    LocalAligner::default().align(reference, primary)
}

/// What a finished run reports back to the caller.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub primary_len: usize,
    pub reference_len: usize,
    pub statistics: AlignmentStats,
    /// Only computed when the configuration asks for it.
    pub best: Option<AlignmentScore>,
}

/// Normalizes both inputs, aligns them and exports the matrix.
pub fn run(config: &RunConfig) -> Result<RunReport> {
    let params = *config.score_params();
    let normalizer = params.normalizer();

    let primary = normalizer.normalize_file(config.primary())?;
    let reference = normalizer.normalize_file(config.reference())?;

    let (matrix, statistics) = LocalAligner::new(params).align_with_stats(&reference, &primary)?;
    let best = if config.report_best() {
        matrix.best()
    } else {
        None
    };

    export_to_path(&matrix, config.output())?;

    Ok(RunReport {
        primary_len: primary.len(),
        reference_len: reference.len(),
        statistics,
        best,
    })
}
