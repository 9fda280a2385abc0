use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignmentScore {
    pub score: i32,
    pub position: Position,
}

/// A matrix cell: `i` indexes the reference, `j` the primary sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub i: usize,
    pub j: usize,
}

/// Which candidate produced a mismatch cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Left,
    Up,
    Diagonal,
}

/// Counters collected while filling a matrix.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignmentStats {
    pub matches: u64,
    pub mismatches: u64,
    /// Mismatch cells whose value came from a gap candidate. A tie between
    /// the left gap and the diagonal counts as diagonal, as the comparison
    /// order of the original similarity tool dictates.
    pub gaps: u64,
    /// Mismatch cells reset to zero.
    pub restarts: u64,
    pub execution_time: Duration,
}

impl AlignmentStats {
    pub fn execution_secs(&self) -> f64 {
        self.execution_time.as_secs_f64()
    }

    pub(crate) fn record(&mut self, step: Option<Step>) {
        self.mismatches += 1;
        match step {
            None => self.restarts += 1,
            Some(Step::Left | Step::Up) => self.gaps += 1,
            Some(Step::Diagonal) => {}
        }
    }
}

/// Picks the best of the three mismatch candidates.
///
/// Returns `None` when no candidate is positive. Otherwise the comparison
/// order is fixed: `left` is taken only when it beats both others outright,
/// `up` only when it beats `diag` outright and is not beaten by `left`, and
/// `diag` in every remaining case.
#[inline]
pub(crate) fn best_candidate(left: i32, up: i32, diag: i32) -> Option<(i32, Step)> {
    if left <= 0 && up <= 0 && diag <= 0 {
        return None;
    }
    let pick = if left > up {
        if left > diag {
            (left, Step::Left)
        } else {
            (diag, Step::Diagonal)
        }
    } else if up > diag {
        (up, Step::Up)
    } else {
        (diag, Step::Diagonal)
    };
    Some(pick)
}
