use crate::scoring::{AlignmentScore, Position};
use crate::{AlignerError, Result};

/// Local-alignment scores, `reference.len() + 1` rows by
/// `primary.len() + 1` columns, stored row-major in one buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreMatrix {
    data: Vec<i32>,
    rows: usize,
    cols: usize,
}

impl ScoreMatrix {
    /// Allocates a zeroed `rows x cols` matrix.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        let len = rows.checked_mul(cols).ok_or_else(|| {
            AlignerError::Allocation(format!("{rows} x {cols} matrix overflows usize"))
        })?;

        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|e| {
            AlignerError::Allocation(format!("{rows} x {cols} matrix: {e}"))
        })?;
        data.resize(len, 0);

        Ok(Self { data, rows, cols })
    }

    /// Builds a matrix from nested rows. Every row must have the same length.
    pub fn from_rows(rows: &[Vec<i32>]) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().position(|r| r.len() != cols) {
            return Err(AlignerError::InvalidParameter(format!(
                "row {bad} has {} columns, expected {cols}",
                rows[bad].len()
            )));
        }
        let mut matrix = Self::new(rows.len(), cols)?;
        for (dst, src) in matrix.data.chunks_exact_mut(cols.max(1)).zip(rows) {
            dst.copy_from_slice(src);
        }
        Ok(matrix)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> i32 {
        self.data[row * self.cols + col]
    }

    #[inline]
    pub(crate) fn set(&mut self, row: usize, col: usize, value: i32) {
        self.data[row * self.cols + col] = value;
    }

    pub fn row(&self, row: usize) -> &[i32] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Values of column `col`, top to bottom.
    pub fn column(&self, col: usize) -> impl Iterator<Item = i32> + '_ {
        (0..self.rows).map(move |row| self.get(row, col))
    }

    pub fn values(&self) -> &[i32] {
        &self.data
    }

    /// The highest score and the first cell, in row-major order, holding it.
    ///
    /// Returns `None` for a matrix without cells.
    pub fn best(&self) -> Option<AlignmentScore> {
        let (index, &score) = self
            .data
            .iter()
            .enumerate()
            .rev()
            .max_by_key(|(_, &score)| score)?;
        Some(AlignmentScore {
            score,
            position: Position {
                i: index / self.cols,
                j: index % self.cols,
            },
        })
    }
}
