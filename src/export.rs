//! Writes a score matrix as a comma-terminated text table.
//!
//! Output lines follow the primary sequence: line `j` holds column `j` of
//! the matrix, one value per reference position, each value followed by a
//! comma.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;

use crate::{AlignerError, Result, ScoreMatrix};

/// Writes the transposed table to `out`.
pub fn export<W: Write>(matrix: &ScoreMatrix, mut out: W) -> std::io::Result<()> {
    for col in 0..matrix.cols() {
        for value in matrix.column(col) {
            write!(out, "{value},")?;
        }
        out.write_all(b"\n")?;
    }
    out.flush()
}

/// Creates or truncates `path` and writes the transposed table to it.
pub fn export_to_path<P: AsRef<Path>>(matrix: &ScoreMatrix, path: P) -> Result<()> {
    let path = path.as_ref();
    let io_err = |source| AlignerError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    export(matrix, BufWriter::new(file)).map_err(io_err)?;

    info!(
        "Wrote {} lines of {} values to {}",
        matrix.cols(),
        matrix.rows(),
        path.display()
    );
    Ok(())
}
