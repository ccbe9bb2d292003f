//! Whitespace-separated measurement files
//!
//! One object per line, readings separated by spaces. `NaN` marks a missing
//! reading and is replaced by the mean of the other readings on the same line.

use crate::error::{Error, Result};
use csv::ReaderBuilder;
use statrs::statistics::Statistics;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Parse a measurement matrix from any reader
pub fn parse_matrix<R: Read>(reader: R) -> Result<Vec<Vec<f64>>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(idx + 1);

        let mut row = Vec::with_capacity(record.len());
        for (column, token) in record.iter().map(str::trim).enumerate() {
            if token.is_empty() {
                continue;
            }
            row.push(parse_reading(token).ok_or_else(|| Error::InvalidNumber {
                line,
                column: column + 1,
                token: token.to_string(),
            })?);
        }

        // Lines holding only spaces
        if row.is_empty() {
            continue;
        }

        if !impute_missing(&mut row) {
            return Err(Error::EmptyRow { line });
        }
        rows.push(row);
    }

    Ok(rows)
}

fn parse_reading(token: &str) -> Option<f64> {
    if token.eq_ignore_ascii_case("nan") {
        return Some(f64::NAN);
    }
    token.parse().ok()
}

/// Replace NaN readings with the mean of the valid ones.
///
/// Returns `false` when the row has no valid reading to average.
pub fn impute_missing(row: &mut [f64]) -> bool {
    if !row.iter().any(|x| x.is_nan()) {
        return true;
    }

    let valid: Vec<f64> = row.iter().copied().filter(|x| !x.is_nan()).collect();
    if valid.is_empty() {
        return false;
    }

    let mean = valid.mean();
    for x in row.iter_mut().filter(|x| x.is_nan()) {
        *x = mean;
    }
    true
}

/// Read a measurement matrix from a file
pub fn read_matrix<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<f64>>> {
    let file = File::open(&path)?;
    let rows = parse_matrix(file)?;
    tracing::debug!("Read {} rows from {:?}", rows.len(), path.as_ref());
    Ok(rows)
}

/// Likelihood table: one probability row per class
pub fn parse_likelihood_file<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<f64>>> {
    read_matrix(path)
}

/// Labeled training tracks, one per line
pub fn parse_training_file<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<f64>>> {
    read_matrix(path)
}

/// Tracks to classify, one per line
pub fn parse_input_file<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<f64>>> {
    read_matrix(path)
}
