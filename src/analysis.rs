//! Statistics over an integer sequence.
//!
//! Every function borrows the caller's slice immutably. Selection for the
//! median runs on freshly allocated scratch copies, so the input is never
//! reordered. An empty sequence is rejected with
//! [`AnalysisError::EmptyInput`] rather than producing placeholder zeros.

use log::debug;
use serde::Serialize;
use std::error::Error;
use std::fmt;

use crate::select::select;

/// Errors raised by the analysis core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisError {
    /// Analysis was requested on a sequence with no elements.
    EmptyInput,
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::EmptyInput => {
                write!(f, "cannot analyze an empty sequence")
            }
        }
    }
}

impl Error for AnalysisError {}

/// Direction of a strictly monotonic run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Each element is greater than the one before it.
    Increasing,
    /// Each element is less than the one before it.
    Decreasing,
}

impl Direction {
    /// Whether stepping from `previous` to `current` continues a run.
    ///
    /// Equal values never continue a strict run.
    fn continues(&self, previous: i64, current: i64) -> bool {
        match self {
            Direction::Increasing => current > previous,
            Direction::Decreasing => current < previous,
        }
    }
}

/// All statistics computed for one sequence.
///
/// Built once by [`analyze`] and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    min: i64,
    max: i64,
    mean: f64,
    median: f64,
    longest_increasing: Vec<i64>,
    longest_decreasing: Vec<i64>,
}

impl AnalysisResult {
    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn median(&self) -> f64 {
        self.median
    }

    /// First longest contiguous strictly increasing run.
    pub fn longest_increasing(&self) -> &[i64] {
        &self.longest_increasing
    }

    /// First longest contiguous strictly decreasing run.
    pub fn longest_decreasing(&self) -> &[i64] {
        &self.longest_decreasing
    }
}

/// Computes every statistic for `sequence`.
///
/// # Errors
/// Returns [`AnalysisError::EmptyInput`] before computing anything if
/// `sequence` is empty.
pub fn analyze(sequence: &[i64]) -> Result<AnalysisResult, AnalysisError> {
    if sequence.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    let (min, max) = min_and_max(sequence)?;
    let mean = mean(sequence)?;
    let median = median(sequence)?;
    let longest_increasing = longest_run(sequence, Direction::Increasing)?;
    let longest_decreasing = longest_run(sequence, Direction::Decreasing)?;

    debug!(
        "Analyzed {} values: min={}, max={}, mean={}, median={}",
        sequence.len(),
        min,
        max,
        mean,
        median
    );

    Ok(AnalysisResult {
        min,
        max,
        mean,
        median,
        longest_increasing,
        longest_decreasing,
    })
}

/// Returns `(minimum, maximum)` in a single pass.
pub fn min_and_max(sequence: &[i64]) -> Result<(i64, i64), AnalysisError> {
    let (&first, rest) =
        sequence.split_first().ok_or(AnalysisError::EmptyInput)?;

    Ok(rest.iter().fold((first, first), |(min, max), &value| {
        (min.min(value), max.max(value))
    }))
}

/// Arithmetic mean.
///
/// The sum is accumulated in an `i128`, which cannot overflow for any
/// sequence that fits in memory.
pub fn mean(sequence: &[i64]) -> Result<f64, AnalysisError> {
    if sequence.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    let sum: i128 = sequence.iter().map(|&value| value as i128).sum();

    Ok(sum as f64 / sequence.len() as f64)
}

/// Median via order-statistic selection.
///
/// For even lengths the two middle ranks are selected from separate
/// copies and averaged in floating point.
pub fn median(sequence: &[i64]) -> Result<f64, AnalysisError> {
    let n = sequence.len();
    let mid = n / 2;

    if n % 2 == 1 {
        let middle =
            select(sequence.to_vec(), mid).ok_or(AnalysisError::EmptyInput)?;
        return Ok(middle as f64);
    }

    // n == 0 makes mid - 1 underflow, so reject it before subtracting.
    if n == 0 {
        return Err(AnalysisError::EmptyInput);
    }

    let left =
        select(sequence.to_vec(), mid - 1).ok_or(AnalysisError::EmptyInput)?;
    let right =
        select(sequence.to_vec(), mid).ok_or(AnalysisError::EmptyInput)?;

    Ok((left as f64 + right as f64) / 2.0)
}

/// Longest contiguous strictly monotonic run in the given direction.
///
/// Scans once, left to right. When several runs share the maximum length
/// the earliest one is returned. A sequence with no strict step (a single
/// element, or all values equal) yields its first element as a run of
/// length one.
pub fn longest_run(
    sequence: &[i64],
    direction: Direction,
) -> Result<Vec<i64>, AnalysisError> {
    if sequence.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    let mut current_length = 1;
    let mut max_length = 0;
    let mut end_index = 0;

    for (i, pair) in sequence.windows(2).enumerate() {
        if direction.continues(pair[0], pair[1]) {
            current_length += 1;
            if current_length > max_length {
                max_length = current_length;
                end_index = i + 1;
            }
        } else {
            current_length = 1;
        }
    }

    if max_length == 0 {
        return Ok(vec![sequence[0]]);
    }

    let start = end_index + 1 - max_length;
    Ok(sequence[start..=end_index].to_vec())
}
