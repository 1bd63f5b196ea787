//! Report produced by a complete run.
//!
//! Bundles the computed statistics with metadata about the run. Every
//! field serializes for `--json` output.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

use crate::analysis::AnalysisResult;

/// Results of analyzing one input.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Timestamp when the analysis completed
    pub timestamp: DateTime<Utc>,
    /// Where the numbers came from (a path or `<stdin>`)
    pub source: String,
    /// Number of integers analyzed
    pub count: usize,
    /// Wall-clock time for loading and analysis, in milliseconds
    pub elapsed_ms: u128,
    /// The computed statistics
    pub statistics: AnalysisResult,
}

impl AnalysisReport {
    pub fn new(
        source: impl Into<String>,
        count: usize,
        elapsed: Duration,
        statistics: AnalysisResult,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            source: source.into(),
            count,
            elapsed_ms: elapsed.as_millis(),
            statistics,
        }
    }

    pub fn elapsed(&self) -> Duration {
        Duration::from_millis(self.elapsed_ms as u64)
    }
}
