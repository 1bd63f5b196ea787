//! Progress event types and callback interface.
//!
//! Defines the events emitted while a run loads and analyzes its input,
//! and the callback trait for receiving them.

use std::time::Duration;

/// Phases of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Reading and parsing the input
    Loading,
    /// Computing statistics
    Analyzing,
    /// Finished successfully
    Complete,
}

impl Phase {
    /// Short label shown next to the timer.
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Loading => "Loading",
            Phase::Analyzing => "Analyzing",
            Phase::Complete => "Done",
        }
    }
}

/// Progress events emitted during a run.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// The run entered a new phase
    PhaseChange(Phase),
    /// Input finished loading
    Loaded {
        /// Number of integers read
        count: usize,
    },
    /// Periodic timer tick while work is in flight
    Tick {
        /// Time since the run started
        elapsed: Duration,
    },
    /// The run produced a report
    Finished {
        /// Total time of the run
        elapsed: Duration,
    },
    /// The run failed
    Failed(String),
}

/// Callback interface for progress updates.
///
/// Implementations must be non-blocking; ticks arrive on the async
/// runtime while the analysis occupies a blocking thread.
pub trait ProgressCallback: Send + Sync {
    /// Called when a progress event occurs.
    fn on_progress(&self, event: ProgressEvent);
}

/// Format a duration as `mm:ss`.
///
/// Minutes keep counting past 59 rather than rolling into hours.
pub fn format_elapsed(elapsed: Duration) -> String {
    let seconds = elapsed.as_secs();
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::ZERO), "00:00");
        assert_eq!(format_elapsed(Duration::from_secs(5)), "00:05");
        assert_eq!(format_elapsed(Duration::from_secs(65)), "01:05");
        assert_eq!(format_elapsed(Duration::from_millis(59_999)), "00:59");
        assert_eq!(format_elapsed(Duration::from_secs(6_000)), "100:00");
    }

    #[test]
    fn test_phase_labels() {
        assert_eq!(Phase::Loading.label(), "Loading");
        assert_eq!(Phase::Analyzing.label(), "Analyzing");
        assert_eq!(Phase::Complete.label(), "Done");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: the formatted seconds field is always two digits
        /// below 60 and the fields recombine into the original count.
        #[test]
        fn format_elapsed_roundtrips_seconds(secs in 0u64..1_000_000) {
            let formatted = format_elapsed(Duration::from_secs(secs));
            let (minutes, seconds) = formatted.split_once(':').unwrap();

            prop_assert_eq!(seconds.len(), 2);
            let minutes: u64 = minutes.parse().unwrap();
            let seconds: u64 = seconds.parse().unwrap();
            prop_assert!(seconds < 60);
            prop_assert_eq!(minutes * 60 + seconds, secs);
        }
    }
}
