//! Display mode detection.
//!
//! Determines whether to show a live timer, stay quiet until the report,
//! or emit JSON, based on CLI flags and terminal capabilities.

/// The display mode for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Live elapsed-time line on stderr, colored text report
    Interactive,
    /// No progress output, text report only
    Silent,
    /// JSON report only
    Json,
}

impl DisplayMode {
    /// Determine display mode from CLI flags and environment.
    ///
    /// # Arguments
    /// * `json_flag` - Whether `--json` was provided
    /// * `no_progress` - Whether `--no-progress` was provided
    /// * `is_tty` - Whether stderr is an interactive terminal
    ///
    /// # Returns
    /// * `Json` when json_flag is true, regardless of the rest
    /// * `Interactive` when progress is allowed and stderr is a TTY
    /// * `Silent` otherwise
    pub fn detect(json_flag: bool, no_progress: bool, is_tty: bool) -> Self {
        if json_flag {
            DisplayMode::Json
        } else if is_tty && !no_progress {
            DisplayMode::Interactive
        } else {
            DisplayMode::Silent
        }
    }

    /// Whether the live timer line is drawn.
    pub fn shows_progress(&self) -> bool {
        *self == DisplayMode::Interactive
    }
}
