//! User-facing error type for the command-line tool.
//!
//! Wraps the analysis and ingestion errors with a category, a readable
//! message and an optional suggestion, and maps each category to a
//! process exit code.

use std::error::Error;
use std::fmt;

use crate::analysis::AnalysisError;
use crate::ingest::IngestError;

/// Exit codes for the application.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// The input could not be opened or read.
    pub const INPUT_ERROR: i32 = 1;
    /// The input contained a line that is not an integer.
    pub const MALFORMED_INPUT: i32 = 2;
    /// The input contained no integers.
    pub const EMPTY_INPUT: i32 = 3;
    /// Invalid arguments or runtime setup failure.
    pub const CONFIG_ERROR: i32 = 4;
    /// The run was interrupted.
    pub const CANCELLED: i32 = 130;
    /// Unknown/unexpected error.
    pub const UNKNOWN_ERROR: i32 = 99;
}

/// Categories of errors that can end a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Reading the input failed.
    Input,
    /// A line failed integer parsing.
    MalformedInput,
    /// Nothing to analyze.
    EmptyInput,
    /// Invalid configuration or runtime setup.
    Config,
    /// Interrupted by the user.
    Cancelled,
    /// Unknown or unexpected errors.
    Unknown,
}

impl ErrorKind {
    /// Get the exit code for this error kind.
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorKind::Input => exit_codes::INPUT_ERROR,
            ErrorKind::MalformedInput => exit_codes::MALFORMED_INPUT,
            ErrorKind::EmptyInput => exit_codes::EMPTY_INPUT,
            ErrorKind::Config => exit_codes::CONFIG_ERROR,
            ErrorKind::Cancelled => exit_codes::CANCELLED,
            ErrorKind::Unknown => exit_codes::UNKNOWN_ERROR,
        }
    }

    /// Get a user-friendly description of this error kind.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorKind::Input => "Input error",
            ErrorKind::MalformedInput => "Malformed input",
            ErrorKind::EmptyInput => "Empty input",
            ErrorKind::Config => "Configuration error",
            ErrorKind::Cancelled => "Cancelled",
            ErrorKind::Unknown => "Unknown error",
        }
    }
}

/// A user-friendly error for a failed run.
#[derive(Debug)]
pub struct SeqStatError {
    /// The kind of error.
    pub kind: ErrorKind,
    /// User-friendly error message.
    pub message: String,
    /// Optional suggestion for how to resolve the error.
    pub suggestion: Option<String>,
    /// The underlying error, if any.
    pub source: Option<Box<dyn Error + Send + Sync>>,
}

impl SeqStatError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into(), suggestion: None, source: None }
    }

    /// Add a suggestion for how to resolve the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add the underlying error source.
    pub fn with_source(
        mut self,
        source: impl Error + Send + Sync + 'static,
    ) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn exit_code(&self) -> i32 {
        self.kind.exit_code()
    }

    pub fn empty_input() -> Self {
        Self::new(ErrorKind::EmptyInput, "No numbers were loaded")
            .with_suggestion("Provide a file with one integer per line.")
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    pub fn cancelled() -> Self {
        Self::new(ErrorKind::Cancelled, "Analysis interrupted")
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unknown, message)
    }
}

impl fmt::Display for SeqStatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.description(), self.message)?;

        if let Some(ref suggestion) = self.suggestion {
            write!(f, "\n  Suggestion: {}", suggestion)?;
        }

        Ok(())
    }
}

impl Error for SeqStatError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

impl From<AnalysisError> for SeqStatError {
    fn from(error: AnalysisError) -> Self {
        match error {
            AnalysisError::EmptyInput => {
                SeqStatError::empty_input().with_source(error)
            }
        }
    }
}

impl From<IngestError> for SeqStatError {
    fn from(error: IngestError) -> Self {
        match error {
            IngestError::Io(_) => {
                SeqStatError::new(ErrorKind::Input, error.to_string())
                    .with_suggestion(
                        "Check that the file exists and is readable.",
                    )
                    .with_source(error)
            }
            IngestError::Malformed { .. } => {
                SeqStatError::new(ErrorKind::MalformedInput, error.to_string())
                    .with_suggestion(
                        "Each non-blank line must hold a single integer.",
                    )
                    .with_source(error)
            }
        }
    }
}

/// Format an error for user display.
///
/// Includes the message and, when present, the suggestion on its own
/// paragraph.
pub fn format_error_for_display(error: &SeqStatError) -> String {
    let mut output = format!("Error: {}", error.message);

    if let Some(ref suggestion) = error.suggestion {
        output.push_str(&format!("\n\nSuggestion: {}", suggestion));
    }

    output
}
