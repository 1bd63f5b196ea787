//! Loading integer sequences from text.
//!
//! The accepted format is one integer per line. Surrounding whitespace is
//! ignored and blank lines are skipped; any other content fails the whole
//! load so that bad data is never silently dropped.

use log::{debug, info};
use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::num::ParseIntError;
use std::path::PathBuf;

/// Where the sequence is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Standard input.
    Stdin,
    /// A text file on disk.
    File(PathBuf),
}

impl InputSource {
    /// Interpret a CLI argument. `None` and `-` mean standard input.
    pub fn from_arg(arg: Option<PathBuf>) -> Self {
        match arg {
            Some(path) if path.as_os_str() != "-" => InputSource::File(path),
            _ => InputSource::Stdin,
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Stdin => write!(f, "<stdin>"),
            InputSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Errors raised while reading a sequence.
#[derive(Debug)]
pub enum IngestError {
    /// The input could not be opened or read.
    Io(io::Error),
    /// A non-blank line is not a valid integer.
    Malformed {
        /// 1-based line number.
        line: usize,
        /// The offending text, trimmed.
        content: String,
        source: ParseIntError,
    },
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngestError::Io(err) => write!(f, "failed to read input: {}", err),
            IngestError::Malformed { line, content, source } => write!(
                f,
                "line {}: '{}' is not a valid integer ({})",
                line, content, source
            ),
        }
    }
}

impl Error for IngestError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            IngestError::Io(err) => Some(err),
            IngestError::Malformed { source, .. } => Some(source),
        }
    }
}

impl From<io::Error> for IngestError {
    fn from(err: io::Error) -> Self {
        IngestError::Io(err)
    }
}

/// Read every integer from `source`.
pub fn load(source: &InputSource) -> Result<Vec<i64>, IngestError> {
    debug!("Loading integers from {}", source);

    let numbers = match source {
        InputSource::Stdin => parse_integers(io::stdin().lock())?,
        InputSource::File(path) => {
            parse_integers(BufReader::new(File::open(path)?))?
        }
    };

    info!("Loaded {} integers from {}", numbers.len(), source);
    Ok(numbers)
}

/// Parse newline-delimited integers from a reader.
pub fn parse_integers<R: BufRead>(reader: R) -> Result<Vec<i64>, IngestError> {
    let mut numbers = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let value = trimmed.parse::<i64>().map_err(|source| {
            IngestError::Malformed {
                line: index + 1,
                content: trimmed.to_string(),
                source,
            }
        })?;
        numbers.push(value);
    }

    Ok(numbers)
}
