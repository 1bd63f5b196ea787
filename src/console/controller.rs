//! Console controller for the run lifecycle.
//!
//! Receives progress events from the runner, keeps a live timer line on
//! stderr in interactive mode, and prints the final report or error.

use std::io::{self, Write};
use std::sync::Mutex;
use std::time::Duration;

use colored::Colorize;
use log::warn;

use super::display_mode::DisplayMode;
use super::progress::{format_elapsed, Phase, ProgressCallback, ProgressEvent};
use super::renderer::{render_json, render_text};
use crate::errors::{format_error_for_display, SeqStatError};
use crate::results::AnalysisReport;

/// What the timer line currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleState {
    pub phase: Phase,
    pub loaded: Option<usize>,
    pub elapsed: Duration,
    /// Whether a timer line is on screen and must be cleared.
    pub line_drawn: bool,
}

impl ConsoleState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Loading,
            loaded: None,
            elapsed: Duration::ZERO,
            line_drawn: false,
        }
    }

    /// Apply an event to the state.
    pub fn update_from_event(&mut self, event: &ProgressEvent) {
        match event {
            ProgressEvent::PhaseChange(phase) => self.phase = *phase,
            ProgressEvent::Loaded { count } => self.loaded = Some(*count),
            ProgressEvent::Tick { elapsed } => self.elapsed = *elapsed,
            ProgressEvent::Finished { elapsed } => {
                self.phase = Phase::Complete;
                self.elapsed = *elapsed;
            }
            ProgressEvent::Failed(_) => {}
        }
    }

    /// The timer line, e.g. `Analyzing 1000 values... 00:03`.
    pub fn status_line(&self) -> String {
        match self.loaded {
            Some(count) if self.phase == Phase::Analyzing => format!(
                "{} {} values... {}",
                self.phase.label(),
                count,
                format_elapsed(self.elapsed)
            ),
            _ => format!(
                "{}... {}",
                self.phase.label(),
                format_elapsed(self.elapsed)
            ),
        }
    }
}

impl Default for ConsoleState {
    fn default() -> Self {
        Self::new()
    }
}

/// Controller for console output.
pub struct ConsoleController {
    mode: DisplayMode,
    state: Mutex<ConsoleState>,
}

impl ConsoleController {
    pub fn new(mode: DisplayMode) -> Self {
        Self { mode, state: Mutex::new(ConsoleState::new()) }
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Print the final report to stdout in the configured format.
    pub fn print_report(
        &self,
        report: &AnalysisReport,
    ) -> Result<(), SeqStatError> {
        let output = match self.mode {
            DisplayMode::Json => render_json(report).map_err(|e| {
                SeqStatError::unknown("Failed to serialize report")
                    .with_source(e)
            })?,
            DisplayMode::Interactive | DisplayMode::Silent => {
                render_text(report)
            }
        };

        println!("{}", output);
        Ok(())
    }

    /// Print an error to stderr.
    pub fn print_error(&self, error: &SeqStatError) {
        self.clear_line();
        eprintln!("{}", format_error_for_display(error).red());
    }

    fn draw_line(&self, line: &str) {
        let mut stderr = io::stderr().lock();
        // \x1b[2K erases the previous, possibly longer, status line.
        let written = write!(stderr, "\r\x1b[2K{}", line.dimmed())
            .and_then(|_| stderr.flush());
        if let Err(e) = written {
            warn!("Failed to draw progress line: {}", e);
        }
    }

    fn clear_line(&self) {
        let Ok(mut state) = self.state.lock() else { return };
        if !state.line_drawn {
            return;
        }
        state.line_drawn = false;
        drop(state);

        if let Err(e) = erase_line(&mut io::stderr().lock()) {
            warn!("Failed to clear progress line: {}", e);
        }
    }
}

/// Erase the current terminal line and return the cursor to column 0.
fn erase_line<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "\r\x1b[2K")?;
    out.flush()
}

impl ProgressCallback for ConsoleController {
    fn on_progress(&self, event: ProgressEvent) {
        let line = {
            let Ok(mut state) = self.state.lock() else { return };
            state.update_from_event(&event);

            if !self.mode.shows_progress() {
                return;
            }

            match event {
                ProgressEvent::Finished { .. } | ProgressEvent::Failed(_) => {
                    None
                }
                _ => {
                    state.line_drawn = true;
                    Some(state.status_line())
                }
            }
        };

        match line {
            Some(line) => self.draw_line(&line),
            None => self.clear_line(),
        }
    }
}
