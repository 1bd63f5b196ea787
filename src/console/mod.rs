//! Terminal presentation for seqstat.
//!
//! Covers choosing how output is shown, the live elapsed-time line
//! while an analysis runs, and rendering the final report.

pub mod controller;
pub mod display_mode;
pub mod progress;
pub mod renderer;

pub use controller::ConsoleController;
pub use display_mode::DisplayMode;
