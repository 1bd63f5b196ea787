//! Report rendering for text and JSON output.

use colored::Colorize;

use super::progress::format_elapsed;
use crate::results::AnalysisReport;

/// Format a run as a bracketed, comma-separated list.
pub fn format_run(run: &[i64]) -> String {
    let items: Vec<String> =
        run.iter().map(|value| value.to_string()).collect();
    format!("[{}]", items.join(", "))
}

/// Format a floating point statistic with up to four decimals.
pub fn format_statistic(value: f64) -> String {
    let formatted = format!("{:.4}", value);
    let trimmed = formatted.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format!("{}0", trimmed)
    } else {
        trimmed.to_string()
    }
}

fn run_line(label: &str, run: &[i64]) -> String {
    format!(
        "{} {} {}",
        label.bold().white(),
        format_run(run).bright_cyan(),
        format!("(length {})", run.len()).dimmed()
    )
}

/// Render the report as labelled lines for a terminal.
pub fn render_text(report: &AnalysisReport) -> String {
    let stats = &report.statistics;

    let lines = [
        format!("{} {}", "Source:".bold().white(), report.source.bright_blue()),
        format!("{} {}", "Count:".bold().white(), report.count),
        format!("{} {}", "Minimum:".bold().white(), stats.min()),
        format!("{} {}", "Maximum:".bold().white(), stats.max()),
        format!(
            "{} {}",
            "Mean:".bold().white(),
            format_statistic(stats.mean()).bright_cyan()
        ),
        format!(
            "{} {}",
            "Median:".bold().white(),
            format_statistic(stats.median()).bright_cyan()
        ),
        run_line("Longest increasing:", stats.longest_increasing()),
        run_line("Longest decreasing:", stats.longest_decreasing()),
        format!(
            "{} {}",
            "Elapsed:".bold().white(),
            format_elapsed(report.elapsed())
        ),
    ];

    lines.join("\n")
}

/// Render the report as pretty-printed JSON.
pub fn render_json(
    report: &AnalysisReport,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
