//! Formatting utilities used for CLI and export outputs.

use crate::models::VacationStatus;
use crate::utils::colors::{GREEN, GREY, RED, RESET, YELLOW};

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

pub fn pad_right(s: &str, width: usize) -> String {
    format!("{:<width$}", s, width = width)
}

/// Status label wrapped in its terminal color.
pub fn colorize_status(status: VacationStatus) -> String {
    let color = match status {
        VacationStatus::Pending => YELLOW,
        VacationStatus::Approved => GREEN,
        VacationStatus::Rejected => RED,
    };
    format!("{color}{}{RESET}", status.label())
}

/// "-" in grey for missing values.
pub fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => format!("{GREY}-{RESET}"),
    }
}

/// "1 day" / "5 days"
pub fn days_label(days: i64) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{days} days")
    }
}

/// Horizontal rule drawn with the configured separator.
pub fn separator(ch: &str, width: usize) -> String {
    let ch = if ch.is_empty() { "-" } else { ch };
    ch.repeat(width)
}

/// Wrap free text (reasons, comments) for the detail views.
pub fn wrap_text(text: &str, width: usize) -> String {
    textwrap::fill(text, width)
}
