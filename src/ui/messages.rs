use crate::api::ErrorKind;
use crate::errors::AppError;
use crate::utils::date::format_period;
use std::fmt;

/// ANSI colors
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

const FG_BLUE: &str = "\x1b[34m";
const FG_GREEN: &str = "\x1b[32m";
const FG_YELLOW: &str = "\x1b[33m";
const FG_RED: &str = "\x1b[31m";

/// Icons
const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";

pub const SESSION_EXPIRED: &str = "Session expired. Please login again.";

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_BLUE, BOLD, ICON_INFO, RESET, msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_GREEN, BOLD, ICON_OK, RESET, msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_YELLOW, BOLD, ICON_WARN, RESET, msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{}{}{} {}{}", FG_RED, BOLD, ICON_ERR, RESET, msg);
}

/// Formatted section header
pub fn header<T: fmt::Display>(msg: T) {
    println!("{}{}== {} =={}", FG_BLUE, BOLD, msg, RESET);
}

/// Lines describing a failure, in the order they are printed.
///
/// Backend validation errors list one line per field, overlap conflicts
/// list the proposed ranges numbered from 1.
pub fn describe(err: &AppError) -> Vec<String> {
    let Some(api) = err.api() else {
        return vec![err.to_string()];
    };

    match api.kind() {
        ErrorKind::Unauthorized => vec![SESSION_EXPIRED.to_string()],
        ErrorKind::Validation => {
            let mut lines = vec![api.message.clone()];
            lines.extend(
                api.field_errors
                    .iter()
                    .map(|f| format!("  {}: {}", f.field, f.message)),
            );
            lines
        }
        ErrorKind::Conflict => {
            let mut lines = vec![
                api.message.clone(),
                "Available date suggestions:".to_string(),
            ];
            lines.extend(api.suggestions.iter().enumerate().map(|(i, s)| {
                format!("  [{}] {}", i + 1, format_period(s.start_date, s.end_date))
            }));
            lines
        }
        ErrorKind::Other => vec![api.message.clone()],
    }
}

/// Print a failure on stderr.
pub fn report(err: &AppError) {
    let mut lines = describe(err).into_iter();
    if let Some(first) = lines.next() {
        error(first);
    }
    for line in lines {
        eprintln!("{line}");
    }
}
