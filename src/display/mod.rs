//! Text rendering for terminal output.

mod rows;

pub use rows::{
    AttendanceRow, EmployeeRow, LeaveRow, NotificationRow, PayrollRow, TaskRow,
};

use owo_colors::OwoColorize;
use serde_json::Value;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::model::Resource;

/// A record kind that renders as one row of a list table.
pub trait TableRow: Resource {
    type Row: Tabled;

    fn row(&self) -> Self::Row;
}

/// Render records as a rounded table.
pub fn render_table<R: TableRow>(items: &[R]) -> String {
    let rows: Vec<R::Row> = items.iter().map(TableRow::row).collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

/// Render a list with its count footer, or a placeholder line when empty.
pub fn render_list<R: TableRow>(items: &[R]) -> String {
    if items.is_empty() {
        return format!("No {} found.", R::LABEL).dimmed().to_string();
    }
    format!("{}\n\n{} {}", render_table(items), items.len(), R::LABEL)
}

/// Format a date string for display
///
/// Keeps just the date part (YYYY-MM-DD) of an ISO datetime string.
/// Shorter strings are returned unchanged.
///
/// # Examples
///
/// ```
/// use officehub::display::format_date_for_display;
///
/// assert_eq!(format_date_for_display("2024-01-15T10:30:00Z"), "2024-01-15");
/// assert_eq!(format_date_for_display("2024-01-15"), "2024-01-15");
/// assert_eq!(format_date_for_display("short"), "short");
/// ```
pub fn format_date_for_display(date_str: &str) -> String {
    date_str.chars().take(10).collect()
}

/// Truncate a string to at most `max_len` characters, adding `...` when cut.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}

/// Money amounts always show two decimals.
pub fn format_amount(amount: f64) -> String {
    format!("{amount:.2}")
}

/// Render a statistics object as indented `key: value` lines.
pub fn format_stats(title: &str, stats: &Value) -> String {
    let mut out = format!("{}\n", title.cyan().bold());
    write_stats(&mut out, stats, 1);
    out.truncate(out.trim_end().len());
    out
}

fn write_stats(out: &mut String, value: &Value, depth: usize) {
    let indent = "  ".repeat(depth);
    let Value::Object(map) = value else {
        out.push_str(&format!("{indent}{}\n", format_scalar(value)));
        return;
    };

    for (key, value) in map {
        let label = key.replace('_', " ");
        match value {
            Value::Object(inner) if inner.is_empty() => {
                out.push_str(&format!("{indent}{}: {}\n", label.cyan(), "none".dimmed()));
            }
            Value::Object(_) => {
                out.push_str(&format!("{indent}{}:\n", label.cyan()));
                write_stats(out, value, depth + 1);
            }
            scalar => {
                out.push_str(&format!("{indent}{}: {}\n", label.cyan(), format_scalar(scalar)));
            }
        }
    }
}

fn format_scalar(value: &Value) -> String {
    match value {
        Value::Number(n) if n.is_f64() => n.as_f64().map(format_amount).unwrap_or_default(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
