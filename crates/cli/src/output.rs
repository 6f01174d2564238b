//! Output formatting utilities

use clap::ValueEnum;
use colored::Colorize;
use estimator_lib::ResourceRange;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

/// Shown in place of values that need manual sizing
pub const NOT_AVAILABLE: &str = "n/a";

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Render rows as a rounded table
pub fn render_table<T: Tabled>(rows: &[T]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Print a table from a list of items
pub fn print_table<T: Tabled>(items: &[T]) {
    if items.is_empty() {
        println!("{}", "No items found".yellow());
        return;
    }
    println!("{}", render_table(items));
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Format a quantity without trailing zeros: 2 -> "2", 0.25 -> "0.25"
pub fn format_quantity(value: f64) -> String {
    let formatted = format!("{:.2}", value);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Format a size in gigabytes
pub fn format_gb(value: f64) -> String {
    format!("{}G", format_quantity(value))
}

/// Format a request/limit pair, collapsing equal values
pub fn format_range(range: ResourceRange, unit: &str) -> String {
    if range.request == range.limit {
        format!("{}{}", format_quantity(range.limit), unit)
    } else {
        format!(
            "{}{} / {}{}",
            format_quantity(range.request),
            unit,
            format_quantity(range.limit),
            unit
        )
    }
}

/// Dash for zero values
pub fn or_dash(value: f64, render: impl Fn(f64) -> String) -> String {
    if value > 0.0 {
        render(value)
    } else {
        "-".to_string()
    }
}
