//! Output formatting utilities

use clap::ValueEnum;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Print a table from a list of rows
pub fn print_table<T: Tabled>(items: &[T]) {
    if items.is_empty() {
        println!("{}", "No items found".yellow());
        return;
    }
    let table = Table::new(items).with(Style::rounded()).to_string();
    println!("{}", table);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Format MiB as human-readable string
pub fn format_mib(mib: f64) -> String {
    const GIB: f64 = 1024.0;

    if mib >= GIB {
        format!("{:.2}Gi", mib / GIB)
    } else if mib >= 1.0 {
        format!("{:.2}Mi", mib)
    } else if mib > 0.0 {
        format!("{:.2}Ki", mib * 1024.0)
    } else {
        "0".to_string()
    }
}

/// Format cores as human-readable string
pub fn format_cpu(cores: f64) -> String {
    if cores >= 1.0 || cores == 0.0 {
        format!("{:.2}", cores)
    } else {
        format!("{:.0}m", cores * 1000.0)
    }
}

/// Share of `capacity` taken by `used`, as a percentage
pub fn utilization(used: f64, capacity: f64) -> Option<f64> {
    (capacity > 0.0).then(|| used / capacity * 100.0)
}

/// Format utilization as a percentage
pub fn format_utilization(percent: Option<f64>) -> String {
    match percent {
        Some(p) => format!("{:.0}%", p),
        None => "-".to_string(),
    }
}

/// Color utilization based on value
pub fn color_utilization(percent: Option<f64>) -> String {
    let formatted = format_utilization(percent);
    match percent {
        Some(p) if p > 100.0 => formatted.red().to_string(),
        Some(p) if p >= 80.0 => formatted.yellow().to_string(),
        Some(_) => formatted.green().to_string(),
        None => formatted,
    }
}
