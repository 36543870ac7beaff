//! Terminal output formatting.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Prints a success message.
pub fn success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Prints a warning message.
pub fn warning(message: &str) {
    eprintln!("{} {}", style("⚠").yellow().bold(), message);
}

/// Prints an info message.
pub fn info(message: &str) {
    println!("{} {}", style("ℹ").blue().bold(), message);
}

/// Prints a key-value pair.
pub fn key_value(key: &str, value: &str) {
    println!("  {}: {}", style(key).dim(), value);
}

/// Creates a spinner that turns into a byte counter once a download starts.
pub fn create_download_bar(message: &str) -> ProgressBar {
    let bar = ProgressBar::no_length();
    bar.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .expect("Invalid spinner template"),
    );
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}

/// Switches a download bar to byte progress.
pub fn start_transfer(bar: &ProgressBar, total: Option<u64>) {
    let template = match total {
        Some(_) => "{spinner:.green} [{bar:40.cyan/blue}] {bytes}/{total_bytes} {msg}",
        None => "{spinner:.green} {bytes} {msg}",
    };

    bar.set_style(
        ProgressStyle::default_bar()
            .template(template)
            .expect("Invalid progress bar template")
            .progress_chars("█▓░"),
    );

    if let Some(total) = total {
        bar.set_length(total);
    }
}
