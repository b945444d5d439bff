//! Terminal output utilities

use agentstack_packaging::{ProgressLevel, ProgressReporter};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

const BANNER: &str = r"
    _                    _   ____  _             _
   / \   __ _  ___ _ __ | |_/ ___|| |_ __ _  ___| | __
  / _ \ / _` |/ _ \ '_ \| __\___ \| __/ _` |/ __| |/ /
 / ___ \ (_| |  __/ | | | |_ ___) | || (_| | (__|   <
/_/   \_\__, |\___|_| |_|\__|____/ \__\__,_|\___|_|\_\
        |___/";

const TAGLINE: &str = "The easiest way to build a robust agent application!";

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red().bold(), msg);
}

/// Print a warning message
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("⚠").yellow().bold(), msg);
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}

/// Print a header
pub fn header(msg: &str) {
    println!("\n{}", style(msg).bold().underlined());
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("  {}: {}", style(key).dim(), value);
}

/// Print the ASCII-art welcome shown by `init`
pub fn welcome() {
    let border = "-".repeat(TAGLINE.chars().count());
    println!("{}", style(BANNER).cyan().bold());
    println!("{}", border);
    println!("{}", TAGLINE);
    println!("{}", border);
}

/// Create a spinner
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Prints progress above a running spinner
///
/// The spinner line is cleared while a message is written and redrawn
/// afterwards, so messages never interleave with spinner frames.
pub struct SpinnerReporter {
    pb: ProgressBar,
}

impl SpinnerReporter {
    pub fn new(msg: &str) -> Self {
        Self { pb: spinner(msg) }
    }

    /// Stop the spinner and remove it from the terminal
    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }
}

impl ProgressReporter for SpinnerReporter {
    fn report(&self, level: ProgressLevel, message: &str) {
        tracing::debug!("{}", message);
        self.pb.suspend(|| match level {
            ProgressLevel::Info => info(message),
            ProgressLevel::Success => success(message),
            ProgressLevel::Warning => warning(message),
            ProgressLevel::Error => error(message),
        });
    }
}

impl Drop for SpinnerReporter {
    fn drop(&mut self) {
        if !self.pb.is_finished() {
            self.pb.finish_and_clear();
        }
    }
}
