//! Console reporting
//!
//! The engine and command runner emit semantic events; this module owns all
//! formatting, coloring, and timestamps.

use std::path::Path;
use std::time::Duration;

use chrono::Local;
use colored::Colorize;

/// Formats run events for the terminal.
///
/// Stateless and cheap to clone; one reporter is shared by the CLI, the
/// engine, and the command runner.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reporter;

impl Reporter {
    pub fn new() -> Self {
        Reporter
    }

    /// Print a message prefixed with the current wall-clock time.
    fn stamped(&self, message: &str) {
        let time = Local::now().format("%H:%M:%S").to_string();
        println!("[{}] {}", time.dimmed(), message);
    }

    pub fn using_file(&self, path: &Path) {
        println!("Using file {}", path.display().to_string().magenta());
    }

    pub fn task_started(&self, name: &str) {
        self.stamped(&format!("Starting {}...", name.cyan().bold()));
    }

    pub fn task_finished(&self, name: &str, elapsed: Duration) {
        self.stamped(&format!(
            "Finished {} after {} seconds",
            name.cyan().bold(),
            format_seconds(elapsed).magenta()
        ));
    }

    pub fn run_finished(&self, elapsed: Duration) {
        self.stamped(&format!(
            "{} after {} seconds",
            "All done".green(),
            format_seconds(elapsed).magenta()
        ));
    }

    /// Header naming the task and command, printed once before any of the
    /// command's output.
    pub fn command_header(&self, task: &str, command: &str) {
        self.stamped(&format!("{} {}", task.cyan(), command.magenta()));
    }

    pub fn command_stdout(&self, line: &str) {
        println!("{}", line.white());
    }

    pub fn command_stderr(&self, line: &str) {
        println!("{}", line.yellow());
    }

    pub fn available_tasks(&self, names: &[String]) {
        println!("{}", "Available tasks:".yellow());
        for name in names {
            println!("  {}", name);
        }
    }
}

/// Print the single fatal error line and nothing else.
pub fn print_error(message: &str) {
    eprintln!("\n{}", format!("ERROR: {}", message).red());
}

fn format_seconds(elapsed: Duration) -> String {
    format!("{:.2}", elapsed.as_secs_f64())
}
