//! CLI interface and argument parsing
//!
//! This module handles command-line parsing and drives a whole run, from
//! task file discovery through engine execution.

pub mod app;

// Re-export main types
pub use app::*;
