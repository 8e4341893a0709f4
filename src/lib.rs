//! Graft - A minimal YAML-based build-task orchestrator
//!
//! Graft reads a `graft.yml` task file, resolves the precondition graph for a
//! requested task, runs independent preconditions concurrently, skips tasks
//! whose declared outputs already exist, and executes each task's shell
//! commands in order.

// Public modules
pub mod cli;
pub mod config;
pub mod error;
pub mod runner;
pub mod ui;

// Re-export commonly used types
pub use error::{GraftError, Result};

/// Current version of Graft
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
