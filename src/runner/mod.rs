//! Task execution engine
//!
//! This module handles the execution of the task graph: the runtime task
//! registry, the memoized concurrent engine, and the command runner.

pub mod command;
pub mod engine;
pub mod task;

// Re-export main types
pub use command::*;
pub use engine::*;
pub use task::*;
