//! Error types for Graft

use std::io;
use thiserror::Error;

/// Result type alias for Graft operations
pub type Result<T> = std::result::Result<T, GraftError>;

/// Main error type for Graft
#[derive(Error, Debug)]
pub enum GraftError {
    /// Configuration-related errors
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Task execution errors
    #[error(transparent)]
    Execution(#[from] ExecutionError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// YAML parsing errors
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Task file parsing and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to find task file (searched: {0})")]
    NotFound(String),

    #[error("invalid task file: {0}")]
    Invalid(String),

    #[error("circular precondition chain: {0}")]
    CircularPreconditions(String),
}

/// Task execution errors
///
/// `Clone` because a task's outcome is shared between every dependent
/// awaiting the same memoized handle.
#[derive(Error, Debug, Clone)]
pub enum ExecutionError {
    #[error("task '{0}' is not defined")]
    UnknownTask(String),

    #[error("task '{task}': command `{command}` failed with exit code {code:?}")]
    CommandFailed {
        task: String,
        command: String,
        code: Option<i32>,
    },

    #[error("task '{task}': failed to run `{command}`: {error}")]
    CommandIo {
        task: String,
        command: String,
        error: String,
    },

    #[error("precondition '{precondition}' of task '{task}' failed: {source}")]
    PreconditionFailed {
        task: String,
        precondition: String,
        source: Box<ExecutionError>,
    },
}

impl ExecutionError {
    /// Walk a precondition chain down to the error that started it.
    pub fn root_cause(&self) -> &ExecutionError {
        match self {
            ExecutionError::PreconditionFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Specialized result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Specialized result type for execution operations
pub type ExecutionResult<T> = std::result::Result<T, ExecutionError>;
