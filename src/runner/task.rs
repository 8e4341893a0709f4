//! Runtime task representation and lookup
//!
//! This module contains the normalized task type the engine executes and the
//! registry that owns the name-to-task table for one run.

use crate::config::TaskBody;
use crate::error::{ExecutionError, ExecutionResult};
use std::collections::HashMap;

/// How a task's commands talk to the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecStyle {
    /// Capture stdout/stderr in full and emit them after the command exits
    #[default]
    Buffered,

    /// Forward output live through an interactively spawned shell
    Streaming,
}

/// Runtime task
///
/// This differs from config::TaskBody by carrying the task's name and the
/// execution style resolved from the `spawn` flag. Immutable once built.
#[derive(Debug, Clone)]
pub struct Task {
    /// Task name, unique within a registry
    pub name: String,

    /// Names of tasks that must complete before this one runs
    pub preconditions: Vec<String>,

    /// Shell commands, run strictly in this order
    pub commands: Vec<String>,

    /// Output paths; existence of any one marks the task up to date
    pub outputs: Vec<String>,

    /// Execution style for all of this task's commands
    pub style: ExecStyle,
}

impl Task {
    /// Create a runtime task from a task file body
    pub fn from_config(name: String, body: TaskBody) -> Self {
        let style = if body.spawn {
            ExecStyle::Streaming
        } else {
            ExecStyle::Buffered
        };

        Task {
            name,
            preconditions: body.pre,
            commands: body.cmd,
            outputs: body.out,
            style,
        }
    }
}

/// Name-to-task table for one run
///
/// Built once from the parsed task file; read-only afterwards.
#[derive(Debug, Default)]
pub struct Registry {
    tasks: HashMap<String, Task>,
}

impl Registry {
    /// Build the registry from a parsed task file
    pub fn load(config: crate::config::Config) -> Self {
        let tasks = config
            .tasks
            .into_iter()
            .map(|(name, body)| (name.clone(), Task::from_config(name, body)))
            .collect();

        Registry { tasks }
    }

    /// All task names in ascending lexicographic order
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tasks.keys().cloned().collect();
        names.sort();
        names
    }

    /// Returns true if the task exists
    pub fn contains(&self, name: &str) -> bool {
        self.tasks.contains_key(name)
    }

    /// Look up a task by name
    pub fn get(&self, name: &str) -> ExecutionResult<&Task> {
        self.tasks
            .get(name)
            .ok_or_else(|| ExecutionError::UnknownTask(name.to_string()))
    }

    /// Number of registered tasks
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
