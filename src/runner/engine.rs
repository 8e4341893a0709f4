//! Dependency-graph execution
//!
//! The engine walks the precondition graph for a requested root task,
//! running independent preconditions concurrently while keeping each task's
//! own commands strictly sequential. A per-run memo of shared futures
//! guarantees that a task reachable over several paths executes exactly
//! once, with every dependent observing the same outcome.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use futures::future::{try_join_all, BoxFuture, Shared};
use futures::{FutureExt, TryFutureExt};

use crate::error::{ExecutionError, ExecutionResult};
use crate::runner::command::CommandRunner;
use crate::runner::task::Registry;
use crate::ui::Reporter;

/// Options controlling a single run
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Rebuild even when declared outputs already exist
    pub force: bool,

    /// Suppress stderr from successful buffered commands
    pub mute: bool,

    /// Emit stdout from successful buffered commands
    pub all: bool,
}

/// How a task resolved within one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The task's commands ran to completion (or it had none)
    Completed,

    /// A declared output already existed; commands were not run
    Skipped,
}

/// A task's shared execution handle: cloned by every dependent, resolved once
type TaskFuture = Shared<BoxFuture<'static, ExecutionResult<Outcome>>>;

/// Executes the task graph for one run
///
/// Cheap to clone; all clones share the same registry, options, and memo.
/// The memo lives and dies with the run, so independent runs never
/// interfere.
#[derive(Clone)]
pub struct Engine {
    inner: Arc<Inner>,
}

struct Inner {
    registry: Registry,
    options: RunOptions,
    runner: CommandRunner,
    reporter: Reporter,
    memo: Mutex<HashMap<String, TaskFuture>>,
}

impl Engine {
    pub fn new(registry: Registry, options: RunOptions, reporter: Reporter) -> Self {
        Engine {
            inner: Arc::new(Inner {
                registry,
                options,
                runner: CommandRunner::new(options, reporter),
                reporter,
                memo: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Run the graph rooted at `root` to completion
    pub async fn run(&self, root: &str) -> ExecutionResult<Outcome> {
        self.lookup(root).await
    }

    /// Memoized lookup of a task's execution handle.
    ///
    /// The handle is registered under the memo lock before anything can poll
    /// it, so a concurrently discovered reference to the same task observes
    /// the in-progress handle instead of starting a duplicate execution.
    fn lookup(&self, name: &str) -> TaskFuture {
        let mut memo = self.inner.memo.lock().expect("memo lock poisoned");

        if let Some(handle) = memo.get(name) {
            return handle.clone();
        }

        let engine = self.clone();
        let task_name = name.to_string();
        let handle = async move { engine.run_task(&task_name).await }
            .boxed()
            .shared();
        memo.insert(name.to_string(), handle.clone());
        handle
    }

    async fn run_task(&self, name: &str) -> ExecutionResult<Outcome> {
        let task = self.inner.registry.get(name)?.clone();

        // Fan out over the preconditions and join them all. The first
        // failure wins; the remaining handles are dropped, which kills any
        // subprocess still running under them once the run unwinds.
        let pending: Vec<_> = task
            .preconditions
            .iter()
            .map(|pre| {
                let dependent = task.name.clone();
                let precondition = pre.clone();
                self.lookup(pre)
                    .map_err(move |source| ExecutionError::PreconditionFailed {
                        task: dependent,
                        precondition,
                        source: Box::new(source),
                    })
            })
            .collect();
        try_join_all(pending).await?;

        // Up-to-date check: any one existing output satisfies the task
        if !self.inner.options.force && task.outputs.iter().any(|out| Path::new(out).exists()) {
            return Ok(Outcome::Skipped);
        }

        // A task with no commands only fans out to its preconditions
        if task.commands.is_empty() {
            return Ok(Outcome::Completed);
        }

        self.inner.reporter.task_started(&task.name);
        let started = Instant::now();

        // Commands are strictly sequential, unlike preconditions
        for command in &task.commands {
            self.inner
                .runner
                .run(&task.name, command, task.style)
                .await?;
        }

        self.inner
            .reporter
            .task_finished(&task.name, started.elapsed());

        Ok(Outcome::Completed)
    }
}
