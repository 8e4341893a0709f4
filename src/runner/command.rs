//! Command execution
//!
//! This module runs one shell command under either of the two execution
//! styles. The engine is its only caller and stays strategy-agnostic.

use std::process::Stdio;

use tokio::io::{self, AsyncReadExt, AsyncWriteExt};
use tokio::process::Command;

use crate::error::{ExecutionError, ExecutionResult};
use crate::runner::engine::RunOptions;
use crate::runner::task::ExecStyle;
use crate::ui::Reporter;

/// Runs shell commands and reports their output
///
/// Stateless apart from the run options and the reporter it forwards
/// output through.
#[derive(Debug, Clone)]
pub struct CommandRunner {
    options: RunOptions,
    reporter: Reporter,
}

impl CommandRunner {
    pub fn new(options: RunOptions, reporter: Reporter) -> Self {
        CommandRunner { options, reporter }
    }

    /// Run one command to completion under the given style
    pub async fn run(&self, task: &str, command: &str, style: ExecStyle) -> ExecutionResult<()> {
        match style {
            ExecStyle::Buffered => self.run_buffered(task, command).await,
            ExecStyle::Streaming => self.run_streaming(task, command).await,
        }
    }

    /// Run the command to completion, capturing stdout/stderr in full.
    ///
    /// Captured stdout is emitted only on failure or when the `all` option is
    /// set; captured stderr is emitted on failure or unless `mute` is set.
    async fn run_buffered(&self, task: &str, command: &str) -> ExecutionResult<()> {
        let output = Command::new("sh")
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| command_io(task, command, &e))?;

        let failed = !output.status.success();
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        let mut header_printed = false;

        if failed || (self.options.all && !stdout.trim().is_empty()) {
            self.reporter.command_header(task, command);
            header_printed = true;
            for line in stdout.trim().lines() {
                self.reporter.command_stdout(line);
            }
        }

        if failed || (!self.options.mute && !stderr.trim().is_empty()) {
            if !header_printed {
                self.reporter.command_header(task, command);
            }
            for line in stderr.trim().lines() {
                self.reporter.command_stderr(line);
            }
        }

        if failed {
            return Err(ExecutionError::CommandFailed {
                task: task.to_string(),
                command: command.to_string(),
                code: output.status.code(),
            });
        }

        Ok(())
    }

    /// Spawn a shell, feed it the command text over stdin, and forward its
    /// output live.
    ///
    /// A header naming the task and command is printed once, on the first
    /// chunk from either stream. The shell's exit code decides success.
    async fn run_streaming(&self, task: &str, command: &str) -> ExecutionResult<()> {
        let mut child = Command::new("sh")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| command_io(task, command, &e))?;

        // Hand the shell its script and close its input so it terminates
        let mut stdin = child.stdin.take().expect("stdin is piped");
        stdin
            .write_all(command.as_bytes())
            .await
            .map_err(|e| command_io(task, command, &e))?;
        drop(stdin);

        let mut stdout = child.stdout.take().expect("stdout is piped");
        let mut stderr = child.stderr.take().expect("stderr is piped");

        let mut out_sink = io::stdout();
        let mut err_sink = io::stderr();
        let mut out_buf = [0u8; 8192];
        let mut err_buf = [0u8; 8192];
        let mut out_open = true;
        let mut err_open = true;
        let mut header_printed = false;

        while out_open || err_open {
            tokio::select! {
                read = stdout.read(&mut out_buf), if out_open => {
                    match read.map_err(|e| command_io(task, command, &e))? {
                        0 => out_open = false,
                        n => {
                            if !header_printed {
                                self.reporter.command_header(task, command);
                                header_printed = true;
                            }
                            out_sink
                                .write_all(&out_buf[..n])
                                .await
                                .map_err(|e| command_io(task, command, &e))?;
                            out_sink
                                .flush()
                                .await
                                .map_err(|e| command_io(task, command, &e))?;
                        }
                    }
                }
                read = stderr.read(&mut err_buf), if err_open => {
                    match read.map_err(|e| command_io(task, command, &e))? {
                        0 => err_open = false,
                        n => {
                            if !header_printed {
                                self.reporter.command_header(task, command);
                                header_printed = true;
                            }
                            err_sink
                                .write_all(&err_buf[..n])
                                .await
                                .map_err(|e| command_io(task, command, &e))?;
                            err_sink
                                .flush()
                                .await
                                .map_err(|e| command_io(task, command, &e))?;
                        }
                    }
                }
            }
        }

        let status = child
            .wait()
            .await
            .map_err(|e| command_io(task, command, &e))?;

        if !status.success() {
            return Err(ExecutionError::CommandFailed {
                task: task.to_string(),
                command: command.to_string(),
                code: status.code(),
            });
        }

        Ok(())
    }
}

fn command_io(task: &str, command: &str, error: &std::io::Error) -> ExecutionError {
    ExecutionError::CommandIo {
        task: task.to_string(),
        command: command.to_string(),
        error: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn runner(options: RunOptions) -> CommandRunner {
        CommandRunner::new(options, Reporter::new())
    }

    #[tokio::test]
    async fn test_buffered_success() {
        let result = runner(RunOptions::default())
            .run("t", "echo test", ExecStyle::Buffered)
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_buffered_failure_carries_exit_code() {
        let result = runner(RunOptions::default())
            .run("t", "exit 2", ExecStyle::Buffered)
            .await;

        assert!(matches!(
            result,
            Err(ExecutionError::CommandFailed { code: Some(2), .. })
        ));
    }

    #[tokio::test]
    async fn test_buffered_missing_program_fails() {
        let result = runner(RunOptions::default())
            .run("t", "definitely_not_a_real_program_xyz", ExecStyle::Buffered)
            .await;

        // The shell launches fine and reports 127 for the missing program
        assert!(matches!(
            result,
            Err(ExecutionError::CommandFailed { code: Some(127), .. })
        ));
    }

    #[tokio::test]
    async fn test_buffered_failure_names_task_and_command() {
        let result = runner(RunOptions::default())
            .run("deploy", "exit 1", ExecStyle::Buffered)
            .await;

        match result {
            Err(ExecutionError::CommandFailed { task, command, .. }) => {
                assert_eq!(task, "deploy");
                assert_eq!(command, "exit 1");
            }
            other => panic!("expected CommandFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_streaming_runs_command_to_completion() {
        let temp_dir = TempDir::new().unwrap();
        let marker = temp_dir.path().join("ran.txt");

        let result = runner(RunOptions::default())
            .run(
                "t",
                &format!("echo streamed > {}", marker.display()),
                ExecStyle::Streaming,
            )
            .await;

        assert!(result.is_ok());
        assert!(fs::read_to_string(&marker).unwrap().contains("streamed"));
    }

    #[tokio::test]
    async fn test_streaming_nonzero_exit_is_failure() {
        let result = runner(RunOptions::default())
            .run("t", "exit 3", ExecStyle::Streaming)
            .await;

        assert!(matches!(
            result,
            Err(ExecutionError::CommandFailed { code: Some(3), .. })
        ));
    }

    #[tokio::test]
    async fn test_streaming_multiline_script() {
        let temp_dir = TempDir::new().unwrap();
        let marker = temp_dir.path().join("multi.txt");

        // The whole command text goes to the shell's stdin as one script
        let script = format!("echo one >> {m}\necho two >> {m}", m = marker.display());
        let result = runner(RunOptions::default())
            .run("t", &script, ExecStyle::Streaming)
            .await;

        assert!(result.is_ok());
        assert_eq!(fs::read_to_string(&marker).unwrap(), "one\ntwo\n");
    }
}
