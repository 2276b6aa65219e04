//! Native process operations implementation
//!
//! Commands run through `tokio::process` and are awaited to completion before
//! control returns to the caller.

use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tracing::{debug, warn};
use wheelwright_errors::{Error, PlatformError};

use crate::process::{CommandOutput, OutputMode, PlatformCommand, ProcessOperations};

/// Host implementation of process operations
pub struct NativeProcessOperations;

impl NativeProcessOperations {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NativeProcessOperations {
    fn default() -> Self {
        Self::new()
    }
}

fn duration_to_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn spawn_error(cmd: &PlatformCommand, err: &std::io::Error) -> PlatformError {
    if err.kind() == std::io::ErrorKind::NotFound {
        PlatformError::CommandNotFound {
            command: cmd.program().display().to_string(),
        }
    } else {
        PlatformError::ProcessExecutionFailed {
            command: cmd.to_string(),
            message: err.to_string(),
        }
    }
}

/// Run with stdin and stderr inherited and stdout wired to `stdout`
async fn run_streamed(
    command: &mut Command,
    stdout: Stdio,
    cmd: &PlatformCommand,
) -> Result<CommandOutput, PlatformError> {
    let status = command
        .stdin(Stdio::inherit())
        .stdout(stdout)
        .stderr(Stdio::inherit())
        .status()
        .await
        .map_err(|e| spawn_error(cmd, &e))?;
    Ok(CommandOutput {
        success: status.success(),
        exit_code: status.code(),
        stdout: Vec::new(),
        stderr: Vec::new(),
    })
}

#[async_trait]
impl ProcessOperations for NativeProcessOperations {
    async fn execute_command(&self, cmd: PlatformCommand) -> Result<CommandOutput, Error> {
        let start = Instant::now();
        debug!(command = %cmd, cwd = ?cmd.get_current_dir(), "executing command");

        let mut command = Command::new(cmd.program());
        command.args(cmd.get_args());

        if let Some(dir) = cmd.get_current_dir() {
            command.current_dir(dir);
        }

        let output = match cmd.get_output_mode() {
            OutputMode::Inherit => run_streamed(&mut command, Stdio::inherit(), &cmd).await?,
            OutputMode::InheritToStderr => {
                run_streamed(&mut command, Stdio::from(std::io::stderr()), &cmd).await?
            }
            OutputMode::Capture => {
                let output = command
                    .stdin(Stdio::null())
                    .output()
                    .await
                    .map_err(|e| spawn_error(&cmd, &e))?;
                CommandOutput {
                    success: output.status.success(),
                    exit_code: output.status.code(),
                    stdout: output.stdout,
                    stderr: output.stderr,
                }
            }
        };

        let duration_ms = duration_to_millis(start.elapsed());
        if output.success {
            debug!(command = %cmd, duration_ms, "command completed");
        } else {
            warn!(command = %cmd, exit_code = ?output.exit_code, duration_ms, "command failed");
        }

        Ok(output)
    }

    async fn which(&self, program: &str) -> Result<PathBuf, Error> {
        which::which(program).map_err(|_| {
            Error::from(PlatformError::CommandNotFound {
                command: program.to_string(),
            })
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn captures_stdout_and_exit_code() {
        let ops = NativeProcessOperations::new();
        let mut cmd = PlatformCommand::new("sh");
        cmd.args(["-c", "echo 3.12; exit 3"])
            .output_mode(OutputMode::Capture);

        let output = ops.execute_command(cmd).await.unwrap();
        assert!(!output.success);
        assert_eq!(output.exit_code, Some(3));
        assert_eq!(output.stdout_text(), "3.12");
    }

    #[tokio::test]
    async fn missing_program_is_command_not_found() {
        let ops = NativeProcessOperations::new();
        let cmd = PlatformCommand::new("/definitely/not/here/pip");

        let err = ops.execute_command(cmd).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Platform(PlatformError::CommandNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn runs_in_requested_directory() {
        let temp = tempfile::tempdir().unwrap();
        let ops = NativeProcessOperations::new();
        let mut cmd = PlatformCommand::new("sh");
        cmd.args(["-c", "touch marker"])
            .current_dir(temp.path())
            .output_mode(OutputMode::Capture);

        let output = ops.execute_command(cmd).await.unwrap();
        assert!(output.success);
        assert!(temp.path().join("marker").exists());
    }

    #[tokio::test]
    async fn stdout_redirected_to_stderr_still_reports_status() {
        let ops = NativeProcessOperations::new();
        let mut cmd = PlatformCommand::new("sh");
        cmd.args(["-c", "echo running sdist; exit 4"])
            .output_mode(OutputMode::InheritToStderr);

        let output = ops.execute_command(cmd).await.unwrap();
        assert_eq!(output.exit_code, Some(4));
        assert!(output.stdout.is_empty());
    }

    #[tokio::test]
    async fn which_finds_shell_and_reports_missing_programs() {
        let ops = NativeProcessOperations::new();
        assert!(ops.which("sh").await.unwrap().is_absolute());

        let err = ops.which("wheelwright-no-such-python").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Platform(PlatformError::CommandNotFound { ref command })
                if command == "wheelwright-no-such-python"
        ));
    }
}
