//! Process execution operations

use async_trait::async_trait;
use std::fmt;
use std::path::{Path, PathBuf};
use wheelwright_errors::Error;

/// How a command's standard streams are wired
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Pass stdout/stderr straight through to the caller's streams
    #[default]
    Inherit,
    /// Like `Inherit`, but the command's stdout goes to the caller's stderr
    InheritToStderr,
    /// Collect stdout/stderr into the returned [`CommandOutput`]
    Capture,
}

/// Platform-specific command builder
#[derive(Clone, Debug)]
pub struct PlatformCommand {
    program: PathBuf,
    args: Vec<String>,
    current_dir: Option<PathBuf>,
    output_mode: OutputMode,
}

impl PlatformCommand {
    /// Create a new platform command
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
            output_mode: OutputMode::default(),
        }
    }

    /// Add multiple arguments to the command
    pub fn args<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for arg in args {
            self.args.push(arg.as_ref().to_string());
        }
        self
    }

    /// Set the working directory for the command
    pub fn current_dir<P: Into<PathBuf>>(&mut self, dir: P) -> &mut Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Choose how the command's output is handled
    pub fn output_mode(&mut self, mode: OutputMode) -> &mut Self {
        self.output_mode = mode;
        self
    }

    /// Get the program path
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Get the arguments
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Get the current directory
    pub fn get_current_dir(&self) -> Option<&PathBuf> {
        self.current_dir.as_ref()
    }

    /// Get the output mode
    pub fn get_output_mode(&self) -> OutputMode {
        self.output_mode
    }
}

impl fmt::Display for PlatformCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Output from command execution
///
/// `stdout` and `stderr` are only filled in for [`OutputMode::Capture`].
#[derive(Clone, Debug, Default)]
pub struct CommandOutput {
    pub success: bool,
    pub exit_code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    /// Captured stdout as trimmed UTF-8 (lossy)
    #[must_use]
    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).trim().to_string()
    }
}

/// Trait for process execution operations
#[async_trait]
pub trait ProcessOperations: Send + Sync {
    /// Execute a command, blocking the caller until it exits
    ///
    /// A non-zero exit is reported through [`CommandOutput::success`], not as an error.
    /// Errors are reserved for commands that could not be started.
    async fn execute_command(&self, cmd: PlatformCommand) -> Result<CommandOutput, Error>;

    /// Create a new command builder
    fn create_command(&self, program: &Path) -> PlatformCommand {
        PlatformCommand::new(program)
    }

    /// Find the path to an executable
    async fn which(&self, program: &str) -> Result<PathBuf, Error>;
}
