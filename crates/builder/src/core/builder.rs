//! Wheel builder entry point and shared helpers

use std::path::{Path, PathBuf};

use tracing::{debug, info};
use wheelwright_errors::{BuildError, Error};
use wheelwright_platform::{fs, PlatformCommand};

use super::context::BuildContext;
use crate::artifact::{locate_artifact, ArtifactName, ArtifactSource};
use crate::interpreter::{detect_python_version, PythonVersion};

/// Assembles and installs the PyMOL Python package
#[derive(Clone, Debug)]
pub struct WheelBuilder {
    pub(crate) context: BuildContext,
}

/// What `artifact` resolution would do, without touching the filesystem
#[derive(Clone, Debug)]
pub struct ArtifactReport {
    pub name: ArtifactName,
    /// Candidate that would be copied, `None` if neither exists
    pub selected: Option<ArtifactSource>,
    /// A pre-existing staged package directory disables staging
    pub staged_dir_exists: bool,
}

impl WheelBuilder {
    #[must_use]
    pub fn new(context: BuildContext) -> Self {
        Self { context }
    }

    #[must_use]
    pub fn context(&self) -> &BuildContext {
        &self.context
    }

    /// Interpreter version from config, or from the interpreter itself
    ///
    /// # Errors
    ///
    /// Returns an error if the pinned version is malformed or the interpreter
    /// cannot be queried.
    pub async fn python_version(&self) -> Result<PythonVersion, Error> {
        if let Some(pinned) = &self.context.config.project.python_version {
            debug!(version = %pinned, "using pinned interpreter version");
            return pinned.parse();
        }
        let python = self.python_program().await?;
        detect_python_version(self.context.process(), &python).await
    }

    /// Interpreter to run, with a bare program name looked up on `PATH`
    ///
    /// # Errors
    ///
    /// Returns an error if a bare name cannot be found on `PATH`.
    pub async fn python_program(&self) -> Result<PathBuf, Error> {
        let python = self.context.layout.python_executable();
        match python.to_str() {
            Some(name) if !python.is_absolute() && python.components().count() == 1 => {
                let resolved = self.context.process().which(name).await?;
                debug!(name, resolved = %resolved.display(), "resolved interpreter on PATH");
                Ok(resolved)
            }
            _ => Ok(python.to_path_buf()),
        }
    }

    /// Name of the compiled module for the active interpreter
    ///
    /// # Errors
    ///
    /// Returns an error if the interpreter version cannot be determined.
    pub async fn artifact_name(&self) -> Result<ArtifactName, Error> {
        let project = &self.context.config.project;
        let python = self.python_version().await?;
        Ok(ArtifactName::new(
            project.module_name.clone(),
            python,
            project.platform_tag.clone(),
        ))
    }

    /// Report which artifact `build_wheel` would pick
    ///
    /// # Errors
    ///
    /// Returns an error if the interpreter version cannot be determined.
    pub async fn describe_artifact(&self) -> Result<ArtifactReport, Error> {
        let name = self.artifact_name().await?;
        let layout = &self.context.layout;
        Ok(ArtifactReport {
            selected: locate_artifact(layout, &name).await,
            staged_dir_exists: fs::exists(layout.staged_package_dir()).await,
            name,
        })
    }

    /// Build a command that runs in the project root with output streamed through
    pub(crate) fn project_command<I, S>(&self, program: &Path, args: I) -> PlatformCommand
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cmd = self.context.process().create_command(program);
        cmd.args(args)
            .current_dir(self.context.layout.root())
            .output_mode(self.context.child_output());
        cmd
    }

    /// Run a command to completion, turning a non-zero exit into an error
    pub(crate) async fn run_checked(&self, cmd: PlatformCommand) -> Result<(), Error> {
        let rendered = cmd.to_string();
        info!(command = %rendered, "running");

        let output = self.context.process().execute_command(cmd).await?;
        if output.success {
            Ok(())
        } else {
            Err(BuildError::CommandFailed {
                command: rendered,
                exit_code: output.exit_code,
            }
            .into())
        }
    }
}
