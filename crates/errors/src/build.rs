//! Wheel build error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum BuildError {
    #[error("compiled artifact {file} not found (searched {searched})")]
    ArtifactNotFound { file: String, searched: String },

    #[error("command `{command}` exited with {}", describe_exit(.exit_code))]
    CommandFailed {
        command: String,
        exit_code: Option<i32>,
    },

    #[error("staging failed: {message}")]
    StagingFailed { message: String },

    #[error("invalid python version: {value}")]
    InvalidPythonVersion { value: String },

    #[error("cleanup of {path} failed: {message}")]
    CleanupFailed { path: String, message: String },
}

#[allow(clippy::ref_option)]
fn describe_exit(code: &Option<i32>) -> String {
    code.map_or_else(|| "a signal".to_string(), |c| format!("code {c}"))
}

impl UserFacingError for BuildError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::ArtifactNotFound { .. } => Some(
                "Build the _cmd module with CMake (cmake-build-release) or place a pre-built copy in pre-built/.",
            ),
            Self::CommandFailed { .. } => {
                Some("Inspect the command output above; the staged sources were removed.")
            }
            Self::StagingFailed { .. } => {
                Some("Check that the source tree exists under the project root.")
            }
            Self::InvalidPythonVersion { .. } => {
                Some("Pass --python-version X.Y or point --python at a working interpreter.")
            }
            Self::CleanupFailed { .. } => Some("Remove the staging directory by hand."),
        }
    }

    fn is_retryable(&self) -> bool {
        false
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::ArtifactNotFound { .. } => "build.artifact_not_found",
            Self::CommandFailed { .. } => "build.command_failed",
            Self::StagingFailed { .. } => "build.staging_failed",
            Self::InvalidPythonVersion { .. } => "build.invalid_python_version",
            Self::CleanupFailed { .. } => "build.cleanup_failed",
        };
        Some(code)
    }
}
