//! RAII guard for staging directory cleanup
//!
//! The guard removes the staging tree on every exit path: explicitly through
//! [`StagingGuard::finish`] on the normal path, and from `Drop` when an error
//! or panic unwinds past it.

use std::path::PathBuf;

use tracing::{debug, warn};
use wheelwright_errors::{BuildError, Error};
use wheelwright_platform::fs;

/// Owns a staging directory for the duration of a build
#[derive(Debug)]
pub struct StagingGuard {
    path: Option<PathBuf>,
}

impl StagingGuard {
    /// Create a guard for `path`; the directory does not need to exist yet
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Remove the staging directory now
    ///
    /// Returns whether a directory was removed.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::CleanupFailed`] if the directory exists but cannot be removed.
    pub async fn finish(mut self) -> Result<bool, Error> {
        let Some(path) = self.path.take() else {
            return Ok(false);
        };
        fs::remove_dir_all_if_exists(&path).await.map_err(|e| {
            BuildError::CleanupFailed {
                path: path.display().to_string(),
                message: e.to_string(),
            }
            .into()
        })
    }
}

impl Drop for StagingGuard {
    fn drop(&mut self) {
        if let Some(path) = self.path.take() {
            // Drop cannot await; fall back to a blocking removal
            match std::fs::remove_dir_all(&path) {
                Ok(()) => debug!(path = %path.display(), "removed staging directory on unwind"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => warn!(path = %path.display(), error = %e, "failed to remove staging directory"),
            }
        }
    }
}
