//! `build_wheel`: stage sources and the compiled module, then run `setup.py`

use std::path::PathBuf;

use tracing::{info, warn};
use wheelwright_errors::Error;
use wheelwright_platform::fs;

use crate::artifact::{copy_artifact, select_artifact, ArtifactName, ArtifactSource};
use crate::core::builder::WheelBuilder;
use crate::staging::{stage_sources, StagingGuard};

/// Packaging command run by the interpreter
pub const SETUP_PY_ARGS: [&str; 3] = ["setup.py", "sdist", "bdist_wheel"];

/// Outcome of a successful `build_wheel`
#[derive(Clone, Debug)]
pub struct WheelReport {
    pub artifact: ArtifactName,
    /// Where the artifact came from; `None` when a pre-existing staged
    /// directory was packaged as-is
    pub artifact_source: Option<ArtifactSource>,
    /// Directory `setup.py` writes the sdist and wheel into
    pub dist_dir: PathBuf,
}

impl WheelReport {
    #[must_use]
    pub fn staging_skipped(&self) -> bool {
        self.artifact_source.is_none()
    }
}

impl WheelBuilder {
    /// Build the sdist and wheel for the Python package
    ///
    /// The staging root is removed afterwards whether packaging succeeded or not.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The interpreter version cannot be determined
    /// - Staging the sources fails or no compiled artifact exists
    /// - `setup.py` exits with a non-zero status
    /// - The staging root cannot be removed
    pub async fn build_wheel(&self) -> Result<WheelReport, Error> {
        let artifact = self.artifact_name().await?;
        info!(artifact = %artifact, "building wheel");

        let guard = StagingGuard::new(self.context.layout.staging_root());
        let packaged = self.stage_and_package(&artifact).await;
        let cleanup = guard.finish().await;

        // A packaging failure is the more useful report
        let artifact_source = packaged?;
        cleanup?;

        Ok(WheelReport {
            artifact,
            artifact_source,
            dist_dir: self.context.layout.dist_dir().to_path_buf(),
        })
    }

    async fn stage_and_package(&self, artifact: &ArtifactName) -> Result<Option<ArtifactSource>, Error> {
        let layout = &self.context.layout;
        let python = self.python_program().await?;

        let source = if fs::exists(layout.staged_package_dir()).await {
            warn!(
                path = %layout.staged_package_dir().display(),
                "staged package directory already exists, packaging it as-is (a self-compiled module may have been placed there)"
            );
            None
        } else {
            stage_sources(&self.context.config.staging, layout).await?;
            let source = select_artifact(layout, artifact).await?;
            copy_artifact(&source, artifact, layout).await?;
            Some(source)
        };

        let cmd = self.project_command(&python, SETUP_PY_ARGS);
        self.run_checked(cmd).await?;

        Ok(source)
    }
}
