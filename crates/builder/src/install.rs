//! `clean_install`: refresh staged sources and `pip install` the project

use std::path::PathBuf;

use tracing::info;
use wheelwright_errors::Error;
use wheelwright_platform::fs;

use crate::core::builder::WheelBuilder;
use crate::staging::stage_sources;

/// Arguments passed to the virtual environment's pip
pub const PIP_INSTALL_ARGS: [&str; 2] = ["install", "."];

/// Outcome of a successful `clean_install`
#[derive(Clone, Debug)]
pub struct InstallReport {
    pub pip: PathBuf,
    pub staged: Vec<PathBuf>,
    /// Whether a stale build output directory was deleted
    pub removed_build_dir: bool,
}

impl WheelBuilder {
    /// Wipe the setup.py build directory and install the project into the venv
    ///
    /// Staged sources are left in place for the installed project.
    ///
    /// # Errors
    ///
    /// Returns an error if staging fails, the build directory cannot be
    /// removed, or pip exits with a non-zero status.
    pub async fn clean_install(&self) -> Result<InstallReport, Error> {
        let layout = &self.context.layout;
        let pip = layout.pip_executable();

        let staged = stage_sources(&self.context.config.staging, layout).await?;

        let removed_build_dir = fs::remove_dir_all_if_exists(layout.setup_py_build_dir()).await?;
        if removed_build_dir {
            info!(path = %layout.setup_py_build_dir().display(), "removed stale build output");
        }

        let cmd = self.project_command(&pip, PIP_INSTALL_ARGS);
        self.run_checked(cmd).await?;

        Ok(InstallReport {
            pip,
            staged,
            removed_build_dir,
        })
    }
}
