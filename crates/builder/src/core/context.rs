//! Build context for wheel building

use std::sync::Arc;

use wheelwright_config::{Config, ProjectLayout};
use wheelwright_errors::Error;
use wheelwright_platform::{NativeProcessOperations, OutputMode, ProcessOperations};

/// Resolved configuration plus the process runner every step goes through
#[derive(Clone)]
pub struct BuildContext {
    /// Effective configuration
    pub config: Config,
    /// Paths resolved against the project root
    pub layout: ProjectLayout,
    process: Arc<dyn ProcessOperations>,
    child_output: OutputMode,
}

impl BuildContext {
    /// Create a context that runs commands on the host
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn new(config: Config) -> Result<Self, Error> {
        Self::with_process(config, Arc::new(NativeProcessOperations::new()))
    }

    /// Create a context with a custom process runner
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn with_process(config: Config, process: Arc<dyn ProcessOperations>) -> Result<Self, Error> {
        config.validate()?;
        let layout = config.layout();
        Ok(Self {
            config,
            layout,
            process,
            child_output: OutputMode::Inherit,
        })
    }

    /// Route the output of `setup.py` and `pip`
    ///
    /// Use [`OutputMode::InheritToStderr`] when stdout is reserved for
    /// machine-readable reports.
    #[must_use]
    pub fn with_child_output(mut self, mode: OutputMode) -> Self {
        self.child_output = mode;
        self
    }

    #[must_use]
    pub fn process(&self) -> &dyn ProcessOperations {
        self.process.as_ref()
    }

    #[must_use]
    pub fn child_output(&self) -> OutputMode {
        self.child_output
    }
}

impl std::fmt::Debug for BuildContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildContext")
            .field("config", &self.config)
            .field("layout", &self.layout)
            .field("child_output", &self.child_output)
            .finish_non_exhaustive()
    }
}
