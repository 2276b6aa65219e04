#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for wheelwright
//!
//! This crate is the constants provider for the wheel builder. It resolves the
//! project root, the interpreter and the directory layout from:
//! - Default values (see [`constants`])
//! - Configuration file (`<root>/wheelwright.toml` or `~/.config/wheelwright/config.toml`)
//! - Environment variables
//! - CLI flags

pub mod constants;
pub mod layout;

pub use layout::ProjectLayout;

use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tracing::debug;
use wheelwright_errors::{ConfigError, Error};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub project: ProjectConfig,

    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub staging: StagingConfig,
}

/// Project and interpreter settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectConfig {
    /// Project root; the current directory when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
    /// Interpreter used for packaging; `<root>/.venv/bin/python` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub python: Option<PathBuf>,
    /// Pinned `X.Y` interpreter version; queried from the interpreter when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub python_version: Option<String>,
    #[serde(default = "default_platform_tag")]
    pub platform_tag: String,
    #[serde(default = "default_module_name")]
    pub module_name: String,
}

/// Directory layout, relative to the project root
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LayoutConfig {
    #[serde(default = "default_staging_root")]
    pub staging_root: PathBuf,
    #[serde(default = "default_staged_package_dir")]
    pub staged_package_dir: PathBuf,
    #[serde(default = "default_build_release_dir")]
    pub build_release_dir: PathBuf,
    #[serde(default = "default_prebuilt_dir")]
    pub prebuilt_dir: PathBuf,
    #[serde(default = "default_setup_py_build_dir")]
    pub setup_py_build_dir: PathBuf,
    #[serde(default = "default_dist_dir")]
    pub dist_dir: PathBuf,
    #[serde(default = "default_venv_dir")]
    pub venv_dir: PathBuf,
}

/// Source staging settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StagingConfig {
    #[serde(default = "default_sources")]
    pub sources: Vec<SourceMapping>,
}

/// One directory copied by the staging utility
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceMapping {
    pub from: PathBuf,
    pub to: PathBuf,
}

// Default implementations

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            root: None,
            python: None,
            python_version: None,
            platform_tag: default_platform_tag(),
            module_name: default_module_name(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            staging_root: default_staging_root(),
            staged_package_dir: default_staged_package_dir(),
            build_release_dir: default_build_release_dir(),
            prebuilt_dir: default_prebuilt_dir(),
            setup_py_build_dir: default_setup_py_build_dir(),
            dist_dir: default_dist_dir(),
            venv_dir: default_venv_dir(),
        }
    }
}

impl Default for StagingConfig {
    fn default() -> Self {
        Self {
            sources: default_sources(),
        }
    }
}

// Default value functions for serde
fn default_platform_tag() -> String {
    constants::PLATFORM_TAG.to_string()
}

fn default_module_name() -> String {
    constants::MODULE_NAME.to_string()
}

fn default_staging_root() -> PathBuf {
    PathBuf::from(constants::STAGING_ROOT)
}

fn default_staged_package_dir() -> PathBuf {
    PathBuf::from(constants::STAGED_PACKAGE_DIR)
}

fn default_build_release_dir() -> PathBuf {
    PathBuf::from(constants::BUILD_RELEASE_DIR)
}

fn default_prebuilt_dir() -> PathBuf {
    PathBuf::from(constants::PREBUILT_DIR)
}

fn default_setup_py_build_dir() -> PathBuf {
    PathBuf::from(constants::SETUP_PY_BUILD_DIR)
}

fn default_dist_dir() -> PathBuf {
    PathBuf::from(constants::DIST_DIR)
}

fn default_venv_dir() -> PathBuf {
    PathBuf::from(constants::VENV_DIR)
}

fn default_sources() -> Vec<SourceMapping> {
    vec![SourceMapping {
        from: PathBuf::from(constants::SOURCE_TREE),
        to: PathBuf::from(constants::STAGED_PACKAGE_DIR),
    }]
}

impl Config {
    /// Get the user-level config file path
    ///
    /// # Errors
    ///
    /// Returns an error if the system config directory cannot be determined.
    pub fn default_path() -> Result<PathBuf, Error> {
        let config_dir = dirs::config_dir().ok_or_else(|| ConfigError::NotFound {
            path: "config directory".to_string(),
        })?;
        Ok(config_dir.join(constants::APP_DIR_NAME).join("config.toml"))
    }

    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the file contents
    /// contain invalid TOML syntax that cannot be parsed.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)
            .await
            .map_err(|_| ConfigError::NotFound {
                path: path.display().to_string(),
            })?;

        debug!(path = %path.display(), "loaded configuration file");

        toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError {
                message: e.to_string(),
            })
            .map_err(Into::into)
    }

    /// Load configuration with fallback to defaults
    ///
    /// Looks for `wheelwright.toml` in `project_dir` first, then the user-level
    /// config file.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file exists but cannot be read
    /// or contains invalid TOML syntax.
    pub async fn load(project_dir: &Path) -> Result<Self, Error> {
        let project_file = project_dir.join(constants::CONFIG_FILE_NAME);
        if fs::try_exists(&project_file).await.unwrap_or(false) {
            return Self::load_from_file(&project_file).await;
        }

        if let Ok(user_file) = Self::default_path() {
            if fs::try_exists(&user_file).await.unwrap_or(false) {
                return Self::load_from_file(&user_file).await;
            }
        }
        Ok(Self::default())
    }

    /// Load configuration from an optional path or use default
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub async fn load_or_default(path: Option<&Path>, project_dir: &Path) -> Result<Self, Error> {
        match path {
            Some(config_path) => Self::load_from_file(config_path).await,
            None => Self::load(project_dir).await,
        }
    }

    /// Merge with environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        self.merge_env_from(|key| std::env::var(key).ok())
    }

    /// Merge values from an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an empty value.
    pub fn merge_env_from<F>(&mut self, lookup: F) -> Result<(), Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        // WHEELWRIGHT_PROJECT_ROOT
        if let Some(root) = lookup("WHEELWRIGHT_PROJECT_ROOT") {
            self.project.root = Some(PathBuf::from(non_empty("WHEELWRIGHT_PROJECT_ROOT", root)?));
        }

        // WHEELWRIGHT_PYTHON
        if let Some(python) = lookup("WHEELWRIGHT_PYTHON") {
            self.project.python = Some(PathBuf::from(non_empty("WHEELWRIGHT_PYTHON", python)?));
        }

        // WHEELWRIGHT_PYTHON_VERSION
        if let Some(version) = lookup("WHEELWRIGHT_PYTHON_VERSION") {
            self.project.python_version = Some(non_empty("WHEELWRIGHT_PYTHON_VERSION", version)?);
        }

        // WHEELWRIGHT_PLATFORM_TAG
        if let Some(tag) = lookup("WHEELWRIGHT_PLATFORM_TAG") {
            self.project.platform_tag = non_empty("WHEELWRIGHT_PLATFORM_TAG", tag)?;
        }

        Ok(())
    }

    /// Check values that cannot be expressed through serde defaults
    ///
    /// Every directory that gets deleted (the staging root, staging
    /// destinations and the setup.py build directory) must be a plain relative
    /// path below the project root.
    ///
    /// # Errors
    ///
    /// Returns an error if a naming field is empty, a removable directory is
    /// empty, absolute or uses `.`/`..`, or a staged directory does not live
    /// strictly below the staging root.
    pub fn validate(&self) -> Result<(), Error> {
        if self.project.module_name.trim().is_empty() {
            return Err(invalid("project.module_name", &self.project.module_name));
        }
        if self.project.platform_tag.trim().is_empty() {
            return Err(invalid("project.platform_tag", &self.project.platform_tag));
        }

        let layout = &self.layout;
        require_subdir("layout.staging_root", &layout.staging_root)?;
        require_subdir("layout.setup_py_build_dir", &layout.setup_py_build_dir)?;
        require_below(
            "layout.staged_package_dir",
            &layout.staged_package_dir,
            &layout.staging_root,
        )?;
        for mapping in &self.staging.sources {
            require_below("staging.sources.to", &mapping.to, &layout.staging_root)?;
        }
        Ok(())
    }

    /// Get the project root (with default)
    #[must_use]
    pub fn project_root(&self) -> PathBuf {
        self.project
            .root
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }

    /// Resolve every configured path against the project root
    #[must_use]
    pub fn layout(&self) -> ProjectLayout {
        ProjectLayout::resolve(self.project_root(), &self.layout, self.project.python.as_deref())
    }

    /// Render the configuration as TOML
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, Error> {
        toml::to_string_pretty(self).map_err(|e| {
            ConfigError::SerializeError {
                error: e.to_string(),
            }
            .into()
        })
    }
}

/// `path` is non-empty and made only of normal components
fn require_subdir(field: &str, path: &Path) -> Result<(), Error> {
    let mut components = path.components().peekable();
    let plain = components.peek().is_some()
        && components.all(|c| matches!(c, Component::Normal(_)));
    if plain {
        Ok(())
    } else {
        Err(invalid(field, &path.display().to_string()))
    }
}

/// `path` is a plain relative path strictly below `parent`
fn require_below(field: &str, path: &Path, parent: &Path) -> Result<(), Error> {
    require_subdir(field, path)?;
    if path.starts_with(parent) && path != parent {
        Ok(())
    } else {
        Err(invalid(field, &path.display().to_string()))
    }
}

fn non_empty(field: &str, value: String) -> Result<String, Error> {
    if value.trim().is_empty() {
        Err(invalid(field, &value))
    } else {
        Ok(value)
    }
}

fn invalid(field: &str, value: &str) -> Error {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    }
    .into()
}
