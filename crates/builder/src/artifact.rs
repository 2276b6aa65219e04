//! Compiled extension module naming and lookup

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use wheelwright_config::ProjectLayout;
use wheelwright_errors::{BuildError, Error};
use wheelwright_platform::fs;

use crate::interpreter::PythonVersion;

/// File name of a CPython extension module built for one interpreter and platform
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArtifactName {
    module: String,
    python: PythonVersion,
    platform_tag: String,
}

impl ArtifactName {
    #[must_use]
    pub fn new(module: impl Into<String>, python: PythonVersion, platform_tag: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            python,
            platform_tag: platform_tag.into(),
        }
    }

    /// `.cpython-311-darwin.so`
    #[must_use]
    pub fn suffix(&self) -> String {
        format!(".cpython-{}-{}.so", self.python.tag(), self.platform_tag)
    }

    /// `_cmd.cpython-311-darwin.so`
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}{}", self.module, self.suffix())
    }

    #[must_use]
    pub fn python(&self) -> PythonVersion {
        self.python
    }
}

impl fmt::Display for ArtifactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.file_name())
    }
}

/// Where a compiled artifact was found
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArtifactSource {
    /// Local CMake release build
    BuildOutput(PathBuf),
    /// Checked-in fallback copy
    PreBuilt(PathBuf),
}

impl ArtifactSource {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::BuildOutput(path) | Self::PreBuilt(path) => path,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::BuildOutput(_) => "build output",
            Self::PreBuilt(_) => "pre-built",
        }
    }
}

/// Candidate locations in lookup order
#[must_use]
pub fn candidates(layout: &ProjectLayout, name: &ArtifactName) -> [ArtifactSource; 2] {
    let file_name = name.file_name();
    [
        ArtifactSource::BuildOutput(layout.build_release_dir().join(&file_name)),
        ArtifactSource::PreBuilt(layout.prebuilt_dir().join(&file_name)),
    ]
}

/// First candidate that exists on disk
pub async fn locate_artifact(layout: &ProjectLayout, name: &ArtifactName) -> Option<ArtifactSource> {
    for candidate in candidates(layout, name) {
        if fs::exists(candidate.path()).await {
            debug!(path = %candidate.path().display(), source = candidate.label(), "found artifact");
            return Some(candidate);
        }
        debug!(path = %candidate.path().display(), "artifact candidate missing");
    }
    None
}

/// Pick the artifact to package, preferring the local build output
///
/// # Errors
///
/// Returns [`BuildError::ArtifactNotFound`] when no candidate exists.
pub async fn select_artifact(layout: &ProjectLayout, name: &ArtifactName) -> Result<ArtifactSource, Error> {
    if let Some(source) = locate_artifact(layout, name).await {
        return Ok(source);
    }

    let searched = candidates(layout, name)
        .iter()
        .map(|c| c.path().display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    Err(BuildError::ArtifactNotFound {
        file: name.file_name(),
        searched,
    }
    .into())
}

/// Copy the selected artifact into the staged package directory
///
/// # Errors
///
/// Returns an error if the copy fails.
pub async fn copy_artifact(
    source: &ArtifactSource,
    name: &ArtifactName,
    layout: &ProjectLayout,
) -> Result<PathBuf, Error> {
    let destination = layout.staged_package_dir().join(name.file_name());
    fs::copy_file(source.path(), &destination).await?;
    info!(
        from = %source.path().display(),
        to = %destination.display(),
        source = source.label(),
        "staged compiled artifact"
    );
    Ok(destination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use wheelwright_config::LayoutConfig;

    fn name() -> ArtifactName {
        ArtifactName::new("_cmd", PythonVersion::new(3, 11), "darwin")
    }

    #[test]
    fn file_name_follows_cpython_pattern() {
        assert_eq!(name().file_name(), "_cmd.cpython-311-darwin.so");
        assert_eq!(name().suffix(), ".cpython-311-darwin.so");

        let py310 = ArtifactName::new("_cmd", PythonVersion::new(3, 10), "darwin");
        assert_eq!(py310.to_string(), "_cmd.cpython-310-darwin.so");
    }

    #[tokio::test]
    async fn prefers_build_output_over_prebuilt() {
        let temp = tempdir().unwrap();
        let layout = ProjectLayout::resolve(temp.path().to_path_buf(), &LayoutConfig::default(), None);
        for dir in [layout.build_release_dir(), layout.prebuilt_dir()] {
            std::fs::create_dir_all(dir).unwrap();
            std::fs::write(dir.join(name().file_name()), b"so").unwrap();
        }

        let source = select_artifact(&layout, &name()).await.unwrap();
        assert!(matches!(source, ArtifactSource::BuildOutput(_)));
    }

    #[tokio::test]
    async fn missing_everywhere_lists_both_candidates() {
        let temp = tempdir().unwrap();
        let layout = ProjectLayout::resolve(temp.path().to_path_buf(), &LayoutConfig::default(), None);

        let err = select_artifact(&layout, &name()).await.unwrap_err();
        assert!(err.is_not_found());
        match err {
            Error::Build(BuildError::ArtifactNotFound { file, searched }) => {
                assert_eq!(file, "_cmd.cpython-311-darwin.so");
                assert!(searched.contains("cmake-build-release"));
                assert!(searched.contains("pre-built"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
