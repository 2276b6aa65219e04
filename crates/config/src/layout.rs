//! Absolute project paths derived from [`LayoutConfig`](crate::LayoutConfig)

use std::path::{Path, PathBuf};

use crate::{LayoutConfig, SourceMapping};

/// Resolved filesystem layout of a project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
    staging_root: PathBuf,
    staged_package_dir: PathBuf,
    build_release_dir: PathBuf,
    prebuilt_dir: PathBuf,
    setup_py_build_dir: PathBuf,
    dist_dir: PathBuf,
    venv_dir: PathBuf,
    python: PathBuf,
}

impl ProjectLayout {
    /// Resolve `layout` against `root`
    ///
    /// `python` overrides the virtual environment's interpreter. A bare program
    /// name is left for `PATH` lookup; other relative paths are taken relative
    /// to the root.
    #[must_use]
    pub fn resolve(root: PathBuf, layout: &LayoutConfig, python: Option<&Path>) -> Self {
        let venv_dir = root.join(&layout.venv_dir);
        let python = match python {
            Some(p) if p.is_absolute() || p.components().count() == 1 => p.to_path_buf(),
            Some(p) => root.join(p),
            None => venv_dir.join("bin").join("python"),
        };
        Self {
            staging_root: root.join(&layout.staging_root),
            staged_package_dir: root.join(&layout.staged_package_dir),
            build_release_dir: root.join(&layout.build_release_dir),
            prebuilt_dir: root.join(&layout.prebuilt_dir),
            setup_py_build_dir: root.join(&layout.setup_py_build_dir),
            dist_dir: root.join(&layout.dist_dir),
            venv_dir,
            python,
            root,
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Top-level directory removed after packaging
    #[must_use]
    pub fn staging_root(&self) -> &Path {
        &self.staging_root
    }

    /// Package directory the compiled artifact is copied into
    #[must_use]
    pub fn staged_package_dir(&self) -> &Path {
        &self.staged_package_dir
    }

    /// Primary artifact location (local CMake release build)
    #[must_use]
    pub fn build_release_dir(&self) -> &Path {
        &self.build_release_dir
    }

    /// Fallback artifact location
    #[must_use]
    pub fn prebuilt_dir(&self) -> &Path {
        &self.prebuilt_dir
    }

    /// Build output removed before a clean install
    #[must_use]
    pub fn setup_py_build_dir(&self) -> &Path {
        &self.setup_py_build_dir
    }

    #[must_use]
    pub fn dist_dir(&self) -> &Path {
        &self.dist_dir
    }

    /// Interpreter used for `setup.py` and version probing
    #[must_use]
    pub fn python_executable(&self) -> &Path {
        &self.python
    }

    /// The virtual environment's package manager
    #[must_use]
    pub fn pip_executable(&self) -> PathBuf {
        self.venv_dir.join("bin").join("pip")
    }

    /// Resolve a staging mapping to absolute `(from, to)` paths
    #[must_use]
    pub fn source_mapping(&self, mapping: &SourceMapping) -> (PathBuf, PathBuf) {
        (self.root.join(&mapping.from), self.root.join(&mapping.to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_default_layout_under_root() {
        let layout = ProjectLayout::resolve(PathBuf::from("/work/pymol"), &LayoutConfig::default(), None);

        assert_eq!(layout.staging_root(), Path::new("/work/pymol/src"));
        assert_eq!(
            layout.staged_package_dir(),
            Path::new("/work/pymol/src/python/pymol")
        );
        assert_eq!(
            layout.build_release_dir(),
            Path::new("/work/pymol/cmake-build-release")
        );
        assert_eq!(layout.prebuilt_dir(), Path::new("/work/pymol/pre-built"));
        assert_eq!(
            layout.setup_py_build_dir(),
            Path::new("/work/pymol/cmake-build-setup_py")
        );
        assert_eq!(
            layout.pip_executable(),
            PathBuf::from("/work/pymol/.venv/bin/pip")
        );
        assert_eq!(
            layout.python_executable(),
            Path::new("/work/pymol/.venv/bin/python")
        );
    }

    #[test]
    fn absolute_python_override_wins() {
        let layout = ProjectLayout::resolve(
            PathBuf::from("/work/pymol"),
            &LayoutConfig::default(),
            Some(Path::new("/usr/bin/python3")),
        );
        assert_eq!(layout.python_executable(), Path::new("/usr/bin/python3"));
    }

    #[test]
    fn bare_python_name_is_left_for_path_lookup() {
        let config = LayoutConfig::default();
        let root = PathBuf::from("/work/pymol");

        let bare = ProjectLayout::resolve(root.clone(), &config, Some(Path::new("python3.12")));
        assert_eq!(bare.python_executable(), Path::new("python3.12"));

        let nested = ProjectLayout::resolve(root, &config, Some(Path::new("tools/bin/python")));
        assert_eq!(
            nested.python_executable(),
            Path::new("/work/pymol/tools/bin/python")
        );
    }
}
