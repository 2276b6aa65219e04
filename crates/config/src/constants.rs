//! Fixed project layout defaults
//!
//! Every path here is relative to the project root. They match the layout of a
//! PyMOL checkout prepared for wheel builds and can be overridden in `[layout]`.

pub const CONFIG_FILE_NAME: &str = "wheelwright.toml";
pub const APP_DIR_NAME: &str = "wheelwright";

pub const STAGING_ROOT: &str = "src";
pub const STAGED_PACKAGE_DIR: &str = "src/python/pymol";
pub const SOURCE_TREE: &str = "modules/pymol";

pub const BUILD_RELEASE_DIR: &str = "cmake-build-release";
pub const PREBUILT_DIR: &str = "pre-built";
pub const SETUP_PY_BUILD_DIR: &str = "cmake-build-setup_py";
pub const DIST_DIR: &str = "dist";

pub const VENV_DIR: &str = ".venv";
pub const LOGS_DIR: &str = ".wheelwright/logs";

pub const MODULE_NAME: &str = "_cmd";
pub const PLATFORM_TAG: &str = "darwin";
