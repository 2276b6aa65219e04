#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]
//! Wheel assembly for the PyMOL Python package
//!
//! This crate stages the pure-Python sources together with the compiled
//! `_cmd` extension module, drives `setup.py` to produce the sdist and wheel,
//! and offers a clean `pip install` of the project into its virtual environment.

pub mod artifact;
mod core;
mod install;
pub mod interpreter;
pub mod staging;
mod wheel;

pub use artifact::{ArtifactName, ArtifactSource};
pub use crate::core::builder::{ArtifactReport, WheelBuilder};
pub use crate::core::context::BuildContext;
pub use install::{InstallReport, PIP_INSTALL_ARGS};
pub use interpreter::{detect_python_version, PythonVersion};
pub use staging::{stage_sources, StagingGuard};
pub use wheel::{WheelReport, SETUP_PY_ARGS};
pub use wheelwright_platform::OutputMode;
