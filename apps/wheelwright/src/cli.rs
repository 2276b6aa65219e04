//! Command line interface definition

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// wheelwright - Build and install the PyMOL Python wheel
#[derive(Parser)]
#[command(name = "wheelwright")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Build and install the PyMOL Python wheel")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Global arguments available for all commands
#[derive(Parser)]
pub struct GlobalArgs {
    /// Project root (defaults to the current directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub project_root: Option<PathBuf>,

    /// Python interpreter used for setup.py (defaults to .venv/bin/python)
    #[arg(long, global = true, value_name = "PATH")]
    pub python: Option<PathBuf>,

    /// Interpreter version as X.Y instead of asking the interpreter
    #[arg(long, global = true, value_name = "X.Y")]
    pub python_version: Option<String>,

    /// Use alternate config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging to .wheelwright/logs/
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Stage sources and the compiled module, then build sdist and wheel
    #[command(alias = "wheel")]
    BuildWheel,

    /// Remove the setup.py build directory and pip install the project
    #[command(alias = "install")]
    CleanInstall,

    /// Show the compiled module name and where it would be taken from
    Artifact,

    /// Print the effective configuration
    ShowConfig,
}
