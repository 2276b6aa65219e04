//! wheelwright - Build and install the PyMOL Python wheel
//!
//! This is the CLI front end over the builder crate: it resolves configuration,
//! runs one operation and renders its report.

mod cli;
mod display;
mod error;

use crate::cli::{Cli, Commands, GlobalArgs};
use crate::display::OutputRenderer;
use crate::error::CliError;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process;
use tracing::{error, info};
use wheelwright_builder::{BuildContext, OutputMode, WheelBuilder};
use wheelwright_config::{constants, Config};

#[tokio::main]
async fn main() {
    // Parse command line arguments first to check for JSON mode
    let cli = Cli::parse();
    let json_mode = cli.global.json;
    let renderer = OutputRenderer::new(json_mode);

    init_tracing(json_mode, cli.global.debug, &project_dir(&cli.global));

    if let Err(e) = run(cli, &renderer).await {
        error!("Application error: {}", e);
        renderer.render_error(e.code(), &e.to_string());
        process::exit(1);
    }
}

/// Main application logic
async fn run(cli: Cli, renderer: &OutputRenderer) -> Result<(), CliError> {
    info!("Starting wheelwright v{}", env!("CARGO_PKG_VERSION"));

    // 1. Start with file config (or defaults)
    let mut config =
        Config::load_or_default(cli.global.config.as_deref(), &project_dir(&cli.global)).await?;

    // 2. Merge environment variables
    config.merge_env()?;

    // 3. Apply CLI flags (highest precedence)
    apply_cli_config(&mut config, &cli.global);

    match cli.command {
        Commands::ShowConfig => renderer.render_config(&config.to_toml()?),
        Commands::BuildWheel => {
            let report = create_builder(config, cli.global.json)?.build_wheel().await?;
            renderer.render_wheel_report(&report);
        }
        Commands::CleanInstall => {
            let report = create_builder(config, cli.global.json)?.clean_install().await?;
            renderer.render_install_report(&report);
        }
        Commands::Artifact => {
            let report = create_builder(config, cli.global.json)?.describe_artifact().await?;
            renderer.render_artifact_report(&report);
        }
    }

    Ok(())
}

fn create_builder(config: Config, json_mode: bool) -> Result<WheelBuilder, CliError> {
    let context = BuildContext::new(config)?.with_child_output(child_output(json_mode));
    let builder = WheelBuilder::new(context);
    info!(root = %builder.context().layout.root().display(), "resolved project");
    Ok(builder)
}

/// Keep stdout for the JSON report when `--json` is set
fn child_output(json_mode: bool) -> OutputMode {
    if json_mode {
        OutputMode::InheritToStderr
    } else {
        OutputMode::Inherit
    }
}

/// Directory searched for `wheelwright.toml`: flag, then environment, then cwd
fn project_dir(global: &GlobalArgs) -> PathBuf {
    global
        .project_root
        .clone()
        .or_else(|| std::env::var_os("WHEELWRIGHT_PROJECT_ROOT").map(PathBuf::from))
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Apply CLI configuration overrides (highest precedence)
fn apply_cli_config(config: &mut Config, global: &GlobalArgs) {
    if let Some(root) = &global.project_root {
        config.project.root = Some(root.clone());
    }
    if let Some(python) = &global.python {
        config.project.python = Some(python.clone());
    }
    if let Some(version) = &global.python_version {
        config.project.python_version = Some(version.clone());
    }
}

fn init_tracing(json_mode: bool, debug_enabled_flag: bool, project_dir: &Path) {
    let debug_enabled = std::env::var("RUST_LOG").is_ok() || debug_enabled_flag;

    if debug_enabled {
        // Debug mode: structured JSON logs to file
        let log_dir = project_dir.join(constants::LOGS_DIR);
        if let Err(e) = std::fs::create_dir_all(&log_dir) {
            if !json_mode {
                eprintln!("Warning: Failed to create log directory: {e}");
            }
        }

        let log_file = log_dir.join(format!(
            "wheelwright-{}.log",
            chrono::Utc::now().format("%Y%m%d-%H%M%S")
        ));

        match std::fs::File::create(&log_file) {
            Ok(file) => {
                tracing_subscriber::fmt()
                    .json()
                    .with_writer(file)
                    .with_env_filter(
                        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(
                            |_| {
                                tracing_subscriber::EnvFilter::new(
                                    "info,wheelwright=debug,wheelwright_builder=debug,wheelwright_platform=debug",
                                )
                            },
                        ),
                    )
                    .init();

                if !json_mode {
                    eprintln!("Debug logging enabled: {}", log_file.display());
                }
                return;
            }
            Err(e) if !json_mode => {
                eprintln!("Warning: Failed to create log file: {e}");
            }
            Err(_) => {}
        }
    }

    if json_mode {
        // JSON mode: keep stderr quiet so output stays machine readable
        tracing_subscriber::fmt()
            .with_writer(std::io::sink)
            .with_env_filter("off")
            .init();
    } else {
        // Normal mode: minimal logging to stderr
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_flags_override_config() {
        let cli = Cli::try_parse_from([
            "wheelwright",
            "artifact",
            "--project-root",
            "/work/pymol",
            "--python",
            "/opt/python/bin/python3",
            "--python-version",
            "3.12",
        ])
        .unwrap();

        let mut config = Config::default();
        config.project.python_version = Some("3.10".to_string());
        apply_cli_config(&mut config, &cli.global);

        assert_eq!(config.project.root, Some(PathBuf::from("/work/pymol")));
        assert_eq!(
            config.project.python,
            Some(PathBuf::from("/opt/python/bin/python3"))
        );
        assert_eq!(config.project.python_version.as_deref(), Some("3.12"));
    }

    #[test]
    fn json_mode_moves_child_stdout_to_stderr() {
        let cli = Cli::try_parse_from(["wheelwright", "--json", "build-wheel"]).unwrap();
        assert_eq!(child_output(cli.global.json), OutputMode::InheritToStderr);
        assert_eq!(child_output(false), OutputMode::Inherit);
    }

    #[test]
    fn project_dir_prefers_flag() {
        let cli =
            Cli::try_parse_from(["wheelwright", "show-config", "--project-root", "/p"]).unwrap();
        assert_eq!(project_dir(&cli.global), PathBuf::from("/p"));
    }
}
