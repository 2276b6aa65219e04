//! Output rendering and formatting

use console::Style;
use serde_json::json;
use wheelwright_builder::{ArtifactReport, ArtifactSource, InstallReport, WheelReport};

/// Output renderer for CLI results
#[derive(Clone)]
pub struct OutputRenderer {
    /// Use JSON output format
    json_output: bool,
    ok: Style,
    note: Style,
    dim: Style,
}

impl OutputRenderer {
    /// Create new output renderer
    pub fn new(json_output: bool) -> Self {
        Self {
            json_output,
            ok: Style::new().green().bold(),
            note: Style::new().yellow(),
            dim: Style::new().dim(),
        }
    }

    pub fn render_wheel_report(&self, report: &WheelReport) {
        if self.json_output {
            let value = json!({
                "artifact": report.artifact.file_name(),
                "python": report.artifact.python().to_string(),
                "source": report.artifact_source.as_ref().map(source_json),
                "staging_skipped": report.staging_skipped(),
                "dist_dir": report.dist_dir.display().to_string(),
            });
            println!("{value}");
            return;
        }

        match &report.artifact_source {
            Some(source) => println!(
                "{} {} from {} ({})",
                self.dim.apply_to("staged"),
                report.artifact,
                source.path().display(),
                source.label()
            ),
            None => println!(
                "{}",
                self.note.apply_to(
                    "The staged package directory already existed, that might mean a self compiled \
                     module was placed there; it was packaged as-is."
                )
            ),
        }
        println!(
            "{} sdist and wheel written to {}",
            self.ok.apply_to("[OK]"),
            report.dist_dir.display()
        );
    }

    pub fn render_install_report(&self, report: &InstallReport) {
        if self.json_output {
            let value = json!({
                "pip": report.pip.display().to_string(),
                "staged": report.staged.iter().map(|p| p.display().to_string()).collect::<Vec<_>>(),
                "removed_build_dir": report.removed_build_dir,
            });
            println!("{value}");
            return;
        }

        if report.removed_build_dir {
            println!("{} stale build directory", self.dim.apply_to("removed"));
        }
        println!(
            "{} installed with {}",
            self.ok.apply_to("[OK]"),
            report.pip.display()
        );
    }

    pub fn render_artifact_report(&self, report: &ArtifactReport) {
        if self.json_output {
            let value = json!({
                "artifact": report.name.file_name(),
                "python": report.name.python().to_string(),
                "selected": report.selected.as_ref().map(source_json),
                "staged_dir_exists": report.staged_dir_exists,
            });
            println!("{value}");
            return;
        }

        println!("{}", report.name);
        match &report.selected {
            Some(source) => println!("  {} ({})", source.path().display(), source.label()),
            None => println!("  {}", self.note.apply_to("not found in any candidate directory")),
        }
        if report.staged_dir_exists {
            println!(
                "  {}",
                self.note
                    .apply_to("staged package directory exists; build-wheel will package it as-is")
            );
        }
    }

    pub fn render_config(&self, rendered_toml: &str) {
        if self.json_output {
            println!("{}", json!({ "config": rendered_toml }));
        } else {
            print!("{rendered_toml}");
        }
    }

    pub fn render_error(&self, code: Option<&str>, message: &str) {
        if self.json_output {
            println!("{}", json!({ "error": message, "code": code }));
        } else {
            eprintln!("Error: {message}");
        }
    }
}

fn source_json(source: &ArtifactSource) -> serde_json::Value {
    json!({
        "kind": source.label(),
        "path": source.path().display().to_string(),
    })
}
