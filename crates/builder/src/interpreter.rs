//! Python interpreter version detection

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use tracing::debug;
use wheelwright_errors::{BuildError, Error};
use wheelwright_platform::{OutputMode, ProcessOperations};

/// Snippet run by the interpreter to report its `major.minor` version
pub const VERSION_PROBE: &str =
    "import sys; print(f'{sys.version_info.major}.{sys.version_info.minor}')";

/// Major/minor version of a CPython interpreter
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PythonVersion {
    pub major: u32,
    pub minor: u32,
}

impl PythonVersion {
    #[must_use]
    pub fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Version digits without separator, as used in CPython ABI tags (`311`)
    #[must_use]
    pub fn tag(&self) -> String {
        format!("{}{}", self.major, self.minor)
    }
}

impl fmt::Display for PythonVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for PythonVersion {
    type Err = Error;

    /// Accepts `3.11`, `3.11.4`, `3.12.0rc1` and `Python 3.11.4` (the `--version` form)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || -> Error {
            BuildError::InvalidPythonVersion {
                value: s.to_string(),
            }
            .into()
        };

        let trimmed = s.trim();
        let trimmed = trimmed.strip_prefix("Python ").unwrap_or(trimmed).trim();

        let mut parts = trimmed.split('.');
        let major = parts
            .next()
            .and_then(|p| p.parse::<u32>().ok())
            .ok_or_else(invalid)?;
        let minor_part = parts.next().ok_or_else(invalid)?;
        // Pre-release suffixes only ever follow the micro component
        let minor = minor_part.parse::<u32>().map_err(|_| invalid())?;

        Ok(Self { major, minor })
    }
}

/// Ask `python` for its version
///
/// # Errors
///
/// Returns an error if the interpreter cannot be started, exits non-zero, or
/// prints something that is not a version.
pub async fn detect_python_version(
    process: &dyn ProcessOperations,
    python: &Path,
) -> Result<PythonVersion, Error> {
    let mut cmd = process.create_command(python);
    cmd.args(["-c", VERSION_PROBE])
        .output_mode(OutputMode::Capture);
    let rendered = cmd.to_string();

    let output = process.execute_command(cmd).await?;
    if !output.success {
        return Err(BuildError::CommandFailed {
            command: rendered,
            exit_code: output.exit_code,
        }
        .into());
    }

    let version = output.stdout_text().parse::<PythonVersion>()?;
    debug!(python = %python.display(), %version, "detected interpreter version");
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_probe_output() {
        assert_eq!(
            "3.11\n".parse::<PythonVersion>().unwrap(),
            PythonVersion::new(3, 11)
        );
    }

    #[test]
    fn parses_full_and_version_flag_forms() {
        assert_eq!(
            "3.11.4".parse::<PythonVersion>().unwrap(),
            PythonVersion::new(3, 11)
        );
        assert_eq!(
            "Python 3.9.18".parse::<PythonVersion>().unwrap(),
            PythonVersion::new(3, 9)
        );
        assert_eq!(
            "3.13.0rc1".parse::<PythonVersion>().unwrap(),
            PythonVersion::new(3, 13)
        );
    }

    #[test]
    fn rejects_garbage() {
        for value in ["", "3", "three.eleven", "3.x", "python"] {
            let err = value.parse::<PythonVersion>().unwrap_err();
            assert!(
                matches!(err, Error::Build(BuildError::InvalidPythonVersion { .. })),
                "{value:?} should be rejected"
            );
        }
    }

    #[test]
    fn tag_drops_the_dot() {
        assert_eq!(PythonVersion::new(3, 11).tag(), "311");
        assert_eq!(PythonVersion::new(3, 9).to_string(), "3.9");
    }
}
