//! CLI error handling

use std::fmt;

use wheelwright_errors::UserFacingError;

/// CLI-specific error type
#[derive(Debug)]
pub enum CliError {
    /// Configuration error
    Config(wheelwright_errors::Error),
    /// Build or install error
    Build(wheelwright_errors::Error),
}

impl CliError {
    fn inner(&self) -> &wheelwright_errors::Error {
        match self {
            CliError::Config(e) | CliError::Build(e) => e,
        }
    }

    /// Stable code for JSON error output
    pub fn code(&self) -> Option<&'static str> {
        self.inner().user_code()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(e) => write!(f, "Configuration error: {}", e.user_message())?,
            CliError::Build(e) => write!(f, "{}", e.user_message())?,
        }
        let e = self.inner();
        if let Some(code) = e.user_code() {
            write!(f, "\n  Code: {code}")?;
        }
        if let Some(hint) = e.user_hint() {
            write!(f, "\n  Hint: {hint}")?;
        }
        if e.is_retryable() {
            write!(f, "\n  Retry: safe to retry this operation.")?;
        }
        Ok(())
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner())
    }
}

impl From<wheelwright_errors::Error> for CliError {
    fn from(e: wheelwright_errors::Error) -> Self {
        match e {
            wheelwright_errors::Error::Config(_) => CliError::Config(e),
            _ => CliError::Build(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wheelwright_errors::{BuildError, ConfigError};

    #[test]
    fn build_errors_render_code_and_hint() {
        let err = CliError::from(wheelwright_errors::Error::from(
            BuildError::ArtifactNotFound {
                file: "_cmd.cpython-311-darwin.so".to_string(),
                searched: "cmake-build-release, pre-built".to_string(),
            },
        ));
        let rendered = err.to_string();
        assert!(rendered.starts_with("compiled artifact _cmd.cpython-311-darwin.so not found"));
        assert!(rendered.contains("Code: build.artifact_not_found"));
        assert!(rendered.contains("Hint: "));
    }

    #[test]
    fn config_errors_are_classified() {
        let err = CliError::from(wheelwright_errors::Error::from(ConfigError::ParseError {
            message: "expected `]`".to_string(),
        }));
        assert!(matches!(err, CliError::Config(_)));
        assert_eq!(err.code(), Some("config.parse_error"));
    }
}
