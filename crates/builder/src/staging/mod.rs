//! Source staging
//!
//! Copies the pure-Python source trees into the directories `setup.py` packages
//! from. Every run replaces what was staged before.

mod guard;

pub use guard::StagingGuard;

use std::path::PathBuf;

use tracing::{debug, info};
use wheelwright_config::{ProjectLayout, StagingConfig};
use wheelwright_errors::{BuildError, Error};
use wheelwright_platform::fs;

/// Copy every configured source tree into its staging destination
///
/// Returns the populated destinations in configuration order.
///
/// # Errors
///
/// Returns [`BuildError::StagingFailed`] if a source tree is missing, or the
/// I/O error (with the offending path) if copying it fails.
pub async fn stage_sources(
    staging: &StagingConfig,
    layout: &ProjectLayout,
) -> Result<Vec<PathBuf>, Error> {
    let mut staged = Vec::with_capacity(staging.sources.len());

    for mapping in &staging.sources {
        let (from, to) = layout.source_mapping(mapping);
        if !fs::exists(&from).await {
            return Err(BuildError::StagingFailed {
                message: format!("source tree {} does not exist", from.display()),
            }
            .into());
        }

        debug!(from = %from.display(), to = %to.display(), "staging sources");
        fs::replace_directory(&from, &to).await?;
        staged.push(to);
    }

    info!(count = staged.len(), "staged source trees");
    Ok(staged)
}
