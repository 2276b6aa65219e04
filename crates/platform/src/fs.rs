#![allow(clippy::module_name_repetitions)]

//! Filesystem convenience helpers.
//!
//! These functions provide a stable API returning `wheelwright_errors::Error`,
//! with the offending path attached to I/O failures.

use std::path::Path;
use tokio::fs;
use tracing::debug;
use wheelwright_errors::Error;

/// Result type for filesystem operations
pub type Result<T> = std::result::Result<T, Error>;

/// Check whether a path exists
pub async fn exists(path: &Path) -> bool {
    fs::try_exists(path).await.unwrap_or(false)
}

/// Recursively copy directory contents
pub fn copy_directory_recursive<'a>(
    src: &'a Path,
    dst: &'a Path,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<()>> + Send + 'a>> {
    Box::pin(async move {
        fs::create_dir_all(dst)
            .await
            .map_err(|e| Error::io_with_path(&e, dst))?;

        let mut entries = fs::read_dir(src)
            .await
            .map_err(|e| Error::io_with_path(&e, src))?;
        while let Some(entry) = entries.next_entry().await? {
            let entry_path = entry.path();
            let dst_path = dst.join(entry.file_name());

            if entry.file_type().await?.is_dir() {
                copy_directory_recursive(&entry_path, &dst_path).await?;
            } else {
                fs::copy(&entry_path, &dst_path)
                    .await
                    .map_err(|e| Error::io_with_path(&e, &entry_path))?;
            }
        }

        Ok(())
    })
}

/// Copy a single file, creating the destination's parent directories
///
/// # Errors
///
/// Returns an error carrying the source path if it cannot be read.
pub async fn copy_file(src: &Path, dst: &Path) -> Result<u64> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::io_with_path(&e, parent))?;
    }
    let bytes = fs::copy(src, dst)
        .await
        .map_err(|e| Error::io_with_path(&e, src))?;
    debug!(src = %src.display(), dst = %dst.display(), bytes, "copied file");
    Ok(bytes)
}

/// Remove a directory tree if it exists
///
/// Returns whether anything was removed.
///
/// # Errors
///
/// Returns an error if the directory exists but cannot be removed.
pub async fn remove_dir_all_if_exists(path: &Path) -> Result<bool> {
    match fs::remove_dir_all(path).await {
        Ok(()) => {
            debug!(path = %path.display(), "removed directory");
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::io_with_path(&e, path)),
    }
}

/// Replace `dst` with a fresh copy of `src`
///
/// # Errors
///
/// Returns an error if the old tree cannot be removed or the copy fails.
pub async fn replace_directory(src: &Path, dst: &Path) -> Result<()> {
    remove_dir_all_if_exists(dst).await?;
    copy_directory_recursive(src, dst).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn copy_directory_recursive_copies_nested_tree() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("modules/pymol");
        std::fs::create_dir_all(src.join("wizard")).unwrap();
        std::fs::write(src.join("__init__.py"), "# init").unwrap();
        std::fs::write(src.join("wizard/measurement.py"), "pass").unwrap();

        let dst = temp.path().join("src/python/pymol");
        copy_directory_recursive(&src, &dst).await.unwrap();

        assert_eq!(
            std::fs::read_to_string(dst.join("__init__.py")).unwrap(),
            "# init"
        );
        assert!(dst.join("wizard/measurement.py").is_file());
    }

    #[tokio::test]
    async fn remove_dir_all_if_exists_is_idempotent() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("cmake-build-setup_py");
        std::fs::create_dir_all(dir.join("nested")).unwrap();

        assert!(remove_dir_all_if_exists(&dir).await.unwrap());
        assert!(!dir.exists());
        assert!(!remove_dir_all_if_exists(&dir).await.unwrap());
    }

    #[tokio::test]
    async fn replace_directory_drops_stale_files() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("src_tree");
        let dst = temp.path().join("dst_tree");
        std::fs::create_dir_all(&src).unwrap();
        std::fs::create_dir_all(&dst).unwrap();
        std::fs::write(src.join("fresh.py"), "").unwrap();
        std::fs::write(dst.join("stale.py"), "").unwrap();

        replace_directory(&src, &dst).await.unwrap();

        assert!(dst.join("fresh.py").exists());
        assert!(!dst.join("stale.py").exists());
    }

    #[tokio::test]
    async fn copy_file_reports_missing_source_path() {
        let temp = tempdir().unwrap();
        let missing = temp.path().join("_cmd.cpython-311-darwin.so");
        let err = copy_file(&missing, &temp.path().join("out/_cmd.so"))
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        match err {
            Error::Io { path, .. } => assert_eq!(path.as_deref(), Some(missing.as_path())),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
