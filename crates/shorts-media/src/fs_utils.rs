//! Scoped-resource filesystem helpers.

use std::path::Path;
use tokio::fs;

use crate::error::{MediaError, MediaResult};

/// Persist a finished render from the work directory to its destination.
///
/// Attempts a fast rename first; a cross-device (EXDEV) failure falls back
/// to copy-then-delete, copying to a temp name next to the destination so
/// the final rename is atomic on the destination filesystem.
pub async fn persist_output(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> MediaResult<()> {
    let src = src.as_ref();
    let dst = dst.as_ref();

    if let Some(parent) = dst.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    match fs::rename(src, dst).await {
        Ok(()) => Ok(()),
        Err(e) if is_cross_device_error(&e) => {
            tracing::debug!(
                "Cross-device rename, falling back to copy+delete: {} -> {}",
                src.display(),
                dst.display()
            );

            let tmp_dst = dst.with_extension("part");
            fs::copy(src, &tmp_dst).await?;
            if let Err(e) = fs::rename(&tmp_dst, dst).await {
                let _ = fs::remove_file(&tmp_dst).await;
                return Err(MediaError::from(e));
            }
            remove_best_effort(src).await;
            Ok(())
        }
        Err(e) => Err(MediaError::from(e)),
    }
}

/// Remove a leftover file or directory, logging on failure.
///
/// Cleanup failures never fail the render that produced the output.
pub async fn remove_best_effort(path: impl AsRef<Path>) {
    let path = path.as_ref();
    let result = if path.is_dir() {
        fs::remove_dir_all(path).await
    } else {
        fs::remove_file(path).await
    };

    if let Err(e) = result {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!("Failed to clean up {}: {}", path.display(), e);
        }
    }
}

/// EXDEV is error code 18 on Linux/macOS.
fn is_cross_device_error(e: &std::io::Error) -> bool {
    e.raw_os_error() == Some(18)
}
