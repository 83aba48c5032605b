use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort rendering before it starts. Per-sample numeric edge
/// cases never surface here; they are absorbed as zero contributions.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("can't read {kind} file {path:?}: {reason}")]
    Resource {
        kind: &'static str,
        path: PathBuf,
        reason: String,
    },
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Exr(#[from] exr::error::Error),
}
