//! Process metadata access.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while locating the process data directory.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The host could not report a data directory.
    #[error("process data directory unavailable: {0}")]
    Unavailable(String),

    /// The data directory has no parent segment to read a user id from.
    #[error("data directory {} has no parent segment", .0.display())]
    NoParent(PathBuf),
}

/// Source of the process's private data directory.
pub trait ProcessMetadata: Send + Sync {
    fn data_dir(&self) -> Result<PathBuf, MetadataError>;
}

impl<F> ProcessMetadata for F
where
    F: Fn() -> Result<PathBuf, MetadataError> + Send + Sync,
{
    fn data_dir(&self) -> Result<PathBuf, MetadataError> {
        self()
    }
}

/// A data directory known up front.
#[derive(Debug, Clone)]
pub struct FixedDataDir(pub PathBuf);

impl ProcessMetadata for FixedDataDir {
    fn data_dir(&self) -> Result<PathBuf, MetadataError> {
        Ok(self.0.clone())
    }
}

/// Metadata for hosts that never configured a data directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDataDir;

impl ProcessMetadata for NoDataDir {
    fn data_dir(&self) -> Result<PathBuf, MetadataError> {
        Err(MetadataError::Unavailable(
            "no data directory configured".to_string(),
        ))
    }
}

/// Read the user id encoded in a data directory path.
///
/// Multi-user layouts look like `/data/user/<id>/<package>`; single-user
/// layouts (`/data/data/<package>`) have a non-numeric parent and yield `None`.
/// Segments outside the non-negative `i32` range also yield `None`.
pub fn parse_user_id(data_dir: &Path) -> Result<Option<u32>, MetadataError> {
    let segment = data_dir
        .parent()
        .and_then(Path::file_name)
        .ok_or_else(|| MetadataError::NoParent(data_dir.to_path_buf()))?;

    Ok(segment
        .to_str()
        .and_then(|s| s.parse::<i32>().ok())
        .and_then(|id| u32::try_from(id).ok()))
}
