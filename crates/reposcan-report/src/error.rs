//! Run-level errors. Any of these aborts the run.

use std::path::PathBuf;

use thiserror::Error;

use reposcan_core::ScanError;

/// Errors that end a run before all artifacts are written.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The scan root could not be scanned.
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// The output location has no usable directory name.
    #[error("Invalid output directory: {path}")]
    InvalidOutput { path: PathBuf },

    /// The output directory could not be removed or recreated.
    #[error("Failed to reset output directory {path}: {source}")]
    ResetOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An artifact could not be written.
    #[error("Failed to write {path}: {source}")]
    WriteArtifact {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The manifest could not be serialized.
    #[error("Failed to serialize manifest: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The archive could not be built.
    #[error("Failed to build archive {path}: {source}")]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
}

impl ReportError {
    pub(crate) fn reset(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ResetOutput {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteArtifact {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn archive(path: impl Into<PathBuf>, source: impl Into<zip::result::ZipError>) -> Self {
        Self::Archive {
            path: path.into(),
            source: source.into(),
        }
    }
}
