//! Builds one [`FileRecord`] per walked file, absorbing per-file failures.

use std::fs::File;
use std::path::{Component, Path, PathBuf};

use compact_str::CompactString;
use tracing::warn;

use reposcan_core::{FileRecord, ScanConfig, ScanError, UNKNOWN_SIZE};

use crate::classifier::is_binary;
use crate::digest::digest_with_sample;

/// Turns absolute file paths into manifest records.
///
/// Holds no mutable state, so one builder can be shared across worker threads.
#[derive(Debug, Clone)]
pub struct FileRecordBuilder {
    root: PathBuf,
    sample_size: usize,
    preview_bytes: usize,
    preview_max_size: u64,
}

impl FileRecordBuilder {
    /// Create a builder for files under `root` using the limits in `config`.
    pub fn new(root: impl Into<PathBuf>, config: &ScanConfig) -> Self {
        Self {
            root: root.into(),
            sample_size: config.sample_size,
            preview_bytes: config.preview_bytes.min(config.sample_size),
            preview_max_size: config.preview_max_size,
        }
    }

    /// Produce the record for one file. Never fails; errors become sentinels.
    pub fn build(&self, path: &Path) -> FileRecord {
        let rel_path = relative_path(&self.root, path);
        let extension = extension_of(path);

        let size = match std::fs::metadata(path) {
            Ok(metadata) => i64::try_from(metadata.len()).unwrap_or(i64::MAX),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Could not stat file");
                UNKNOWN_SIZE
            }
        };

        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) => {
                let err = ScanError::io(path, err);
                warn!(error = %err, "Could not open file");
                return FileRecord::unreadable(rel_path, size, extension, err);
            }
        };

        let (hash, sample) = match digest_with_sample(file, self.sample_size) {
            Ok(result) => result,
            Err(err) => {
                let err = ScanError::io(path, err);
                warn!(error = %err, "Could not read file");
                return FileRecord::unreadable(rel_path, size, extension, err);
            }
        };

        let binary = is_binary(&sample);
        let preview = (!binary && self.wants_preview(size)).then(|| {
            let end = sample.len().min(self.preview_bytes);
            String::from_utf8_lossy(&sample[..end]).into_owned()
        });

        FileRecord::readable(rel_path, size, extension, hash, binary, preview)
    }

    fn wants_preview(&self, size: i64) -> bool {
        u64::try_from(size).is_ok_and(|size| size <= self.preview_max_size)
    }
}

/// Slash-separated path of `path` relative to `root`.
pub fn relative_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Lowercased final suffix including the dot, or empty.
///
/// Dot-files such as `.gitignore` have no extension.
pub fn extension_of(path: &Path) -> CompactString {
    match path.extension() {
        Some(ext) if !ext.is_empty() => {
            let mut extension = CompactString::new(".");
            extension.push_str(&ext.to_string_lossy().to_lowercase());
            extension
        }
        _ => CompactString::default(),
    }
}
