//! Scan manifest and its aggregation.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use compact_str::CompactString;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::record::FileRecord;

/// Maximum number of entries kept in the extension histogram.
pub const MAX_EXTENSION_ENTRIES: usize = 50;

/// Summary statistics for a scan run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestSummary {
    /// Number of records in the manifest.
    pub total_files: u64,
    /// `(extension, count)` pairs, most frequent first, ties in first-seen order.
    pub by_extension: Vec<(CompactString, u64)>,
}

/// Complete inventory of one scan run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// Absolute scan root.
    pub root: PathBuf,
    /// When the scan started.
    pub generated_at: DateTime<Utc>,
    /// Records in walk order.
    pub files: Vec<FileRecord>,
    /// Summary statistics.
    pub summary: ManifestSummary,
}

impl Manifest {
    /// Get the total number of files.
    pub fn total_files(&self) -> u64 {
        self.summary.total_files
    }

    /// Sum of all known file sizes.
    pub fn total_size(&self) -> u64 {
        self.files.iter().filter_map(FileRecord::known_size).sum()
    }

    /// Records whose contents could not be read.
    pub fn unreadable_files(&self) -> impl Iterator<Item = &FileRecord> {
        self.files.iter().filter(|f| f.digest.is_error())
    }

    /// The manifest with `generated_at` cleared, for comparing two runs.
    pub fn without_timestamp(&self) -> Self {
        Self {
            generated_at: DateTime::<Utc>::MIN_UTC,
            ..self.clone()
        }
    }
}

/// Accumulates records in walk order and finalizes the summary.
#[derive(Debug)]
pub struct ManifestBuilder {
    root: PathBuf,
    generated_at: DateTime<Utc>,
    files: Vec<FileRecord>,
    extension_counts: IndexMap<CompactString, u64>,
}

impl ManifestBuilder {
    /// Start a manifest for a scan of `root` that began at `generated_at`.
    pub fn new(root: impl Into<PathBuf>, generated_at: DateTime<Utc>) -> Self {
        Self {
            root: root.into(),
            generated_at,
            files: Vec::new(),
            extension_counts: IndexMap::new(),
        }
    }

    /// Append one record, keeping insertion order.
    pub fn push(&mut self, record: FileRecord) {
        *self
            .extension_counts
            .entry(record.extension.clone())
            .or_insert(0) += 1;
        self.files.push(record);
    }

    /// Number of records accumulated so far.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if no records were accumulated.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Sort and truncate the histogram and produce the manifest.
    pub fn finish(self) -> Manifest {
        let mut by_extension: Vec<(CompactString, u64)> =
            self.extension_counts.into_iter().collect();
        // Stable sort: equal counts keep first-seen order.
        by_extension.sort_by(|a, b| b.1.cmp(&a.1));
        by_extension.truncate(MAX_EXTENSION_ENTRIES);

        Manifest {
            root: self.root,
            generated_at: self.generated_at,
            summary: ManifestSummary {
                total_files: self.files.len() as u64,
                by_extension,
            },
            files: self.files,
        }
    }
}

impl Extend<FileRecord> for ManifestBuilder {
    fn extend<I: IntoIterator<Item = FileRecord>>(&mut self, iter: I) {
        for record in iter {
            self.push(record);
        }
    }
}
