//! Scan driver: walks, records and aggregates in one pass.

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Utc;
use rayon::prelude::*;
use tracing::{debug, info};

use reposcan_core::{FileRecord, Manifest, ManifestBuilder, ScanConfig, ScanError, Stage};

use crate::record::FileRecordBuilder;
use crate::walker::DirectoryWalker;

/// Produces a [`Manifest`] for a directory tree.
///
/// With `threads == 1` files are recorded as the walker yields them. Any
/// other value walks first, then records on a rayon pool; results land in
/// the slot of their walk position, so the manifest is identical either way.
#[derive(Debug, Clone)]
pub struct Scanner {
    config: ScanConfig,
}

impl Scanner {
    /// Create a scanner for `config`.
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// The configuration this scanner runs with.
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Perform a scan of the configured root.
    ///
    /// Only a missing or non-directory root is an error; every per-file
    /// failure is recorded in that file's record.
    pub fn scan(&self) -> Result<Manifest, ScanError> {
        self.scan_with(|_| {})
    }

    /// Like [`Scanner::scan`], reporting each stage as it is entered.
    ///
    /// In sequential mode walking and recording overlap, so `Recording` is
    /// reported as soon as the walk starts streaming.
    pub fn scan_with(&self, mut on_stage: impl FnMut(Stage)) -> Result<Manifest, ScanError> {
        let generated_at = Utc::now();
        let start = Instant::now();
        let root = resolve_root(&self.config.root)?;

        info!(root = %root.display(), threads = self.config.threads, "Starting scan");

        let walker = DirectoryWalker::new(&self.config);
        let records = FileRecordBuilder::new(&root, &self.config);
        let mut manifest = ManifestBuilder::new(&root, generated_at);

        on_stage(Stage::Walking);
        if self.config.is_parallel() {
            let paths: Vec<PathBuf> = walker.walk(&root).collect();
            debug!(files = paths.len(), "Walk finished, recording in parallel");
            on_stage(Stage::Recording);
            manifest.extend(self.record_parallel(&records, &paths)?);
        } else {
            on_stage(Stage::Recording);
            manifest.extend(walker.walk(&root).map(|path| records.build(&path)));
        }

        on_stage(Stage::Aggregating);
        let manifest = manifest.finish();
        info!(
            files = manifest.total_files(),
            unreadable = manifest.unreadable_files().count(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Scan finished"
        );
        Ok(manifest)
    }

    fn record_parallel(
        &self,
        records: &FileRecordBuilder,
        paths: &[PathBuf],
    ) -> Result<Vec<FileRecord>, ScanError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.threads)
            .build()
            .map_err(|e| ScanError::Other {
                message: format!("Failed to start worker pool: {e}"),
            })?;

        // Indexed collect writes each result into its walk-order slot.
        Ok(pool.install(|| paths.par_iter().map(|path| records.build(path)).collect()))
    }
}

/// Canonicalize the scan root and make sure it is a directory.
fn resolve_root(root: &Path) -> Result<PathBuf, ScanError> {
    let root = root.canonicalize().map_err(|e| ScanError::io(root, e))?;
    if !root.is_dir() {
        return Err(ScanError::NotADirectory { path: root });
    }
    Ok(root)
}
