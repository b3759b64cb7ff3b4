//! Output directory layout and artifact writing.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use reposcan_core::{ActionKind, ActionLog, Manifest};

use crate::error::ReportError;

/// Output directory used when none is given.
pub const DEFAULT_OUTPUT_DIR: &str = "report_dir";

/// File name of the JSON manifest inside the output directory.
pub const MANIFEST_FILE_NAME: &str = "scan.json";

/// File name of the text report inside the output directory.
pub const REPORT_FILE_NAME: &str = "report.txt";

/// Extension of the archive written next to the output directory.
const ARCHIVE_EXTENSION: &str = "zip";

/// Where a run puts its artifacts.
///
/// The archive is a sibling of the output directory: `report_dir` gives
/// `report_dir/scan.json`, `report_dir/report.txt` and `report_dir.zip`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    pub dir: PathBuf,
    pub manifest: PathBuf,
    pub report: PathBuf,
    pub archive: PathBuf,
}

impl OutputLayout {
    /// Derive the layout for output directory `dir`.
    ///
    /// Fails when `dir` has no final name component (`/`, `..`, empty).
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, ReportError> {
        let dir = dir.into();
        if dir.file_name().is_none() {
            return Err(ReportError::InvalidOutput { path: dir });
        }

        Ok(Self {
            manifest: dir.join(MANIFEST_FILE_NAME),
            report: dir.join(REPORT_FILE_NAME),
            archive: dir.with_extension(ARCHIVE_EXTENSION),
            dir,
        })
    }

    /// Paths the walk must skip so artifacts never appear in their own scan.
    ///
    /// Call after [`reset_output_dir`]; the directory has to exist to be
    /// resolved to the form the walker produces.
    pub fn walk_exclusions(&self) -> Result<Vec<PathBuf>, ReportError> {
        let dir = self
            .dir
            .canonicalize()
            .map_err(|e| ReportError::reset(&self.dir, e))?;
        let archive = dir.with_extension(ARCHIVE_EXTENSION);
        Ok(vec![dir, archive])
    }

    /// Artifacts in archive order.
    pub fn archive_members(&self) -> [&Path; 2] {
        [&self.manifest, &self.report]
    }
}

/// Delete the output directory with everything in it, then create it empty.
///
/// This is destructive: whatever `layout.dir` held before is gone, whether
/// or not it came from an earlier run.
pub fn reset_output_dir(layout: &OutputLayout, log: &mut ActionLog) -> Result<(), ReportError> {
    let dir = &layout.dir;

    match fs::symlink_metadata(dir) {
        Ok(meta) => {
            if meta.is_dir() {
                fs::remove_dir_all(dir).map_err(|e| ReportError::reset(dir, e))?;
            } else {
                fs::remove_file(dir).map_err(|e| ReportError::reset(dir, e))?;
            }
            info!(path = %dir.display(), "Removed previous output");
            log.record(ActionKind::Removed, dir);
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(ReportError::reset(dir, e)),
    }

    fs::create_dir_all(dir).map_err(|e| ReportError::reset(dir, e))?;
    debug!(path = %dir.display(), "Created output directory");
    log.record(ActionKind::Created, dir);
    Ok(())
}

/// Write the JSON manifest and the text report into the output directory.
pub fn write_artifacts(
    layout: &OutputLayout,
    manifest: &Manifest,
    report: &str,
    log: &mut ActionLog,
) -> Result<(), ReportError> {
    let json = serde_json::to_string_pretty(manifest)?;
    write_artifact(&layout.manifest, json.as_bytes(), log)?;
    write_artifact(&layout.report, report.as_bytes(), log)?;
    Ok(())
}

fn write_artifact(path: &Path, contents: &[u8], log: &mut ActionLog) -> Result<(), ReportError> {
    fs::write(path, contents).map_err(|e| ReportError::write(path, e))?;
    debug!(path = %path.display(), bytes = contents.len(), "Wrote artifact");
    log.record(ActionKind::Wrote, path);
    Ok(())
}
