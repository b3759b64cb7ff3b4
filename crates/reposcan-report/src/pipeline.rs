//! One full run: reset output, scan, write artifacts, package.

use std::path::Path;
use std::time::Instant;

use tracing::{debug, error, info};

use reposcan_core::{ActionKind, ActionLog, Manifest, ScanConfig, Stage};
use reposcan_scan::Scanner;

use crate::archive::package_archive;
use crate::error::ReportError;
use crate::output::{OutputLayout, reset_output_dir, write_artifacts};
use crate::render::render_report;

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub manifest: Manifest,
    pub layout: OutputLayout,
}

impl RunSummary {
    pub fn total_files(&self) -> u64 {
        self.manifest.total_files()
    }

    /// Sum of all known file sizes in bytes.
    pub fn total_size(&self) -> u64 {
        self.manifest.total_size()
    }
}

/// Scan `config.root` and write `scan.json`, `report.txt` and the archive.
///
/// `out_dir` is wiped before anything is written. Every filesystem action
/// is appended to `log`, including the ones done before a failure.
pub fn run(
    mut config: ScanConfig,
    out_dir: &Path,
    log: &mut ActionLog,
) -> Result<RunSummary, ReportError> {
    let start = Instant::now();
    let layout = OutputLayout::new(out_dir)?;
    let mut stage = Stage::Idle;

    let result = execute(&mut config, &layout, log, &mut stage);
    match &result {
        Ok(summary) => info!(
            files = summary.total_files(),
            out = %layout.dir.display(),
            archive = %layout.archive.display(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Run complete"
        ),
        Err(err) => error!(stage = %stage, error = %err, "Run failed"),
    }
    result
}

fn execute(
    config: &mut ScanConfig,
    layout: &OutputLayout,
    log: &mut ActionLog,
    stage: &mut Stage,
) -> Result<RunSummary, ReportError> {
    reset_output_dir(layout, log)?;
    config.exclude_paths.extend(layout.walk_exclusions()?);

    let manifest = Scanner::new(config.clone()).scan_with(|next| enter(stage, next))?;

    enter(stage, Stage::Rendering);
    let report = render_report(&manifest);
    write_artifacts(layout, &manifest, &report, log)?;

    enter(stage, Stage::Packaging);
    package_archive(&layout.archive, &layout.archive_members())?;
    log.record(ActionKind::Wrote, &layout.archive);

    enter(stage, Stage::Done);
    Ok(RunSummary {
        manifest,
        layout: layout.clone(),
    })
}

fn enter(stage: &mut Stage, next: Stage) {
    debug!(from = %stage, to = %next, "Stage transition");
    *stage = next;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_failed_scan_keeps_reset_actions() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("report_dir");
        let mut log = ActionLog::new();

        let result = run(ScanConfig::new(temp.path().join("missing")), &out, &mut log);

        assert!(matches!(result, Err(ReportError::Scan(_))));
        assert!(out.is_dir());
        assert_eq!(log.entries().len(), 1);
        assert_eq!(log.entries()[0].kind, ActionKind::Created);
        assert_eq!(log.written().count(), 0);
    }

    #[test]
    fn test_summary_totals() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("repo");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("a.txt"), "hello").unwrap();
        fs::write(root.join("b.rs"), "fn main() {}").unwrap();

        let mut log = ActionLog::new();
        let summary = run(ScanConfig::new(&root), &temp.path().join("out"), &mut log).unwrap();

        assert_eq!(summary.total_files(), 2);
        assert_eq!(summary.total_size(), 5 + 12);
        assert!(summary.layout.archive.is_file());
    }
}
