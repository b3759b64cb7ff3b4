//! Reporting for reposcan.
//!
//! This crate turns a scanned [`Manifest`] into the artifacts of a run:
//!
//! - **`scan.json`** - the full manifest, pretty-printed
//! - **`report.txt`** - a fixed-layout text summary
//! - **`<out>.zip`** - both files, packaged deterministically
//!
//! [`run`] drives the whole pipeline. The pieces are public for callers
//! that only need one of them.
//!
//! ```rust,no_run
//! use std::path::Path;
//! use reposcan_report::{ActionLog, ScanConfig, run};
//!
//! let mut log = ActionLog::new();
//! let summary = run(ScanConfig::new("."), Path::new("report_dir"), &mut log).unwrap();
//!
//! println!("{} files, archive at {}", summary.total_files(), summary.layout.archive.display());
//! print!("{log}");
//! ```

mod archive;
mod error;
mod output;
mod pipeline;
mod render;

pub use archive::package_archive;
pub use error::ReportError;
pub use output::{
    DEFAULT_OUTPUT_DIR, MANIFEST_FILE_NAME, OutputLayout, REPORT_FILE_NAME, reset_output_dir,
    write_artifacts,
};
pub use pipeline::{RunSummary, run};
pub use render::{REPORT_SAMPLE_LIMIT, Report, render_report};

pub use reposcan_core::{Action, ActionKind, ActionLog, Manifest, ScanConfig, Stage};
