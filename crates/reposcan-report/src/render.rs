//! Plain-text rendering of a manifest.

use std::fmt;

use chrono::SecondsFormat;

use reposcan_core::Manifest;

use crate::output::MANIFEST_FILE_NAME;

/// Maximum number of files listed in the report.
pub const REPORT_SAMPLE_LIMIT: usize = 200;

/// Number of digest characters shown per file.
const DIGEST_PREFIX_LEN: usize = 10;

/// Label used for files without an extension.
const NO_EXTENSION_LABEL: &str = "(no ext)";

/// Human-readable view of a [`Manifest`].
///
/// Rendering is a pure function of the manifest; the caller decides where
/// the text goes.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    manifest: &'a Manifest,
    sample_limit: usize,
}

impl<'a> Report<'a> {
    /// Create a report listing at most [`REPORT_SAMPLE_LIMIT`] files.
    pub fn new(manifest: &'a Manifest) -> Self {
        Self {
            manifest,
            sample_limit: REPORT_SAMPLE_LIMIT,
        }
    }

    /// Change the number of files listed.
    pub fn with_sample_limit(mut self, limit: usize) -> Self {
        self.sample_limit = limit;
        self
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let manifest = self.manifest;

        writeln!(f, "Repository scan report")?;
        writeln!(f, "Root: {}", manifest.root.display())?;
        writeln!(
            f,
            "Generated: {}",
            manifest
                .generated_at
                .to_rfc3339_opts(SecondsFormat::Secs, true)
        )?;
        writeln!(f)?;
        writeln!(f, "Total files (scanned): {}", manifest.summary.total_files)?;
        writeln!(f)?;

        writeln!(f, "Top extensions:")?;
        for (ext, count) in &manifest.summary.by_extension {
            let label = if ext.is_empty() {
                NO_EXTENSION_LABEL
            } else {
                ext.as_str()
            };
            writeln!(f, "  {label} : {count}")?;
        }
        writeln!(f)?;

        writeln!(f, "Sample files (first {}):", self.sample_limit)?;
        for (i, record) in manifest.files.iter().take(self.sample_limit).enumerate() {
            writeln!(
                f,
                "{:03}: {}  size={}  sha256={}  binary={}",
                i + 1,
                record.path,
                record.size,
                record.digest.short(DIGEST_PREFIX_LEN),
                record.is_binary
            )?;
        }

        writeln!(f)?;
        writeln!(f)?;
        writeln!(f, "You can find full JSON at {MANIFEST_FILE_NAME}")
    }
}

/// Render the full text report for `manifest`.
pub fn render_report(manifest: &Manifest) -> String {
    Report::new(manifest).to_string()
}
