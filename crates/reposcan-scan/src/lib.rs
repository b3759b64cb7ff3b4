//! File system scanning engine for reposcan.
//!
//! This crate walks a directory tree and turns every regular file into a
//! [`FileRecord`]: size, extension, SHA-256 digest, binary/text
//! classification and, for small text files, a preview.
//!
//! # Overview
//!
//! - **Stable traversal** via jwalk, sorted per directory, `.git` pruned
//! - **Single read per file**: the digest pass also captures the classifier sample
//! - **Failure isolation**: unreadable files become sentinel records
//! - **Optional worker pool** via rayon with walk-ordered results
//!
//! # Example
//!
//! ```rust,no_run
//! use reposcan_scan::{ScanConfig, Scanner};
//!
//! let manifest = Scanner::new(ScanConfig::new("/path/to/repo")).scan().unwrap();
//!
//! println!("Total files: {}", manifest.total_files());
//! for (ext, count) in &manifest.summary.by_extension {
//!     println!("{ext}: {count}");
//! }
//! ```

pub mod classifier;
pub mod digest;
mod record;
mod scanner;
mod walker;

pub use classifier::{NON_TEXT_PERCENT_LIMIT, is_binary, is_text_byte};
pub use digest::{DIGEST_CHUNK_SIZE, compute_digest, digest_with_sample};
pub use record::{FileRecordBuilder, extension_of, relative_path};
pub use scanner::Scanner;
pub use walker::DirectoryWalker;

// Re-export core types for convenience
pub use reposcan_core::{
    BINARY_SAMPLE_SIZE, ContentHash, FileDigest, FileRecord, Manifest, ManifestBuilder,
    ManifestSummary, ScanConfig, ScanError, Stage, UNKNOWN_SIZE,
};
