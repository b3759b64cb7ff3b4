//! Core types and configuration for reposcan.
//!
//! This crate provides the data model shared by the scanning and reporting
//! crates: per-file records, the run manifest and its bounded summary, scan
//! configuration, error types, pipeline stages, and the caller-owned action
//! log.

mod action;
mod config;
mod error;
mod manifest;
mod record;
mod stage;

pub use action::{Action, ActionKind, ActionLog};
pub use config::{
    BINARY_SAMPLE_SIZE, DEFAULT_EXCLUDED_DIRS, PREVIEW_BYTES, PREVIEW_MAX_SIZE, ScanConfig,
    ScanConfigBuilder,
};
pub use error::ScanError;
pub use manifest::{MAX_EXTENSION_ENTRIES, Manifest, ManifestBuilder, ManifestSummary};
pub use record::{ContentHash, FileDigest, FileRecord, UNKNOWN_SIZE};
pub use stage::Stage;
