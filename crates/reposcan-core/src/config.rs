//! Scan configuration types.

use std::path::{Path, PathBuf};

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Directory names pruned from every walk unless overridden.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[".git"];

/// Maximum number of leading bytes inspected by the binary/text classifier.
pub const BINARY_SAMPLE_SIZE: usize = 8000;

/// Maximum number of bytes decoded into a text preview.
pub const PREVIEW_BYTES: usize = 2000;

/// Files larger than this (in bytes) never get a preview.
pub const PREVIEW_MAX_SIZE: u64 = 200 * 1024;

/// Configuration for scanning operations.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ScanConfig {
    /// Root path to scan.
    pub root: PathBuf,

    /// Directory names that are pruned together with their descendants.
    #[builder(default = "default_excluded_dirs()")]
    #[serde(default = "default_excluded_dirs")]
    pub exclude_dirs: Vec<String>,

    /// Absolute paths (files or directories) that are pruned from the walk.
    #[builder(default)]
    #[serde(default)]
    pub exclude_paths: Vec<PathBuf>,

    /// Number of worker threads (1 = sequential, 0 = auto-detect).
    #[builder(default = "1")]
    #[serde(default = "default_threads")]
    pub threads: usize,

    /// Follow symbolic links while walking.
    #[builder(default = "false")]
    #[serde(default)]
    pub follow_symlinks: bool,

    /// Bytes read from the start of each file for classification.
    #[builder(default = "BINARY_SAMPLE_SIZE")]
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,

    /// Bytes decoded into the text preview.
    #[builder(default = "PREVIEW_BYTES")]
    #[serde(default = "default_preview_bytes")]
    pub preview_bytes: usize,

    /// Largest file size that still gets a preview.
    #[builder(default = "PREVIEW_MAX_SIZE")]
    #[serde(default = "default_preview_max_size")]
    pub preview_max_size: u64,
}

fn default_excluded_dirs() -> Vec<String> {
    DEFAULT_EXCLUDED_DIRS.iter().map(|s| (*s).to_string()).collect()
}

fn default_threads() -> usize {
    1
}

fn default_sample_size() -> usize {
    BINARY_SAMPLE_SIZE
}

fn default_preview_bytes() -> usize {
    PREVIEW_BYTES
}

fn default_preview_max_size() -> u64 {
    PREVIEW_MAX_SIZE
}

impl ScanConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref root) = self.root {
            if root.as_os_str().is_empty() {
                return Err("Root path cannot be empty".to_string());
            }
        } else {
            return Err("Root path is required".to_string());
        }
        if let (Some(preview), Some(sample)) = (self.preview_bytes, self.sample_size) {
            if preview > sample {
                return Err(format!(
                    "Preview length ({preview}) cannot exceed the classification sample ({sample})"
                ));
            }
        }
        Ok(())
    }
}

impl ScanConfig {
    /// Create a new scan config builder.
    pub fn builder() -> ScanConfigBuilder {
        ScanConfigBuilder::default()
    }

    /// Create a simple config for scanning a path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            exclude_dirs: default_excluded_dirs(),
            exclude_paths: Vec::new(),
            threads: 1,
            follow_symlinks: false,
            sample_size: BINARY_SAMPLE_SIZE,
            preview_bytes: PREVIEW_BYTES,
            preview_max_size: PREVIEW_MAX_SIZE,
        }
    }

    /// Check if a directory with this name is pruned.
    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.exclude_dirs.iter().any(|excluded| excluded == name)
    }

    /// Check if this exact path is pruned.
    pub fn is_excluded_path(&self, path: &Path) -> bool {
        self.exclude_paths.iter().any(|excluded| excluded == path)
    }

    /// Whether records are built on a worker pool instead of in walk order.
    pub fn is_parallel(&self) -> bool {
        self.threads != 1
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = ScanConfig::builder()
            .root("/home/user")
            .threads(4usize)
            .follow_symlinks(true)
            .build()
            .unwrap();

        assert_eq!(config.root, PathBuf::from("/home/user"));
        assert_eq!(config.threads, 4);
        assert!(config.follow_symlinks);
        assert_eq!(config.exclude_dirs, vec![".git".to_string()]);
        assert_eq!(config.sample_size, 8000);
    }

    #[test]
    fn test_config_simple() {
        let config = ScanConfig::new("/home/user");
        assert_eq!(config.root, PathBuf::from("/home/user"));
        assert!(!config.follow_symlinks);
        assert_eq!(config.threads, 1);
        assert!(!config.is_parallel());
        assert_eq!(config.preview_bytes, 2000);
        assert_eq!(config.preview_max_size, 204_800);
    }

    #[test]
    fn test_builder_requires_root() {
        assert!(ScanConfig::builder().build().is_err());
        assert!(ScanConfig::builder().root("").build().is_err());
    }

    #[test]
    fn test_builder_rejects_preview_larger_than_sample() {
        let result = ScanConfig::builder()
            .root("/test")
            .sample_size(100usize)
            .preview_bytes(200usize)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_vcs_directory_excluded_by_default() {
        let config = ScanConfig::new("/test");

        assert!(config.is_excluded_dir(".git"));
        assert!(!config.is_excluded_dir(".github"));
        assert!(!config.is_excluded_dir("git"));
        assert!(!config.is_excluded_dir("src"));
    }

    #[test]
    fn test_excluded_paths_match_exactly() {
        let config = ScanConfig::builder()
            .root("/test")
            .exclude_paths(vec![PathBuf::from("/test/report_dir")])
            .build()
            .unwrap();

        assert!(config.is_excluded_path(Path::new("/test/report_dir")));
        assert!(!config.is_excluded_path(Path::new("/test/report_dir.txt")));
        assert!(!config.is_excluded_path(Path::new("/test")));
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let config: ScanConfig = serde_json::from_str(r#"{"root": "/srv/repo"}"#).unwrap();
        assert_eq!(config.exclude_dirs, vec![".git".to_string()]);
        assert_eq!(config.threads, 1);
        assert_eq!(config.sample_size, BINARY_SAMPLE_SIZE);
    }
}
