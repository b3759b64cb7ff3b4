//! Stable-order directory walker built on jwalk.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use jwalk::{DirEntry, Parallelism, WalkDir};
use tracing::debug;

use reposcan_core::ScanConfig;

/// Enumerates regular files under a root, depth-first and sorted by name
/// within each directory, pruning excluded directories and paths.
#[derive(Debug, Clone)]
pub struct DirectoryWalker {
    config: Arc<ScanConfig>,
}

impl DirectoryWalker {
    /// Create a walker using the exclusion rules of `config`.
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            config: Arc::new(config.clone()),
        }
    }

    /// Lazily yield the absolute path of every regular file under `root`.
    ///
    /// Directories that cannot be read are skipped without failing the walk.
    pub fn walk(&self, root: &Path) -> impl Iterator<Item = PathBuf> + use<> {
        let rules = Arc::clone(&self.config);

        WalkDir::new(root)
            .parallelism(parallelism(self.config.threads))
            .sort(true)
            .skip_hidden(false)
            .follow_links(self.config.follow_symlinks)
            .process_read_dir(move |_depth, _dir, _state, children| {
                children.retain(|child| match child {
                    Ok(entry) => !is_pruned(&rules, entry),
                    Err(_) => true,
                });
            })
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    debug!(path = ?err.path(), error = %err, "Skipping unreadable entry");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.path())
    }
}

/// Check if an entry is cut from the walk along with its descendants.
fn is_pruned(config: &ScanConfig, entry: &DirEntry<((), ())>) -> bool {
    let path = entry.path();
    if config.is_excluded_path(&path) {
        debug!(path = %path.display(), "Pruning excluded path");
        return true;
    }
    if entry.file_type().is_dir() && config.is_excluded_dir(&entry.file_name().to_string_lossy())
    {
        debug!(path = %path.display(), "Pruning excluded directory");
        return true;
    }
    false
}

fn parallelism(threads: usize) -> Parallelism {
    match threads {
        0 => Parallelism::RayonDefaultPool {
            busy_timeout: std::time::Duration::from_millis(100),
        },
        1 => Parallelism::Serial,
        n => Parallelism::RayonNewPool(n),
    }
}
