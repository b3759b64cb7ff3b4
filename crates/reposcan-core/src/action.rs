//! Caller-owned log of filesystem actions taken during a run.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Kind of filesystem action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    /// An existing path was deleted.
    Removed,
    /// A directory was created.
    Created,
    /// A file was written.
    Wrote,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Removed => write!(f, "REMOVED"),
            Self::Created => write!(f, "CREATED"),
            Self::Wrote => write!(f, "WROTE"),
        }
    }
}

/// A single logged action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub kind: ActionKind,
    pub path: PathBuf,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.path.display())
    }
}

/// Ordered record of what a run did to the filesystem.
///
/// Owned by the caller and passed by `&mut` into each operation, so
/// several operations can share one log without global state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLog {
    entries: Vec<Action>,
}

impl ActionLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an action.
    pub fn record(&mut self, kind: ActionKind, path: impl Into<PathBuf>) {
        self.entries.push(Action {
            kind,
            path: path.into(),
        });
    }

    /// Logged actions in order.
    pub fn entries(&self) -> &[Action] {
        &self.entries
    }

    /// Paths written so far.
    pub fn written(&self) -> impl Iterator<Item = &Path> {
        self.entries
            .iter()
            .filter(|a| a.kind == ActionKind::Wrote)
            .map(|a| a.path.as_path())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for ActionLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for action in &self.entries {
            writeln!(f, "{action}")?;
        }
        Ok(())
    }
}
