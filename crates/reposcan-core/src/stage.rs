//! Pipeline stages of a scan run.

use std::fmt;

/// Linear lifecycle of one run. There is no resume: a failure before
/// [`Stage::Done`] means running again from [`Stage::Idle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Stage {
    #[default]
    Idle,
    Walking,
    Recording,
    Aggregating,
    Rendering,
    Packaging,
    Done,
}

impl Stage {
    /// The stage that follows this one, or `None` after [`Stage::Done`].
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Idle => Some(Self::Walking),
            Self::Walking => Some(Self::Recording),
            Self::Recording => Some(Self::Aggregating),
            Self::Aggregating => Some(Self::Rendering),
            Self::Rendering => Some(Self::Packaging),
            Self::Packaging => Some(Self::Done),
            Self::Done => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Walking => "walking",
            Self::Recording => "recording",
            Self::Aggregating => "aggregating",
            Self::Rendering => "rendering",
            Self::Packaging => "packaging",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
