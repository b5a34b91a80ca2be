use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Hard failures. Anything else is reported as data on the result.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("invalid root {}: {reason}", .path.display())]
    InvalidRoot { path: PathBuf, reason: String },

    #[error("invalid match pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("failed to open apply log {}: {source}", .path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A directory (or entry) the walk had to skip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalWarning {
    pub path: PathBuf,
    pub message: String,
}

impl fmt::Display for TraversalWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "skipped {}: {}", self.path.display(), self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Something already lives at the target path
    DestinationExists,
    /// The computed name is empty
    EmptyName,
    /// The computed name is not a single path component
    InvalidName,
    /// The rename syscall failed
    Io,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::DestinationExists => "destination exists",
            Self::EmptyName => "empty name",
            Self::InvalidName => "invalid name",
            Self::Io => "io error",
        };
        f.write_str(label)
    }
}

/// One file that was not renamed, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameFailure {
    pub path: PathBuf,
    pub candidate: String,
    pub kind: FailureKind,
    pub cause: String,
}

impl RenameFailure {
    pub fn new(
        path: impl Into<PathBuf>,
        candidate: impl Into<String>,
        kind: FailureKind,
        cause: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            candidate: candidate.into(),
            kind,
            cause: cause.into(),
        }
    }
}

impl fmt::Display for RenameFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {:?}: {} ({})",
            self.path.display(),
            self.candidate,
            self.kind,
            self.cause
        )
    }
}
