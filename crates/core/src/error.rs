//! Error types for droidbuild
//!
//! Centralized error handling using thiserror. Subprocess failures are kept
//! as a single undifferentiated variant: every non-zero exit aborts the
//! whole operation identically, regardless of which tool produced it.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Report from one failed external tool invocation.
///
/// Carries the fully captured output streams so the caller can surface them
/// verbatim before terminating.
#[derive(Debug, Clone)]
pub struct ToolFailure {
    /// Short name of the failing tool (e.g. `aapt`).
    pub tool: String,
    /// Pipeline stage that ran the tool, when known.
    pub stage: Option<&'static str>,
    /// Exit code, or -1 when the process was killed by a signal.
    pub code: i32,
    /// Everything the tool wrote to stdout.
    pub stdout: String,
    /// Everything the tool wrote to stderr.
    pub stderr: String,
}

impl fmt::Display for ToolFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.stage {
            Some(stage) => write!(
                f,
                "`{}` failed during the {} stage (exit code {})",
                self.tool, stage, self.code
            ),
            None => write!(f, "`{}` failed (exit code {})", self.tool, self.code),
        }
    }
}

impl std::error::Error for ToolFailure {}

/// Main error type for droidbuild operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("project already exists in {0}")]
    ProjectAlreadyExists(PathBuf),

    #[error("no project descriptor found in {0}")]
    ProjectNotFound(PathBuf),

    #[error(transparent)]
    Tool(#[from] ToolFailure),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("descriptor error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for droidbuild operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Attach the pipeline stage that produced a tool failure. Diagnostic
    /// only; propagation is unchanged.
    pub fn in_stage(self, stage: &'static str) -> Self {
        match self {
            Error::Tool(mut failure) => {
                failure.stage = Some(stage);
                Error::Tool(failure)
            }
            other => other,
        }
    }
}
