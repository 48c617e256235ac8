// ============================================================================
// vidprep-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Error types for the vidprep core library
//
// Most failures in this crate are absorbed close to where they happen: a
// failed ffprobe query becomes an absent field, an unparseable progress value
// becomes a `?` placeholder. The variants below exist so that the places which
// do absorb an error can log what they absorbed, and so the startup checker
// can report the failures that are fatal for it.

// ---- External crate imports ----
use thiserror::Error;

// ---- Standard library imports ----
use std::process::ExitStatus;

/// Errors produced by the vidprep core library.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    #[error("Required external command not found: {0}")]
    DependencyNotFound(String),

    #[error("Failed to start {0}: {1}")]
    CommandStart(String, std::io::Error),

    #[error("{0} exited with {1}: {2}")]
    CommandFailed(String, ExitStatus, String),

    #[error("{0} timed out after {1} seconds")]
    CommandTimeout(String, u64),

    #[error("JSON parse error: {0}")]
    JsonParseError(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("missing required tools: {}", .0.join(", "))]
    MissingTools(Vec<String>),

    #[error("{0}")]
    UnsupportedPlatform(String),

    #[error("installed ffmpeg ({installed}) does not match Homebrew stable ({latest})")]
    VersionMismatch { installed: String, latest: String },
}

/// Result type for vidprep core operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Builds a [`CoreError::CommandStart`] for a command that could not be spawned.
pub fn command_start_error(tool: impl Into<String>, err: std::io::Error) -> CoreError {
    CoreError::CommandStart(tool.into(), err)
}

/// Builds a [`CoreError::CommandFailed`] for a command that exited unsuccessfully.
pub fn command_failed_error(
    tool: impl Into<String>,
    status: ExitStatus,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed(tool.into(), status, stderr.into())
}
