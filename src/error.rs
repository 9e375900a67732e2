//! Error kinds of a sync or extract run.

use std::path::PathBuf;

/// Problems with the control points themselves.
///
/// Indices are 1-based so they can be shown to the user as-is.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("expected at least one point, for example `{example}`")]
    MissingPoints { example: &'static str },

    #[error("expected point {index} to be for example `{example}` but got: {actual}")]
    MalformedPoint {
        index: usize,
        example: &'static str,
        actual: String,
    },

    #[error("expected point {index} to have an offset >= 0 but got: {value}")]
    InvalidOffset { index: usize, value: f64 },

    #[error("expected point {index} to have an offset within the media's range but got: {value}")]
    OffsetOutOfRange { index: usize, value: f64 },

    #[error(
        "point {index} at offset {value} is too close to the previous point, \
         the segment between them would be empty"
    )]
    SegmentTooShort { index: usize, value: f64 },

    #[error("expected point {index} to have 0.5 <= tempo <= 2.0 but got: {value}")]
    InvalidTempo { index: usize, value: f64 },

    #[error("point {index} repeats offset {value}")]
    DuplicateOffset { index: usize, value: f64 },
}

/// Errors that end a run.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("{0}")]
    Usage(String),

    #[error("{} is not an existing file.", path.display())]
    MissingInputFile { path: PathBuf },

    #[error("{tool} seems not to be installed.")]
    ToolUnavailable { tool: String },

    #[error(
        "{} already exists. Move or delete it first.\nAlternatively, pass `--force`.",
        path.display()
    )]
    OutputAlreadyExists { path: PathBuf },

    #[error("Failed to parse for \"points\" in {}\n{message}", path.display())]
    MalformedDocument { path: PathBuf, message: String },

    #[error("Failed to parse for \"points\" in {}\n{source}", path.display())]
    InvalidPoints {
        path: PathBuf,
        #[source]
        source: ValidationError,
    },

    #[error("external tool failed: {0}")]
    ExternalToolFailure(#[source] temposync_av::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl SyncError {
    /// Process exit code for this failure.
    ///
    /// Anything detected before the output directory is touched is a
    /// validation or setup failure (1); failures mid-pipeline are 2.
    pub fn exit_code(&self) -> i32 {
        match self {
            SyncError::ExternalToolFailure(_) | SyncError::Io(_) => 2,
            _ => 1,
        }
    }

    /// The validation failure behind this error, if any.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            SyncError::InvalidPoints { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<temposync_av::Error> for SyncError {
    fn from(err: temposync_av::Error) -> Self {
        match err {
            temposync_av::Error::OutputExists { path } => SyncError::OutputAlreadyExists { path },
            temposync_av::Error::Io(e) => SyncError::Io(e),
            temposync_av::Error::Workspace(message) => {
                SyncError::Io(std::io::Error::other(message))
            }
            other => SyncError::ExternalToolFailure(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
