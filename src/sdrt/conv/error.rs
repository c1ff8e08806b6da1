use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the fatal failures of a conversion run. Per-entry
/// problems such as a talkgroup without a value are not errors; they are
/// reported through [`crate::io::SkippedEntry`].
#[derive(Debug, Error)]
pub enum ToolError {
    /// Wrapper for IO failures such as reading input or writing to a sink.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when the playlist document cannot be parsed.
    #[error("malformed playlist: {0}")]
    MalformedInput(String),

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when an output table cannot be created.
    #[error("cannot create output {path}: {source}")]
    OpenOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Raised when neither the TSV nor the CSV output family was requested.
    #[error("must specify a mode (--tsv and/or --csv)")]
    NoOutputMode,

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

impl From<quick_xml::DeError> for ToolError {
    fn from(error: quick_xml::DeError) -> Self {
        ToolError::MalformedInput(error.to_string())
    }
}

impl From<quick_xml::Error> for ToolError {
    fn from(error: quick_xml::Error) -> Self {
        ToolError::MalformedInput(error.to_string())
    }
}
