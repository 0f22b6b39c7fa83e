use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unable to open file: {}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // The reason is logged, not displayed: the diagnostic line is fixed.
    #[error("Error processing file: {}", path.display())]
    FileProcessing { path: PathBuf, reason: String },

    #[error("Not enough arguments provided. No file provided to analyze.")]
    NoInputFiles,

    #[error("No valid files were processed.")]
    NoFilesProcessed,
}

/// Why a single input line was skipped.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LineRejection {
    #[error("line is {length} bytes, limit is {limit}")]
    TooLong { length: usize, limit: usize },

    #[error("line is not valid UTF-8")]
    Encoding,

    #[error("expected 9 tab-separated fields, found {0}")]
    FieldCount(usize),

    #[error("invalid {field}: '{value}'")]
    InvalidField { field: &'static str, value: String },

    #[error("value out of range: {0}")]
    OutOfRange(String),
}

impl From<validator::ValidationErrors> for LineRejection {
    fn from(errors: validator::ValidationErrors) -> Self {
        LineRejection::OutOfRange(errors.to_string())
    }
}
