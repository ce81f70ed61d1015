//! Error handling for EPF reading operations.
//!
//! Every failure is returned to the caller of the operation that triggered
//! it. Reaching the footer or the end of the stream is not an error; see
//! [`ReadOutcome`](crate::app::services::epf_parser::ReadOutcome).

use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// A header line did not have the expected shape
    #[error("Bad header format at line {line}: {message}")]
    Format { line: usize, message: String },

    /// A record carried more fields than the header declares
    #[error(
        "Record {record} is out of range: field index {index} exceeds {declared} declared fields"
    )]
    OutOfRange {
        record: usize,
        index: usize,
        declared: usize,
    },

    #[error("Invalid {type_name} value '{value}': {source}")]
    NumericFormat {
        value: String,
        type_name: String,
        #[source]
        source: ParseIntError,
    },

    #[error("Cannot read footer: {message}")]
    FooterUnreadable { message: String },

    /// The stream ended part way through a record
    #[error("Record {record} is truncated after {fields_read} fields")]
    TruncatedRecord { record: usize, fields_read: usize },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Processing failed for file: {path} - {reason}")]
    ProcessingFailed { path: PathBuf, reason: String },
}

impl Error {
    /// Create a header format error
    pub fn format(line: usize, message: impl Into<String>) -> Self {
        Self::Format {
            line,
            message: message.into(),
        }
    }

    /// Create a numeric format error for a value of the given declared type
    pub fn numeric_format(
        value: impl Into<String>,
        type_name: impl Into<String>,
        source: ParseIntError,
    ) -> Self {
        Self::NumericFormat {
            value: value.into(),
            type_name: type_name.into(),
            source,
        }
    }

    /// Create a footer error
    pub fn footer_unreadable(message: impl Into<String>) -> Self {
        Self::FooterUnreadable {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a processing failure for a file-level task
    pub fn processing_failed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ProcessingFailed {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
