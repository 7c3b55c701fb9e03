//! Error types for launchdash.
//!
//! This module defines all error types used throughout the launchdash crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for launchdash operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Dataset Errors ===
    /// Failed to open the launch dataset.
    #[error("failed to open dataset at {path}: {source}")]
    DatasetOpen {
        /// Path to the dataset file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: csv::Error,
    },

    /// The dataset header does not match the expected schema.
    #[error("dataset schema mismatch: {message}")]
    DatasetSchema {
        /// Description of the mismatch.
        message: String,
    },

    /// A single dataset row could not be parsed.
    #[error("invalid dataset row at line {line}: {message}")]
    DatasetRow {
        /// 1-based line number in the source file.
        line: u64,
        /// Description of what went wrong.
        message: String,
    },

    /// The dataset contains no rows.
    #[error("dataset contains no launch records")]
    DatasetEmpty,

    /// Reading the dataset failed.
    #[error("dataset read failed: {0}")]
    Csv(#[from] csv::Error),

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Control Errors ===
    /// A payload range with `low > high` or a non-finite bound.
    #[error("invalid payload range [{low}, {high}]")]
    InvalidRange {
        /// Lower bound as supplied.
        low: f64,
        /// Upper bound as supplied.
        high: f64,
    },

    /// A control id that the dashboard does not declare.
    #[error("unknown control: {0}")]
    UnknownControl(String),

    /// A chart computation failed.
    #[error("failed to render {output}: {message}")]
    Render {
        /// Graph id of the output that failed.
        output: &'static str,
        /// Description of what went wrong.
        message: String,
    },

    // === I/O Errors ===
    /// File system or socket operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for launchdash operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new schema mismatch error.
    #[must_use]
    pub fn schema(message: impl Into<String>) -> Self {
        Self::DatasetSchema {
            message: message.into(),
        }
    }

    /// Create a new row error for the given line.
    #[must_use]
    pub fn row(line: u64, message: impl Into<String>) -> Self {
        Self::DatasetRow {
            line,
            message: message.into(),
        }
    }

    /// Create a new render error for the given output.
    #[must_use]
    pub fn render(output: &'static str, message: impl Into<String>) -> Self {
        Self::Render {
            output,
            message: message.into(),
        }
    }

    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this error was raised while loading the dataset.
    ///
    /// These are fatal at start-up.
    #[must_use]
    pub fn is_dataset_error(&self) -> bool {
        matches!(
            self,
            Self::DatasetOpen { .. }
                | Self::DatasetSchema { .. }
                | Self::DatasetRow { .. }
                | Self::DatasetEmpty
                | Self::Csv(_)
        )
    }

    /// Check if this error was caused by a malformed control value.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidRange { .. } | Self::UnknownControl(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::DatasetEmpty;
        assert_eq!(err.to_string(), "dataset contains no launch records");

        let err = Error::internal("test error");
        assert_eq!(err.to_string(), "internal error: test error");
    }

    #[test]
    fn test_schema_error_display() {
        let err = Error::schema("missing column 'class'");
        assert_eq!(
            err.to_string(),
            "dataset schema mismatch: missing column 'class'"
        );
    }

    #[test]
    fn test_row_error_display() {
        let err = Error::row(7, "bad payload");
        let msg = err.to_string();
        assert!(msg.contains("line 7"));
        assert!(msg.contains("bad payload"));
    }

    #[test]
    fn test_render_error_display() {
        let err = Error::render("success-pie-chart", "boom");
        assert_eq!(err.to_string(), "failed to render success-pie-chart: boom");
    }

    #[test]
    fn test_invalid_range_display() {
        let err = Error::InvalidRange {
            low: 9000.0,
            high: 100.0,
        };
        assert_eq!(err.to_string(), "invalid payload range [9000, 100]");
    }

    #[test]
    fn test_is_dataset_error() {
        assert!(Error::DatasetEmpty.is_dataset_error());
        assert!(Error::schema("x").is_dataset_error());
        assert!(Error::row(2, "x").is_dataset_error());
        assert!(!Error::internal("x").is_dataset_error());
        assert!(!Error::UnknownControl("x".to_string()).is_dataset_error());
    }

    #[test]
    fn test_is_client_error() {
        assert!(Error::UnknownControl("knob".to_string()).is_client_error());
        assert!(Error::InvalidRange {
            low: 2.0,
            high: 1.0
        }
        .is_client_error());
        assert!(!Error::DatasetEmpty.is_client_error());
        assert!(!Error::render("success-pie-chart", "x").is_client_error());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_dataset_open_error_display() {
        let result = csv::Reader::from_path("/nonexistent/path/launches.csv");
        if let Err(csv_err) = result {
            let err = Error::DatasetOpen {
                path: PathBuf::from("/nonexistent/path/launches.csv"),
                source: csv_err,
            };
            assert!(err.to_string().contains("/nonexistent/path/launches.csv"));
            assert!(err.is_dataset_error());
        }
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "port must be non-zero".to_string(),
        };
        assert!(err.to_string().contains("port must be non-zero"));
    }
}
