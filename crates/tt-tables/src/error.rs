//! Table and interpolation errors.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for table operations.
pub type TableResult<T> = Result<T, TableError>;

#[derive(Error, Debug)]
pub enum TableError {
    /// Malformed delimited text.
    #[error("CSV parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Column not found: {column}")]
    MissingColumn { column: String },

    /// Column choice that cannot form a table (e.g. x and y are the same column).
    #[error("Invalid column selection: {what}")]
    InvalidSelection { what: String },

    #[error("Unsupported interpolation method '{method}' (expected linear, nearest or cubic)")]
    UnsupportedMethod { method: String },

    #[error("Interpolation failed: {what}")]
    InterpolationFailed { what: String },

    #[error("Failed to read table file: {path}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl TableError {
    pub(crate) fn failed(what: impl Into<String>) -> Self {
        TableError::InterpolationFailed { what: what.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = TableError::UnsupportedMethod {
            method: "quintic".into(),
        };
        assert!(err.to_string().contains("quintic"));

        let err = TableError::Parse {
            line: 3,
            message: "expected 3 fields, found 2".into(),
        };
        assert!(err.to_string().contains("line 3"));
    }
}
