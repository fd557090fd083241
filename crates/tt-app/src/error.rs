//! Error types for the tt-app service layer.

use std::path::PathBuf;

/// Every failure a request can end in, with a user-presentable message.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Fluid(#[from] tt_fluids::FluidError),

    #[error(transparent)]
    Table(#[from] tt_tables::TableError),

    #[error("Failed to read request file: {path}")]
    RequestFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse request file {path}: {message}")]
    RequestParse { path: PathBuf, message: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for tt-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialize(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialize(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tt_fluids::{FluidError, PropertySymbol};

    #[test]
    fn wrapped_errors_keep_their_message() {
        let err: AppError = FluidError::EvaluationFailed {
            symbol: PropertySymbol::D,
            message: "out of range".into(),
        }
        .into();
        let text = err.to_string();
        assert!(text.contains("out of range"));
        assert!(text.contains('D'));
    }
}
