//! Fluid property errors.

use thiserror::Error;
use tt_core::CoreError;

use crate::symbol::PropertySymbol;

/// Result type for fluid operations.
pub type FluidResult<T> = Result<T, FluidError>;

/// Errors that can occur while converting units or querying fluid properties.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluidError {
    /// Symbol outside the recognized enumeration, or not valid in this position.
    #[error("Unsupported property symbol '{symbol}'")]
    UnsupportedSymbol { symbol: String },

    /// Unit not recognized for this symbol.
    #[error("Unknown unit '{unit}' for {symbol}")]
    UnknownUnit { unit: String, symbol: PropertySymbol },

    /// Text could not be parsed into a number (+ optional unit).
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// Query rejected before any evaluator call.
    #[error("Invalid query: {what}")]
    InvalidQuery { what: String },

    /// The evaluator rejected the state while computing one output.
    #[error("Evaluation of {symbol} failed: {message}")]
    EvaluationFailed {
        symbol: PropertySymbol,
        message: String,
    },

    /// Backend (CoolProp) error.
    #[error("Backend error: {message}")]
    Backend { message: String },
}

impl FluidError {
    pub(crate) fn invalid_query(what: impl Into<String>) -> Self {
        FluidError::InvalidQuery { what: what.into() }
    }
}

impl From<CoreError> for FluidError {
    fn from(err: CoreError) -> Self {
        FluidError::InvalidQuery {
            what: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FluidError::UnsupportedSymbol {
            symbol: "Z".into(),
        };
        assert!(err.to_string().contains("'Z'"));

        let err = FluidError::EvaluationFailed {
            symbol: PropertySymbol::D,
            message: "CoolProp failed".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("D"));
        assert!(msg.contains("CoolProp"));
    }

    #[test]
    fn core_error_becomes_invalid_query() {
        let err: FluidError = CoreError::NonFinite {
            what: "quality",
            value: f64::NAN,
        }
        .into();
        assert!(matches!(err, FluidError::InvalidQuery { .. }));
    }
}
