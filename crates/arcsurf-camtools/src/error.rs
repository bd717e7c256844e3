//! Error types for the CAM tools crate.
//!
//! Degenerate geometry (collapsed layers, points outside the arc) is absorbed
//! by the engine and never surfaces here. Only invalid configuration and
//! output failures are errors.

use thiserror::Error;

/// Errors that can occur while building an arc-surface program.
#[derive(Error, Debug)]
pub enum CamToolError {
    /// A parameter validation error occurred.
    #[error("Parameter error: {0}")]
    Parameter(#[from] ParameterError),

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Errors related to parameter validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// A value must be strictly greater than zero.
    #[error("Parameter '{name}' must be positive, got {value}")]
    NotPositive { name: &'static str, value: f64 },

    /// A value must not be below zero.
    #[error("Parameter '{name}' must not be negative, got {value}")]
    Negative { name: &'static str, value: f64 },

    /// NaN or infinite input.
    #[error("Parameter '{name}' must be finite, got {value}")]
    NotFinite { name: &'static str, value: f64 },

    /// A parameter value is invalid.
    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue { name: &'static str, reason: String },

    /// Parameters are mutually incompatible.
    #[error("Incompatible parameters: {0}")]
    Incompatible(String),
}

/// Result type alias for CAM tool operations.
pub type CamToolResult<T> = Result<T, CamToolError>;

/// Result type alias for parameter validation.
pub type ParameterResult<T> = Result<T, ParameterError>;
