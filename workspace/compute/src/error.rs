use thiserror::Error;

/// Error types for the compute module
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComputeError {
    /// An input is outside its valid range (negative principal, negative
    /// term, non-positive income, overflow of the annuity factor, ...).
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// A computation would divide by zero, e.g. a zero-length schedule.
    #[error("Division by zero: {0}")]
    DivisionByZero(String),

    /// An amount string is not a decimal number.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl ComputeError {
    pub fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        ComputeError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;
