use thiserror::Error;

/// Errors from typed settings lookups
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArgError {
    /// No option registered under this name
    #[error("Unknown option: {0}")]
    Missing(String),

    /// Option exists but holds another variant
    #[error("Option {name} is {found}, expected {expected}")]
    TypeMismatch {
        /// Normalized option name
        name: String,
        /// Requested variant
        expected: &'static str,
        /// Stored variant
        found: &'static str,
    },
}
