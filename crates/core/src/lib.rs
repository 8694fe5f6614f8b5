//! Shared primitives for all Rust crates in Fieldkit.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Result type used across Fieldkit crates.
pub type AppResult<T> = Result<T, AppError>;

/// Common application error categories.
///
/// These describe caller mistakes and upstream failures. Invalid *user input*
/// is never reported through `AppError`; it is surfaced as soft-invalid values
/// by the domain functions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// Invalid argument or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested lookup key does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the bare message without the category prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(message) | Self::NotFound(message) | Self::Internal(message) => {
                message.as_str()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AppError;

    #[test]
    fn display_includes_category() {
        let error = AppError::NotFound("status 'x'".to_owned());
        assert_eq!(error.to_string(), "not found: status 'x'");
    }

    #[test]
    fn message_strips_category() {
        let error = AppError::Validation("bad unit".to_owned());
        assert_eq!(error.message(), "bad unit");
    }
}
