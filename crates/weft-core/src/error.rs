//! Unified error handling for Weft Core.
//!
//! A single root error type wraps application errors, each with
//! user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;

/// Root error type for Weft Core operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum WeftError {
    /// Errors from the application layer (read, parse, render, state).
    #[error("{0}")]
    Application(#[from] ApplicationError),
}

impl WeftError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Application(e) => e.category(),
        }
    }

    /// True when the error came from reading a template file.
    pub fn is_read_failure(&self) -> bool {
        matches!(self, Self::Application(ApplicationError::TemplateRead { .. }))
    }

    /// True when the host engine rejected a template body.
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, Self::Application(ApplicationError::TemplateParse { .. }))
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}

/// Convenient result type alias.
pub type WeftResult<T> = Result<T, WeftError>;
