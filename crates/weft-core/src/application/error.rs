//! Application layer errors.
//!
//! These are the failures a composition can run into. Malformed directives
//! are not among them: a span that does not qualify is ordinary text.

use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors raised while composing or rendering templates.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// A template file could not be read (missing, unreadable, not UTF-8).
    #[error("Failed to read template {path}: {reason}")]
    TemplateRead { path: String, reason: String },

    /// The host engine rejected a template body.
    #[error("Failed to parse template '{name}': {reason}")]
    TemplateParse { name: String, reason: String },

    /// Executing a composed unit failed.
    #[error("Failed to render template '{name}': {reason}")]
    RenderFailed { name: String, reason: String },

    /// Shared engine state is unusable (lock poisoned).
    #[error("Composer state lock poisoned")]
    StateLock,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TemplateRead { path, .. } => vec![
                format!("Check that {} exists and is readable", path),
                "Template names are resolved relative to the base directory".into(),
                "Use --base-dir to point at your template directory".into(),
            ],
            Self::TemplateParse { name, .. } => vec![
                format!("Fix the template syntax in '{}'", name),
                "Directives must look like {{include \"file\"}} or {{extends \"file\"}}".into(),
            ],
            Self::RenderFailed { name, .. } => vec![
                format!("Check the data passed to '{}'", name),
                "Partials must be composed into the set (add an include directive)".into(),
            ],
            Self::StateLock => vec![
                "A previous composition panicked while holding shared state".into(),
                "Restart the process".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateRead { .. } => ErrorCategory::NotFound,
            Self::TemplateParse { .. } | Self::RenderFailed { .. } => ErrorCategory::Validation,
            Self::StateLock => ErrorCategory::Internal,
        }
    }
}
