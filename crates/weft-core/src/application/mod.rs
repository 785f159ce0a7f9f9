//! Application layer for Weft.
//!
//! This layer contains:
//! - **Services**: The recursive composer and its per-call session
//! - **State**: Settings, the template cache, and the function registry
//! - **Ports**: Interface definitions (traits) for the template source and engine
//! - **Errors**: Application-specific error types
//!
//! Directive grammar lives in `crate::domain`; this layer decides what to read,
//! in which order, and what to keep.

pub mod cache;
pub mod error;
pub mod functions;
pub mod ports;
pub mod services;
pub mod settings;

// Re-export main services
pub use services::{Composer, Session};

// Re-export port traits (for adapter implementation)
pub use ports::{TemplateEngine, TemplateSource};

pub use cache::TemplateCache;
pub use error::ApplicationError;
pub use functions::FunctionMap;
pub use settings::Settings;
