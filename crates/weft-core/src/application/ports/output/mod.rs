//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the composer needs from external systems.
//! The `weft-adapters` crate provides implementations.

use crate::domain::TemplateName;
use crate::error::WeftResult;

/// Port for reading template bodies.
///
/// Implemented by:
/// - `weft_adapters::filesystem::LocalSource` (production)
/// - `weft_adapters::filesystem::MemorySource` (testing)
///
/// ## Design Notes
///
/// - `path` is the base directory concatenated with the template name
/// - Read-only; a failure must be reported as `ApplicationError::TemplateRead`
#[cfg_attr(test, mockall::automock)]
pub trait TemplateSource: Send + Sync {
    /// Read the whole body at `path`.
    fn read(&self, path: &str) -> WeftResult<String>;
}

/// Port for the host templating engine.
///
/// The composer never looks inside a [`TemplateEngine::Set`]; it only asks the
/// engine to create one, register callables in it and parse named units into
/// it. Rendering is the engine's business.
///
/// Implemented by:
/// - `weft_adapters::renderer::HandlebarsEngine`
pub trait TemplateEngine: Send + Sync {
    /// Aggregate of named template units produced by one composition.
    type Set: Send + Sync;

    /// A callable that can be registered into a set under a name.
    ///
    /// Cloned into every new set, so it should be cheap to clone.
    type Function: Clone + Send + Sync;

    /// Create an empty set for a composition rooted at `root`.
    fn create_set(&self, root: &TemplateName) -> Self::Set;

    /// Register `function` under `name`, replacing an existing entry.
    fn register_function(&self, set: &mut Self::Set, name: &str, function: Self::Function);

    /// Parse `body` into `set` as the unit `name`.
    ///
    /// Must fail with `ApplicationError::TemplateParse` when the body is
    /// rejected.
    fn parse(&self, set: &mut Self::Set, name: &TemplateName, body: &str) -> WeftResult<()>;

    /// A callable that accepts one string argument and produces nothing.
    ///
    /// Registered under every directive keyword so that directive text left in
    /// a body is harmless at render time.
    fn inert_function(&self) -> Self::Function;
}
