//! Infrastructure adapters for Weft.
//!
//! This crate implements the ports defined in `weft-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod renderer;

use weft_core::{application::Composer, error::WeftResult};

// Re-export commonly used adapters
pub use filesystem::{LocalSource, MemorySource};
pub use renderer::{ComposedTemplates, HandlebarsEngine, HelperFunction};

/// Composer rendering with Handlebars.
pub type HandlebarsComposer<S = LocalSource> = Composer<HandlebarsEngine, S>;

/// Composer reading templates from `base_dir` on the local filesystem.
pub fn local_composer(base_dir: impl Into<String>) -> WeftResult<HandlebarsComposer> {
    let composer = Composer::new(HandlebarsEngine::new(), LocalSource::new());
    composer.set_base_dir(base_dir)?;
    Ok(composer)
}
