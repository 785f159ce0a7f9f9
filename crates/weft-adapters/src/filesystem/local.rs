//! Local filesystem template source using std::fs.

use std::io;
use std::path::Path;

use tracing::trace;
use weft_core::{application::ports::TemplateSource, error::WeftResult};

/// Production template source reading files with `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalSource;

impl LocalSource {
    /// Create a new local source adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateSource for LocalSource {
    fn read(&self, path: &str) -> WeftResult<String> {
        trace!(path, "Reading template file");
        std::fs::read_to_string(Path::new(path)).map_err(|e| map_io_error(path, e))
    }
}

fn map_io_error(path: &str, e: io::Error) -> weft_core::error::WeftError {
    use weft_core::application::ApplicationError;

    ApplicationError::TemplateRead {
        path: path.to_owned(),
        reason: e.to_string(),
    }
    .into()
}
