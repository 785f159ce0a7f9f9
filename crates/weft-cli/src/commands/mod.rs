//! Command handlers, one module per subcommand.

pub mod completions;
pub mod config;
pub mod render;
pub mod scan;
pub mod units;

use weft_adapters::{HandlebarsComposer, HandlebarsEngine, LocalSource};
use weft_core::application::Composer;

use crate::{cli::SourceArgs, config::AppConfig, error::CliResult};

/// Composer reading from `--base-dir`, else `templates.base_dir`.
pub(crate) fn build_composer(source: &SourceArgs, config: &AppConfig) -> CliResult<HandlebarsComposer> {
    let engine = HandlebarsEngine::new()
        .strict(config.templates.strict)
        .escape_html(config.templates.escape_html);
    let composer = Composer::new(engine, LocalSource::new());

    let base_dir = source
        .base_dir
        .clone()
        .unwrap_or_else(|| config.templates.base_dir.clone());
    composer.set_base_dir(base_dir)?;

    Ok(composer)
}
