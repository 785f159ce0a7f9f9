//! `weft units`: list every unit a composition pulls in.

use serde_json::json;
use tracing::instrument;

use crate::{
    cli::{ListFormat, UnitsArgs},
    commands::build_composer,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all, fields(root = %args.root))]
pub fn execute(args: UnitsArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let composer = build_composer(&args.source, &config)?;
    let set = composer.compose(args.root.as_str())?;
    let names = set.names();

    match args.format {
        ListFormat::Plain => {
            let mut listing = names.join("\n");
            listing.push('\n');
            output.emit(&listing)?;
        }
        ListFormat::Json => {
            let doc = json!({ "root": set.root(), "units": names });
            let rendered = serde_json::to_string_pretty(&doc).map_err(|e| CliError::InvalidInput {
                message: format!("Failed to serialise unit list: {e}"),
                source: Some(Box::new(e)),
            })?;
            output.emit(&format!("{rendered}\n"))?;
        }
    }

    Ok(())
}
