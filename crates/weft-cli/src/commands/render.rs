//! `weft render`: compose a root template and render it to stdout.

use std::{fs, path::Path};

use serde_json::{Map, Value};
use tracing::{debug, instrument};
use weft_adapters::{
    HelperFunction,
    renderer::helpers::{now_helper, repeat_helper},
};
use weft_core::application::FunctionMap;

use crate::{
    cli::RenderArgs,
    commands::build_composer,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

#[instrument(skip_all, fields(root = %args.root))]
pub fn execute(args: RenderArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let composer = build_composer(&args.source, &config)?;
    composer.enable_cache(config.templates.cache && !args.no_cache)?;
    composer.add_fixed_func("now", HelperFunction::new(now_helper))?;

    let data = render_data(args.data.as_deref(), args.vars)?;
    let per_call = FunctionMap::new().with("repeat", HelperFunction::new(repeat_helper));

    let set = composer.compose_with(args.root.as_str(), &per_call)?;
    debug!(units = set.len(), "Composed");

    let rendered = set.render(&data)?;
    output.emit(&rendered)?;
    Ok(())
}

/// Object from the `--data` file with `--var` pairs layered on top.
fn render_data(file: Option<&Path>, vars: Vec<(String, String)>) -> CliResult<Value> {
    let mut data = match file {
        Some(path) => read_data_file(path)?,
        None => Map::new(),
    };
    for (key, value) in vars {
        data.insert(key, Value::String(value));
    }
    Ok(Value::Object(data))
}

fn read_data_file(path: &Path) -> CliResult<Map<String, Value>> {
    let raw = fs::read_to_string(path)
        .with_cli_context(|| format!("Failed to read data file {}", path.display()))?;

    match serde_json::from_str(&raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(CliError::InvalidData {
            path: path.to_path_buf(),
            reason: format!("expected a JSON object, found {}", json_kind(&other)),
        }),
        Err(e) => Err(CliError::InvalidData {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
