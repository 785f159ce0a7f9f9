//! Handlebars helpers shipped with the adapters.

use handlebars::{Context, Handlebars, Helper, HelperResult, Output, RenderContext};

/// Directive stub: takes one argument, writes nothing.
///
/// Registered under `include` and `extends`. The directives are resolved
/// before rendering, so when the engine meets their text it must produce no
/// output. Render another unit with a partial (`{{> name}}`) instead.
pub fn inert_directive(
    _: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    _: &mut dyn Output,
) -> HelperResult {
    Ok(())
}

/// `{{now}}` - current local time as `YYYY-mm-dd HH:MM:SS`.
pub fn now_helper(
    _: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    out.write(&now.to_string())?;
    Ok(())
}

/// `{{repeat "ab" 3}}` - the first argument repeated n times.
pub fn repeat_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let text = h.param(0).and_then(|v| v.value().as_str()).unwrap_or("");
    let count = h.param(1).and_then(|v| v.value().as_u64()).unwrap_or(0);
    out.write(&text.repeat(count as usize))?;
    Ok(())
}
