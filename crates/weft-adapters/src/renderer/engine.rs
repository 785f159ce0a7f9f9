//! Handlebars as the host template engine.
//!
//! A composed set is one [`Handlebars`] registry holding every unit of the
//! composition under its template name. Units reach each other with
//! Handlebars partials:
//!
//! ```text
//! layout:  <html>{{include "footer"}}{{> footer}}</html>
//! footer:  <footer>{{year}}</footer>
//! ```
//!
//! `include` pulls `footer` into the set; `{{> footer}}` renders it.

use std::{collections::BTreeSet, fmt, io, sync::Arc};

use handlebars::{Handlebars, HelperDef};
use serde::Serialize;
use tracing::{instrument, trace};
use weft_core::{
    application::{ApplicationError, ports::TemplateEngine},
    domain::TemplateName,
    error::{WeftError, WeftResult},
};

use crate::renderer::helpers::inert_directive;

type HelperFactory = dyn Fn() -> Box<dyn HelperDef + Send + Sync> + Send + Sync;

/// A helper that can be registered into any number of sets.
///
/// Handlebars takes ownership of a boxed helper per registry, so the function
/// registry keeps a factory and builds a fresh box for every composed set.
#[derive(Clone)]
pub struct HelperFunction {
    factory: Arc<HelperFactory>,
}

impl HelperFunction {
    /// Wrap a cloneable helper, such as a plain `fn` with the helper signature.
    pub fn new<H>(helper: H) -> Self
    where
        H: HelperDef + Clone + Send + Sync + 'static,
    {
        Self {
            factory: Arc::new(move || -> Box<dyn HelperDef + Send + Sync> {
                Box::new(helper.clone())
            }),
        }
    }

    fn instantiate(&self) -> Box<dyn HelperDef + Send + Sync> {
        (self.factory)()
    }
}

impl fmt::Debug for HelperFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HelperFunction").finish_non_exhaustive()
    }
}

/// Units of one composition, ready to render.
pub struct ComposedTemplates {
    root: TemplateName,
    registry: Handlebars<'static>,
    functions: BTreeSet<String>,
}

impl ComposedTemplates {
    /// Name of the unit the composition started from.
    pub fn root(&self) -> &TemplateName {
        &self.root
    }

    /// Unit names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .registry
            .get_templates()
            .keys()
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.registry.has_template(name)
    }

    pub fn len(&self) -> usize {
        self.registry.get_templates().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names of the helpers registered in this set, sorted.
    pub fn function_names(&self) -> impl Iterator<Item = &str> {
        self.functions.iter().map(String::as_str)
    }

    pub fn has_function(&self, name: &str) -> bool {
        self.functions.contains(name)
    }

    /// The underlying registry, for engine features not wrapped here.
    pub fn registry(&self) -> &Handlebars<'static> {
        &self.registry
    }

    /// Render the root unit.
    pub fn render<T: Serialize>(&self, data: &T) -> WeftResult<String> {
        self.render_named(self.root.as_str(), data)
    }

    /// Render any unit of the set.
    #[instrument(skip(self, data))]
    pub fn render_named<T: Serialize>(&self, name: &str, data: &T) -> WeftResult<String> {
        self.registry
            .render(name, data)
            .map_err(|e| render_failed(name, e))
    }

    /// Render the root unit into `writer`.
    pub fn render_to_write<T: Serialize, W: io::Write>(&self, data: &T, writer: W) -> WeftResult<()> {
        self.registry
            .render_to_write(self.root.as_str(), data, writer)
            .map_err(|e| render_failed(self.root.as_str(), e))
    }
}

impl fmt::Debug for ComposedTemplates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComposedTemplates")
            .field("root", &self.root)
            .field("units", &self.names())
            .field("functions", &self.functions)
            .finish()
    }
}

fn render_failed(name: &str, e: handlebars::RenderError) -> WeftError {
    ApplicationError::RenderFailed {
        name: name.to_owned(),
        reason: e.to_string(),
    }
    .into()
}

/// Handlebars engine settings applied to every new set.
#[derive(Debug, Clone, Copy)]
pub struct HandlebarsEngine {
    strict: bool,
    escape_html: bool,
}

impl HandlebarsEngine {
    /// Non-strict, HTML-escaping engine.
    pub fn new() -> Self {
        Self {
            strict: false,
            escape_html: true,
        }
    }

    /// Fail rendering on missing fields instead of printing nothing.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Escape `{{expr}}` output for HTML. Disable for non-HTML text.
    pub fn escape_html(mut self, escape_html: bool) -> Self {
        self.escape_html = escape_html;
        self
    }
}

impl Default for HandlebarsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for HandlebarsEngine {
    type Set = ComposedTemplates;
    type Function = HelperFunction;

    fn create_set(&self, root: &TemplateName) -> ComposedTemplates {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(self.strict);
        if !self.escape_html {
            registry.register_escape_fn(handlebars::no_escape);
        }

        ComposedTemplates {
            root: root.clone(),
            registry,
            functions: BTreeSet::new(),
        }
    }

    fn register_function(&self, set: &mut ComposedTemplates, name: &str, function: HelperFunction) {
        set.registry.register_helper(name, function.instantiate());
        set.functions.insert(name.to_owned());
    }

    fn parse(&self, set: &mut ComposedTemplates, name: &TemplateName, body: &str) -> WeftResult<()> {
        trace!(template = %name, bytes = body.len(), "Registering unit");
        set.registry
            .register_template_string(name.as_str(), body)
            .map_err(|e| {
                ApplicationError::TemplateParse {
                    name: name.to_string(),
                    reason: e.to_string(),
                }
                .into()
            })
    }

    fn inert_function(&self) -> HelperFunction {
        HelperFunction::new(inert_directive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::helpers::repeat_helper;
    use serde_json::json;

    fn set_with(units: &[(&str, &str)]) -> ComposedTemplates {
        let engine = HandlebarsEngine::new();
        let mut set = engine.create_set(&TemplateName::from(units[0].0));
        engine.register_function(&mut set, "include", engine.inert_function());
        for (name, body) in units {
            engine.parse(&mut set, &TemplateName::from(*name), body).unwrap();
        }
        set
    }

    #[test]
    fn parse_registers_named_units() {
        let set = set_with(&[("page", "P"), ("nav", "N")]);

        assert_eq!(set.names(), vec!["nav", "page"]);
        assert!(set.contains("nav"));
        assert_eq!(set.len(), 2);
        assert_eq!(set.root().as_str(), "page");
    }

    #[test]
    fn parse_rejects_malformed_body() {
        let engine = HandlebarsEngine::new();
        let mut set = engine.create_set(&TemplateName::from("bad"));

        let err = engine
            .parse(&mut set, &TemplateName::from("bad"), "{{#if x}}a{{/each}}")
            .unwrap_err();

        assert!(err.is_parse_failure());
        assert!(err.to_string().contains("'bad'"));
    }

    #[test]
    fn render_root_with_partial() {
        let set = set_with(&[
            ("page", r#"<main>{{include "nav"}}{{> nav}}{{title}}</main>"#),
            ("nav", "<nav>{{title}}</nav>"),
        ]);

        let out = set.render(&json!({ "title": "Home" })).unwrap();
        assert_eq!(out, "<main><nav>Home</nav>Home</main>");
    }

    #[test]
    fn escapes_html_by_default() {
        let set = set_with(&[("page", "{{v}}")]);
        assert_eq!(set.render(&json!({ "v": "<b>" })).unwrap(), "&lt;b&gt;");
    }

    #[test]
    fn escaping_can_be_disabled() {
        let engine = HandlebarsEngine::new().escape_html(false);
        let mut set = engine.create_set(&TemplateName::from("page"));
        engine
            .parse(&mut set, &TemplateName::from("page"), "{{v}}")
            .unwrap();

        assert_eq!(set.render(&json!({ "v": "<b>" })).unwrap(), "<b>");
    }

    #[test]
    fn strict_mode_fails_on_missing_field() {
        let engine = HandlebarsEngine::new().strict(true);
        let mut set = engine.create_set(&TemplateName::from("page"));
        engine
            .parse(&mut set, &TemplateName::from("page"), "{{missing}}")
            .unwrap();

        let err = set.render(&json!({})).unwrap_err();
        assert!(matches!(
            err,
            WeftError::Application(ApplicationError::RenderFailed { .. })
        ));
    }

    #[test]
    fn render_unknown_unit_fails() {
        let set = set_with(&[("page", "P")]);
        assert!(set.render_named("other", &json!({})).is_err());
    }

    #[test]
    fn render_to_write_fills_sink() {
        let set = set_with(&[("page", "hello {{name}}")]);
        let mut sink = Vec::new();

        set.render_to_write(&json!({ "name": "Ann" }), &mut sink).unwrap();
        assert_eq!(String::from_utf8(sink).unwrap(), "hello Ann");
    }

    #[test]
    fn dot_field_is_written_as_this_path() {
        let set = set_with(&[("page", "<p>{{this.Name}}</p>")]);
        assert_eq!(set.render(&json!({ "Name": "Ann" })).unwrap(), "<p>Ann</p>");
    }

    #[test]
    fn helper_function_registers_into_many_sets() {
        let engine = HandlebarsEngine::new();
        let repeat = HelperFunction::new(repeat_helper);

        for root in ["a", "b"] {
            let mut set = engine.create_set(&TemplateName::from(root));
            engine.register_function(&mut set, "repeat", repeat.clone());
            engine
                .parse(&mut set, &TemplateName::from(root), r#"{{repeat "x" 2}}"#)
                .unwrap();

            assert!(set.has_function("repeat"));
            assert_eq!(set.render(&json!({})).unwrap(), "xx");
        }
    }
}
