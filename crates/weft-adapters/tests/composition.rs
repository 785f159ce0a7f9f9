//! End-to-end composition against real files and the Handlebars engine.

use std::{fs, path::Path, sync::Arc};

use serde_json::json;
use tempfile::TempDir;
use weft_adapters::{
    HandlebarsComposer, HandlebarsEngine, HelperFunction, MemorySource, local_composer,
    renderer::helpers::{now_helper, repeat_helper},
};
use weft_core::{application::Composer, prelude::FunctionMap};

fn write_templates(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (name, body) in files {
        fs::write(dir.path().join(name), body).unwrap();
    }
    dir
}

fn base_dir(dir: &Path) -> String {
    dir.to_str().unwrap().trim_end_matches('/').to_owned()
}

fn memory_composer(files: &[(&str, &str)]) -> (HandlebarsComposer<MemorySource>, MemorySource) {
    let source = MemorySource::new();
    for (name, body) in files {
        source.insert(*name, *body);
    }
    let composer = Composer::new(HandlebarsEngine::new(), source.clone());
    (composer, source)
}

#[test]
fn parent_base_footer_scenario() {
    let dir = write_templates(&[
        ("parent.html", r#"{{extends "base.html"}}<p>{{name}}</p>"#),
        ("base.html", r#"<html>{{include "footer.html"}}</html>"#),
        ("footer.html", "<footer>f</footer>"),
    ]);
    let composer = local_composer(base_dir(dir.path())).unwrap();

    let set = composer.compose("parent.html").unwrap();

    assert_eq!(set.names(), vec!["base.html", "footer.html", "parent.html"]);
    assert_eq!(set.render(&json!({ "name": "Ann" })).unwrap(), "<p>Ann</p>");
    assert_eq!(
        set.render_named("base.html", &json!({})).unwrap(),
        "<html></html>"
    );
}

#[test]
fn layout_renders_composed_partials() {
    let dir = write_templates(&[
        (
            "page",
            r#"{{include "nav"}}{{include "footer"}}<body>{{> nav}}{{title}}{{> footer}}</body>"#,
        ),
        ("nav", "<nav>{{title}}</nav>"),
        ("footer", r#"<footer>{{repeat "-" 3}}</footer>"#),
    ]);
    let composer = local_composer(base_dir(dir.path())).unwrap();
    composer
        .add_fixed_func("repeat", HelperFunction::new(repeat_helper))
        .unwrap();

    let set = composer.compose("page").unwrap();
    let out = set.render(&json!({ "title": "Docs" })).unwrap();

    assert_eq!(out, "<body><nav>Docs</nav>Docs<footer>---</footer></body>");
}

#[test]
fn duplicate_include_read_once() {
    let (composer, source) = memory_composer(&[
        ("page", r#"{{include "a.html"}}{{include "a.html"}}"#),
        ("a.html", "A"),
    ]);

    let set = composer.compose("page").unwrap();

    assert_eq!(set.len(), 2);
    assert_eq!(source.reads("a.html"), 1);
}

#[test]
fn cycle_and_diamond_each_read_once() {
    let (composer, source) = memory_composer(&[
        ("a", r#"{{include "b"}}{{include "c"}}"#),
        ("b", r#"{{include "d"}}{{include "a"}}"#),
        ("c", r#"{{include "d"}}"#),
        ("d", r#"{{include "a"}}D"#),
    ]);

    let set = composer.compose("a").unwrap();

    assert_eq!(set.names(), vec!["a", "b", "c", "d"]);
    for name in ["a", "b", "c", "d"] {
        assert_eq!(source.reads(name), 1, "{name} read more than once");
    }
}

#[test]
fn late_extends_is_inert_text() {
    let (composer, source) = memory_composer(&[
        ("page", r#"{{include "nav"}}{{extends "base"}}<p>x</p>"#),
        ("nav", "N"),
    ]);

    let set = composer.compose("page").unwrap();

    assert!(!set.contains("base"));
    assert_eq!(source.reads("base"), 0);
    assert_eq!(set.render(&json!({})).unwrap(), "<p>x</p>");
}

#[test]
fn missing_root_is_read_failure_and_not_cached() {
    let dir = write_templates(&[]);
    let composer = local_composer(base_dir(dir.path())).unwrap();
    composer.enable_cache(true).unwrap();

    let err = composer.compose("nope.html").unwrap_err();

    assert!(err.is_read_failure());
    assert_eq!(composer.cached_len().unwrap(), 0);
}

#[test]
fn malformed_engine_syntax_is_parse_failure() {
    let (composer, _) = memory_composer(&[
        ("page", r#"{{include "broken"}}ok"#),
        ("broken", "{{#each items}}{{/if}}"),
    ]);
    composer.enable_cache(true).unwrap();

    let err = composer.compose("page").unwrap_err();

    assert!(err.is_parse_failure());
    assert!(err.to_string().contains("broken"));
    assert_eq!(composer.cached_len().unwrap(), 0);
}

#[test]
fn malformed_directives_are_plain_text() {
    let (composer, source) = memory_composer(&[("page", r#"[{{include}}]({{include "a" "b"}})"#)]);

    let set = composer.compose("page").unwrap();

    assert_eq!(set.len(), 1);
    assert_eq!(source.total_reads(), 1);
    assert_eq!(set.render(&json!({})).unwrap(), "[]()");
}

#[test]
fn cache_returns_same_set_ignoring_new_call_functions() {
    let (composer, source) = memory_composer(&[("page", "{{repeat \"ab\" 2}}")]);
    composer.enable_cache(true).unwrap();

    let first = composer
        .compose_with(
            "page",
            &FunctionMap::new().with("repeat", HelperFunction::new(repeat_helper)),
        )
        .unwrap();
    let second = composer
        .compose_with(
            "page",
            &FunctionMap::new().with("shout", HelperFunction::new(now_helper)),
        )
        .unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert!(!second.has_function("shout"));
    assert_eq!(second.render(&json!({})).unwrap(), "abab");
    assert_eq!(source.reads("page"), 1);
}

#[test]
fn call_scoped_functions_are_not_persisted() {
    let (composer, _) = memory_composer(&[("page", "x")]);

    let scoped = composer
        .compose_with(
            "page",
            &FunctionMap::new().with("repeat", HelperFunction::new(repeat_helper)),
        )
        .unwrap();
    let plain = composer.compose("page").unwrap();

    assert!(scoped.has_function("repeat"));
    assert!(!plain.has_function("repeat"));
    assert!(plain.has_function("include"));
    assert!(plain.has_function("extends"));
}

#[test]
fn disabling_cache_clears_and_reenabling_starts_empty() {
    let (composer, source) = memory_composer(&[("page", "x")]);
    composer.enable_cache(true).unwrap();
    let first = composer.compose("page").unwrap();

    composer.enable_cache(false).unwrap();
    assert_eq!(composer.cached_len().unwrap(), 0);

    composer.enable_cache(true).unwrap();
    let second = composer.compose("page").unwrap();

    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(source.reads("page"), 2);
}

#[test]
fn base_dir_change_applies_to_next_composition() {
    let one = write_templates(&[("page", "one")]);
    let two = write_templates(&[("page", "two")]);
    let composer = local_composer(base_dir(one.path())).unwrap();

    let first = composer.compose("page").unwrap();
    composer.set_base_dir(base_dir(two.path())).unwrap();
    let second = composer.compose("page").unwrap();

    assert_eq!(first.render(&json!({})).unwrap(), "one");
    assert_eq!(second.render(&json!({})).unwrap(), "two");
}

#[test]
fn shared_composer_across_threads() {
    let dir = write_templates(&[
        ("page", r#"{{include "part"}}{{> part}}"#),
        ("part", "{{n}}"),
    ]);
    let composer = Arc::new(local_composer(base_dir(dir.path())).unwrap());
    composer.enable_cache(true).unwrap();

    let outputs: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|n| {
                let composer = Arc::clone(&composer);
                scope.spawn(move || {
                    let set = composer.compose("page").unwrap();
                    set.render(&json!({ "n": n })).unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(outputs, vec!["0", "1", "2", "3"]);
    assert_eq!(composer.cached_len().unwrap(), 1);
}
