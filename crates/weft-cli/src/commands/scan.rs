//! `weft scan`: show the directives of one file without composing it.

use std::fs;

use serde::Serialize;
use weft_core::domain::{DirectiveKind, directive};

use crate::{
    cli::{ListFormat, ScanArgs},
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// One row of the report.
#[derive(Debug, Serialize, PartialEq, Eq)]
struct Found<'a> {
    kind: DirectiveKind,
    argument: &'a str,
    start: usize,
    end: usize,
    /// False for an `extends` that is not the first span of the body.
    honoured: bool,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    file: String,
    extends: Option<&'a str>,
    directives: Vec<Found<'a>>,
}

fn report<'a>(file: String, body: &'a str) -> Report<'a> {
    let head = directive::extends(body);
    let directives = directive::directives(body)
        .map(|d| Found {
            kind: d.kind,
            argument: d.argument,
            start: d.span.start,
            end: d.span.end,
            honoured: match d.kind {
                DirectiveKind::Include => true,
                DirectiveKind::Extends => head.is_some_and(|h| h.directive.span.start == d.span.start),
            },
        })
        .collect();

    Report {
        file,
        extends: head.map(|h| h.parent),
        directives,
    }
}

pub fn execute(args: ScanArgs, output: OutputManager) -> CliResult<()> {
    let body = fs::read_to_string(&args.file)
        .with_cli_context(|| format!("Failed to read {}", args.file.display()))?;
    let report = report(args.file.display().to_string(), &body);

    match args.format {
        ListFormat::Json => {
            let rendered = serde_json::to_string_pretty(&report).map_err(|e| CliError::InvalidInput {
                message: format!("Failed to serialise scan report: {e}"),
                source: Some(Box::new(e)),
            })?;
            output.emit(&format!("{rendered}\n"))?;
        }
        ListFormat::Plain => {
            if report.directives.is_empty() {
                output.info(&format!("No directives in {}", report.file))?;
                return Ok(());
            }

            output.header(&format!("Directives in {}:", report.file))?;
            let mut rows = String::new();
            for found in &report.directives {
                rows.push_str(&format!(
                    "{:>6}..{:<6} {:<8} {}{}\n",
                    found.start,
                    found.end,
                    found.kind.as_str(),
                    found.argument,
                    if found.honoured { "" } else { "  (ignored)" }
                ));
            }
            output.emit(&rows)?;

            if report
                .directives
                .iter()
                .any(|d| d.kind == DirectiveKind::Extends && !d.honoured)
            {
                output.warning("extends is only honoured as the first {{...}} of a file")?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_extends_is_honoured() {
        let body = r#"{{extends "base.html"}}{{include "nav.html"}}"#;
        let report = report("page.html".into(), body);

        assert_eq!(report.extends, Some("base.html"));
        assert_eq!(
            report.directives,
            vec![
                Found {
                    kind: DirectiveKind::Extends,
                    argument: "base.html",
                    start: 0,
                    end: 23,
                    honoured: true,
                },
                Found {
                    kind: DirectiveKind::Include,
                    argument: "nav.html",
                    start: 23,
                    end: 45,
                    honoured: true,
                },
            ]
        );
    }

    #[test]
    fn late_extends_is_reported_ignored() {
        let body = r#"{{.Title}}{{extends "base.html"}}"#;
        let report = report("page.html".into(), body);

        assert_eq!(report.extends, None);
        assert_eq!(report.directives.len(), 1);
        assert!(!report.directives[0].honoured);
    }

    #[test]
    fn json_report_shape() {
        let report = report("p".into(), r#"{{include "a"}}"#);
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["directives"][0]["kind"], "include");
        assert_eq!(value["directives"][0]["argument"], "a");
        assert!(value["extends"].is_null());
    }
}
