//! Directive scanner.
//!
//! Finds `{{ keyword "argument" }}` occurrences inside otherwise opaque
//! template text. Two keywords are recognised:
//!
//! - `include`: every occurrence anywhere in the body names a template that
//!   must be composed into the same set.
//! - `extends`: honoured only when it is the **first** delimited span of the
//!   body; the template it names is composed before this one and the
//!   directive itself is cut from the body.
//!
//! A span qualifies only if it holds exactly two whitespace-separated tokens
//! and the first is a keyword. Anything else (engine expressions, comments,
//! directives with extra tokens) is left alone. The argument loses exactly one
//! character from each end; the characters are not checked and escapes are not
//! processed, so names containing `"` are unsupported.
//!
//! Directives are never removed from the text except for an honoured
//! `extends`. At render time they hit the inert helpers registered under the
//! same names and produce nothing.

use serde::Serialize;
use std::fmt;

/// Opening delimiter of a span.
pub const OPEN: &str = "{{";
/// Closing delimiter of a span.
pub const CLOSE: &str = "}}";

/// Recognised directive keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectiveKind {
    Include,
    Extends,
}

impl DirectiveKind {
    pub const ALL: [DirectiveKind; 2] = [Self::Include, Self::Extends];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Include => "include",
            Self::Extends => "extends",
        }
    }

    /// Match a token against the keywords. Case-sensitive.
    pub fn from_keyword(token: &str) -> Option<Self> {
        match token {
            "include" => Some(Self::Include),
            "extends" => Some(Self::Extends),
            _ => None,
        }
    }
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One delimited region of a body.
///
/// `start` is the byte offset of `{{`, `end` the offset just past `}}`, and
/// `inner` the text strictly between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span<'a> {
    pub start: usize,
    pub end: usize,
    pub inner: &'a str,
}

/// A span that qualified as a directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Directive<'a> {
    pub kind: DirectiveKind,
    /// Template name with the surrounding quote characters removed.
    pub argument: &'a str,
    pub span: Span<'a>,
}

impl<'a> Directive<'a> {
    /// Decode a span, or `None` if it is not a directive.
    pub fn parse(span: Span<'a>) -> Option<Self> {
        let mut tokens = span.inner.split_whitespace();
        let keyword = tokens.next()?;
        let argument = tokens.next()?;
        if tokens.next().is_some() {
            return None;
        }

        Some(Self {
            kind: DirectiveKind::from_keyword(keyword)?,
            argument: strip_quotes(argument),
            span,
        })
    }
}

/// An `extends` directive honoured at the head of a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extends<'a> {
    pub parent: &'a str,
    /// Body text after the directive's closing delimiter.
    pub remainder: &'a str,
    pub directive: Directive<'a>,
}

/// Forward-only iterator over the delimited spans of a body.
#[derive(Debug, Clone)]
pub struct Spans<'a> {
    body: &'a str,
    pos: usize,
}

impl<'a> Iterator for Spans<'a> {
    type Item = Span<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.body.get(self.pos..)?;
        let start = self.pos + rest.find(OPEN)?;
        let inner_start = start + OPEN.len();
        let inner_end = inner_start + self.body[inner_start..].find(CLOSE)?;
        let end = inner_end + CLOSE.len();

        self.pos = end;
        Some(Span {
            start,
            end,
            inner: &self.body[inner_start..inner_end],
        })
    }
}

/// Every delimited span in `body`, left to right.
///
/// A span runs from an opening delimiter to the first closing delimiter after
/// it; an opening delimiter with no closing one ends the scan.
pub fn spans(body: &str) -> Spans<'_> {
    Spans { body, pos: 0 }
}

/// Every qualifying directive in `body`, in order of appearance.
pub fn directives(body: &str) -> impl Iterator<Item = Directive<'_>> {
    spans(body).filter_map(Directive::parse)
}

/// Arguments of every `include` directive in `body`, in order, duplicates kept.
pub fn includes(body: &str) -> impl Iterator<Item = &str> {
    directives(body)
        .filter(|d| d.kind == DirectiveKind::Include)
        .map(|d| d.argument)
}

/// The `extends` directive of `body`, if its first span is one.
///
/// Only the very first span is examined: an `include`, an engine expression,
/// or even a malformed directive in front of `extends` disables it.
pub fn extends(body: &str) -> Option<Extends<'_>> {
    let directive = Directive::parse(spans(body).next()?)?;
    if directive.kind != DirectiveKind::Extends {
        return None;
    }

    Some(Extends {
        parent: directive.argument,
        remainder: &body[directive.span.end..],
        directive,
    })
}

fn strip_quotes(token: &str) -> &str {
    let mut chars = token.chars();
    chars.next();
    chars.next_back();
    chars.as_str()
}
