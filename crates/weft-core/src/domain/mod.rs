//! Core domain layer for Weft.
//!
//! Pure logic with no I/O: template names and the directive scanner. Reading
//! files, parsing template bodies and caching are handled by the application
//! layer through ports.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Borrowing scans**: Directives point into the scanned body, nothing is copied

pub mod directive;
pub mod name;

pub use directive::{Directive, DirectiveKind, Extends, Span, Spans};
pub use name::TemplateName;
