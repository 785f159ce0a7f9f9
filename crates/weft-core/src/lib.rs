//! Weft Core - Hexagonal Architecture Implementation
//!
//! This crate composes templates that reference each other through two
//! directives embedded in the template text:
//!
//! - `{{include "footer.html"}}`: compose `footer.html` into the same set
//! - `{{extends "base.html"}}`: as the first directive of a file: compose
//!   `base.html` first, then this file without the directive
//!
//! The result is a set of named units handed to a host templating engine,
//! which does the actual rendering. The core never evaluates template
//! expressions.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            weft-cli (CLI)               │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │   (Composer, Session, Cache, Registry)  │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │   (Driven: TemplateSource, Engine)      │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      weft-adapters (Infrastructure)     │
//! │ (LocalSource, MemorySource, Handlebars) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │     (TemplateName, Directive scanner)   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use weft_core::prelude::*;
//!
//! let composer = Composer::new(engine, source);
//! composer.set_base_dir("./templates")?;
//! composer.enable_cache(true)?;
//!
//! let set = composer.compose("parent.html")?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApplicationError, Composer, FunctionMap,
        ports::{TemplateEngine, TemplateSource},
    };
    pub use crate::domain::{Directive, DirectiveKind, Extends, TemplateName};
    pub use crate::error::{WeftError, WeftResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
