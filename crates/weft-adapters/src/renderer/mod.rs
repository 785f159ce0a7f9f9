//! Host template engine adapters.

pub mod engine;
pub mod helpers;

pub use engine::{ComposedTemplates, HandlebarsEngine, HelperFunction};
