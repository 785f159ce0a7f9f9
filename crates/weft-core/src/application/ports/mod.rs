//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `weft-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `TemplateSource`: Read-only access to template bodies
//!   - `TemplateEngine`: Create sets, register callables, parse units

pub mod output;

pub use output::{TemplateEngine, TemplateSource};

#[cfg(test)]
pub use output::MockTemplateSource;
