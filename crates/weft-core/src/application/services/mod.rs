//! Application services - orchestrate use cases.
//!
//! The composer is the only use case: turn a root template name into a
//! composed set. The session is its per-call cycle guard.

pub mod composer;
pub mod session;

pub use composer::Composer;
pub use session::Session;
