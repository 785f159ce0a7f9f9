//! Cycle guard for one composition call.

use std::collections::HashSet;

use crate::domain::TemplateName;

/// Names already claimed during one top-level composition.
///
/// A name is claimed when composition of it begins, so both true cycles
/// (`a` includes `b` includes `a`) and diamonds (two files including the same
/// third) reach each file once. Dropped when the call returns.
#[derive(Debug, Default)]
pub struct Session {
    visited: HashSet<TemplateName>,
    order: Vec<TemplateName>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `name`; false if it was already claimed.
    pub fn visit(&mut self, name: &TemplateName) -> bool {
        if !self.visited.insert(name.clone()) {
            return false;
        }
        self.order.push(name.clone());
        true
    }

    pub fn is_visited(&self, name: &str) -> bool {
        self.visited.contains(name)
    }

    /// Claimed names in claim order.
    pub fn order(&self) -> &[TemplateName] {
        &self.order
    }

}
