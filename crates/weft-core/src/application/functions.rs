//! Function registry.
//!
//! Callables are resolved in two tiers:
//!
//! - **fixed**: owned by the composer, seeded with the inert `include` and
//!   `extends` stubs, extended with `Composer::add_fixed_func`. Entries are
//!   cumulative for the composer's lifetime and a later entry replaces an
//!   earlier one of the same name, stubs included.
//! - **call-scoped**: a [`FunctionMap`] passed to `Composer::compose_with`.
//!   Layered over the fixed tier for that one composition, never stored.
//!
//! The inert stubs exist only so that directive text left in a body evaluates
//! to nothing if the engine ever executes it. They do not perform inclusion
//! and must not be made to: inclusion happens at composition time, and visible
//! output of another unit is produced with the engine's own invocation syntax.

use std::collections::BTreeMap;

use crate::domain::DirectiveKind;

/// Ordered name-to-callable map.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionMap<F> {
    entries: BTreeMap<String, F>,
}

impl<F> FunctionMap<F> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// A map holding `stub` under every directive keyword.
    pub fn with_directive_stubs(stub: F) -> Self
    where
        F: Clone,
    {
        let mut map = Self::new();
        for kind in DirectiveKind::ALL {
            map.insert(kind.as_str(), stub.clone());
        }
        map
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, function: F) -> Self {
        self.insert(name, function);
        self
    }

    /// Insert or replace; returns the replaced entry.
    pub fn insert(&mut self, name: impl Into<String>, function: F) -> Option<F> {
        self.entries.insert(name.into(), function)
    }

    pub fn get(&self, name: &str) -> Option<&F> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &F)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// This map with `overrides` layered on top.
    pub fn layered(&self, overrides: &FunctionMap<F>) -> FunctionMap<F>
    where
        F: Clone,
    {
        let mut merged = self.clone();
        for (name, function) in overrides.iter() {
            merged.insert(name, function.clone());
        }
        merged
    }
}

impl<F> Default for FunctionMap<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F, N: Into<String>> FromIterator<(N, F)> for FunctionMap<F> {
    fn from_iter<I: IntoIterator<Item = (N, F)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, function) in iter {
            map.insert(name, function);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stubs_cover_every_keyword() {
        let map = FunctionMap::with_directive_stubs("stub");
        assert_eq!(map.names().collect::<Vec<_>>(), vec!["extends", "include"]);
    }

    #[test]
    fn insert_overwrites_stub() {
        let mut map = FunctionMap::with_directive_stubs("stub");
        assert_eq!(map.insert("include", "real"), Some("stub"));
        assert_eq!(map.get("include"), Some(&"real"));
    }

    #[test]
    fn layered_overrides_without_touching_base() {
        let fixed = FunctionMap::new().with("now", "fixed-now").with("upper", "upper");
        let call: FunctionMap<_> = [("now", "call-now"), ("repeat", "repeat")]
            .into_iter()
            .collect();

        let merged = fixed.layered(&call);

        assert_eq!(merged.get("now"), Some(&"call-now"));
        assert_eq!(merged.get("upper"), Some(&"upper"));
        assert_eq!(merged.get("repeat"), Some(&"repeat"));
        assert_eq!(fixed.get("now"), Some(&"fixed-now"));
        assert!(!fixed.contains("repeat"));
    }
}
