//! In-memory template source for testing.

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use weft_core::{
    application::{ApplicationError, ports::TemplateSource},
    error::WeftResult,
};

/// In-memory template source for testing.
///
/// Cloning shares the same files, so a test can keep a handle after moving a
/// clone into a composer. Every read is counted per path.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    inner: Arc<RwLock<MemorySourceInner>>,
}

#[derive(Debug, Default)]
struct MemorySourceInner {
    files: HashMap<String, String>,
    reads: HashMap<String, usize>,
}

impl MemorySource {
    /// Create a new empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with_file(self, path: impl Into<String>, body: impl Into<String>) -> Self {
        self.insert(path, body);
        self
    }

    /// Add or replace a file.
    pub fn insert(&self, path: impl Into<String>, body: impl Into<String>) {
        let mut inner = self.inner.write().unwrap();
        inner.files.insert(path.into(), body.into());
    }

    /// Remove a file.
    pub fn remove(&self, path: &str) -> Option<String> {
        let mut inner = self.inner.write().unwrap();
        inner.files.remove(path)
    }

    /// How many times `path` was read, including failed reads.
    pub fn reads(&self, path: &str) -> usize {
        let inner = self.inner.read().unwrap();
        inner.reads.get(path).copied().unwrap_or(0)
    }

    /// Total reads across all paths.
    pub fn total_reads(&self) -> usize {
        let inner = self.inner.read().unwrap();
        inner.reads.values().sum()
    }
}

impl TemplateSource for MemorySource {
    fn read(&self, path: &str) -> WeftResult<String> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StateLock)?;

        *inner.reads.entry(path.to_owned()).or_default() += 1;

        inner.files.get(path).cloned().ok_or_else(|| {
            ApplicationError::TemplateRead {
                path: path.to_owned(),
                reason: "No such file in memory source".into(),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_files_and_counts() {
        let source = MemorySource::new().with_file("a", "A");
        let handle = source.clone();

        assert_eq!(source.read("a").unwrap(), "A");
        assert_eq!(handle.reads("a"), 1);

        handle.insert("b", "B");
        assert_eq!(source.read("b").unwrap(), "B");
        assert_eq!(source.total_reads(), 2);
    }

    #[test]
    fn missing_file_counted_and_reported() {
        let source = MemorySource::new();
        let err = source.read("x").unwrap_err();

        assert!(err.is_read_failure());
        assert_eq!(source.reads("x"), 1);
    }

    #[test]
    fn remove_makes_reads_fail() {
        let source = MemorySource::new().with_file("a", "A");
        assert_eq!(source.remove("a").as_deref(), Some("A"));
        assert!(source.read("a").is_err());
    }
}
