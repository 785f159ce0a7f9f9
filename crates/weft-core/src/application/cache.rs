//! Cache of composed sets keyed by root template name.

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use crate::{application::ApplicationError, domain::TemplateName, error::WeftResult};

/// Thread-safe root-name-to-artifact map.
///
/// Keys are root names only. Which call-scoped functions produced an entry is
/// not recorded, so a hit can hand back a set built with different functions
/// than the current caller supplied.
pub struct TemplateCache<T> {
    inner: RwLock<HashMap<TemplateName, Arc<T>>>,
}

impl<T> TemplateCache<T> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    pub fn get(&self, name: &str) -> WeftResult<Option<Arc<T>>> {
        let inner = self.inner.read().map_err(|_| ApplicationError::StateLock)?;
        Ok(inner.get(name).cloned())
    }

    /// Store `artifact` unless an entry already exists; return the stored one.
    pub fn store(&self, name: TemplateName, artifact: Arc<T>) -> WeftResult<Arc<T>> {
        let mut inner = self.inner.write().map_err(|_| ApplicationError::StateLock)?;
        Ok(Arc::clone(inner.entry(name).or_insert(artifact)))
    }

    pub fn clear(&self) -> WeftResult<()> {
        let mut inner = self.inner.write().map_err(|_| ApplicationError::StateLock)?;
        inner.clear();
        Ok(())
    }

    pub fn len(&self) -> WeftResult<usize> {
        let inner = self.inner.read().map_err(|_| ApplicationError::StateLock)?;
        Ok(inner.len())
    }

    pub fn is_empty(&self) -> WeftResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl<T> Default for TemplateCache<T> {
    fn default() -> Self {
        Self::new()
    }
}
