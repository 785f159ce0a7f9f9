//! Composer - recursive template composition.
//!
//! Given a root name, the composer reads the root file, composes its
//! `extends` parent first (when the directive heads the file), parses the
//! remaining body into the set under the root's name, then composes every
//! file named by an `include` directive. Each name is handled once per call.
//!
//! ```text
//! compose(root)
//!   ├─ cache hit? ─────────────────────────────► shared artifact
//!   ├─ create set, register fixed + call-scoped functions
//!   └─ compose_unit(root)
//!        ├─ claim name in session (skip if claimed)
//!        ├─ read base_dir + name
//!        ├─ extends "parent" first? ──► compose_unit(parent), strip directive
//!        ├─ parse body as unit `name`
//!        └─ for each include "x" ─────► compose_unit(x)
//! ```
//!
//! A composer is an ordinary value: several may coexist with different base
//! directories, caches and fixed functions. All state sits behind locks, so one
//! instance can be shared across threads through an `Arc`.

use std::sync::{Arc, RwLock};

use tracing::{debug, info, instrument, trace};

use crate::{
    application::{
        ApplicationError,
        cache::TemplateCache,
        functions::FunctionMap,
        ports::{TemplateEngine, TemplateSource},
        services::session::Session,
        settings::Settings,
    },
    domain::{TemplateName, directive},
    error::WeftResult,
};

/// Directive-driven template composer.
pub struct Composer<E: TemplateEngine, S: TemplateSource> {
    engine: E,
    source: S,
    settings: RwLock<Settings>,
    cache: TemplateCache<E::Set>,
    fixed: RwLock<FunctionMap<E::Function>>,
}

impl<E, S> Composer<E, S>
where
    E: TemplateEngine,
    S: TemplateSource,
{
    /// Create a composer with an empty base directory and caching disabled.
    ///
    /// The fixed function tier starts with the engine's inert function under
    /// `include` and `extends`.
    pub fn new(engine: E, source: S) -> Self {
        let fixed = FunctionMap::with_directive_stubs(engine.inert_function());
        Self {
            engine,
            source,
            settings: RwLock::new(Settings::new()),
            cache: TemplateCache::new(),
            fixed: RwLock::new(fixed),
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    // -------------------------------------------------------------------------
    // Configuration
    // -------------------------------------------------------------------------

    /// Set the directory prefix for template reads.
    ///
    /// A non-empty directory without a trailing separator gets one.
    /// Compositions already running pick up the new value at their next read.
    pub fn set_base_dir(&self, dir: impl Into<String>) -> WeftResult<()> {
        let mut settings = self.settings.write().map_err(|_| ApplicationError::StateLock)?;
        settings.set_base_dir(dir);
        debug!(base_dir = %settings.base_dir(), "Base directory set");
        Ok(())
    }

    pub fn base_dir(&self) -> WeftResult<String> {
        let settings = self.settings.read().map_err(|_| ApplicationError::StateLock)?;
        Ok(settings.base_dir().to_owned())
    }

    /// Turn caching on or off. Turning it off also clears the cache.
    pub fn enable_cache(&self, enabled: bool) -> WeftResult<()> {
        // Lock order is settings, then cache.
        let mut settings = self
            .settings
            .write()
            .map_err(|_| ApplicationError::StateLock)?;
        settings.set_cache_enabled(enabled);
        if !enabled {
            self.cache.clear()?;
        }
        drop(settings);

        info!(enabled, "Template cache toggled");
        Ok(())
    }

    pub fn is_cache_enabled(&self) -> WeftResult<bool> {
        let settings = self.settings.read().map_err(|_| ApplicationError::StateLock)?;
        Ok(settings.cache_enabled())
    }

    /// Drop every cached artifact.
    pub fn clear_cache(&self) -> WeftResult<()> {
        self.cache.clear()?;
        info!("Template cache cleared");
        Ok(())
    }

    /// Number of cached roots.
    pub fn cached_len(&self) -> WeftResult<usize> {
        self.cache.len()
    }

    /// Add `function` to the fixed tier, replacing any entry of that name.
    ///
    /// Replacing `include` or `extends` is allowed; directives are still
    /// resolved at composition time whatever is registered under those names.
    pub fn add_fixed_func(&self, name: impl Into<String>, function: E::Function) -> WeftResult<()> {
        let name = name.into();
        let mut fixed = self.fixed.write().map_err(|_| ApplicationError::StateLock)?;
        if fixed.insert(name.clone(), function).is_some() {
            debug!(%name, "Fixed function replaced");
        } else {
            debug!(%name, "Fixed function added");
        }
        Ok(())
    }

    /// Names in the fixed tier, sorted.
    pub fn fixed_function_names(&self) -> WeftResult<Vec<String>> {
        let fixed = self.fixed.read().map_err(|_| ApplicationError::StateLock)?;
        Ok(fixed.names().map(str::to_owned).collect())
    }

    // -------------------------------------------------------------------------
    // Composition
    // -------------------------------------------------------------------------

    /// Compose `root` with the fixed functions only.
    pub fn compose(&self, root: impl Into<TemplateName>) -> WeftResult<Arc<E::Set>> {
        self.compose_with(root, &FunctionMap::new())
    }

    /// Compose `root` with `functions` layered over the fixed tier.
    ///
    /// With caching enabled a hit is returned as is: the cache key is the root
    /// name alone, so `functions` are ignored and the set keeps whatever
    /// functions the populating call had. On a miss the new set is stored
    /// before it is returned. Nothing is stored when composition fails.
    pub fn compose_with(
        &self,
        root: impl Into<TemplateName>,
        functions: &FunctionMap<E::Function>,
    ) -> WeftResult<Arc<E::Set>> {
        self.compose_root(root.into(), functions)
    }

    #[instrument(skip_all, fields(root = %root))]
    fn compose_root(
        &self,
        root: TemplateName,
        functions: &FunctionMap<E::Function>,
    ) -> WeftResult<Arc<E::Set>> {
        if self.is_cache_enabled()? {
            if let Some(hit) = self.cache.get(root.as_str())? {
                debug!("Cache hit");
                return Ok(hit);
            }
            debug!("Cache miss");
        }

        let mut set = self.engine.create_set(&root);
        let registry = self
            .fixed
            .read()
            .map_err(|_| ApplicationError::StateLock)?
            .layered(functions);
        for (name, function) in registry.iter() {
            self.engine.register_function(&mut set, name, function.clone());
        }

        let mut session = Session::new();
        self.compose_unit(&mut set, &root, &mut session)?;
        debug!(units = ?session.order(), "Composition finished");

        let artifact = Arc::new(set);
        // Held across the store so a concurrent disable cannot slip in between.
        let settings = self
            .settings
            .read()
            .map_err(|_| ApplicationError::StateLock)?;
        if settings.cache_enabled() {
            debug!("Storing composed set");
            return self.cache.store(root, artifact);
        }
        Ok(artifact)
    }

    fn compose_unit(
        &self,
        set: &mut E::Set,
        name: &TemplateName,
        session: &mut Session,
    ) -> WeftResult<()> {
        if !session.visit(name) {
            trace!(template = %name, "Already composed, skipping");
            return Ok(());
        }

        let path = self
            .settings
            .read()
            .map_err(|_| ApplicationError::StateLock)?
            .resolve(name.as_str());
        let raw = self.source.read(&path)?;

        let body = match directive::extends(&raw) {
            Some(ext) => {
                let parent = TemplateName::from(ext.parent);
                debug!(template = %name, %parent, "Composing extends parent");
                self.compose_unit(set, &parent, session)?;
                ext.remainder
            }
            None => raw.as_str(),
        };

        self.engine.parse(set, name, body)?;
        debug!(template = %name, %path, "Parsed template");

        for include in directive::includes(body) {
            if session.is_visited(include) {
                trace!(template = %name, include, "Include already composed");
                continue;
            }
            self.compose_unit(set, &TemplateName::from(include), session)?;
        }

        Ok(())
    }
}
