//! Process-wide display defaults with thread-local scoped overrides

use std::cell::RefCell;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{OnceLock, PoisonError, RwLock};

use super::{ConfigError, DisplayConfig, DisplayOptions};

static NEXT_STORE_ID: AtomicU64 = AtomicU64::new(0);
static NEXT_SCOPE_ID: AtomicU64 = AtomicU64::new(0);

/// One override layer: owning store, scope token and the options applied
type Layer = (u64, u64, DisplayOptions);

thread_local! {
    /// Override layers active on this thread, innermost last
    static SCOPES: RefCell<Vec<Layer>> = const { RefCell::new(Vec::new()) };
}

/// Holds the ambient display defaults.
///
/// Defaults are shared by every thread. Scoped overrides pushed with
/// [`ConfigStore::scoped`] live on the calling thread only, so concurrent
/// renders with different call options never observe each other.
#[derive(Debug)]
pub struct ConfigStore {
    id: u64,
    defaults: RwLock<DisplayOptions>,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore {
    /// A store with built-in defaults
    pub fn new() -> Self {
        Self::with_defaults(DisplayOptions::default())
    }

    /// A store whose defaults start from `options`
    pub fn with_defaults(options: DisplayOptions) -> Self {
        Self {
            id: NEXT_STORE_ID.fetch_add(1, Ordering::Relaxed),
            defaults: RwLock::new(options),
        }
    }

    /// A store seeded from `FRAMEFMT_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::with_defaults(DisplayOptions::from_env()?))
    }

    /// The process-wide store
    pub fn global() -> &'static ConfigStore {
        static GLOBAL: OnceLock<ConfigStore> = OnceLock::new();
        GLOBAL.get_or_init(ConfigStore::new)
    }

    /// Resolve defaults plus every scope active on this thread
    pub fn snapshot(&self) -> DisplayConfig {
        let mut config = DisplayConfig::default();
        config.apply(&self.state());
        SCOPES.with(|scopes| {
            for (_, _, options) in scopes.borrow().iter().filter(|(id, ..)| *id == self.id) {
                config.apply(options);
            }
        });
        config
    }

    /// The options currently set as defaults
    pub fn state(&self) -> DisplayOptions {
        self.defaults
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Change the ambient defaults
    pub fn set(&self, options: &DisplayOptions) {
        self.defaults
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .merge(options);
    }

    /// Drop every default set since construction
    pub fn restore_defaults(&self) {
        *self.defaults.write().unwrap_or_else(PoisonError::into_inner) = DisplayOptions::default();
    }

    /// Apply `options` on this thread until the returned guard is dropped
    #[must_use = "the overrides are removed as soon as the guard is dropped"]
    pub fn scoped(&self, options: DisplayOptions) -> ScopeGuard {
        let token = NEXT_SCOPE_ID.fetch_add(1, Ordering::Relaxed);
        let depth = SCOPES.with(|scopes| {
            let mut scopes = scopes.borrow_mut();
            scopes.push((self.id, token, options));
            scopes.len()
        });
        tracing::trace!(store = self.id, depth, "Entered display option scope");
        ScopeGuard {
            token,
            _not_send: PhantomData,
        }
    }
}

/// Removes a scoped override when dropped, on every exit path
#[derive(Debug)]
pub struct ScopeGuard {
    token: u64,
    _not_send: PhantomData<*const ()>,
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        SCOPES.with(|scopes| {
            let mut scopes = scopes.borrow_mut();
            if let Some(pos) = scopes.iter().rposition(|(_, token, _)| *token == self.token) {
                scopes.remove(pos);
            }
        });
    }
}
