//! Resolution and caching of [`LogProvider`] implementations.
//!
//! Providers are looked up by name in a [`ProviderRegistry`] of factory functions. The name comes
//! from a [`ProviderConfig`], normally read from the [`PROVIDER_ENV_KEY`] environment variable,
//! and defaults to [`DEFAULT_PROVIDER_NAME`]. A resolved provider is cached per name until
//! [`clear()`] is called, so every caller observes the same [`LogService`] instance.

use std::{
    fmt,
    sync::{Arc, LazyLock, PoisonError, RwLock},
};

use rustc_hash::FxHashMap;

use crate::{BoxError, LogService, ProviderLoadError, TracingSink, TracingSinkConfig};

/// The environment variable naming the provider [`get_provider()`] resolves.
pub const PROVIDER_ENV_KEY: &str = "LOG_FACADE_PROVIDER";

/// The name [`TracingLogProvider`] is registered under, used when no provider is configured.
pub const DEFAULT_PROVIDER_NAME: &str = "tracing";

const TARGET: &str = "log_facade::provider";

/// Owns the one [`LogService`] supplied to callers.
pub trait LogProvider: Send + Sync + fmt::Debug {
    /// The logging service of this provider.
    fn service(&self) -> &LogService;
}

/// Constructs a provider. Factories must not call back into the cache resolving them.
pub type ProviderFactory = fn() -> Result<Arc<dyn LogProvider>, BoxError>;

/// The built-in provider, logging through a [`TracingSink`].
#[derive(Debug)]
pub struct TracingLogProvider {
    service: LogService,
}

impl TracingLogProvider {
    /// Creates a provider whose sink uses the specified configuration.
    pub fn new(config: TracingSinkConfig) -> Self {
        Self {
            service: LogService::new(TracingSink::new(config)),
        }
    }

    fn factory() -> Result<Arc<dyn LogProvider>, BoxError> {
        let config = TracingSinkConfig::from_env()?;
        Ok(Arc::new(Self::new(config)))
    }
}

impl LogProvider for TracingLogProvider {
    fn service(&self) -> &LogService {
        &self.service
    }
}

/// Maps provider names to the factories constructing them.
#[derive(Clone, Debug, Default)]
pub struct ProviderRegistry {
    factories: FxHashMap<String, ProviderFactory>,
}

impl ProviderRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry containing [`TracingLogProvider`] under [`DEFAULT_PROVIDER_NAME`].
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(DEFAULT_PROVIDER_NAME, TracingLogProvider::factory);
        registry
    }

    /// Registers `factory` under `name`, replacing any factory already registered under it.
    pub fn register(&mut self, name: impl Into<String>, factory: ProviderFactory) {
        self.factories.insert(name.into(), factory);
    }

    /// The factory registered under `name`.
    pub fn factory(&self, name: &str) -> Option<ProviderFactory> {
        self.factories.get(name).copied()
    }
}

/// Selects the provider to resolve.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProviderConfig {
    /// The registered name of the provider. `None` or an empty name selects
    /// [`DEFAULT_PROVIDER_NAME`].
    pub provider_name: Option<String>,
}

impl ProviderConfig {
    /// Creates a configuration selecting the provider registered under `name`.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            provider_name: Some(name.into()),
        }
    }

    /// Reads the provider name from the [`PROVIDER_ENV_KEY`] environment variable.
    pub fn from_env() -> Self {
        Self {
            provider_name: std::env::var(PROVIDER_ENV_KEY).ok(),
        }
    }

    /// The name of the provider to resolve, after applying the default.
    pub fn effective_name(&self) -> &str {
        self.provider_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_PROVIDER_NAME)
    }
}

/// A thread-safe cache of resolved providers, keyed by name.
///
/// A provider is constructed at most once per name between calls to [`ProviderCache::clear`]:
/// construction happens under the write lock after re-checking the cache, so concurrent first
/// accesses all receive the same instance. Failed resolutions are not cached.
pub struct ProviderCache {
    registry: RwLock<ProviderRegistry>,
    providers: RwLock<FxHashMap<String, Arc<dyn LogProvider>>>,
}

impl fmt::Debug for ProviderCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let providers = self.providers.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("ProviderCache")
            .field("registry", &self.registry)
            .field("cached", &providers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ProviderCache {
    /// Creates an empty cache resolving providers from `registry`.
    pub fn new(registry: ProviderRegistry) -> Self {
        Self {
            registry: RwLock::new(registry),
            providers: RwLock::new(FxHashMap::default()),
        }
    }

    /// Registers `factory` under `name`. A provider already cached under `name` is evicted, so
    /// the next resolution uses the new factory.
    pub fn register(&self, name: impl Into<String>, factory: ProviderFactory) {
        let name = name.into();
        self.registry
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .register(name.clone(), factory);
        self.providers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&name);
    }

    /// Returns the provider selected by `config`, constructing and caching it if necessary.
    ///
    /// The factory runs while the cache is locked for writing, so it must not resolve providers
    /// from the same cache. Lifecycle events are logged after the lock is released.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderLoadError`] if no factory is registered under the configured name, or
    /// if the factory fails.
    pub fn get_provider(
        &self,
        config: &ProviderConfig,
    ) -> Result<Arc<dyn LogProvider>, ProviderLoadError> {
        let name = config.effective_name();

        if let Some(provider) = self
            .providers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
        {
            return Ok(Arc::clone(provider));
        }

        let mut providers = self.providers.write().unwrap_or_else(PoisonError::into_inner);
        // Another thread may have resolved it while we waited for the write lock
        if let Some(provider) = providers.get(name) {
            return Ok(Arc::clone(provider));
        }

        let loaded = self.load(name);
        if let Ok(provider) = &loaded {
            providers.insert(name.to_string(), Arc::clone(provider));
        }
        drop(providers);

        match &loaded {
            Ok(_) => tracing::debug!(target: TARGET, provider = name, "Loaded log provider"),
            Err(error @ ProviderLoadError::Unresolved { .. }) => {
                tracing::warn!(target: TARGET, provider = name, "{error}");
            }
            Err(error @ ProviderLoadError::Instantiation { source, .. }) => tracing::warn!(
                target: TARGET,
                provider = name,
                error = %source,
                "{error}"
            ),
        }

        loaded
    }

    /// Whether a provider is currently cached under `name`.
    pub fn is_cached(&self, name: &str) -> bool {
        self.providers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Evicts every cached provider. The next resolution reloads from the registry.
    pub fn clear(&self) {
        self.providers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        tracing::debug!(target: TARGET, "Cleared cached log providers");
    }

    fn load(&self, name: &str) -> Result<Arc<dyn LogProvider>, ProviderLoadError> {
        let factory = self
            .registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .factory(name);

        let Some(factory) = factory else {
            return Err(ProviderLoadError::Unresolved {
                name: name.to_string(),
            });
        };

        factory().map_err(|source| ProviderLoadError::Instantiation {
            name: name.to_string(),
            source,
        })
    }
}

static GLOBAL_CACHE: LazyLock<ProviderCache> =
    LazyLock::new(|| ProviderCache::new(ProviderRegistry::with_builtins()));

/// Returns the process-wide provider named by the [`PROVIDER_ENV_KEY`] environment variable.
///
/// Factories run while the process-wide cache is locked, so neither a factory nor a `tracing`
/// subscriber it logs through may call back into this function.
///
/// ```
/// let provider = log_facade::get_provider()?;
/// provider
///     .service()
///     .log_message(log_facade::log_source!(), "main", "application started")?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Errors
///
/// Returns [`ProviderLoadError`] if the configured provider cannot be loaded.
pub fn get_provider() -> Result<Arc<dyn LogProvider>, ProviderLoadError> {
    get_provider_with(&ProviderConfig::from_env())
}

/// Returns the process-wide provider selected by `config`.
///
/// # Errors
///
/// Returns [`ProviderLoadError`] if the configured provider cannot be loaded.
pub fn get_provider_with(
    config: &ProviderConfig,
) -> Result<Arc<dyn LogProvider>, ProviderLoadError> {
    GLOBAL_CACHE.get_provider(config)
}

/// Registers a provider factory with the process-wide cache.
pub fn register_provider(name: impl Into<String>, factory: ProviderFactory) {
    GLOBAL_CACHE.register(name, factory);
}

/// Evicts every provider cached by the process-wide cache.
pub fn clear() {
    GLOBAL_CACHE.clear();
}
