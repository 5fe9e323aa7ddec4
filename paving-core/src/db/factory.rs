use std::collections::HashMap;

use async_trait::async_trait;

use super::repository::{RateStore, RepositoryError};

/// Backend-agnostic connection configuration.
///
/// `backend` must match the [`StoreFactory::backend_name`] of a
/// registered factory. `connection_string` is passed through to that
/// factory unchanged; its meaning is entirely backend-specific.
///
/// | backend  | connection_string examples                  |
/// |----------|---------------------------------------------|
/// | `sqlite` | `sqlite:paving.db?mode=rwc`, `sqlite::memory:` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    /// Lowercase identifier matching a registered factory (e.g. `"sqlite"`).
    pub backend: String,
    /// Opaque value forwarded to the factory's `create` method.
    pub connection_string: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            backend: "sqlite".to_string(),
            connection_string: "sqlite::memory:".to_string(),
        }
    }
}

/// One implementation per storage backend. Each backend crate exports a
/// single unit struct that implements this trait and is registered with
/// a [`StoreRegistry`] at startup.
#[async_trait]
pub trait StoreFactory: Send + Sync {
    /// Unique, lowercase identifier for this backend.
    fn backend_name(&self) -> &'static str;

    /// Open (or create) a connection and return a ready-to-use store.
    /// Implementations are free to run migrations inside this method.
    async fn create(&self, config: &DbConfig) -> Result<Box<dyn RateStore>, RepositoryError>;
}

/// Registry of [`StoreFactory`] instances, keyed by backend name.
pub struct StoreRegistry {
    factories: HashMap<&'static str, Box<dyn StoreFactory>>,
}

impl StoreRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registers a backend factory. A factory with the same
    /// [`StoreFactory::backend_name`] is silently replaced.
    pub fn register(&mut self, factory: Box<dyn StoreFactory>) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Names of every registered backend, sorted alphabetically.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Dispatches to the factory that matches `config.backend`.
    ///
    /// # Errors
    /// * [`RepositoryError::Configuration`] — no factory is registered
    ///   for the requested backend name.
    /// * Any error the chosen factory itself returns.
    pub async fn create(&self, config: &DbConfig) -> Result<Box<dyn RateStore>, RepositoryError> {
        let factory = self.factories.get(config.backend.as_str()).ok_or_else(|| {
            RepositoryError::Configuration(format!(
                "unknown backend '{}'; available: {:?}",
                config.backend,
                self.available_backends()
            ))
        })?;

        factory.create(config).await
    }
}

impl Default for StoreRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use crate::models::{JobType, RateRecord};

    use super::*;

    // Stub store; the tests only verify that the registry routes to the
    // correct factory, so every method is unimplemented.
    struct StubStore;

    #[async_trait]
    impl RateStore for StubStore {
        async fn load_rates(
            &self,
            _job_type: JobType,
        ) -> Result<Option<RateRecord>, RepositoryError> {
            unimplemented!()
        }

        async fn save_rates(
            &self,
            _job_type: JobType,
            _record: &RateRecord,
        ) -> Result<(), RepositoryError> {
            unimplemented!()
        }

        async fn delete_rates(&self, _job_type: JobType) -> Result<(), RepositoryError> {
            unimplemented!()
        }

        async fn list_slots(&self) -> Result<Vec<String>, RepositoryError> {
            unimplemented!()
        }
    }

    struct StubFactory {
        name: &'static str,
    }

    #[async_trait]
    impl StoreFactory for StubFactory {
        fn backend_name(&self) -> &'static str {
            self.name
        }

        async fn create(
            &self,
            _config: &DbConfig,
        ) -> Result<Box<dyn RateStore>, RepositoryError> {
            Ok(Box::new(StubStore))
        }
    }

    #[tokio::test]
    async fn create_routes_to_registered_backend() {
        let mut registry = StoreRegistry::new();
        registry.register(Box::new(StubFactory { name: "stub" }));
        let config = DbConfig {
            backend: "stub".to_string(),
            connection_string: String::new(),
        };

        let result = registry.create(&config).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn create_rejects_unknown_backend() {
        let registry = StoreRegistry::new();
        let config = DbConfig::default();

        let result = registry.create(&config).await;

        assert!(matches!(result, Err(RepositoryError::Configuration(_))));
    }

    #[test]
    fn available_backends_are_sorted() {
        let mut registry = StoreRegistry::new();
        registry.register(Box::new(StubFactory { name: "zeta" }));
        registry.register(Box::new(StubFactory { name: "alpha" }));

        assert_eq!(registry.available_backends(), vec!["alpha", "zeta"]);
    }
}
