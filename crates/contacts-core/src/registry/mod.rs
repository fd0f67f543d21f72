//! Plugin-based source registry
//!
//! The registry lets contact sources be registered at runtime, so host
//! applications pick a source from configuration without hard-coded
//! if-else chains.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use contacts_core::{ContactsConfig, SourceRegistry};
//!
//! let registry = SourceRegistry::new();
//! contacts_provider_o365::register(&registry);
//!
//! let config = ContactsConfig::new("me@example.com", "secret");
//! let fetcher = registry.create_fetcher(&config)?;
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use crate::config::{ContactsConfig, SourceConfig};
use crate::error::{Error, Result};
use crate::fetcher::ContactFetcher;
use crate::traits::{ContactSource, ContactSourceFactory};

/// Registry of contact source factories keyed by source type name
///
/// ## Thread Safety
///
/// Interior mutability with RwLock: concurrent lookups, exclusive
/// registration.
#[derive(Default)]
pub struct SourceRegistry {
    sources: RwLock<HashMap<String, Box<dyn ContactSourceFactory>>>,
}

impl SourceRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a source factory under `name`, replacing any previous one
    pub fn register_source(&self, name: impl Into<String>, factory: Box<dyn ContactSourceFactory>) {
        let name = name.into();
        let mut sources = self.sources.write().unwrap_or_else(|e| e.into_inner());
        tracing::debug!("Registering contact source: {}", name);
        sources.insert(name, factory);
    }

    /// Create a contact source from configuration
    ///
    /// # Returns
    ///
    /// - `Ok(Box<dyn ContactSource>)`: Created source instance
    /// - `Err(Error)`: If the config is invalid, the source type is not
    ///   registered, or creation fails
    pub fn create_source(&self, config: &SourceConfig) -> Result<Box<dyn ContactSource>> {
        config.validate()?;

        let type_name = config.type_name();
        let sources = self.sources.read().unwrap_or_else(|e| e.into_inner());
        let factory = sources.get(type_name).ok_or_else(|| {
            Error::config(format!("Contact source '{}' is not registered", type_name))
        })?;

        factory.create(config)
    }

    /// Create a ready-to-use fetcher for the configured account and source
    pub fn create_fetcher(&self, config: &ContactsConfig) -> Result<ContactFetcher> {
        let source = self.create_source(&config.source)?;
        Ok(ContactFetcher::with_credential(
            config.credential.to_credential(),
            source,
        ))
    }

    /// Check whether a source type is registered
    pub fn has_source(&self, name: &str) -> bool {
        self.sources
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(name)
    }

    /// Registered source type names, sorted
    pub fn source_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .sources
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }
}
