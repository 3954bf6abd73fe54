//! Application state management

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use crate::config::Config;
use crate::store::MessageStore;

/// Shared application state
pub struct AppState {
    /// Received contact messages
    pub store: MessageStore,
    /// Configuration
    pub config: Config,
}

impl AppState {
    /// Create state, opening the configured message store
    pub fn new(config: Config) -> Result<Arc<Self>> {
        let store = MessageStore::open(
            Path::new(&config.contact.store_path),
            config.contact.retained_messages,
        )?;
        Ok(Self::with_store(config, store))
    }

    pub fn with_store(config: Config, store: MessageStore) -> Arc<Self> {
        Arc::new(Self { store, config })
    }
}
