//! Store registry for discovering and creating stores by name

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;

use super::file_store::FileStore;
use super::keychain_store::KeychainStore;
use super::memory_store::MemoryStore;
use super::traits::CredentialStore;

/// Factory function type for creating credential stores
pub type StoreFactory = Box<dyn Fn() -> Arc<dyn CredentialStore> + Send + Sync>;

/// Definition of a registered credential store
pub struct StoreDefinition {
    /// Unique name for this store
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Factory function to create instances
    pub factory: StoreFactory,
}

impl std::fmt::Debug for StoreDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreDefinition")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish()
    }
}

/// Global registry of credential stores
static REGISTRY: Lazy<RwLock<HashMap<String, StoreDefinition>>> = Lazy::new(|| {
    let mut map = HashMap::new();

    map.insert(
        "memory".to_string(),
        StoreDefinition {
            name: "memory".to_string(),
            description: "In-memory storage for testing".to_string(),
            factory: Box::new(|| Arc::new(MemoryStore::new())),
        },
    );

    map.insert(
        "file".to_string(),
        StoreDefinition {
            name: "file".to_string(),
            description: "File-per-entry storage in the user data directory".to_string(),
            factory: Box::new(|| Arc::new(FileStore::new(FileStore::default_dir()))),
        },
    );

    map.insert(
        "keychain".to_string(),
        StoreDefinition {
            name: "keychain".to_string(),
            description: "System keychain (macOS Keychain, Windows Credential Manager, Linux Secret Service)"
                .to_string(),
            factory: Box::new(|| Arc::new(KeychainStore::new())),
        },
    );

    RwLock::new(map)
});

/// Register a new credential store type
///
/// # Example
///
/// ```
/// use credshim_core::stores::{register_store, MemoryStore};
/// use std::sync::Arc;
///
/// register_store(
///     "custom",
///     "My custom store",
///     Box::new(|| Arc::new(MemoryStore::new())),
/// );
/// ```
pub fn register_store(name: &str, description: &str, factory: StoreFactory) {
    let mut registry = REGISTRY.write().unwrap();
    registry.insert(
        name.to_string(),
        StoreDefinition {
            name: name.to_string(),
            description: description.to_string(),
            factory,
        },
    );
}

/// Create a credential store by name
///
/// Returns the created store, or None if the name is not registered.
pub fn create_store(name: &str) -> Option<Arc<dyn CredentialStore>> {
    let registry = REGISTRY.read().unwrap();
    registry.get(name).map(|def| (def.factory)())
}

/// List all registered stores as (name, description) pairs
pub fn list_stores() -> Vec<(String, String)> {
    let registry = REGISTRY.read().unwrap();
    registry
        .values()
        .map(|def| (def.name.clone(), def.description.clone()))
        .collect()
}

/// Check if a store is registered
pub fn has_store(name: &str) -> bool {
    let registry = REGISTRY.read().unwrap();
    registry.contains_key(name)
}

/// Unregister a credential store (mainly for testing)
pub fn unregister_store(name: &str) -> bool {
    let mut registry = REGISTRY.write().unwrap();
    registry.remove(name).is_some()
}
