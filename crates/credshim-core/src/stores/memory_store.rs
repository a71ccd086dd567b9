//! In-memory credential store

use std::collections::HashMap;
use std::sync::RwLock;

use super::traits::{CredentialStore, StoreResult};
use crate::types::{CredentialError, Credentials};

/// In-memory credential store for testing and ephemeral use
///
/// Entries are keyed by the server URL exactly as stored and are lost when
/// the store is dropped. Deleting an absent entry is a no-op.
///
/// # Thread Safety
///
/// The store uses `RwLock` internally and is safe to use from multiple
/// threads.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Credentials>>,
}

impl MemoryStore {
    /// Create a new empty memory store
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Create a memory store with initial entries
    pub fn with_credentials(initial: Vec<Credentials>) -> Self {
        let entries = initial
            .into_iter()
            .map(|creds| (creds.server_url.clone(), creds))
            .collect();
        Self {
            entries: RwLock::new(entries),
        }
    }

    /// Clear all entries from the store
    pub fn clear(&self) {
        let mut entries = self.entries.write().unwrap();
        entries.clear();
    }

    /// Get the number of entries in the store
    pub fn len(&self) -> usize {
        let entries = self.entries.read().unwrap();
        entries.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CredentialStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn add(&self, creds: &Credentials) -> StoreResult<()> {
        creds.validate()?;
        let mut entries = self.entries.write().unwrap();
        entries.insert(creds.server_url.clone(), creds.clone());
        Ok(())
    }

    fn delete(&self, server_url: &str) -> StoreResult<()> {
        if server_url.is_empty() {
            return Err(CredentialError::MissingServerUrl);
        }
        let mut entries = self.entries.write().unwrap();
        entries.remove(server_url);
        Ok(())
    }

    fn get(&self, server_url: &str) -> StoreResult<(String, String)> {
        if server_url.is_empty() {
            return Err(CredentialError::MissingServerUrl);
        }
        let entries = self.entries.read().unwrap();
        match entries.get(server_url) {
            Some(creds) => Ok((creds.username.clone(), creds.secret.clone())),
            None => Err(CredentialError::NotFound),
        }
    }

    fn list(&self) -> StoreResult<HashMap<String, String>> {
        let entries = self.entries.read().unwrap();
        Ok(entries
            .values()
            .filter(|creds| !creds.username.is_empty())
            .map(|creds| (creds.server_url.clone(), creds.username.clone()))
            .collect())
    }
}

impl Clone for MemoryStore {
    fn clone(&self) -> Self {
        let entries = self.entries.read().unwrap();
        Self {
            entries: RwLock::new(entries.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_name() {
        let store = MemoryStore::new();
        assert_eq!(store.name(), "memory");
    }

    #[test]
    fn test_memory_store_crud() {
        let store = MemoryStore::new();
        let creds = Credentials::new("https://registry.example.com", "foo", "bar");

        assert!(store.is_empty());
        assert!(matches!(
            store.get("https://registry.example.com"),
            Err(CredentialError::NotFound)
        ));

        store.add(&creds).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get("https://registry.example.com").unwrap(),
            ("foo".to_string(), "bar".to_string())
        );

        // upsert overwrites
        let updated = Credentials::new("https://registry.example.com", "foo", "baz");
        store.add(&updated).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get("https://registry.example.com").unwrap().1,
            "baz"
        );

        store.delete("https://registry.example.com").unwrap();
        assert!(matches!(
            store.get("https://registry.example.com"),
            Err(CredentialError::NotFound)
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_memory_store_validates_records() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.add(&Credentials::new("", "foo", "bar")),
            Err(CredentialError::MissingServerUrl)
        ));
        assert!(matches!(
            store.add(&Credentials::new("https://registry.example.com", "", "bar")),
            Err(CredentialError::MissingUsername)
        ));
        assert!(matches!(
            store.get(""),
            Err(CredentialError::MissingServerUrl)
        ));
        assert!(matches!(
            store.delete(""),
            Err(CredentialError::MissingServerUrl)
        ));
    }

    #[test]
    fn test_memory_store_delete_absent_is_noop() {
        let store = MemoryStore::new();
        assert!(store.delete("https://registry.example.com").is_ok());
    }

    #[test]
    fn test_memory_store_list() {
        let store = MemoryStore::with_credentials(vec![
            Credentials::new("https://one.example.com", "alice", "s1"),
            Credentials::new("https://two.example.com", "bob", "s2"),
        ]);

        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed["https://one.example.com"], "alice");
        assert_eq!(listed["https://two.example.com"], "bob");

        store.delete("https://one.example.com").unwrap();
        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert!(!listed.contains_key("https://one.example.com"));
    }

    #[test]
    fn test_memory_store_clear() {
        let store = MemoryStore::new();
        store
            .add(&Credentials::new("https://one.example.com", "alice", "s1"))
            .unwrap();
        store
            .add(&Credentials::new("https://two.example.com", "bob", "s2"))
            .unwrap();
        assert_eq!(store.len(), 2);

        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn test_memory_store_clone() {
        let store = MemoryStore::new();
        store
            .add(&Credentials::new("https://registry.example.com", "foo", "bar"))
            .unwrap();

        let cloned = store.clone();
        cloned
            .add(&Credentials::new("https://registry.example.com", "foo", "new"))
            .unwrap();

        // modifying the clone doesn't affect the original
        assert_eq!(store.get("https://registry.example.com").unwrap().1, "bar");
        assert_eq!(cloned.get("https://registry.example.com").unwrap().1, "new");
    }

    #[test]
    fn test_memory_store_thread_safety() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(MemoryStore::new());
        let mut handles = vec![];

        for i in 0..10 {
            let store = Arc::clone(&store);
            let handle = thread::spawn(move || {
                let url = format!("https://registry{}.example.com", i);
                let creds = Credentials::new(&url, "user", "secret");
                store.add(&creds).unwrap();
                assert_eq!(store.get(&url).unwrap().0, "user");
            });
            handles.push(handle);
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len(), 10);
    }
}
