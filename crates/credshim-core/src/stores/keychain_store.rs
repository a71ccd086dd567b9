//! System keychain credential store
//!
//! Uses the OS keychain for secure credential storage:
//! - macOS: Keychain
//! - Windows: Credential Manager
//! - Linux: Secret Service (GNOME Keyring, KWallet)
//!
//! The native bindings live entirely in the `keyring` crate; this store is
//! the adapter between the credential helper contract and that crate. One
//! keychain entry is kept per server URL with the record JSON as its
//! password. The keychain API cannot enumerate entries, so an index entry
//! per service name tracks the stored server URLs; `list` and approximate
//! `get` read it.

use std::collections::HashMap;

use keyring::Entry;

use super::traits::{CredentialStore, StoreResult};
use crate::logging::file_logger as log;
use crate::types::{CredentialError, Credentials};
use crate::urls::find_match;

const INDEX_ACCOUNT: &str = "__credshim-index__";

/// Credential store backed by the system keychain
///
/// Deleting an absent entry is a no-op.
pub struct KeychainStore {
    service: String,
}

impl KeychainStore {
    /// Create a new keychain store with the default service name "credshim"
    pub fn new() -> Self {
        Self::with_service("credshim")
    }

    /// Create a new keychain store with a custom service name
    ///
    /// The service name namespaces entries in the keychain, so two helpers
    /// with different service names never see each other's credentials.
    pub fn with_service(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self, account: &str) -> StoreResult<Entry> {
        Entry::new(&self.service, account)
            .map_err(|err| CredentialError::Store(format!("failed to create keychain entry: {err}")))
    }

    fn read_index(&self) -> StoreResult<Vec<String>> {
        match self.entry(INDEX_ACCOUNT)?.get_password() {
            Ok(raw) => serde_json::from_str(&raw)
                .map_err(|err| CredentialError::Store(format!("corrupt keychain index: {err}"))),
            Err(keyring::Error::NoEntry) => Ok(Vec::new()),
            Err(err) => Err(CredentialError::Store(format!(
                "failed to read keychain index: {err}"
            ))),
        }
    }

    fn write_index(&self, index: &[String]) -> StoreResult<()> {
        let raw = serde_json::to_string(index)?;
        self.entry(INDEX_ACCOUNT)?
            .set_password(&raw)
            .map_err(|err| CredentialError::Store(format!("failed to write keychain index: {err}")))
    }

    fn read_credentials(&self, server_url: &str) -> StoreResult<Credentials> {
        match self.entry(server_url)?.get_password() {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(keyring::Error::NoEntry) => Err(CredentialError::NotFound),
            Err(err) => Err(CredentialError::Store(format!(
                "failed to read from keychain: {err}"
            ))),
        }
    }
}

impl Default for KeychainStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore for KeychainStore {
    fn name(&self) -> &str {
        "keychain"
    }

    fn is_available(&self) -> bool {
        // Creating an entry fails on headless systems without a keychain
        // daemon.
        match Entry::new(&self.service, "__credshim-availability-check__") {
            Ok(_) => true,
            Err(err) => {
                log::warn("KeychainStore", &format!("keychain unavailable: {err:?}"));
                false
            }
        }
    }

    fn add(&self, creds: &Credentials) -> StoreResult<()> {
        creds.validate()?;

        let payload = serde_json::to_string(creds)?;
        self.entry(&creds.server_url)?
            .set_password(&payload)
            .map_err(|err| CredentialError::Store(format!("failed to store in keychain: {err}")))?;

        let mut index = self.read_index()?;
        if !index.iter().any(|url| url == &creds.server_url) {
            index.push(creds.server_url.clone());
            self.write_index(&index)?;
        }

        log::debug(
            "KeychainStore",
            &format!("stored entry for {} (service '{}')", creds.server_url, self.service),
        );
        Ok(())
    }

    fn delete(&self, server_url: &str) -> StoreResult<()> {
        if server_url.is_empty() {
            return Err(CredentialError::MissingServerUrl);
        }

        match self.entry(server_url)?.delete_credential() {
            Ok(()) => {}
            // already deleted
            Err(keyring::Error::NoEntry) => return Ok(()),
            Err(err) => {
                return Err(CredentialError::Store(format!(
                    "failed to delete from keychain: {err}"
                )))
            }
        }

        let mut index = self.read_index()?;
        index.retain(|url| url != server_url);
        self.write_index(&index)
    }

    fn get(&self, server_url: &str) -> StoreResult<(String, String)> {
        if server_url.is_empty() {
            return Err(CredentialError::MissingServerUrl);
        }

        // exact hit first, the matcher only runs over the index on a miss
        match self.read_credentials(server_url) {
            Ok(creds) => return Ok((creds.username, creds.secret)),
            Err(CredentialError::NotFound) => {}
            Err(err) => return Err(err),
        }

        let targets = self.read_index()?;
        match find_match(server_url, &targets) {
            Some(target) => {
                let creds = self.read_credentials(target)?;
                Ok((creds.username, creds.secret))
            }
            None => Err(CredentialError::NotFound),
        }
    }

    fn list(&self) -> StoreResult<HashMap<String, String>> {
        let mut entries = HashMap::new();
        for url in self.read_index()? {
            let creds = match self.read_credentials(&url) {
                Ok(creds) => creds,
                // stale index entry
                Err(CredentialError::NotFound) => continue,
                Err(err) => return Err(err),
            };
            if creds.username.is_empty() {
                continue;
            }
            entries.insert(url, creds.username);
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Most of these require a running keychain service and may fail on CI
    // systems without one, so they are ignored by default.

    #[test]
    fn test_name() {
        let store = KeychainStore::new();
        assert_eq!(store.name(), "keychain");
    }

    #[test]
    fn test_custom_service() {
        let store = KeychainStore::with_service("credshim-test");
        assert_eq!(store.service, "credshim-test");
    }

    #[test]
    #[ignore] // Requires system keychain
    fn test_round_trip() {
        let store = KeychainStore::with_service("credshim-test");
        let creds = Credentials::new("https://registry.example.com:2376", "foo", "bar");

        let _ = store.delete(&creds.server_url);

        store.add(&creds).unwrap();
        assert_eq!(
            store.get("https://registry.example.com:2376").unwrap(),
            ("foo".to_string(), "bar".to_string())
        );

        // alias query through the index
        assert_eq!(
            store.get("https://registry.example.com").unwrap().0,
            "foo"
        );

        let listed = store.list().unwrap();
        assert_eq!(listed["https://registry.example.com:2376"], "foo");

        store.delete(&creds.server_url).unwrap();
        assert!(matches!(
            store.get("https://registry.example.com:2376"),
            Err(CredentialError::NotFound)
        ));
    }

    #[test]
    #[ignore] // Requires system keychain
    fn test_delete_absent_is_noop() {
        let store = KeychainStore::with_service("credshim-test");
        let _ = store.delete("https://absent.example.com");
        assert!(store.delete("https://absent.example.com").is_ok());
    }
}
