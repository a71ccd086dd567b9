//! Core trait for credential storage

use std::collections::HashMap;

use crate::types::{CredentialError, Credentials};

pub type StoreResult<T> = Result<T, CredentialError>;

/// Trait for credential storage implementations
///
/// Implementations can be:
/// - In-memory for testing (`MemoryStore`)
/// - File-per-entry on disk (`FileStore`)
/// - The OS keychain (`KeychainStore`)
/// - Custom implementations (database, Vault, remote services, etc.)
///
/// The command dispatcher performs exactly one of these calls per process
/// invocation; persistence is entirely the store's responsibility.
pub trait CredentialStore: Send + Sync {
    /// Human-readable name of this store
    fn name(&self) -> &str;

    /// Check if this store is usable in the current environment
    ///
    /// For example, a keychain store is not available on a headless server
    /// without a keychain daemon.
    fn is_available(&self) -> bool {
        true
    }

    /// Upsert a credential record, keyed by its server URL
    ///
    /// Overwriting an existing entry for the same server URL is permitted
    /// and expected. Fails with `MissingServerUrl` or `MissingUsername` on
    /// an incomplete record.
    fn add(&self, creds: &Credentials) -> StoreResult<()>;

    /// Remove the entry stored under `server_url`
    ///
    /// Whether deleting an absent entry is an error or a no-op is up to the
    /// store, but each store must pick one behavior and keep it.
    fn delete(&self, server_url: &str) -> StoreResult<()>;

    /// Look up the username and secret for `server_url`
    ///
    /// Fails with `CredentialError::NotFound` when no entry matches.
    fn get(&self, server_url: &str) -> StoreResult<(String, String)>;

    /// Enumerate stored entries as a server URL to username mapping
    ///
    /// Entries with an empty username are never reported. Enumeration order
    /// is unspecified.
    fn list(&self) -> StoreResult<HashMap<String, String>>;
}
