//! Credential store abstractions and implementations
//!
//! This module provides a pluggable credential storage system with:
//! - `CredentialStore` trait for implementing custom stores
//! - Built-in implementations: `MemoryStore`, `FileStore`, `KeychainStore`
//! - A registry for discovering and creating stores by name

mod file_store;
mod keychain_store;
mod memory_store;
mod registry;
mod traits;

pub use file_store::FileStore;
pub use keychain_store::KeychainStore;
pub use memory_store::MemoryStore;
pub use registry::{
    create_store, has_store, list_stores, register_store, unregister_store, StoreDefinition,
};
pub use traits::{CredentialStore, StoreResult};
