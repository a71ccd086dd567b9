//! Credshim Core
//!
//! A credential helper lets container tooling keep registry credentials in
//! a platform secret store instead of a config file: the caller spawns a
//! small helper process per operation and speaks a four-command protocol
//! (`store`, `get`, `erase`, `list`) over stdin/stdout.
//!
//! This crate provides both sides of that protocol plus the pieces shared
//! by store implementations:
//!
//! - `protocol`: the helper-side command dispatcher and a client that
//!   drives an external helper program
//! - `urls`: registry URL canonicalization and the alias matcher used by
//!   stores that can only enumerate their entries
//! - `stores`: the `CredentialStore` trait, built-in memory/file/keychain
//!   stores, and a registry for creating stores by name
//! - `types`: the credential record and the error taxonomy, including the
//!   sentinel messages whose exact bytes are part of the wire contract
//!
//! ## Serving a helper
//!
//! ```rust,ignore
//! use credshim_core::protocol;
//! use credshim_core::stores::FileStore;
//!
//! let store = FileStore::new(FileStore::default_dir());
//! protocol::serve(&store) // dispatches one command and exits
//! ```

pub mod config;
pub mod logging;
pub mod protocol;
pub mod stores;
pub mod types;
pub mod urls;

// Re-export commonly used types
pub use types::{
    is_missing_server_url_message, is_missing_username_message, is_not_found_message,
    CredentialError, CredentialResult, Credentials, GetResponse,
};

pub use urls::{approximate_match, exact_match, find_match, parse, RegistryUrl, Scheme};

pub use stores::{
    create_store, has_store, list_stores, register_store, CredentialStore, FileStore,
    KeychainStore, MemoryStore, StoreDefinition,
};

pub use protocol::{serve, Command, HelperProgram, ProgramOutput, ShellProgram};

pub use config::HelperConfig;
