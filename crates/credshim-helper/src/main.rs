//! Credential helper binary
//!
//! Invoked as `credshim <store|get|erase|list>` with the payload on stdin.
//! The backing store comes from the config file or `CREDSHIM_STORE`; setup
//! failures follow the protocol's error convention (text on stdout, exit
//! code 1) so callers never have to special-case them.

use std::process;
use std::sync::Arc;

use credshim_core::config::HelperConfig;
use credshim_core::protocol;
use credshim_core::stores::{create_store, CredentialStore, FileStore, KeychainStore};

fn build_store(config: &HelperConfig, name: &str) -> Option<Arc<dyn CredentialStore>> {
    // file and keychain take their options from the config; anything else
    // comes out of the registry with defaults
    match name {
        "file" => Some(Arc::new(FileStore::new(config.file_store_dir()))),
        "keychain" => Some(Arc::new(KeychainStore::with_service(
            config.keychain_service(),
        ))),
        _ => create_store(name),
    }
}

fn main() {
    let config = match HelperConfig::load_default() {
        Ok(config) => config,
        Err(err) => {
            println!("{}", err);
            process::exit(1);
        }
    };

    let name = config.store_name();
    let Some(store) = build_store(&config, &name) else {
        println!("unknown credentials store: {}", name);
        process::exit(1);
    };

    protocol::serve(store.as_ref())
}
