//! Helper configuration (YAML)
//!
//! Read from `<config_dir>/credshim/config.yaml`; a missing file yields
//! defaults. Environment variables take precedence over the file so one-off
//! invocations can redirect the helper without editing anything.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::stores::{CredentialStore, FileStore, KeychainStore};
use crate::types::{CredentialError, CredentialResult};

/// Configuration file structure
///
/// ```yaml
/// store: file
/// file_store:
///   dir: /var/lib/credshim
/// keychain:
///   service: my-registry-helper
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HelperConfig {
    /// Which registered store serves this helper
    #[serde(default)]
    pub store: Option<String>,

    #[serde(default)]
    pub file_store: Option<FileStoreConfig>,

    #[serde(default)]
    pub keychain: Option<KeychainConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileStoreConfig {
    /// Base directory for file-per-entry storage
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct KeychainConfig {
    /// Service name namespacing keychain entries
    pub service: Option<String>,
}

impl HelperConfig {
    /// Default config file path: `<config_dir>/credshim/config.yaml`
    pub fn default_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config")
        });
        config_dir.join("credshim").join("config.yaml")
    }

    /// Load the config at `path`; a missing file yields defaults.
    pub fn load(path: &Path) -> CredentialResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|err| {
            CredentialError::Store(format!("failed to parse {}: {}", path.display(), err))
        })
    }

    /// Load the config from the default path.
    pub fn load_default() -> CredentialResult<Self> {
        Self::load(&Self::default_path())
    }

    /// Resolve the store name to serve with.
    ///
    /// Precedence: `CREDSHIM_STORE`, then the config file, then `keychain`
    /// when the platform has a usable one, otherwise `file`.
    pub fn store_name(&self) -> String {
        if let Ok(name) = env::var("CREDSHIM_STORE") {
            if !name.is_empty() {
                return name;
            }
        }
        if let Some(name) = &self.store {
            return name.clone();
        }
        if KeychainStore::new().is_available() {
            "keychain".to_string()
        } else {
            "file".to_string()
        }
    }

    /// Base directory for the file store.
    ///
    /// Precedence: `CREDSHIM_STORE_DIR`, then the config file, then the
    /// store's default location.
    pub fn file_store_dir(&self) -> PathBuf {
        if let Ok(dir) = env::var("CREDSHIM_STORE_DIR") {
            if !dir.is_empty() {
                return PathBuf::from(dir);
            }
        }
        self.file_store
            .as_ref()
            .and_then(|fs| fs.dir.clone())
            .unwrap_or_else(FileStore::default_dir)
    }

    /// Service name for the keychain store.
    pub fn keychain_service(&self) -> String {
        self.keychain
            .as_ref()
            .and_then(|kc| kc.service.clone())
            .unwrap_or_else(|| "credshim".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = HelperConfig::load(&dir.path().join("absent.yaml")).unwrap();
        assert!(config.store.is_none());
        assert!(config.file_store.is_none());
        assert_eq!(config.keychain_service(), "credshim");
    }

    #[test]
    fn test_load_full_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            "store: file\nfile_store:\n  dir: /var/lib/credshim\nkeychain:\n  service: my-helper\n",
        )
        .unwrap();

        let config = HelperConfig::load(&path).unwrap();
        assert_eq!(config.store.as_deref(), Some("file"));
        assert_eq!(config.keychain_service(), "my-helper");
        assert_eq!(
            config.file_store.as_ref().unwrap().dir.as_deref(),
            Some(Path::new("/var/lib/credshim"))
        );
    }

    #[test]
    fn test_load_rejects_malformed_yaml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "store: [unterminated").unwrap();
        assert!(HelperConfig::load(&path).is_err());
    }

    #[test]
    fn test_store_name_prefers_config_over_default() {
        let config = HelperConfig {
            store: Some("memory".to_string()),
            ..Default::default()
        };
        // no env override in place for this name
        if env::var("CREDSHIM_STORE").is_err() {
            assert_eq!(config.store_name(), "memory");
        }
    }

    #[test]
    fn test_file_store_dir_from_config() {
        let config = HelperConfig {
            file_store: Some(FileStoreConfig {
                dir: Some(PathBuf::from("/var/lib/credshim")),
            }),
            ..Default::default()
        };
        if env::var("CREDSHIM_STORE_DIR").is_err() {
            assert_eq!(config.file_store_dir(), PathBuf::from("/var/lib/credshim"));
        }
    }
}
