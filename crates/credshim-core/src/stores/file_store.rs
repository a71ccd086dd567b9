//! File-backed credential store
//!
//! One file per entry under a base directory. File names are the
//! base64-url encoding of the server URL, because server URLs contain `/`s
//! that would otherwise turn into extra directories; file contents are the
//! credential record as JSON.
//!
//! Files cannot be looked up partially, so `get` enumerates the stored URLs
//! and answers through the alias matcher.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine as _;
use parking_lot::Mutex;

use super::traits::{CredentialStore, StoreResult};
use crate::logging::file_logger as log;
use crate::types::{CredentialError, Credentials};
use crate::urls::find_match;

/// One-time usability check for the base directory. The first caller
/// initializes while holding the lock, racing callers block until it is
/// done, and a failure is cached without retry.
#[derive(Debug)]
enum InitState {
    Uninitialized,
    Ready,
    Failed(String),
}

/// Credential store keeping one JSON file per entry
///
/// Deleting an absent entry is a `NotFound` error.
pub struct FileStore {
    dir: PathBuf,
    state: Mutex<InitState>,
}

impl FileStore {
    /// Create a store rooted at `dir`. The directory is created lazily on
    /// first use.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            state: Mutex::new(InitState::Uninitialized),
        }
    }

    /// Default base directory: `<data_dir>/credshim/store`
    pub fn default_dir() -> PathBuf {
        let data_dir = dirs::data_dir().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".local")
                .join("share")
        });
        data_dir.join("credshim").join("store")
    }

    /// The base directory entries are stored under
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn ensure_ready(&self) -> StoreResult<()> {
        let mut state = self.state.lock();
        match &*state {
            InitState::Ready => Ok(()),
            InitState::Failed(message) => Err(CredentialError::Store(message.clone())),
            InitState::Uninitialized => match fs::create_dir_all(&self.dir) {
                Ok(()) => {
                    log::debug(
                        "FileStore",
                        &format!("store directory ready: {}", self.dir.display()),
                    );
                    *state = InitState::Ready;
                    Ok(())
                }
                Err(err) => {
                    let message =
                        format!("store directory {} is not usable: {}", self.dir.display(), err);
                    log::error("FileStore", &message);
                    *state = InitState::Failed(message.clone());
                    Err(CredentialError::Store(message))
                }
            },
        }
    }

    fn entry_path(&self, server_url: &str) -> PathBuf {
        self.dir.join(URL_SAFE.encode(server_url.as_bytes()))
    }

    fn decode_entry_name(name: &str) -> Option<String> {
        let bytes = URL_SAFE.decode(name).ok()?;
        String::from_utf8(bytes).ok()
    }

    fn read_entry(&self, server_url: &str) -> StoreResult<Credentials> {
        let bytes = fs::read(self.entry_path(server_url))?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Server URLs currently on disk, in directory enumeration order.
    fn stored_urls(&self) -> StoreResult<Vec<String>> {
        let mut urls = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name();
            // foreign files in the directory are not ours to report
            if let Some(url) = name.to_str().and_then(Self::decode_entry_name) {
                urls.push(url);
            }
        }
        Ok(urls)
    }
}

impl CredentialStore for FileStore {
    fn name(&self) -> &str {
        "file"
    }

    fn add(&self, creds: &Credentials) -> StoreResult<()> {
        creds.validate()?;
        self.ensure_ready()?;

        let path = self.entry_path(&creds.server_url);
        fs::write(&path, serde_json::to_vec(creds)?)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o600))?;
        }

        log::debug(
            "FileStore",
            &format!("stored entry for {}", creds.server_url),
        );
        Ok(())
    }

    fn delete(&self, server_url: &str) -> StoreResult<()> {
        if server_url.is_empty() {
            return Err(CredentialError::MissingServerUrl);
        }
        self.ensure_ready()?;

        match fs::remove_file(self.entry_path(server_url)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(CredentialError::NotFound)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn get(&self, server_url: &str) -> StoreResult<(String, String)> {
        if server_url.is_empty() {
            return Err(CredentialError::MissingServerUrl);
        }
        self.ensure_ready()?;

        let targets = self.stored_urls()?;
        match find_match(server_url, &targets) {
            Some(target) => {
                let creds = self.read_entry(target)?;
                Ok((creds.username, creds.secret))
            }
            None => Err(CredentialError::NotFound),
        }
    }

    fn list(&self) -> StoreResult<HashMap<String, String>> {
        self.ensure_ready()?;

        let mut entries = HashMap::new();
        for url in self.stored_urls()? {
            let creds = match self.read_entry(&url) {
                Ok(creds) => creds,
                Err(err) => {
                    log::warn(
                        "FileStore",
                        &format!("skipping unreadable entry for {}: {}", url, err),
                    );
                    continue;
                }
            };
            if creds.username.is_empty() {
                continue;
            }
            entries.insert(url, creds.username);
        }
        Ok(entries)
    }
}
