//! Local custody of the session token. Both the session establisher and the
//! staff navigator receive a [`SessionStore`] instead of reaching for ambient
//! storage, so tests can observe exactly when the token is written or cleared.
//! Tokens are wrapped in [`SecretString`] and must never be logged.

use crate::errors::StoreError;
use secrecy::{ExposeSecret, SecretString};
use std::{
    fs,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
    sync::Mutex,
};
use tracing::debug;

/// Storage for the single session token key.
pub trait SessionStore: Send + Sync {
    /// Replaces the stored token.
    /// # Errors
    /// Returns an error if the backing storage cannot be written.
    fn set(&self, token: SecretString) -> Result<(), StoreError>;

    /// Returns the stored token, if any.
    fn get(&self) -> Option<SecretString>;

    /// Removes the token. Clearing an empty store is not an error.
    /// # Errors
    /// Returns an error if the backing storage cannot be modified.
    fn clear(&self) -> Result<(), StoreError>;
}

/// In-process store, used by tests and embedders that manage persistence themselves.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    token: Mutex<Option<SecretString>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(SecretString::from(token))),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn set(&self, token: SecretString) -> Result<(), StoreError> {
        let mut guard = self.token.lock().map_err(|_| StoreError::Poisoned)?;
        *guard = Some(token);
        Ok(())
    }

    fn get(&self) -> Option<SecretString> {
        self.token.lock().ok().and_then(|guard| guard.clone())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut guard = self.token.lock().map_err(|_| StoreError::Poisoned)?;
        *guard = None;
        Ok(())
    }
}

/// File-backed store holding the token as the whole file contents.
#[derive(Clone, Debug)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn set(&self, token: SecretString) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = open_private(&self.path)?;
        file.write_all(token.expose_secret().as_bytes())?;
        file.sync_all()?;

        debug!(path = %self.path.display(), "session token stored");
        Ok(())
    }

    fn get(&self) -> Option<SecretString> {
        let contents = fs::read_to_string(&self.path).ok()?;
        let trimmed = contents.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(SecretString::from(trimmed))
        }
    }

    fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "session token removed");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(unix)]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;

    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}
