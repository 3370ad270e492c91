//! Credential handle storage
//!
//! The bearer token is the only state that survives a restart. The file
//! store gives it a fixed lifetime in days, like a browser cookie.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, error, info};

use crate::error::StorageError;

/// Durable holder of the bearer token
pub trait CredentialStore: Send + Sync {
    /// Current token, `None` when absent or expired
    fn load(&self) -> Result<Option<String>, StorageError>;

    fn store(&self, token: &str) -> Result<(), StorageError>;

    /// Delete the token. Deleting an absent token is not an error.
    fn clear(&self) -> Result<(), StorageError>;
}

/// Process-local store
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    token: Mutex<Option<String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self
            .token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn store(&self, token: &str) -> Result<(), StorageError> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredCredential {
    token: String,
    expires_at: DateTime<Utc>,
}

/// JSON file holding the token and its expiry
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
    ttl: Duration,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>, ttl_days: i64) -> Self {
        Self {
            path: path.into(),
            ttl: Duration::days(ttl_days),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn remove_file(&self) -> Result<(), StorageError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<String>, StorageError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No credential file at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let stored: StoredCredential = match serde_json::from_str(&contents) {
            Ok(stored) => stored,
            Err(e) => {
                // Unreadable file is treated as no credential and removed
                error!("Discarding corrupt credential file: {}", e);
                self.remove_file()?;
                return Ok(None);
            }
        };

        if stored.expires_at <= Utc::now() {
            info!("Stored credential expired at {}", stored.expires_at);
            self.remove_file()?;
            return Ok(None);
        }

        Ok(Some(stored.token))
    }

    fn store(&self, token: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let stored = StoredCredential {
            token: token.to_string(),
            expires_at: Utc::now() + self.ttl,
        };
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&self.path)?;

        // A file left by an older write keeps its mode on open
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
        }

        file.write_all(&serde_json::to_vec(&stored)?)?;

        info!(
            "Credential stored at {} (expires {})",
            self.path.display(),
            stored.expires_at
        );
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.remove_file()?;
        debug!("Credential cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip_and_clear() {
        let store = MemoryCredentialStore::new();
        assert_eq!(store.load().unwrap(), None);

        store.store("tok-1").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("tok-1"));

        store.clear().unwrap();
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_file_store_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credential.json");

        // Pre-existing world-readable file is tightened on store
        std::fs::write(&path, "{}").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        FileCredentialStore::new(&path, 7).store("secret").unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("credential.json");

        FileCredentialStore::new(&path, 7).store("tok-1").unwrap();

        let reopened = FileCredentialStore::new(&path, 7);
        assert_eq!(reopened.load().unwrap().as_deref(), Some("tok-1"));
    }

    #[test]
    fn test_file_store_drops_expired_credential() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credential.json");

        FileCredentialStore::new(&path, -1).store("stale").unwrap();

        let store = FileCredentialStore::new(&path, 7);
        assert_eq!(store.load().unwrap(), None);
        assert!(!path.exists());
    }

    #[test]
    fn test_file_store_discards_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credential.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileCredentialStore::new(&path, 7);
        assert_eq!(store.load().unwrap(), None);
        assert!(!path.exists());
    }

    #[test]
    fn test_file_store_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("credential.json"), 7);

        store.clear().unwrap();
        store.store("tok").unwrap();
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }
}
