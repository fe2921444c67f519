//! Filesystem storage for session credentials.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use webtrack_core::error::StoreError;
use webtrack_core::tokens::{AccessToken, RefreshToken};
use webtrack_core::traits::{ACCESS_TOKEN_KEY, CredentialStore, REFRESH_TOKEN_KEY};
use webtrack_core::Result;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// On-disk layout of the credential file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredCredentials {
    #[serde(default)]
    values: BTreeMap<String, String>,
    /// RFC 3339 timestamp of the last write.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<String>,
}

/// A credential store persisted as a single JSON file.
///
/// Every operation takes an advisory lock on a sibling `.lock` file, so
/// several processes (e.g. concurrent CLI invocations) can share one file.
/// Writes go to a temporary file that is renamed over the original.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store backed by the file at `path`. The file is created on
    /// first write.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Get the credential file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }

    fn tmp_path(&self) -> PathBuf {
        self.path.with_extension("tmp")
    }

    fn map_io(&self, err: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            message: err.to_string(),
        }
    }

    fn open_lock(&self) -> std::result::Result<File, StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| self.map_io(e))?;
        }

        OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(self.lock_path())
            .map_err(|e| self.map_io(e))
    }

    /// Load the file. A missing file is an empty store.
    fn load(&self) -> std::result::Result<StoredCredentials, StoreError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(StoredCredentials::default());
            }
            Err(e) => return Err(self.map_io(e)),
        };

        if json.trim().is_empty() {
            return Ok(StoredCredentials::default());
        }

        serde_json::from_str(&json).map_err(|e| StoreError::Corrupt {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })
    }

    fn save(&self, mut stored: StoredCredentials) -> std::result::Result<(), StoreError> {
        stored.updated_at = Some(Utc::now().to_rfc3339());

        let json = serde_json::to_string_pretty(&stored).map_err(|e| StoreError::Corrupt {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;

        let tmp = self.tmp_path();
        {
            let mut file = File::create(&tmp).map_err(|e| self.map_io(e))?;

            // Set restrictive permissions before any secret is written
            #[cfg(unix)]
            {
                let mut perms = file.metadata().map_err(|e| self.map_io(e))?.permissions();
                perms.set_mode(0o600);
                fs::set_permissions(&tmp, perms).map_err(|e| self.map_io(e))?;
            }

            file.write_all(json.as_bytes())
                .map_err(|e| self.map_io(e))?;
            file.sync_data().map_err(|e| self.map_io(e))?;
        }

        fs::rename(&tmp, &self.path).map_err(|e| self.map_io(e))
    }

    /// Run a read-modify-write cycle under the exclusive lock.
    fn update<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let lock = self.open_lock()?;
        lock.lock_exclusive().map_err(|e| self.map_io(e))?;

        let result = self.load().and_then(|mut stored| {
            f(&mut stored.values);
            self.save(stored)
        });

        lock.unlock().map_err(|e| self.map_io(e))?;
        Ok(result?)
    }
}

impl CredentialStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let lock = self.open_lock()?;
        lock.lock_shared().map_err(|e| self.map_io(e))?;
        let result = self.load();
        lock.unlock().map_err(|e| self.map_io(e))?;

        Ok(result?.values.get(key).cloned())
    }

    #[instrument(skip(self, value), fields(path = %self.path.display()))]
    fn set(&self, key: &str, value: &str) -> Result<()> {
        debug!("Writing credential");
        self.update(|values| {
            values.insert(key.to_string(), value.to_string());
        })
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn remove(&self, key: &str) -> Result<()> {
        debug!("Removing credential");
        self.update(|values| {
            values.remove(key);
        })
    }

    #[instrument(skip_all, fields(path = %self.path.display(), rotated = refresh.is_some()))]
    fn store_tokens(&self, access: &AccessToken, refresh: Option<&RefreshToken>) -> Result<()> {
        debug!("Storing tokens");
        self.update(|values| {
            values.insert(ACCESS_TOKEN_KEY.to_string(), access.as_str().to_string());
            if let Some(refresh) = refresh {
                values.insert(REFRESH_TOKEN_KEY.to_string(), refresh.as_str().to_string());
            }
        })
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn clear_tokens(&self) -> Result<()> {
        debug!("Clearing tokens");
        self.update(|values| {
            values.remove(ACCESS_TOKEN_KEY);
            values.remove(REFRESH_TOKEN_KEY);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use webtrack_core::Error;

    fn store_in(dir: &TempDir) -> FileStore {
        FileStore::new(dir.path().join("nested").join("credentials.json"))
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.get(ACCESS_TOKEN_KEY).unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn values_persist_across_instances() {
        let dir = TempDir::new().unwrap();
        store_in(&dir).set("token", "A1").unwrap();

        let reopened = store_in(&dir);
        assert_eq!(reopened.get("token").unwrap().as_deref(), Some("A1"));
    }

    #[test]
    fn store_tokens_writes_both_keys() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store
            .store_tokens(&AccessToken::new("A2"), Some(&RefreshToken::new("R2")))
            .unwrap();

        assert_eq!(store.access_token().unwrap(), Some(AccessToken::new("A2")));
        assert_eq!(store.refresh_token().unwrap(), Some(RefreshToken::new("R2")));
    }

    #[test]
    fn clear_tokens_keeps_other_keys() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set("theme", "dark").unwrap();
        store
            .store_tokens(&AccessToken::new("A1"), Some(&RefreshToken::new("R1")))
            .unwrap();

        store.clear_tokens().unwrap();
        store.clear_tokens().unwrap();

        assert!(store.access_token().unwrap().is_none());
        assert!(store.refresh_token().unwrap().is_none());
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{not json").unwrap();

        let err = store.get("token").unwrap_err();
        assert!(matches!(err, Error::Store(StoreError::Corrupt { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn file_is_private() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set("token", "A1").unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
