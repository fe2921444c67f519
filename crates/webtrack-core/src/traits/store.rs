//! Credential store trait.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::Result;
use crate::error::StoreError;
use crate::tokens::{AccessToken, RefreshToken};

/// Key holding the access token.
pub const ACCESS_TOKEN_KEY: &str = "token";

/// Key holding the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// A string key-value store holding the session's credentials.
///
/// Implementations synchronize internally; the gateway shares one store
/// between all in-flight requests.
pub trait CredentialStore: Send + Sync {
    /// Read a value.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a value. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// Store a fresh access token, and the rotated refresh token if any.
    ///
    /// Implementations backed by shared storage should override this so both
    /// keys change in a single write.
    fn store_tokens(&self, access: &AccessToken, refresh: Option<&RefreshToken>) -> Result<()> {
        self.set(ACCESS_TOKEN_KEY, access.as_str())?;
        if let Some(refresh) = refresh {
            self.set(REFRESH_TOKEN_KEY, refresh.as_str())?;
        }
        Ok(())
    }

    /// Remove both tokens.
    fn clear_tokens(&self) -> Result<()> {
        self.remove(ACCESS_TOKEN_KEY)?;
        self.remove(REFRESH_TOKEN_KEY)
    }

    /// Returns the stored access token.
    fn access_token(&self) -> Result<Option<AccessToken>> {
        Ok(self.get(ACCESS_TOKEN_KEY)?.map(AccessToken::new))
    }

    /// Returns the stored refresh token.
    fn refresh_token(&self) -> Result<Option<RefreshToken>> {
        Ok(self.get(REFRESH_TOKEN_KEY)?.map(RefreshToken::new))
    }
}

/// In-process credential store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding a session.
    pub fn with_tokens(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        let mut values = HashMap::new();
        values.insert(ACCESS_TOKEN_KEY.to_string(), access.into());
        values.insert(REFRESH_TOKEN_KEY.to_string(), refresh.into());
        Self {
            values: RwLock::new(values),
        }
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self.values.read().map_err(|_| StoreError::Poisoned)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.write().map_err(|_| StoreError::Poisoned)?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut values = self.values.write().map_err(|_| StoreError::Poisoned)?;
        values.remove(key);
        Ok(())
    }

    fn store_tokens(&self, access: &AccessToken, refresh: Option<&RefreshToken>) -> Result<()> {
        let mut values = self.values.write().map_err(|_| StoreError::Poisoned)?;
        values.insert(ACCESS_TOKEN_KEY.to_string(), access.as_str().to_string());
        if let Some(refresh) = refresh {
            values.insert(REFRESH_TOKEN_KEY.to_string(), refresh.as_str().to_string());
        }
        Ok(())
    }

    fn clear_tokens(&self) -> Result<()> {
        let mut values = self.values.write().map_err(|_| StoreError::Poisoned)?;
        values.remove(ACCESS_TOKEN_KEY);
        values.remove(REFRESH_TOKEN_KEY);
        Ok(())
    }
}
