//! Gateway construction for CLI commands.
//!
//! Every invocation opens the credential file, resolves the API origin and
//! builds a [`Gateway`] around them. The origin used at login is remembered
//! in the store so later commands talk to the same backend.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use tracing::debug;

use webtrack_core::traits::{CredentialStore, LOGIN_PATH, Navigator};
use webtrack_core::ApiUrl;
use webtrack_file::FileStore;
use webtrack_http::{Gateway, GatewayConfig};

use crate::cli::GlobalArgs;
use crate::output;

/// Store key holding the origin the session was created against.
pub const API_URL_KEY: &str = "api_url";

/// Prints a re-login hint when the gateway ends the session.
#[derive(Debug, Default)]
pub struct CliNavigator;

impl Navigator for CliNavigator {
    fn navigate(&self, path: &str) {
        if path == LOGIN_PATH {
            output::warning("Session expired. Run 'webtrack login' to sign in again.");
        }
    }
}

/// Get the default credential file path.
fn default_store_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "webtrack").context("Could not determine data directory")?;

    let data_dir = dirs.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data directory")?;

    Ok(data_dir.join("credentials.json"))
}

/// Open the credential store selected by `--store` or the default location.
pub fn open_store(global: &GlobalArgs) -> Result<Arc<FileStore>> {
    let path = match &global.store {
        Some(path) => path.clone(),
        None => default_store_path()?,
    };
    debug!(path = %path.display(), "Using credential store");
    Ok(Arc::new(FileStore::new(path)))
}

/// Resolve the API origin: flag or env, then the stored origin, then the default.
pub fn resolve_api_url(global: &GlobalArgs, store: &dyn CredentialStore) -> Result<ApiUrl> {
    if let Some(url) = &global.api_url {
        return ApiUrl::new(url).context("Invalid API URL");
    }

    match store
        .get(API_URL_KEY)
        .context("Failed to read credential store")?
    {
        Some(url) => ApiUrl::new(&url).context("Invalid API URL in credential store"),
        None => Ok(ApiUrl::default()),
    }
}

/// Build a gateway over `store` for the resolved origin.
pub fn gateway_with(
    global: &GlobalArgs,
    store: Arc<FileStore>,
    navigator: Arc<dyn Navigator>,
) -> Result<Gateway> {
    let base_url = resolve_api_url(global, store.as_ref())?;

    let mut config = GatewayConfig::new(base_url).with_single_flight_refresh(global.single_flight);
    if let Some(secs) = global.timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    Gateway::with_navigator(config, store, navigator).context("Failed to create API client")
}

/// Open the store and build a gateway in one step.
pub fn gateway(global: &GlobalArgs) -> Result<Gateway> {
    let store = open_store(global)?;
    gateway_with(global, store, Arc::new(CliNavigator))
}

/// Build a gateway and fail early if no session is stored.
pub fn authenticated(global: &GlobalArgs) -> Result<Gateway> {
    let gateway = gateway(global)?;
    let signed_in = gateway
        .is_authenticated()
        .context("Failed to read credential store")?;
    anyhow::ensure!(signed_in, "No active session. Run 'webtrack login' first.");
    Ok(gateway)
}

#[cfg(test)]
mod tests {
    use super::*;
    use webtrack_core::MemoryStore;

    fn global(api_url: Option<&str>) -> GlobalArgs {
        GlobalArgs {
            api_url: api_url.map(str::to_string),
            store: None,
            timeout: None,
            single_flight: false,
            verbose: 0,
            json_logs: false,
        }
    }

    #[test]
    fn flag_wins_over_stored_origin() {
        let store = MemoryStore::new();
        store.set(API_URL_KEY, "https://stored.example.com").unwrap();

        let url = resolve_api_url(&global(Some("https://flag.example.com")), &store).unwrap();
        assert_eq!(url.to_string(), "https://flag.example.com");
    }

    #[test]
    fn stored_origin_wins_over_default() {
        let store = MemoryStore::new();
        store.set(API_URL_KEY, "https://stored.example.com").unwrap();

        let url = resolve_api_url(&global(None), &store).unwrap();
        assert_eq!(url.to_string(), "https://stored.example.com");
    }

    #[test]
    fn falls_back_to_default_origin() {
        let url = resolve_api_url(&global(None), &MemoryStore::new()).unwrap();
        assert_eq!(url, ApiUrl::default());
    }

    #[test]
    fn rejects_invalid_origin() {
        assert!(resolve_api_url(&global(Some("not a url")), &MemoryStore::new()).is_err());
    }
}
