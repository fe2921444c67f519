//! Collaborator traits injected into the request gateway.

mod navigator;
mod store;

pub use navigator::{LOGIN_PATH, Navigator, NoopNavigator};
pub use store::{ACCESS_TOKEN_KEY, CredentialStore, MemoryStore, REFRESH_TOKEN_KEY};
