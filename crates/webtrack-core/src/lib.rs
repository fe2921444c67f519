//! webtrack-core - Core types and traits for the WebTrack API client.

pub mod credentials;
pub mod error;
pub mod tokens;
pub mod traits;
pub mod types;

pub use credentials::Credentials;
pub use error::Error;
pub use tokens::{AccessToken, RefreshToken, TokenPair};
pub use traits::{
    ACCESS_TOKEN_KEY, CredentialStore, LOGIN_PATH, MemoryStore, Navigator, NoopNavigator,
    REFRESH_TOKEN_KEY,
};
pub use types::ApiUrl;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
