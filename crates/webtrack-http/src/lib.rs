//! webtrack-http - Authenticated request gateway for the WebTrack API.
//!
//! All calls flow through a [`Gateway`], which attaches the stored bearer
//! token and, when the server answers `401 Unauthorized`, refreshes the
//! credential and replays the request exactly once.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use webtrack_core::{ApiUrl, Credentials, MemoryStore};
//! use webtrack_http::{Gateway, GatewayConfig};
//!
//! # async fn example() -> Result<(), webtrack_core::Error> {
//! let config = GatewayConfig::new(ApiUrl::new("http://localhost:8000")?);
//! let gateway = Gateway::new(config, Arc::new(MemoryStore::new()))?;
//!
//! gateway.login(&Credentials::new("alice", "secret")).await?;
//! let me: serde_json::Value = gateway.users().me().await?;
//! println!("{}", me["username"]);
//! # Ok(())
//! # }
//! ```

mod api;
mod config;
mod gateway;
mod request;
pub mod resources;

pub use api::{TOKEN_OBTAIN_PATH, TOKEN_REFRESH_PATH};
pub use config::GatewayConfig;
pub use gateway::Gateway;
pub use request::{ApiRequest, ApiResponse, Attempt};

pub use reqwest::{Method, StatusCode};
