//! HTTP transport for the WebTrack API.
//!
//! This module provides the low-level client that dispatches a single
//! request, and the token endpoint definitions.

mod client;
mod endpoints;

pub(crate) use client::ApiClient;
pub use endpoints::{TOKEN_OBTAIN_PATH, TOKEN_REFRESH_PATH};
pub(crate) use endpoints::{
    TokenObtainRequest, TokenObtainResponse, TokenRefreshRequest, TokenRefreshResponse,
};
