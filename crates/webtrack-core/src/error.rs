//! Error types for the WebTrack client.
//!
//! This module provides a unified error type with explicit variants for
//! transport, authentication, protocol, credential storage and input
//! validation errors.

use std::fmt;
use thiserror::Error;

/// The unified error type for WebTrack client operations.
///
/// Callers usually only need to distinguish three outcomes: the request never
/// got a response ([`Error::Transport`]), the session is gone
/// ([`Error::Auth`]), or the server answered with an error status
/// ([`Error::Protocol`]).
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication errors (no session, expired credential, failed refresh).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Non-success HTTP responses.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Credential store failures.
    #[error("credential store error: {0}")]
    Store(#[from] StoreError),

    /// Input validation errors (bad base URL, unusable header value).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns the HTTP status carried by this error, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Protocol(e) => Some(e.status),
            Error::Auth(AuthError::AuthorizationExpired(e))
            | Error::Auth(AuthError::InvalidCredentials(e)) => Some(e.status),
            _ => None,
        }
    }

    /// Returns true if this error ended the session (a forced logout happened
    /// or there was never a session to begin with).
    pub fn is_session_lost(&self) -> bool {
        matches!(
            self,
            Error::Auth(AuthError::NoSession)
                | Error::Auth(AuthError::AuthorizationExpired(_))
                | Error::Auth(AuthError::RefreshFailed { .. })
        )
    }
}

/// Transport-level errors. No HTTP response was received.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out: {message}")]
    Timeout { message: String },

    /// Response body could not be read or decoded.
    #[error("could not decode response body: {message}")]
    Decode { message: String },

    /// Generic HTTP client error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A refresh was attempted but no refresh token is stored.
    #[error("no active session")]
    NoSession,

    /// The server rejected the access token and the request could not be
    /// recovered with a refreshed one.
    #[error("authorization expired ({0})")]
    AuthorizationExpired(ProtocolError),

    /// The token refresh endpoint rejected the refresh token or was unreachable.
    #[error("token refresh failed: {source}")]
    RefreshFailed {
        #[source]
        source: Box<Error>,
    },

    /// The login endpoint rejected the username/password.
    #[error("invalid credentials ({0})")]
    InvalidCredentials(ProtocolError),
}

impl AuthError {
    /// Wrap an error raised while refreshing.
    pub fn refresh_failed(source: Error) -> Self {
        AuthError::RefreshFailed {
            source: Box::new(source),
        }
    }
}

/// A non-success HTTP response.
///
/// The backend answers errors with a body like
/// `{"detail": "...", "code": "token_not_valid"}`; both fields are optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolError {
    /// HTTP status code.
    pub status: u16,
    /// Machine-readable error code (if present).
    pub code: Option<String>,
    /// Human-readable detail from the server.
    pub detail: Option<String>,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref code) = self.code {
            write!(f, " [{}]", code)?;
        }
        if let Some(ref detail) = self.detail {
            write!(f, ": {}", detail)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolError {}

impl ProtocolError {
    /// Create a new protocol error.
    pub fn new(status: u16, code: Option<String>, detail: Option<String>) -> Self {
        Self {
            status,
            code,
            detail,
        }
    }
}

/// Credential store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing storage failed.
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    /// The backing storage holds data that cannot be parsed.
    #[error("corrupt credential store {path}: {message}")]
    Corrupt { path: String, message: String },

    /// An in-process lock was poisoned by a panicking writer.
    #[error("credential store lock poisoned")]
    Poisoned,
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// A value cannot be used as an HTTP header.
    #[error("invalid header value for {name}")]
    Header { name: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_error_display_includes_code_and_detail() {
        let err = ProtocolError::new(
            401,
            Some("token_not_valid".to_string()),
            Some("Token is expired".to_string()),
        );
        assert_eq!(err.to_string(), "HTTP 401 [token_not_valid]: Token is expired");
    }

    #[test]
    fn protocol_error_display_status_only() {
        let err = ProtocolError::new(503, None, None);
        assert_eq!(err.to_string(), "HTTP 503");
    }

    #[test]
    fn status_is_exposed_for_server_answers() {
        let expired: Error =
            AuthError::AuthorizationExpired(ProtocolError::new(401, None, None)).into();
        assert_eq!(expired.status(), Some(401));
        assert!(expired.is_session_lost());

        let transport: Error = TransportError::Connection {
            message: "refused".to_string(),
        }
        .into();
        assert_eq!(transport.status(), None);
        assert!(!transport.is_session_lost());
    }

    #[test]
    fn refresh_failed_keeps_source() {
        let inner: Error = ProtocolError::new(401, None, None).into();
        let err = AuthError::refresh_failed(inner);
        let source = std::error::Error::source(&err).expect("source");
        assert!(source.to_string().contains("HTTP 401"));
    }
}
