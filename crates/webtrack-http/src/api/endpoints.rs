//! Token endpoint definitions and request/response types.

use serde::{Deserialize, Serialize};

/// Obtain a token pair from username/password.
pub const TOKEN_OBTAIN_PATH: &str = "/api/token/";

/// Exchange a refresh token for a new access token.
pub const TOKEN_REFRESH_PATH: &str = "/api/token/refresh/";

/// Request body for the token endpoint.
#[derive(Serialize)]
pub(crate) struct TokenObtainRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Response from the token endpoint.
#[derive(Deserialize)]
pub(crate) struct TokenObtainResponse {
    pub access: String,
    pub refresh: String,
}

/// Request body for the refresh endpoint.
#[derive(Serialize)]
pub(crate) struct TokenRefreshRequest<'a> {
    pub refresh: &'a str,
}

/// Response from the refresh endpoint.
/// `refresh` is only present when the backend rotates refresh tokens.
#[derive(Deserialize)]
pub(crate) struct TokenRefreshResponse {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refresh_response_without_rotation() {
        let response: TokenRefreshResponse = serde_json::from_str(r#"{"access":"A2"}"#).unwrap();
        assert_eq!(response.access, "A2");
        assert!(response.refresh.is_none());
    }

    #[test]
    fn obtain_request_shape() {
        let body = serde_json::to_value(TokenObtainRequest {
            username: "alice",
            password: "pw",
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"username": "alice", "password": "pw"}));
    }
}
