//! Gateway configuration.

use std::time::Duration;

use webtrack_core::ApiUrl;

/// Settings for a [`Gateway`](crate::Gateway).
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use webtrack_core::ApiUrl;
/// use webtrack_http::GatewayConfig;
///
/// let config = GatewayConfig::new(ApiUrl::new("https://webtrack.example.com").unwrap())
///     .with_timeout(Duration::from_secs(10))
///     .with_single_flight_refresh(true);
/// assert!(config.single_flight_refresh);
/// ```
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Origin every request path is joined onto.
    pub base_url: ApiUrl,
    /// Per-request timeout enforced by the HTTP client. `None` waits forever.
    pub timeout: Option<Duration>,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
    /// Serialize token refreshes so that concurrent 401s share one refresh
    /// call instead of each rotating the refresh token.
    pub single_flight_refresh: bool,
}

impl GatewayConfig {
    /// Create a configuration for the given origin with default settings.
    pub fn new(base_url: ApiUrl) -> Self {
        Self {
            base_url,
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_single_flight_refresh(mut self, enabled: bool) -> Self {
        self.single_flight_refresh = enabled;
        self
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: ApiUrl::default(),
            timeout: None,
            user_agent: concat!("webtrack/", env!("CARGO_PKG_VERSION")).to_string(),
            single_flight_refresh: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_minimal_contract() {
        let config = GatewayConfig::default();
        assert_eq!(config.base_url.to_string(), "http://localhost:8000");
        assert!(config.timeout.is_none());
        assert!(!config.single_flight_refresh);
        assert!(config.user_agent.starts_with("webtrack/"));
    }
}
