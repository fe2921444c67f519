//! HTTP client implementation.

use reqwest::header::{AUTHORIZATION, HeaderValue};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace};

use webtrack_core::error::{Error, InvalidInputError, TransportError};
use webtrack_core::{AccessToken, ApiUrl, Result};

use crate::config::GatewayConfig;
use crate::request::{ApiRequest, ApiResponse, Attempt};

/// Map a reqwest failure onto the transport taxonomy.
pub(crate) fn transport_error(err: reqwest::Error) -> Error {
    let message = err.to_string();
    let err = if err.is_timeout() {
        TransportError::Timeout { message }
    } else if err.is_connect() {
        TransportError::Connection { message }
    } else if err.is_decode() || err.is_body() {
        TransportError::Decode { message }
    } else {
        TransportError::Http { message }
    };
    Error::Transport(err)
}

/// HTTP client bound to one API origin.
///
/// This layer performs exactly one dispatch per call and never inspects the
/// status code; retry policy lives in the gateway.
#[derive(Debug, Clone)]
pub(crate) struct ApiClient {
    client: reqwest::Client,
    base: ApiUrl,
}

impl ApiClient {
    /// Create a new client from gateway settings.
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(transport_error)?;

        Ok(Self {
            client,
            base: config.base_url.clone(),
        })
    }

    /// Returns the API origin this client is configured for.
    pub fn base(&self) -> &ApiUrl {
        &self.base
    }

    /// Dispatch a request once, optionally with a bearer token.
    ///
    /// Any HTTP response, whatever its status, is returned as `Ok`. Only
    /// transport failures produce an error.
    #[instrument(skip_all, fields(method = %request.method(), path = request.path(), attempt = ?attempt))]
    pub async fn dispatch(
        &self,
        request: &ApiRequest,
        token: Option<&AccessToken>,
        attempt: Attempt,
    ) -> Result<ApiResponse> {
        let url = self.base.endpoint(request.path());
        debug!(%url, authed = token.is_some(), "Dispatching request");

        let mut headers = request.headers().clone();
        if let Some(token) = token {
            let value =
                HeaderValue::from_str(&token.bearer()).map_err(|_| InvalidInputError::Header {
                    name: AUTHORIZATION.to_string(),
                })?;
            // Replaces any caller-supplied credential
            headers.insert(AUTHORIZATION, value);
        }

        let mut builder = self
            .client
            .request(request.method().clone(), &url)
            .headers(headers);

        if !request.query().is_empty() {
            trace!(query = ?request.query(), "query parameters");
            builder = builder.query(request.query());
        }

        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(transport_error)?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(transport_error)?;
        trace!(status = %status, bytes = body.len(), "Response received");

        Ok(ApiResponse::new(status, headers, body))
    }

    /// POST a JSON body without credentials and decode a JSON response.
    ///
    /// Used for the token endpoints, which must never go through the
    /// refresh-and-retry path.
    pub async fn post_unauthenticated<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let request = ApiRequest::post(path).with_json(body)?;
        self.dispatch(&request, None, Attempt::Original)
            .await?
            .error_for_status()?
            .json()
    }
}
