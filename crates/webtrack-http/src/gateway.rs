//! Authenticated request gateway.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use webtrack_core::error::{AuthError, Error};
use webtrack_core::traits::{CredentialStore, LOGIN_PATH, Navigator, NoopNavigator};
use webtrack_core::{AccessToken, ApiUrl, Credentials, RefreshToken, Result, TokenPair};

use crate::api::{
    ApiClient, TOKEN_OBTAIN_PATH, TOKEN_REFRESH_PATH, TokenObtainRequest, TokenObtainResponse,
    TokenRefreshRequest, TokenRefreshResponse,
};
use crate::config::GatewayConfig;
use crate::request::{ApiRequest, ApiResponse, Attempt};
use crate::resources::{Dashboard, Leave, Reviews, Skills, Timesheets, Users};

/// The entry point for every WebTrack API call.
///
/// A `Gateway` reads the access token from its [`CredentialStore`] before each
/// dispatch and attaches it as a bearer header. When the server answers
/// `401 Unauthorized` the gateway refreshes the credential and replays the
/// request exactly once; if the refresh fails, the session is logged out and
/// the [`Navigator`] is sent to `/login`.
///
/// # Thread Safety
///
/// Gateways are cheap to clone (they use an internal `Arc`) and safe to share
/// across tasks. Concurrent 401s each refresh independently unless
/// [`GatewayConfig::single_flight_refresh`] is enabled.
#[derive(Clone)]
pub struct Gateway {
    inner: Arc<GatewayInner>,
}

struct GatewayInner {
    client: ApiClient,
    store: Arc<dyn CredentialStore>,
    navigator: Arc<dyn Navigator>,
    /// Present only when refreshes are single-flight.
    refresh_lock: Option<Mutex<()>>,
}

impl Gateway {
    /// Create a gateway that ignores navigation requests.
    pub fn new(config: GatewayConfig, store: Arc<dyn CredentialStore>) -> Result<Self> {
        Self::with_navigator(config, store, Arc::new(NoopNavigator))
    }

    /// Create a gateway that signals forced logouts to `navigator`.
    pub fn with_navigator(
        config: GatewayConfig,
        store: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        let client = ApiClient::new(&config)?;
        let refresh_lock = config.single_flight_refresh.then(|| Mutex::new(()));

        Ok(Self {
            inner: Arc::new(GatewayInner {
                client,
                store,
                navigator,
                refresh_lock,
            }),
        })
    }

    /// Returns the API origin.
    pub fn base_url(&self) -> &ApiUrl {
        self.inner.client.base()
    }

    /// Returns the credential store this gateway reads and writes.
    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.inner.store
    }

    /// Returns true if an access token is stored.
    pub fn is_authenticated(&self) -> Result<bool> {
        Ok(self.inner.store.access_token()?.is_some())
    }

    // ========================================================================
    // Session
    // ========================================================================

    /// Exchange a username and password for a token pair and store it.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if the backend rejects the
    /// credentials.
    #[instrument(skip(self, credentials), fields(username = %credentials.username()))]
    pub async fn login(&self, credentials: &Credentials) -> Result<TokenPair> {
        info!("Obtaining token pair");

        let request = TokenObtainRequest {
            username: credentials.username(),
            password: credentials.password(),
        };

        let response: TokenObtainResponse = self
            .inner
            .client
            .post_unauthenticated(TOKEN_OBTAIN_PATH, &request)
            .await
            .map_err(|e| match e {
                Error::Protocol(p) if p.status == 400 || p.status == 401 => {
                    Error::Auth(AuthError::InvalidCredentials(p))
                }
                other => other,
            })?;

        let pair = TokenPair {
            access: AccessToken::new(response.access),
            refresh: RefreshToken::new(response.refresh),
        };
        self.inner
            .store
            .store_tokens(&pair.access, Some(&pair.refresh))?;

        debug!("Logged in");
        Ok(pair)
    }

    /// Obtain a new access token using the stored refresh token.
    ///
    /// On success the new access token (and the rotated refresh token, if the
    /// backend returned one) is written to the store in one operation. On
    /// failure the store is left untouched.
    ///
    /// # Errors
    ///
    /// - [`AuthError::NoSession`] if no refresh token is stored; no request is
    ///   made.
    /// - [`AuthError::RefreshFailed`] if the refresh endpoint rejects the token
    ///   or cannot be reached.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<AccessToken> {
        match &self.inner.refresh_lock {
            Some(lock) => {
                let _guard = lock.lock().await;
                self.refresh_unguarded().await
            }
            None => self.refresh_unguarded().await,
        }
    }

    /// Clear both tokens and send the navigator to the login page.
    ///
    /// Safe to call when no session exists.
    #[instrument(skip(self))]
    pub fn logout(&self) -> Result<()> {
        info!("Ending session");
        let cleared = self.inner.store.clear_tokens();
        self.inner.navigator.navigate(LOGIN_PATH);
        cleared
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Send a request with the stored credential, recovering once from 401.
    ///
    /// Every response other than `401 Unauthorized` is returned unchanged,
    /// including other error statuses. Transport failures are returned as
    /// they happen and never retried.
    ///
    /// # Errors
    ///
    /// [`AuthError::AuthorizationExpired`] when the request was rejected and
    /// either the refresh failed (the session is then logged out) or the
    /// replayed request was rejected too.
    #[instrument(skip_all, fields(method = %request.method(), path = request.path()))]
    pub async fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let mut attempt = Attempt::Original;
        let mut token = self.inner.store.access_token()?;

        loop {
            let response = self
                .inner
                .client
                .dispatch(request, token.as_ref(), attempt)
                .await?;

            if !response.is_unauthorized() {
                return Ok(response);
            }

            let rejected = response.protocol_error();
            let Some(next) = attempt.next() else {
                warn!("Replayed request rejected");
                return Err(AuthError::AuthorizationExpired(rejected).into());
            };

            debug!("Access token rejected, refreshing");
            match self.refresh_after(token.as_ref()).await {
                Ok(fresh) => {
                    token = Some(fresh);
                    attempt = next;
                }
                Err(e) => {
                    warn!(error = %e, "Token refresh failed, logging out");
                    if let Err(e) = self.logout() {
                        warn!(error = %e, "Failed to clear credentials");
                    }
                    return Err(AuthError::AuthorizationExpired(rejected).into());
                }
            }
        }
    }

    /// Send a request and turn non-success statuses into errors.
    pub async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse> {
        self.send(request).await?.error_for_status()
    }

    /// Send a request and decode the JSON response.
    pub async fn fetch<R: DeserializeOwned>(&self, request: &ApiRequest) -> Result<R> {
        self.execute(request).await?.json()
    }

    pub async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        self.fetch(&ApiRequest::get(path)).await
    }

    /// GET with query parameters; `None` fields are omitted.
    pub async fn get_json_with<Q, R>(&self, path: &str, query: &Q) -> Result<R>
    where
        Q: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.fetch(&ApiRequest::get(path).with_query(query)?).await
    }

    pub async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.fetch(&ApiRequest::post(path).with_json(body)?).await
    }

    /// POST without a body.
    pub async fn post_empty<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        self.fetch(&ApiRequest::post(path)).await
    }

    pub async fn patch_json<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.fetch(&ApiRequest::patch(path).with_json(body)?).await
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        self.execute(&ApiRequest::delete(path)).await?;
        Ok(())
    }

    // ========================================================================
    // Resources
    // ========================================================================

    pub fn users(&self) -> Users {
        Users::new(self.clone())
    }

    pub fn timesheets(&self) -> Timesheets {
        Timesheets::new(self.clone())
    }

    pub fn leave(&self) -> Leave {
        Leave::new(self.clone())
    }

    pub fn reviews(&self) -> Reviews {
        Reviews::new(self.clone())
    }

    pub fn skills(&self) -> Skills {
        Skills::new(self.clone())
    }

    pub fn dashboard(&self) -> Dashboard {
        Dashboard::new(self.clone())
    }

    // ========================================================================
    // Refresh internals
    // ========================================================================

    /// Refresh on behalf of a request rejected while carrying `stale`.
    ///
    /// With single-flight enabled, a request whose token was already replaced
    /// by a concurrent refresh reuses the stored token instead of refreshing
    /// again.
    async fn refresh_after(&self, stale: Option<&AccessToken>) -> Result<AccessToken> {
        let Some(lock) = &self.inner.refresh_lock else {
            return self.refresh_unguarded().await;
        };

        let _guard = lock.lock().await;
        if let Some(current) = self.inner.store.access_token()?
            && Some(&current) != stale
        {
            debug!("Token already refreshed by a concurrent request");
            return Ok(current);
        }

        self.refresh_unguarded().await
    }

    async fn refresh_unguarded(&self) -> Result<AccessToken> {
        let refresh_token = self
            .inner
            .store
            .refresh_token()?
            .ok_or(AuthError::NoSession)?;

        info!("Refreshing access token");

        let request = TokenRefreshRequest {
            refresh: refresh_token.as_str(),
        };

        let response: TokenRefreshResponse = self
            .inner
            .client
            .post_unauthenticated(TOKEN_REFRESH_PATH, &request)
            .await
            .map_err(AuthError::refresh_failed)?;

        let access = AccessToken::new(response.access);
        let rotated = response.refresh.map(RefreshToken::new);
        self.inner.store.store_tokens(&access, rotated.as_ref())?;

        debug!(rotated = rotated.is_some(), "Access token refreshed");
        Ok(access)
    }
}

// Custom Debug impl that hides the store contents
impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("base_url", self.inner.client.base())
            .field("single_flight_refresh", &self.inner.refresh_lock.is_some())
            .field("store", &"[REDACTED]")
            .finish()
    }
}
