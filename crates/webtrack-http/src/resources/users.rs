//! User account endpoints.

use serde::Serialize;
use tracing::instrument;

use webtrack_core::Result;

use crate::gateway::Gateway;

/// Body for `POST /users/change_password/`.
#[derive(Serialize)]
pub struct PasswordChange<'a> {
    pub old_password: &'a str,
    pub new_password: &'a str,
}

/// Body for `POST /users/reset_password/`.
#[derive(Debug, Serialize)]
pub struct PasswordReset<'a> {
    pub email: &'a str,
}

/// Body for `POST /users/reset_password_confirm/`.
#[derive(Serialize)]
pub struct PasswordResetConfirm<'a> {
    pub uid: &'a str,
    pub token: &'a str,
    pub new_password: &'a str,
}

/// Client for `/users/`.
#[derive(Debug, Clone)]
pub struct Users {
    gateway: Gateway,
}

impl Users {
    pub(crate) fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// The profile of the authenticated user.
    #[instrument(skip(self))]
    pub async fn me(&self) -> Result<serde_json::Value> {
        self.gateway.get_json("/users/me/").await
    }

    #[instrument(skip_all)]
    pub async fn change_password(&self, change: &PasswordChange<'_>) -> Result<()> {
        self.gateway
            .post_json::<_, serde_json::Value>("/users/change_password/", change)
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn reset_password(&self, reset: &PasswordReset<'_>) -> Result<()> {
        self.gateway
            .post_json::<_, serde_json::Value>("/users/reset_password/", reset)
            .await?;
        Ok(())
    }

    #[instrument(skip_all)]
    pub async fn reset_password_confirm(&self, confirm: &PasswordResetConfirm<'_>) -> Result<()> {
        self.gateway
            .post_json::<_, serde_json::Value>("/users/reset_password_confirm/", confirm)
            .await?;
        Ok(())
    }
}
