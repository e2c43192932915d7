//! Token acquisition chain
//!
//! Every publishing operation authenticates the same way: the caller's
//! long-lived user token is exchanged for a fresh one, that token buys
//! the page access token, and Instagram operations additionally resolve
//! the Instagram Business Account linked to the page. Nothing is cached;
//! each request walks the chain again so a relay restart never serves a
//! stale token.

use crate::{
    Error, Result,
    types::wire::{InstagramAccountResponse, PageTokenResponse, TokenResponse},
};
use chrono::Utc;
use tracing::{debug, info};

use super::GraphClient;

/// Per-request page credentials
///
/// Carried in request headers rather than configuration so one relay
/// instance can serve any page the caller holds tokens for.
#[derive(Debug, Clone)]
pub struct PageCredentials {
    /// Facebook app id
    pub app_id: String,
    /// Facebook app secret
    pub app_secret: String,
    /// Target page id
    pub page_id: String,
    /// Long-lived user access token
    pub user_token: String,
}

impl PageCredentials {
    /// Create new page credentials
    pub fn new(
        app_id: impl Into<String>,
        app_secret: impl Into<String>,
        page_id: impl Into<String>,
        user_token: impl Into<String>,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            app_secret: app_secret.into(),
            page_id: page_id.into(),
            user_token: user_token.into(),
        }
    }
}

/// Resolved Instagram publishing context
#[derive(Debug, Clone)]
pub struct InstagramSession {
    /// Page access token used for all Instagram calls
    pub page_token: String,
    /// Instagram Business Account id linked to the page
    pub account_id: String,
}

impl GraphClient {
    /// Exchange the caller's long-lived user token for a fresh one.
    ///
    /// Uses the `fb_exchange_token` grant so the returned token gets a
    /// new expiry window.
    pub async fn refresh_long_lived_token(&self, credentials: &PageCredentials) -> Result<String> {
        debug!("Refreshing long-lived user token");

        let response: TokenResponse = self
            .get(
                "oauth/access_token",
                &[
                    ("grant_type", "fb_exchange_token"),
                    ("client_id", &credentials.app_id),
                    ("client_secret", &credentials.app_secret),
                    ("fb_exchange_token", &credentials.user_token),
                ],
            )
            .await?;

        if let Some(expires_in) = response.expires_in {
            let expiry = Utc::now() + chrono::Duration::seconds(expires_in as i64);
            debug!(
                "Refreshed user token expires around {}",
                expiry.format("%Y-%m-%d %H:%M UTC")
            );
        }

        response.access_token.ok_or_else(|| {
            Error::token_exchange("user token refresh", "response carried no access_token")
        })
    }

    /// Fetch the page access token for the configured page.
    pub async fn page_access_token(
        &self,
        credentials: &PageCredentials,
        user_token: &str,
    ) -> Result<String> {
        debug!("Fetching page access token for page {}", credentials.page_id);

        let response: PageTokenResponse = self
            .get(
                &credentials.page_id,
                &[("fields", "access_token"), ("access_token", user_token)],
            )
            .await?;

        response.access_token.ok_or_else(|| {
            Error::token_exchange("page token", "page node carried no access_token")
        })
    }

    /// Resolve the Instagram Business Account linked to the page.
    pub async fn instagram_account_id(
        &self,
        credentials: &PageCredentials,
        page_token: &str,
    ) -> Result<String> {
        debug!(
            "Resolving Instagram Business Account for page {}",
            credentials.page_id
        );

        let response: InstagramAccountResponse = self
            .get(
                &credentials.page_id,
                &[
                    ("fields", "instagram_business_account"),
                    ("access_token", page_token),
                ],
            )
            .await?;

        match response.instagram_business_account {
            Some(account) => Ok(account.id),
            None => Err(Error::missing_instagram_account(&credentials.page_id)),
        }
    }

    /// Walk the token chain up to the page access token.
    pub async fn acquire_page_token(&self, credentials: &PageCredentials) -> Result<String> {
        let user_token = self.refresh_long_lived_token(credentials).await?;
        let page_token = self.page_access_token(credentials, &user_token).await?;
        info!("Acquired page token for page {}", credentials.page_id);
        Ok(page_token)
    }

    /// Walk the full token chain for an Instagram operation.
    pub async fn acquire_instagram_session(
        &self,
        credentials: &PageCredentials,
    ) -> Result<InstagramSession> {
        let page_token = self.acquire_page_token(credentials).await?;
        let account_id = self.instagram_account_id(credentials, &page_token).await?;
        info!("Publishing to Instagram account {}", account_id);

        Ok(InstagramSession {
            page_token,
            account_id,
        })
    }
}
