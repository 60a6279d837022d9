//! Refresh-token grant against the Spotify accounts service.

use super::types::TokenResponse;
use mixtape_common::{MixtapeError, Result};
use mixtape_http::{Auth, HttpClient, RequestOpts};

pub const DEFAULT_ACCOUNTS_BASE: &str = "https://accounts.spotify.com/";

/// App credentials plus the long-lived refresh token from the one-time setup.
#[derive(Clone, Copy)]
pub struct ClientCredentials<'a> {
    pub client_id: &'a str,
    pub client_secret: &'a str,
    pub refresh_token: &'a str,
}

impl std::fmt::Debug for ClientCredentials<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

/// Exchange the refresh token for a short-lived access token.
pub async fn refresh_access_token(
    accounts_base: &str,
    creds: ClientCredentials<'_>,
) -> Result<String> {
    let http =
        HttpClient::new(accounts_base).map_err(|e| MixtapeError::upstream("spotify auth", e))?;
    let token: TokenResponse = http
        .post_form(
            "api/token",
            &[
                ("grant_type", "refresh_token"),
                ("refresh_token", creds.refresh_token),
            ],
            RequestOpts {
                auth: Some(Auth::Basic {
                    username: creds.client_id,
                    password: creds.client_secret,
                }),
                ..Default::default()
            },
        )
        .await
        .map_err(|e| MixtapeError::upstream("spotify auth", format!("Token refresh failed: {e}")))?;

    tracing::debug!(
        token_type = token.token_type.as_deref().unwrap_or("-"),
        expires_in = token.expires_in.unwrap_or_default(),
        "spotify.token.refreshed"
    );
    Ok(token.access_token)
}
