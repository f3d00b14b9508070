//! Access token lifecycle — decode expiry locally, re-login when it is close.

use std::fmt;
use std::time::Duration;

use base64::prelude::*;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use super::client::GeoClient;
use super::error::{ApiError, TokenError};

/// A token expiring within this margin is replaced before use
pub const REFRESH_MARGIN: Duration = Duration::from_secs(30);

/// Account credentials used for login
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Registered claims we read from the JWT payload
#[derive(Debug, Deserialize)]
struct Claims {
    exp: Option<f64>,
}

/// Bearer token issued by the login endpoint (a JWT)
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode the `exp` claim without verifying the signature
    pub fn expires_at(&self) -> Result<DateTime<Utc>, TokenError> {
        let payload = self.0.split('.').nth(1).ok_or(TokenError::NotJwt)?;
        let bytes = BASE64_URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
        let claims: Claims = serde_json::from_slice(&bytes)?;

        let exp = claims.exp.ok_or(TokenError::MissingExpiry)?;
        DateTime::from_timestamp(exp.floor() as i64, 0).ok_or(TokenError::ExpiryOutOfRange(exp))
    }

    /// Whether the token is still usable at `now` with the refresh margin applied.
    ///
    /// Undecodable tokens and tokens without `exp` count as expired.
    pub fn is_fresh_at(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at() {
            Ok(expires_at) => expires_at.timestamp() > now.timestamp() + margin_secs(),
            Err(reason) => {
                debug!("Treating access token as expired: {}", reason);
                false
            }
        }
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

fn margin_secs() -> i64 {
    REFRESH_MARGIN.as_secs() as i64
}

/// Return a token that is valid for at least [`REFRESH_MARGIN`].
///
/// A fresh `current` token is returned unchanged without touching the
/// network; otherwise exactly one login call is made.
pub async fn ensure_token(
    client: &GeoClient,
    current: Option<&AccessToken>,
    credentials: &Credentials,
) -> Result<AccessToken, ApiError> {
    if let Some(token) = current {
        if token.is_fresh_at(Utc::now()) {
            return Ok(token.clone());
        }
        debug!("Access token expires within {:?}, logging in again", REFRESH_MARGIN);
    }

    client.login(credentials).await
}
