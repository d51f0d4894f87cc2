use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode, Url};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::AuthConfig;
use crate::error::{SuiteError, SuiteResult};
use crate::models::{LoginRequest, LoginResponse};
use crate::services::join_endpoint;

pub const AUTHENTICATION_PATH: &str = "User/Authentication";

/// Resolves the bearer token used by [`crate::services::foody::FoodyClient`].
pub struct TokenManager {
    http: Client,
    base_url: Url,
    auth: AuthConfig,
}

impl TokenManager {
    pub fn new(base_url: &str, auth: AuthConfig, timeout: Duration) -> SuiteResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| SuiteError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(crate::services::USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            base_url,
            auth,
        })
    }

    /// A non-blank static token wins unless it is a JWT that has already
    /// expired and login credentials are available.
    pub async fn get_token(&self) -> SuiteResult<String> {
        if let Some(token) = self.auth.static_token() {
            if let Some(expires_at) = token_expiry(token) {
                if expires_at <= Utc::now() {
                    if self.auth.credentials().is_some() {
                        warn!(
                            "Static token expired at {}, logging in with configured credentials",
                            expires_at
                        );
                        return self.login().await;
                    }
                    warn!(
                        "Static token expired at {} and no credentials are configured; using it anyway",
                        expires_at
                    );
                }
            }
            debug!("Using configured static token");
            return Ok(token.to_string());
        }

        if self.auth.credentials().is_some() {
            return self.login().await;
        }

        Err(SuiteError::Config(
            "No static token or username/password configured".into(),
        ))
    }

    pub async fn login(&self) -> SuiteResult<String> {
        let (username, password) = self.auth.credentials().ok_or_else(|| {
            SuiteError::Config("Login requires both username and password".into())
        })?;

        let url = join_endpoint(&self.base_url, AUTHENTICATION_PATH, None)?;
        info!("Authenticating as {} at {}", username, url);

        let response = self
            .http
            .post(url)
            .json(&LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            return Err(SuiteError::Authentication { status, body });
        }

        let login: LoginResponse =
            serde_json::from_str(&body).map_err(|source| SuiteError::Decode {
                context: "authentication response",
                source,
            })?;

        match login.access_token {
            Some(token) if !token.trim().is_empty() => Ok(token),
            _ => Err(SuiteError::MissingToken),
        }
    }
}

/// Reads the `exp` claim of a JWT without verifying its signature.
/// Returns `None` for anything that is not a decodable JWT with `exp`.
pub fn token_expiry(token: &str) -> Option<DateTime<Utc>> {
    let mut parts = token.split('.');
    let (_header, payload, _signature) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let decoded = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claims: serde_json::Value = serde_json::from_slice(&decoded).ok()?;
    let exp = claims.get("exp")?;
    let secs = exp.as_i64().or_else(|| exp.as_f64().map(|f| f as i64))?;

    DateTime::<Utc>::from_timestamp(secs, 0)
}
