use config::{Config, ConfigError};
use serde::Deserialize;
use std::fmt;
use validator::Validate;

use crate::error::{SuiteError, SuiteResult};

const DEFAULT_BASE_URL: &str = "http://localhost:86/api/";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct ApiConfig {
    #[validate(url)]
    pub base_url: String,
    #[validate(range(min = 1))]
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[derive(Deserialize, Clone, Default)]
pub struct AuthConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub static_token: Option<String>,
}

impl AuthConfig {
    pub fn with_static_token(token: impl Into<String>) -> Self {
        Self {
            static_token: Some(token.into()),
            ..Self::default()
        }
    }

    pub fn with_credentials(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
            static_token: None,
        }
    }

    /// The configured static token, if it is not blank.
    pub fn static_token(&self) -> Option<&str> {
        non_blank(&self.static_token)
    }

    /// Username and password, only when both are present and not blank.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (non_blank(&self.username), non_blank(&self.password)) {
            (Some(user), Some(pass)) => Some((user, pass)),
            _ => None,
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field(
                "static_token",
                &self.static_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct LogConfig {
    #[validate(length(min = 1))]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_format() -> String {
    "pretty".to_string()
}

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct SuiteConfig {
    #[validate(nested)]
    pub api: ApiConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[validate(nested)]
    pub log: LogConfig,
}

impl SuiteConfig {
    /// Loads `.env` (if any) and then the `FOODY_*` environment.
    pub fn new() -> SuiteResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    pub fn from_env() -> SuiteResult<Self> {
        let s = Config::builder()
            .set_default("api.base_url", DEFAULT_BASE_URL)?
            .set_default("api.timeout_secs", DEFAULT_TIMEOUT_SECS)?
            .set_default("log.level", "info")?
            .set_default("log.format", "pretty")?
            .add_source(
                config::Environment::with_prefix("FOODY")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let mut config: SuiteConfig = s.try_deserialize()?;
        config.validate()?;
        config.api.base_url = normalize_base_url(&config.api.base_url)?;

        if config.auth.static_token().is_none() && config.auth.credentials().is_none() {
            return Err(SuiteError::Config(
                "Missing configuration: Must provide either FOODY_AUTH__STATIC_TOKEN or (FOODY_AUTH__USERNAME + FOODY_AUTH__PASSWORD)".into(),
            ));
        }

        Ok(config)
    }
}

/// Endpoints are joined relative to the base URL, so it has to end in `/`.
pub fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::Message(format!(
            "Invalid base URL '{}': must be an absolute http(s) URL",
            trimmed
        )));
    }
    if trimmed.ends_with('/') {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{}/", trimmed))
    }
}
