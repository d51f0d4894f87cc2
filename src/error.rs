use reqwest::StatusCode;

pub type SuiteResult<T> = Result<T, SuiteError>;

#[derive(Debug, thiserror::Error)]
pub enum SuiteError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Failed to authenticate. Status code: {status}, Content: {body}")]
    Authentication { status: StatusCode, body: String },
    #[error("Failed to retrieve JWT token from the response")]
    MissingToken,
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to decode {context}: {source}")]
    Decode {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl From<config::ConfigError> for SuiteError {
    fn from(err: config::ConfigError) -> Self {
        SuiteError::Config(err.to_string())
    }
}

impl From<validator::ValidationErrors> for SuiteError {
    fn from(err: validator::ValidationErrors) -> Self {
        SuiteError::Config(format!("Validation error: {}", err))
    }
}
