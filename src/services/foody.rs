use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::config::SuiteConfig;
use crate::error::{SuiteError, SuiteResult};
use crate::models::{FoodDto, PatchOperation};
use crate::services::{join_endpoint, TokenManager, USER_AGENT};

pub const CREATE_PATH: &str = "Food/Create";
pub const EDIT_PATH: &str = "Food/Edit";
pub const ALL_PATH: &str = "Food/All";
pub const DELETE_PATH: &str = "Food/Delete";

/// Status and raw body of a Food API call. Non-2xx statuses are not errors
/// here; the negative cases assert on them.
#[derive(Debug, Clone)]
pub struct ApiReply {
    pub status: StatusCode,
    pub body: String,
}

impl ApiReply {
    pub fn json<T: DeserializeOwned>(&self, context: &'static str) -> SuiteResult<T> {
        serde_json::from_str(&self.body).map_err(|source| SuiteError::Decode { context, source })
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.body.contains(needle)
    }
}

/// Authenticated client for the Food endpoints. Every request carries
/// `Authorization: Bearer <token>`.
pub struct FoodyClient {
    http: Client,
    base_url: Url,
}

impl FoodyClient {
    pub fn new(base_url: &str, token: &str, timeout: Duration) -> SuiteResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| SuiteError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
            SuiteError::Config("Bearer token contains characters not allowed in a header".into())
        })?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, bearer);

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self { http, base_url })
    }

    /// Resolves a token from `config.auth` and builds the client.
    pub async fn connect(config: &SuiteConfig) -> SuiteResult<Self> {
        let timeout = Duration::from_secs(config.api.timeout_secs);
        let token = TokenManager::new(&config.api.base_url, config.auth.clone(), timeout)?
            .get_token()
            .await?;
        Self::new(&config.api.base_url, &token, timeout)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn create_food(&self, food: &FoodDto) -> SuiteResult<ApiReply> {
        let url = join_endpoint(&self.base_url, CREATE_PATH, None)?;
        self.execute(self.http.post(url).json(food)).await
    }

    pub async fn edit_food(&self, food_id: &str, ops: &[PatchOperation]) -> SuiteResult<ApiReply> {
        let url = join_endpoint(&self.base_url, EDIT_PATH, Some(food_id))?;
        self.execute(self.http.patch(url).json(ops)).await
    }

    pub async fn list_foods(&self) -> SuiteResult<ApiReply> {
        let url = join_endpoint(&self.base_url, ALL_PATH, None)?;
        self.execute(self.http.get(url)).await
    }

    pub async fn delete_food(&self, food_id: &str) -> SuiteResult<ApiReply> {
        let url = join_endpoint(&self.base_url, DELETE_PATH, Some(food_id))?;
        self.execute(self.http.delete(url)).await
    }

    async fn execute(&self, request: RequestBuilder) -> SuiteResult<ApiReply> {
        let request = request.build()?;
        let method = request.method().clone();
        let url = request.url().clone();

        let response = self.http.execute(request).await?;
        let status = response.status();
        let body = response.text().await?;

        debug!(%method, %url, status = status.as_u16(), "Response Content: '{}'", body);

        Ok(ApiReply { status, body })
    }
}
