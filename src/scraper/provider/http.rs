use crate::scraper::{Result, ScraperError};
use reqwest::{Client, RequestBuilder, header::ACCEPT};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;

/// User agent sent to every upstream API
pub const USER_AGENT: &str = concat!("AnimeMaster/", env!("CARGO_PKG_VERSION"));

/// Error bodies are cut to this many characters before they reach the logs
const MAX_ERROR_BODY: usize = 200;

/// HTTP client wrapper for providers
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client with a per-request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(ScraperError::Network)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Base URL requests are resolved against
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build full URL from endpoint
    #[must_use]
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// GET `endpoint` and decode the JSON body
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        self.get_with_params(endpoint, &[]).await
    }

    /// GET `endpoint` with query parameters and decode the JSON body
    pub async fn get_with_params<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let request = self.client.get(self.url(endpoint)).query(params);
        Self::send(request).await
    }

    /// POST a JSON body to `endpoint` and decode the JSON reply
    pub async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T> {
        let request = self
            .client
            .post(self.url(endpoint))
            .header(ACCEPT, "application/json")
            .json(body);
        Self::send(request).await
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let mut message = response.text().await.unwrap_or_default();
            if let Some((cut, _)) = message.char_indices().nth(MAX_ERROR_BODY) {
                message.truncate(cut);
            }

            return Err(ScraperError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ScraperError::Parse(format!("JSON parse error: {e}")))
    }
}
