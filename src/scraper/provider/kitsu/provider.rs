use super::api_types::SearchResponse;
use crate::scraper::{
    Result, ScraperError,
    provider::{HttpClient, RatingProvider},
    types::SourceId,
};
use async_trait::async_trait;
use std::time::Duration;

const KITSU_API_URL: &str = "https://kitsu.io/api/edge";

/// Kitsu average rating through the JSON:API keyword filter
pub struct KitsuProvider {
    client: HttpClient,
}

impl KitsuProvider {
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_base_url(KITSU_API_URL, timeout)
    }

    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: HttpClient::new(base_url, timeout)?,
        })
    }

    fn parse_rating(raw: &str) -> Result<f64> {
        raw.trim()
            .parse::<f64>()
            .map_err(|_| ScraperError::Parse(format!("Invalid Kitsu rating: {raw}")))
    }
}

#[async_trait]
impl RatingProvider for KitsuProvider {
    fn source(&self) -> SourceId {
        SourceId::Kitsu
    }

    fn name(&self) -> &'static str {
        "Kitsu API"
    }

    fn probe_url(&self) -> String {
        self.client.base_url().to_string()
    }

    async fn fetch_rating(&self, title: &str) -> Result<Option<f64>> {
        let response: SearchResponse = self
            .client
            .get_with_params("/anime", &[("filter[text]", title), ("page[limit]", "1")])
            .await?;

        response
            .data
            .into_iter()
            .next()
            .and_then(|r| r.attributes)
            .and_then(|a| a.average_rating)
            .map(|raw| Self::parse_rating(&raw))
            .transpose()
    }
}
