use super::api_types::{GraphQLResponse, MediaData};
use crate::scraper::{
    Result, ScraperError,
    provider::{HttpClient, RatingProvider},
    types::SourceId,
};
use async_trait::async_trait;
use std::time::Duration;

const ANILIST_API_URL: &str = "https://graphql.anilist.co";

const SCORE_QUERY: &str = r#"
    query ($search: String) {
        Media(search: $search, type: ANIME) {
            averageScore
        }
    }
"#;

/// AniList average score through the GraphQL API
pub struct AniListProvider {
    client: HttpClient,
}

impl AniListProvider {
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_base_url(ANILIST_API_URL, timeout)
    }

    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: HttpClient::new(base_url, timeout)?,
        })
    }

    async fn query<T: serde::de::DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T> {
        let body = serde_json::json!({
            "query": query,
            "variables": variables
        });

        let response: GraphQLResponse<T> = self.client.post_json("", &body).await?;

        if let Some(errors) = response.errors
            && let Some(error) = errors.first()
        {
            return Err(ScraperError::Api {
                status: 400,
                message: error.message.clone(),
            });
        }

        response
            .data
            .ok_or_else(|| ScraperError::Parse("No data in response".to_string()))
    }
}

#[async_trait]
impl RatingProvider for AniListProvider {
    fn source(&self) -> SourceId {
        SourceId::AniList
    }

    fn name(&self) -> &'static str {
        "AniList API"
    }

    fn probe_url(&self) -> String {
        self.client.base_url().to_string()
    }

    async fn fetch_rating(&self, title: &str) -> Result<Option<f64>> {
        let variables = serde_json::json!({ "search": title });
        let data: MediaData = self.query(SCORE_QUERY, variables).await?;

        Ok(data.media.and_then(|m| m.average_score))
    }
}
