use super::api_types::{Details, MultiResult, SearchResponse};
use crate::scraper::{
    Result,
    matcher::{Candidate, Matcher},
    provider::{HttpClient, RatingProvider},
    types::{MediaType, SourceId},
};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

/// TMDB vote average for the best fuzzy title match
pub struct TmdbProvider {
    client: HttpClient,
    api_key: String,
}

impl TmdbProvider {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        Self::with_base_url(TMDB_BASE_URL, api_key, timeout)
    }

    pub fn with_base_url(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        Ok(Self {
            client: HttpClient::new(base_url, timeout)?,
            api_key: api_key.into(),
        })
    }

    fn add_api_key(&self, params: &mut Vec<(&str, String)>) {
        params.push(("api_key", self.api_key.clone()));
    }

    async fn request<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        extra_params: &[(&str, &str)],
    ) -> Result<T> {
        let mut params: Vec<(&str, String)> = Vec::new();
        self.add_api_key(&mut params);

        for (key, value) in extra_params {
            params.push((key, (*value).to_string()));
        }

        let params_ref: Vec<(&str, &str)> = params
            .iter()
            .map(|(k, v)| (*k, v.as_str()))
            .collect();

        self.client.get_with_params(endpoint, &params_ref).await
    }

    fn result_to_candidate(result: MultiResult) -> Option<Candidate> {
        let media_type = match result.media_type.as_deref() {
            Some("tv") => MediaType::Tv,
            Some("movie") => MediaType::Movie,
            _ => return None,
        };

        let titles: Vec<String> = [
            result.name,
            result.title,
            result.original_name,
            result.original_title,
        ]
        .into_iter()
        .flatten()
        .collect();

        if titles.is_empty() {
            return None;
        }

        Some(Candidate {
            id: result.id.to_string(),
            media_type,
            titles,
            popularity: result.popularity,
        })
    }

    fn details_endpoint(candidate: &Candidate) -> String {
        match candidate.media_type {
            MediaType::Movie => format!("/movie/{}", candidate.id),
            _ => format!("/tv/{}", candidate.id),
        }
    }
}

#[async_trait]
impl RatingProvider for TmdbProvider {
    fn source(&self) -> SourceId {
        SourceId::Tmdb
    }

    fn name(&self) -> &'static str {
        "TMDB API"
    }

    fn probe_url(&self) -> String {
        self.client.base_url().to_string()
    }

    async fn fetch_rating(&self, title: &str) -> Result<Option<f64>> {
        let response: SearchResponse<MultiResult> =
            self.request("/search/multi", &[("query", title)]).await?;

        let candidates: Vec<Candidate> = response
            .results
            .into_iter()
            .filter_map(Self::result_to_candidate)
            .collect();

        let Some(best) = Matcher::best_match(candidates, title) else {
            debug!("TMDB has no confident match for {}", title);
            return Ok(None);
        };

        debug!(
            "TMDB best match {} (score: {}, confidence: {:?})",
            best.candidate.id, best.score, best.confidence
        );

        let details: Details = self
            .request(&Self::details_endpoint(&best.candidate), &[])
            .await?;

        // An average over zero votes is reported as 0.0, which is not a rating
        Ok(details
            .vote_average
            .filter(|_| details.vote_count.unwrap_or(0) > 0))
    }
}
