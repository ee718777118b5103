mod aggregator;
mod matcher;
mod provider;
mod types;


pub use aggregator::{Aggregator, RatingAggregate, mean_rounded, round_to_tenth};
pub use matcher::{Candidate, Confidence, Matcher, ScoredMatch};
pub use provider::{
    AniListProvider, HttpClient, JikanProvider, KitsuProvider, MetadataProvider,
    RatingProvider, TmdbProvider, USER_AGENT,
};
pub use types::{
    MediaRecord, MediaType, RatingSample, RatingScale, SourceId, StreamingLinks, StreamingService,
};

use std::time::Duration;

/// Scraper result type
pub type Result<T> = std::result::Result<T, ScraperError>;

/// Scraper error types
#[derive(Debug, thiserror::Error)]
pub enum ScraperError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Create the default rating aggregator.
///
/// TMDB is only consulted when an API key is configured.
pub fn create_default_aggregator(
    tmdb_api_key: Option<&str>,
    timeout: Duration,
) -> Result<Aggregator> {
    let mut aggregator = Aggregator::new();

    aggregator.add_provider(AniListProvider::new(timeout)?);
    aggregator.add_provider(KitsuProvider::new(timeout)?);

    if let Some(key) = tmdb_api_key {
        aggregator.add_provider(TmdbProvider::new(key, timeout)?);
    }

    Ok(aggregator)
}
