use crate::scraper::{
    Result,
    types::{MediaRecord, SourceId, StreamingLinks},
};
use async_trait::async_trait;

/// Primary source of canonical anime metadata
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Human-readable provider name
    fn name(&self) -> &'static str;

    /// URL used by reachability probes
    fn probe_url(&self) -> String;

    /// Search by keyword and return the first result, if any
    async fn search_first(&self, query: &str) -> Result<Option<MediaRecord>>;

    /// Streaming availability for a title from this provider
    async fn streaming_links(&self, id: &str) -> Result<StreamingLinks>;
}

/// Secondary source consulted only for a numeric rating
#[async_trait]
pub trait RatingProvider: Send + Sync {
    /// Which rating source this provider reports for
    fn source(&self) -> SourceId;

    /// Human-readable provider name
    fn name(&self) -> &'static str;

    /// URL used by reachability probes
    fn probe_url(&self) -> String;

    /// Raw rating on the source's own scale, `None` when it has none
    async fn fetch_rating(&self, title: &str) -> Result<Option<f64>>;
}
