use crate::{
    config::AppConfig,
    scraper::{
        self, Aggregator, JikanProvider, MediaRecord, MetadataProvider, RatingAggregate,
        SourceId, StreamingLinks,
    },
    services::diagnostics::ProbeTarget,
    translate::{GoogleTranslator, SynopsisTranslator},
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Everything the search command shows for one title
#[derive(Debug, Clone)]
pub struct LookupResult {
    pub record: MediaRecord,
    pub ratings: RatingAggregate,
    pub streaming: StreamingLinks,
    /// Synopsis in the target language (or the untranslated fallback)
    pub description: String,
}

/// Search pipeline: primary metadata, then ratings, streaming and translation
pub struct AnimeLookup {
    metadata: Arc<dyn MetadataProvider>,
    aggregator: Aggregator,
    translator: SynopsisTranslator,
}

impl AnimeLookup {
    pub fn new(
        metadata: Arc<dyn MetadataProvider>,
        aggregator: Aggregator,
        translator: SynopsisTranslator,
    ) -> Self {
        Self {
            metadata,
            aggregator,
            translator,
        }
    }

    /// Build the production pipeline from configuration
    pub fn from_config(config: &AppConfig) -> scraper::Result<Self> {
        let timeout = config.request_timeout();

        let metadata = Arc::new(JikanProvider::new(timeout)?);
        let aggregator =
            scraper::create_default_aggregator(config.tmdb_api_key.as_deref(), timeout)?;
        let translator = SynopsisTranslator::new(
            Arc::new(GoogleTranslator::new(timeout)?),
            config.target_language.clone(),
        );

        Ok(Self::new(metadata, aggregator, translator))
    }

    /// Target language of translated synopses
    #[must_use]
    pub fn language(&self) -> &str {
        self.translator.target()
    }

    /// Secondary rating sources this pipeline consults
    #[must_use]
    pub fn rating_sources(&self) -> Vec<SourceId> {
        self.aggregator.providers().iter().map(|p| p.source()).collect()
    }

    /// First primary-source match for `query`; every failure reads as "not found"
    pub async fn fetch_primary_metadata(&self, query: &str) -> Option<MediaRecord> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        match self.metadata.search_first(query).await {
            Ok(Some(record)) => Some(record),
            Ok(None) => {
                debug!("{} has no match for {}", self.metadata.name(), query);
                None
            }
            Err(e) => {
                warn!("{} search failed for {}: {}", self.metadata.name(), query, e);
                None
            }
        }
    }

    /// Streaming links for a title; all "N/A" on failure
    pub async fn fetch_streaming_links(&self, media_id: &str) -> StreamingLinks {
        self.metadata
            .streaming_links(media_id)
            .await
            .unwrap_or_else(|e| {
                warn!("Streaming lookup failed for {}: {}", media_id, e);
                StreamingLinks::default()
            })
    }

    /// Run the whole search; `None` means the title was not found
    pub async fn find(&self, query: &str) -> Option<LookupResult> {
        let record = self.fetch_primary_metadata(query).await?;

        info!("Found {} (id: {}) for {:?}", record.title, record.id, query);

        let (ratings, streaming, description) = tokio::join!(
            self.aggregator.aggregate(&record),
            self.fetch_streaming_links(&record.id),
            self.translator.translate(record.synopsis.as_deref()),
        );

        Some(LookupResult {
            record,
            ratings,
            streaming,
            description,
        })
    }

    /// Every upstream the pipeline depends on, for reachability reports
    #[must_use]
    pub fn probe_targets(&self) -> Vec<ProbeTarget> {
        let mut targets = vec![ProbeTarget::new(
            self.metadata.name(),
            self.metadata.probe_url(),
        )];

        targets.extend(
            self.aggregator
                .providers()
                .iter()
                .map(|p| ProbeTarget::new(p.name(), p.probe_url())),
        );

        let backend = self.translator.backend();
        targets.push(ProbeTarget::new(backend.name(), backend.probe_url()));

        targets
    }
}
