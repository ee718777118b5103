use crate::scraper::{
    provider::RatingProvider,
    types::{MediaRecord, RatingSample, SourceId},
};
use futures::future::join_all;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Blended rating plus the per-source values it was computed from
#[derive(Debug, Clone, PartialEq)]
pub struct RatingAggregate {
    /// Mean of all normalized samples, rounded to one decimal
    pub overall: Option<f64>,
    /// Normalized value per known source, `None` when it had no sample
    pub per_source: BTreeMap<SourceId, Option<f64>>,
}

impl RatingAggregate {
    /// Fold samples into the blended score and the per-source breakdown
    #[must_use]
    pub fn from_samples(samples: &[RatingSample]) -> Self {
        let mut per_source: BTreeMap<SourceId, Option<f64>> =
            SourceId::ALL.into_iter().map(|id| (id, None)).collect();

        let normalized: Vec<f64> = samples
            .iter()
            .map(|sample| {
                let value = sample.normalized();
                per_source.insert(sample.source, Some(value));
                value
            })
            .collect();

        Self {
            overall: mean_rounded(&normalized),
            per_source,
        }
    }

    /// Normalized value for one source
    #[must_use]
    pub fn score(&self, source: SourceId) -> Option<f64> {
        self.per_source.get(&source).copied().flatten()
    }

    /// Number of sources that contributed
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.per_source.values().filter(|v| v.is_some()).count()
    }
}

/// Arithmetic mean rounded to one decimal; `None` for no values
#[must_use]
pub fn mean_rounded(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mean = values.iter().sum::<f64>() / values.len() as f64;
    Some(round_to_tenth(mean))
}

/// Round half away from zero to one decimal.
///
/// The value is snapped to a 1e-7 grid first so that binary noise such as
/// `7.949999999999999` still rounds as the decimal `7.95` it stands for.
#[must_use]
pub fn round_to_tenth(value: f64) -> f64 {
    let snapped = (value * 10.0 * 1e6).round() / 1e6;
    snapped.round() / 10.0
}

/// Fans out to every rating provider and blends the answers
#[derive(Default)]
pub struct Aggregator {
    providers: Vec<Arc<dyn RatingProvider>>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a provider
    pub fn add_provider<P: RatingProvider + 'static>(&mut self, provider: P) {
        self.providers.push(Arc::new(provider));
    }

    /// Get all providers
    pub fn providers(&self) -> &[Arc<dyn RatingProvider>] {
        &self.providers
    }

    /// Collect the record's native score plus one sample per responding provider.
    ///
    /// Providers are queried concurrently. A provider that errors, times out or
    /// has no rating contributes nothing.
    pub async fn collect_samples(&self, record: &MediaRecord) -> Vec<RatingSample> {
        let mut samples: Vec<RatingSample> = record
            .native_score
            .and_then(|score| RatingSample::checked(SourceId::Mal, score))
            .into_iter()
            .collect();

        // An empty search would match whatever the source ranks first
        if record.title.trim().is_empty() {
            warn!("Skipping rating lookups for untitled record {}", record.id);
            return samples;
        }

        let lookups = self.providers.iter().map(|provider| async move {
            match provider.fetch_rating(&record.title).await {
                Ok(Some(raw)) => {
                    let sample = RatingSample::checked(provider.source(), raw);
                    if sample.is_none() {
                        debug!("{} returned unusable rating {}", provider.name(), raw);
                    }
                    sample
                }
                Ok(None) => {
                    debug!("{} has no rating for {}", provider.name(), record.title);
                    None
                }
                Err(e) => {
                    warn!("{} rating lookup failed: {}", provider.name(), e);
                    None
                }
            }
        });

        samples.extend(join_all(lookups).await.into_iter().flatten());
        samples
    }

    /// Aggregate all available ratings for a record
    pub async fn aggregate(&self, record: &MediaRecord) -> RatingAggregate {
        let samples = self.collect_samples(record).await;
        let aggregate = RatingAggregate::from_samples(&samples);

        debug!(
            "Aggregated {} samples for {}: {:?}",
            aggregate.sample_count(),
            record.title,
            aggregate.overall
        );

        aggregate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scraper::{Result, ScraperError};
    use async_trait::async_trait;

    struct FixedProvider {
        source: SourceId,
        rating: Result<Option<f64>>,
    }

    impl FixedProvider {
        fn ok(source: SourceId, rating: f64) -> Self {
            Self {
                source,
                rating: Ok(Some(rating)),
            }
        }

        fn failing(source: SourceId) -> Self {
            Self {
                source,
                rating: Err(ScraperError::Parse("broken".to_string())),
            }
        }
    }

    #[async_trait]
    impl RatingProvider for FixedProvider {
        fn source(&self) -> SourceId {
            self.source
        }

        fn name(&self) -> &'static str {
            "fixed"
        }

        fn probe_url(&self) -> String {
            String::new()
        }

        async fn fetch_rating(&self, _title: &str) -> Result<Option<f64>> {
            match &self.rating {
                Ok(value) => Ok(*value),
                Err(e) => Err(ScraperError::Parse(e.to_string())),
            }
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_no_samples_is_unavailable() {
        let aggregate = RatingAggregate::from_samples(&[]);

        assert!(aggregate.overall.is_none());
        assert_eq!(aggregate.per_source.len(), SourceId::ALL.len());
        assert_eq!(aggregate.sample_count(), 0);
    }

    #[test]
    fn test_single_sample() {
        let aggregate = RatingAggregate::from_samples(&[RatingSample::new(SourceId::AniList, 85.0)]);

        assert_eq!(aggregate.overall, Some(8.5));
        assert!(approx(aggregate.score(SourceId::AniList).unwrap(), 8.5));
        assert!(aggregate.score(SourceId::Mal).is_none());
    }

    #[test]
    fn test_mean_is_rounded_half_away_from_zero() {
        let samples = [
            RatingSample::new(SourceId::Mal, 7.9),
            RatingSample::new(SourceId::AniList, 81.0),
            RatingSample::new(SourceId::Kitsu, 78.5),
        ];

        let aggregate = RatingAggregate::from_samples(&samples);

        assert_eq!(aggregate.overall, Some(8.0));
        assert!(approx(aggregate.score(SourceId::Kitsu).unwrap(), 7.85));
        assert!(aggregate.score(SourceId::Tmdb).is_none());
    }

    #[test]
    fn test_overall_within_sample_bounds() {
        let sets: [&[f64]; 4] = [
            &[1.0, 9.9],
            &[7.94, 7.96, 8.01],
            &[5.55, 5.55],
            &[0.1, 10.0, 3.33, 6.66],
        ];

        for values in sets {
            let overall = mean_rounded(values).unwrap();
            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

            assert!(overall >= round_to_tenth(min) && overall <= round_to_tenth(max));
        }
    }

    #[test]
    fn test_round_to_tenth() {
        assert_eq!(round_to_tenth(7.95), 8.0);
        assert_eq!(round_to_tenth(7.94), 7.9);
        assert_eq!(round_to_tenth(23.85 / 3.0), 8.0);
        assert_eq!(round_to_tenth(8.0), 8.0);
    }

    #[tokio::test]
    async fn test_failed_provider_is_excluded() {
        let mut aggregator = Aggregator::new();
        aggregator.add_provider(FixedProvider::ok(SourceId::AniList, 81.0));
        aggregator.add_provider(FixedProvider::failing(SourceId::Kitsu));
        aggregator.add_provider(FixedProvider::ok(SourceId::Tmdb, 0.0));

        let record = MediaRecord::new("20", "Naruto").with_score(Some(7.9));
        let aggregate = aggregator.aggregate(&record).await;

        assert_eq!(aggregate.sample_count(), 2);
        assert_eq!(aggregate.overall, Some(8.0));
        assert!(aggregate.score(SourceId::Kitsu).is_none());
        assert!(aggregate.score(SourceId::Tmdb).is_none());
    }

    #[tokio::test]
    async fn test_record_without_score_and_no_providers() {
        let aggregator = Aggregator::new();
        let aggregate = aggregator.aggregate(&MediaRecord::new("1", "Unknown")).await;

        assert!(aggregate.overall.is_none());
    }

    #[tokio::test]
    async fn test_blank_title_skips_secondary_sources() {
        let mut aggregator = Aggregator::new();
        aggregator.add_provider(FixedProvider::ok(SourceId::Kitsu, 90.0));

        let record = MediaRecord::new("7", "  ").with_score(Some(7.0));
        let aggregate = aggregator.aggregate(&record).await;

        assert!(aggregate.score(SourceId::Kitsu).is_none());
        assert_eq!(aggregate.overall, Some(7.0));
    }
}
