use super::api_types::{Anime, ListResponse, StreamingSite};
use crate::scraper::{
    Result,
    provider::{HttpClient, MetadataProvider},
    types::{MediaRecord, StreamingLinks},
};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Duration;

const JIKAN_API_URL: &str = "https://api.jikan.moe/v4";

static REWRITE_CREDIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\[Written by MAL Rewrite\]\s*$").expect("Invalid regex"));

/// MyAnimeList metadata through the Jikan REST API
pub struct JikanProvider {
    client: HttpClient,
}

impl JikanProvider {
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_base_url(JIKAN_API_URL, timeout)
    }

    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: HttpClient::new(base_url, timeout)?,
        })
    }

    /// `None` when the entry has no usable title
    fn anime_to_record(anime: Anime) -> Option<MediaRecord> {
        let title = anime
            .title_english
            .filter(|t| !t.trim().is_empty())
            .or(anime.title)
            .filter(|t| !t.trim().is_empty())?;

        let image = anime
            .images
            .and_then(|i| i.jpg)
            .and_then(|jpg| jpg.large_image_url.or(jpg.image_url));

        let synopsis = anime
            .synopsis
            .map(|s| REWRITE_CREDIT.replace(&s, "").trim().to_string())
            .filter(|s| !s.is_empty());

        let record = MediaRecord::new(anime.mal_id.to_string(), title)
            .with_score(anime.score)
            .with_episodes(anime.episodes)
            .with_synopsis(synopsis)
            .with_image(image)
            .with_url(anime.url)
            .with_kind(anime.anime_type)
            .with_status(anime.status)
            .with_genres(anime.genres.into_iter().map(|g| g.name).collect())
            .with_studios(anime.studios.into_iter().map(|s| s.name).collect());

        Some(record)
    }
}

#[async_trait]
impl MetadataProvider for JikanProvider {
    fn name(&self) -> &'static str {
        "MyAnimeList (Jikan)"
    }

    fn probe_url(&self) -> String {
        self.client.base_url().to_string()
    }

    async fn search_first(&self, query: &str) -> Result<Option<MediaRecord>> {
        let response: ListResponse<Anime> = self
            .client
            .get_with_params("/anime", &[("q", query), ("limit", "1")])
            .await?;

        Ok(response
            .data
            .into_iter()
            .next()
            .and_then(Self::anime_to_record))
    }

    async fn streaming_links(&self, id: &str) -> Result<StreamingLinks> {
        let endpoint = format!("/anime/{id}/streaming");
        let response: ListResponse<StreamingSite> = self.client.get(&endpoint).await?;

        Ok(StreamingLinks::from_entries(
            response
                .data
                .iter()
                .map(|site| (site.name.as_str(), site.url.as_deref())),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scraper::provider::jikan::api_types::{Entity, ImageSet, Images};
    use serde_json::json;

    fn anime(title: Option<&str>, english: Option<&str>) -> Anime {
        Anime {
            mal_id: 20,
            url: Some("https://myanimelist.net/anime/20/Naruto".to_string()),
            images: Some(Images {
                jpg: Some(ImageSet {
                    image_url: Some("small.jpg".to_string()),
                    large_image_url: Some("large.jpg".to_string()),
                }),
            }),
            title: title.map(str::to_string),
            title_english: english.map(str::to_string),
            anime_type: Some("TV".to_string()),
            episodes: Some(220),
            status: Some("Finished Airing".to_string()),
            score: Some(8.0),
            synopsis: Some("Ninja story.\n\n[Written by MAL Rewrite]".to_string()),
            genres: vec![Entity {
                name: "Action".to_string(),
            }],
            studios: Vec::new(),
        }
    }

    #[test]
    fn test_prefers_english_title() {
        let record = JikanProvider::anime_to_record(anime(Some("Naruto"), Some("Naruto EN"))).unwrap();
        assert_eq!(record.title, "Naruto EN");
    }

    #[test]
    fn test_blank_english_title_falls_back() {
        let record = JikanProvider::anime_to_record(anime(Some("Naruto"), Some("  "))).unwrap();
        assert_eq!(record.title, "Naruto");
    }

    #[test]
    fn test_untitled_entry_is_skipped() {
        assert!(JikanProvider::anime_to_record(anime(None, None)).is_none());
        assert!(JikanProvider::anime_to_record(anime(Some(" "), Some(""))).is_none());
    }

    #[test]
    fn test_list_response_decodes() {
        let body = json!({
            "data": [{ "mal_id": 1, "title": "Cowboy Bebop", "genres": [], "studios": [] }]
        });
        let response: ListResponse<Anime> = serde_json::from_value(body).unwrap();
        assert_eq!(response.data.len(), 1);

        let empty: ListResponse<StreamingSite> =
            serde_json::from_value(json!({ "data": [] })).unwrap();
        assert!(empty.data.is_empty());
    }

    #[test]
    fn test_record_fields() {
        let record = JikanProvider::anime_to_record(anime(Some("Naruto"), None)).unwrap();

        assert_eq!(record.id, "20");
        assert_eq!(record.image_url.as_deref(), Some("large.jpg"));
        assert_eq!(record.synopsis.as_deref(), Some("Ninja story."));
        assert_eq!(record.episodes, Some(220));
        assert_eq!(record.genres, vec!["Action".to_string()]);
        assert!(record.studios.is_empty());
    }
}
