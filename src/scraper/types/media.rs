/// Media type classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MediaType {
    #[default]
    Unknown,
    Movie,
    Tv,
}

/// Canonical metadata for one title, built fresh for every query
#[derive(Debug, Clone, PartialEq)]
pub struct MediaRecord {
    /// Provider-specific ID
    pub id: String,
    /// Display title (English when available, otherwise the default title)
    pub title: String,
    /// Native rating (0-10 scale)
    pub native_score: Option<f64>,
    /// Number of episodes
    pub episodes: Option<u32>,
    /// Full description
    pub synopsis: Option<String>,
    /// Cover image URL
    pub image_url: Option<String>,
    /// Canonical page URL
    pub url: Option<String>,
    /// Format (e.g., "TV", "Movie")
    pub kind: String,
    /// Airing status
    pub status: String,
    /// Genres, in provider order
    pub genres: Vec<String>,
    /// Studios, in provider order
    pub studios: Vec<String>,
}

impl MediaRecord {
    /// Create a new record with required fields
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            native_score: None,
            episodes: None,
            synopsis: None,
            image_url: None,
            url: None,
            kind: "N/A".to_string(),
            status: "N/A".to_string(),
            genres: Vec::new(),
            studios: Vec::new(),
        }
    }

    /// Builder pattern: set native score
    pub fn with_score(mut self, score: Option<f64>) -> Self {
        self.native_score = score;
        self
    }

    /// Builder pattern: set episode count
    pub fn with_episodes(mut self, episodes: Option<u32>) -> Self {
        self.episodes = episodes;
        self
    }

    /// Builder pattern: set synopsis
    pub fn with_synopsis(mut self, synopsis: Option<String>) -> Self {
        self.synopsis = synopsis;
        self
    }

    /// Builder pattern: set image URL
    pub fn with_image(mut self, url: Option<String>) -> Self {
        self.image_url = url;
        self
    }

    /// Builder pattern: set page URL
    pub fn with_url(mut self, url: Option<String>) -> Self {
        self.url = url;
        self
    }

    /// Builder pattern: set format, keeping the placeholder when absent
    pub fn with_kind(mut self, kind: Option<String>) -> Self {
        if let Some(kind) = kind.filter(|k| !k.is_empty()) {
            self.kind = kind;
        }
        self
    }

    /// Builder pattern: set status, keeping the placeholder when absent
    pub fn with_status(mut self, status: Option<String>) -> Self {
        if let Some(status) = status.filter(|s| !s.is_empty()) {
            self.status = status;
        }
        self
    }

    /// Builder pattern: set genres
    pub fn with_genres(mut self, genres: Vec<String>) -> Self {
        self.genres = genres;
        self
    }

    /// Builder pattern: set studios
    pub fn with_studios(mut self, studios: Vec<String>) -> Self {
        self.studios = studios;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_uses_placeholders() {
        let record = MediaRecord::new("20", "Naruto");

        assert_eq!(record.kind, "N/A");
        assert_eq!(record.status, "N/A");
        assert!(record.genres.is_empty());
        assert!(record.native_score.is_none());
    }

    #[test]
    fn test_empty_kind_keeps_placeholder() {
        let record = MediaRecord::new("20", "Naruto")
            .with_kind(Some(String::new()))
            .with_status(Some("Finished Airing".to_string()));

        assert_eq!(record.kind, "N/A");
        assert_eq!(record.status, "Finished Airing");
    }
}
