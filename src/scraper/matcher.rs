use crate::scraper::types::MediaType;
use std::collections::HashSet;

/// Match confidence level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Confidence {
    None,
    Low,
    Medium,
    High,
    Exact,
}

/// A search hit considered for fuzzy matching
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Provider-specific ID
    pub id: String,
    /// Media type
    pub media_type: MediaType,
    /// Every known title (localized, original, ...)
    pub titles: Vec<String>,
    /// Provider-specific popularity
    pub popularity: Option<f64>,
}

/// A scored match result
#[derive(Debug, Clone)]
pub struct ScoredMatch {
    /// The matched candidate
    pub candidate: Candidate,
    /// Match score (0-100)
    pub score: i32,
    /// Confidence level
    pub confidence: Confidence,
}

/// Matcher for scoring and ranking search results against a title
pub struct Matcher;

impl Matcher {
    /// Score and rank candidates, best first
    #[must_use]
    pub fn rank(candidates: Vec<Candidate>, query: &str) -> Vec<ScoredMatch> {
        let mut scored: Vec<ScoredMatch> = candidates
            .into_iter()
            .map(|candidate| Self::score_match(candidate, query))
            .collect();

        // Stable: ties keep provider order
        scored.sort_by_key(|m| std::cmp::Reverse(m.score));

        scored
    }

    /// Get the best match if confidence is at least low
    #[must_use]
    pub fn best_match(candidates: Vec<Candidate>, query: &str) -> Option<ScoredMatch> {
        Self::rank(candidates, query)
            .into_iter()
            .next()
            .filter(|m| m.confidence >= Confidence::Low)
    }

    fn score_match(candidate: Candidate, query: &str) -> ScoredMatch {
        // Title (0-70), type (0-20), popularity (0-10)
        let title_score = Self::score_title(&candidate.titles, query);
        let score = title_score
            + Self::score_type(candidate.media_type)
            + Self::score_popularity(candidate.popularity);

        ScoredMatch {
            confidence: Self::calculate_confidence(score, title_score),
            candidate,
            score,
        }
    }

    fn score_title(titles: &[String], query: &str) -> i32 {
        let query = Self::normalize_title(query);

        titles
            .iter()
            .map(|title| Self::normalize_title(title))
            .map(|title| {
                if title == query {
                    70
                } else {
                    (Self::string_similarity(&title, &query) * 70.0) as i32
                }
            })
            .max()
            .unwrap_or(0)
    }

    /// Lowercase, drop punctuation, collapse whitespace
    fn normalize_title(title: &str) -> String {
        let cleaned: String = title
            .chars()
            .filter(|c| c.is_alphanumeric() || c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();

        cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Word-set Jaccard index, plus 0.2 when one title contains the other
    fn string_similarity(a: &str, b: &str) -> f64 {
        if a == b {
            return 1.0;
        }

        let words_a: HashSet<&str> = a.split_whitespace().collect();
        let words_b: HashSet<&str> = b.split_whitespace().collect();

        let union = words_a.union(&words_b).count();
        if union == 0 {
            return 0.0;
        }

        let jaccard = words_a.intersection(&words_b).count() as f64 / union as f64;
        let nested = !a.is_empty() && !b.is_empty() && (a.contains(b) || b.contains(a));

        (jaccard + if nested { 0.2 } else { 0.0 }).min(1.0)
    }

    // Anime series are listed as TV on general databases
    const fn score_type(media_type: MediaType) -> i32 {
        match media_type {
            MediaType::Tv => 20,
            MediaType::Movie => 12,
            MediaType::Unknown => 5,
        }
    }

    fn score_popularity(popularity: Option<f64>) -> i32 {
        match popularity {
            Some(p) if p > 100.0 => 10,
            Some(p) if p > 10.0 => 7,
            Some(_) => 3,
            None => 5,
        }
    }

    const fn calculate_confidence(total_score: i32, title_score: i32) -> Confidence {
        if title_score < 35 {
            return Confidence::None;
        }

        match total_score {
            90..=100 => Confidence::Exact,
            75..=89 => Confidence::High,
            60..=74 => Confidence::Medium,
            40..=59 => Confidence::Low,
            _ => Confidence::None,
        }
    }
}
