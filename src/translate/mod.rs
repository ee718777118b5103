//! Synopsis translation with graceful fallback to the source text.

mod google;

pub use google::GoogleTranslator;

use crate::scraper::Result;
use async_trait::async_trait;
use std::borrow::Cow;
use std::sync::Arc;
use tracing::{debug, warn};

/// Longest synopsis prefix sent to the translation backend, in characters
pub const MAX_SYNOPSIS_CHARS: usize = 400;

/// Marker appended to truncated text
pub const ELLIPSIS: &str = "...";

/// Machine translation backend
#[async_trait]
pub trait Translator: Send + Sync {
    /// Human-readable backend name
    fn name(&self) -> &'static str;

    /// URL used by reachability probes
    fn probe_url(&self) -> String;

    /// Translate `text` into `target` (ISO 639-1), detecting the source language
    async fn translate(&self, text: &str, target: &str) -> Result<String>;
}

/// Translates synopses into one configured language
#[derive(Clone)]
pub struct SynopsisTranslator {
    backend: Arc<dyn Translator>,
    target: String,
    max_chars: usize,
}

impl SynopsisTranslator {
    pub fn new(backend: Arc<dyn Translator>, target: impl Into<String>) -> Self {
        Self {
            backend,
            target: target.into(),
            max_chars: MAX_SYNOPSIS_CHARS,
        }
    }

    /// Target language code
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The backend in use
    #[must_use]
    pub fn backend(&self) -> &Arc<dyn Translator> {
        &self.backend
    }

    /// Translate a synopsis.
    ///
    /// Missing text yields the fixed "no description" message. Long text is
    /// truncated before it is sent. Any backend failure returns the text that
    /// would have been sent, untranslated.
    pub async fn translate(&self, text: Option<&str>) -> String {
        let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
            return no_description(&self.target).to_string();
        };

        let short = truncate(text, self.max_chars);

        match self.backend.translate(&short, &self.target).await {
            Ok(translated) if !translated.trim().is_empty() => translated,
            Ok(_) => {
                debug!("{} returned an empty translation", self.backend.name());
                short.into_owned()
            }
            Err(e) => {
                warn!("{} translation failed: {}", self.backend.name(), e);
                short.into_owned()
            }
        }
    }
}

/// Keep the first `max_chars` characters, marking the cut with an ellipsis
#[must_use]
pub fn truncate(text: &str, max_chars: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => Cow::Owned(format!("{}{ELLIPSIS}", &text[..byte_index])),
        None => Cow::Borrowed(text),
    }
}

/// Fixed "no description" message for a language
#[must_use]
pub fn no_description(language: &str) -> &'static str {
    match language {
        "bn" => "কোন বর্ণনা পাওয়া যায়নি।",
        _ => "No description available.",
    }
}

/// Heading shown above the translated synopsis
#[must_use]
pub fn description_heading(language: &str) -> &'static str {
    match language {
        "bn" => "Bangla Description",
        "en" => "Description",
        _ => "Translated Description",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scraper::ScraperError;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct RecordingTranslator {
        sent: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl Translator for RecordingTranslator {
        fn name(&self) -> &'static str {
            "recording"
        }

        fn probe_url(&self) -> String {
            String::new()
        }

        async fn translate(&self, text: &str, target: &str) -> Result<String> {
            self.sent.lock().push(text.to_string());
            if self.fail {
                return Err(ScraperError::Api {
                    status: 503,
                    message: "unavailable".to_string(),
                });
            }
            Ok(format!("[{target}] {text}"))
        }
    }

    fn translator(fail: bool) -> (Arc<RecordingTranslator>, SynopsisTranslator) {
        let backend = Arc::new(RecordingTranslator {
            fail,
            ..Default::default()
        });
        let synopsis = SynopsisTranslator::new(backend.clone(), "bn");
        (backend, synopsis)
    }

    #[tokio::test]
    async fn test_missing_text_returns_fallback() {
        let (backend, synopsis) = translator(false);

        assert_eq!(synopsis.translate(None).await, "কোন বর্ণনা পাওয়া যায়নি।");
        assert_eq!(synopsis.translate(Some("   ")).await, "কোন বর্ণনা পাওয়া যায়নি।");
        assert!(backend.sent.lock().is_empty());
    }

    #[tokio::test]
    async fn test_long_text_is_truncated_before_sending() {
        let (backend, synopsis) = translator(false);
        let text = "a".repeat(500);

        let translated = synopsis.translate(Some(text.as_str())).await;

        let sent = backend.sent.lock();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0], format!("{}...", "a".repeat(400)));
        assert_eq!(translated, format!("[bn] {}", sent[0]));
    }

    #[tokio::test]
    async fn test_backend_failure_returns_truncated_source() {
        let (_, synopsis) = translator(true);

        assert_eq!(synopsis.translate(Some("Short text")).await, "Short text");

        let long = "b".repeat(450);
        assert_eq!(
            synopsis.translate(Some(long.as_str())).await,
            format!("{}...", "b".repeat(400))
        );
    }

    #[test]
    fn test_truncate_counts_characters() {
        let text = "অ".repeat(401);
        let cut = truncate(&text, 400);

        assert_eq!(cut.chars().count(), 403);
        assert!(matches!(truncate("short", 400), Cow::Borrowed("short")));
        assert!(matches!(truncate(&"c".repeat(400), 400), Cow::Borrowed(_)));
    }

    #[test]
    fn test_no_description_default() {
        assert_eq!(no_description("en"), "No description available.");
    }
}
