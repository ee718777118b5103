use super::Translator;
use crate::scraper::{HttpClient, Result, ScraperError};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

const GOOGLE_TRANSLATE_URL: &str = "https://translate.googleapis.com";

/// Google Translate through the public `gtx` endpoint
pub struct GoogleTranslator {
    client: HttpClient,
}

impl GoogleTranslator {
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_base_url(GOOGLE_TRANSLATE_URL, timeout)
    }

    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: HttpClient::new(base_url, timeout)?,
        })
    }

    /// Join the translated segments of a `[[["text", "source", ...], ...], ...]` body
    fn parse_segments(body: &Value) -> Result<String> {
        let segments = body
            .get(0)
            .and_then(Value::as_array)
            .ok_or_else(|| ScraperError::Parse("Missing translation segments".to_string()))?;

        let translated: String = segments
            .iter()
            .filter_map(|segment| segment.get(0).and_then(Value::as_str))
            .collect();

        if translated.is_empty() {
            return Err(ScraperError::Parse("Empty translation".to_string()));
        }

        Ok(translated)
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    fn name(&self) -> &'static str {
        "Google Translate"
    }

    fn probe_url(&self) -> String {
        self.client.base_url().to_string()
    }

    async fn translate(&self, text: &str, target: &str) -> Result<String> {
        let body: Value = self
            .client
            .get_with_params(
                "/translate_a/single",
                &[
                    ("client", "gtx"),
                    ("sl", "auto"),
                    ("tl", target),
                    ("dt", "t"),
                    ("q", text),
                ],
            )
            .await?;

        Self::parse_segments(&body)
    }
}
