use crate::{config::ConfigError, scraper::ScraperError};

/// Bot result type
pub type Result<T> = std::result::Result<T, BotError>;

/// Errors surfaced by the bot outside of per-source lookups
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Source setup failed: {0}")]
    Scraper(#[from] ScraperError),

    #[error("Discord error: {0}")]
    Discord(#[from] serenity::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
