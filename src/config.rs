//! Startup configuration, layered from an optional TOML file and the environment.

use config::{Config, ConfigBuilder, Environment, File, builder::DefaultState};
use serde::Deserialize;
use std::time::Duration;
use validator::Validate;

/// Optional configuration file looked up next to the working directory
pub const CONFIG_FILE: &str = "anime-master";

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_LANGUAGE: &str = "bn";
const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Configuration errors; all of them abort startup
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Source(#[from] config::ConfigError),

    #[error("BOT_TOKEN missing. Please set it in your environment variables.")]
    MissingToken,

    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },

    #[error("Invalid configuration: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Validated application configuration
#[derive(Clone, Validate)]
pub struct AppConfig {
    /// Discord bot token
    #[validate(length(min = 1))]
    pub bot_token: String,
    /// User allowed to run admin commands; `None` disables them
    pub admin_id: Option<u64>,
    /// `ADMN_ID` value that was set but unusable, reported once logging is up
    pub rejected_admin_id: Option<String>,
    /// Liveness endpoint port
    #[validate(range(min = 1))]
    pub port: u16,
    /// Synopsis target language (ISO 639-1)
    #[validate(length(min = 2, max = 8))]
    pub target_language: String,
    /// Timeout for each outbound API call, in seconds
    #[validate(range(min = 1, max = 60))]
    pub request_timeout_secs: u64,
    /// Enables TMDB ratings when set
    pub tmdb_api_key: Option<String>,
    pub logging: LoggingConfig,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("bot_token", &"<redacted>")
            .field("admin_id", &self.admin_id)
            .field("rejected_admin_id", &self.rejected_admin_id)
            .field("port", &self.port)
            .field("target_language", &self.target_language)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("tmdb_api_key", &self.tmdb_api_key.as_ref().map(|_| "<redacted>"))
            .field("logging", &self.logging)
            .finish()
    }
}

/// Values as read from the sources, before parsing
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    bot_token: Option<String>,
    admn_id: Option<String>,
    port: Option<String>,
    target_language: Option<String>,
    request_timeout_secs: Option<String>,
    tmdb_api_key: Option<String>,
    log_level: Option<String>,
    log_format: Option<String>,
}

impl AppConfig {
    /// Load from `anime-master.toml` (optional) overridden by the environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_sources(
            Some(File::with_name(CONFIG_FILE).required(false)),
            Environment::default(),
        )
    }

    /// Load from an explicit file and environment source
    pub fn from_sources(
        file: Option<File<config::FileSourceFile, config::FileFormat>>,
        environment: Environment,
    ) -> Result<Self, ConfigError> {
        let mut builder: ConfigBuilder<DefaultState> = Config::builder();
        if let Some(file) = file {
            builder = builder.add_source(file);
        }

        let raw: RawConfig = builder.add_source(environment).build()?.try_deserialize()?;
        Self::from_raw(raw)
    }

    /// Per-call timeout for outbound requests
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let bot_token = non_empty(raw.bot_token).ok_or(ConfigError::MissingToken)?;
        let (admin_id, rejected_admin_id) = match parse_admin_id(raw.admn_id) {
            Ok(id) => (id, None),
            Err(raw) => (None, Some(raw)),
        };

        let config = Self {
            bot_token,
            admin_id,
            rejected_admin_id,
            port: parse_or("PORT", raw.port, DEFAULT_PORT)?,
            target_language: non_empty(raw.target_language)
                .map(|l| l.to_lowercase())
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            request_timeout_secs: parse_or(
                "REQUEST_TIMEOUT_SECS",
                raw.request_timeout_secs,
                DEFAULT_TIMEOUT_SECS,
            )?,
            tmdb_api_key: non_empty(raw.tmdb_api_key),
            logging: LoggingConfig {
                level: non_empty(raw.log_level).unwrap_or_else(|| "info".to_string()),
                format: parse_log_format(raw.log_format)?,
            },
        };

        config.validate()?;
        Ok(config)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Unset is `Ok(None)`; a malformed or zero ID comes back as `Err(raw)`
fn parse_admin_id(value: Option<String>) -> Result<Option<u64>, String> {
    let Some(value) = non_empty(value) else {
        return Ok(None);
    };

    match value.parse::<u64>() {
        Ok(id) if id != 0 => Ok(Some(id)),
        _ => Err(value),
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match non_empty(value) {
        None => Ok(default),
        Some(v) => v.parse().map_err(|_| ConfigError::Invalid { key, value: v }),
    }
}

fn parse_log_format(value: Option<String>) -> Result<LogFormat, ConfigError> {
    match non_empty(value).map(|v| v.to_lowercase()).as_deref() {
        None | Some("pretty") | Some("text") => Ok(LogFormat::Pretty),
        Some("json") => Ok(LogFormat::Json),
        Some(other) => Err(ConfigError::Invalid {
            key: "LOG_FORMAT",
            value: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> Environment {
        Environment::default().source(Some(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        ))
    }

    fn load(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        AppConfig::from_sources(None, env(pairs))
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("BOT_TOKEN", "token")]).unwrap();

        assert_eq!(config.bot_token, "token");
        assert_eq!(config.admin_id, None);
        assert_eq!(config.port, 5000);
        assert_eq!(config.target_language, "bn");
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert!(config.tmdb_api_key.is_none());
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_missing_token_is_fatal() {
        assert!(matches!(load(&[]), Err(ConfigError::MissingToken)));
        assert!(matches!(
            load(&[("BOT_TOKEN", "   ")]),
            Err(ConfigError::MissingToken)
        ));
    }

    #[test]
    fn test_admin_id_is_trimmed() {
        let config = load(&[("BOT_TOKEN", "t"), ("ADMN_ID", " 123456789 ")]).unwrap();
        assert_eq!(config.admin_id, Some(123_456_789));
    }

    #[test]
    fn test_invalid_admin_id_disables_admin() {
        let config = load(&[("BOT_TOKEN", "t"), ("ADMN_ID", "abc")]).unwrap();
        assert_eq!(config.admin_id, None);
        assert_eq!(config.rejected_admin_id.as_deref(), Some("abc"));

        let config = load(&[("BOT_TOKEN", "t"), ("ADMN_ID", " 0 ")]).unwrap();
        assert_eq!(config.admin_id, None);
        assert_eq!(config.rejected_admin_id.as_deref(), Some("0"));

        let config = load(&[("BOT_TOKEN", "t")]).unwrap();
        assert!(config.rejected_admin_id.is_none());
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let result = load(&[("BOT_TOKEN", "t"), ("PORT", "not-a-port")]);
        assert!(matches!(result, Err(ConfigError::Invalid { key: "PORT", .. })));

        let result = load(&[("BOT_TOKEN", "t"), ("PORT", "0")]);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_timeout_bounds_are_validated() {
        let result = load(&[("BOT_TOKEN", "t"), ("REQUEST_TIMEOUT_SECS", "600")]);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_log_format() {
        let config = load(&[("BOT_TOKEN", "t"), ("LOG_FORMAT", "JSON")]).unwrap();
        assert_eq!(config.logging.format, LogFormat::Json);

        let result = load(&[("BOT_TOKEN", "t"), ("LOG_FORMAT", "xml")]);
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_environment_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "bot_token = \"from-file\"\nport = 8080\ntarget_language = \"en\"\ntmdb_api_key = \"key\""
        )
        .unwrap();

        let config = AppConfig::from_sources(
            Some(File::from(file.path())),
            env(&[("PORT", "9090")]),
        )
        .unwrap();

        assert_eq!(config.bot_token, "from-file");
        assert_eq!(config.port, 9090);
        assert_eq!(config.target_language, "en");
        assert_eq!(config.tmdb_api_key.as_deref(), Some("key"));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = load(&[("BOT_TOKEN", "super-secret")]).unwrap();
        assert!(!format!("{config:?}").contains("super-secret"));
    }
}
