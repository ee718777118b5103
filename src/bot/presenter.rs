//! Chat-platform-neutral rendering of command replies.

use crate::{
    about::{ABOUT_INFO, COMMENT_KEY},
    scraper::{SourceId, StreamingService},
    services::{ProbeReport, SystemStatus, lookup::LookupResult},
    translate::description_heading,
};
use std::fmt::Write as _;

const NOT_AVAILABLE: &str = "N/A";

const RESULT_COLOR: u32 = 0xe6_7e22;
const ABOUT_COLOR: u32 = 0x2b_2d31;
const SOURCES_COLOR: u32 = 0x34_98db;

pub const NOT_FOUND: &str = "❌ Anime not found. Please check the spelling.";
pub const UNLOCKED: &str = "🔓 **Unlocked!** I will now reply in all channels.";
pub const CHECK_USAGE: &str = "⚠️ Use: `!check sys` or `!check sources`";
pub const CHECKING_SOURCES: &str = "🕵️ **Checking Sources...**";
pub const CHECKING_SYSTEM: &str = "🖥️ **Checking System...**";

/// Rich message body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub url: Option<String>,
    pub color: u32,
    pub thumbnail: Option<String>,
    pub fields: Vec<EmbedField>,
    pub footer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl Embed {
    fn field(mut self, name: &str, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(EmbedField {
            name: name.to_string(),
            value: value.into(),
            inline,
        });
        self
    }

    /// Value of the first field called `name`
    #[must_use]
    pub fn field_value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }
}

/// Rating with up to two decimals, e.g. `8.1`, `7.85`, `8.0`
#[must_use]
pub fn format_score(value: f64) -> String {
    let fixed = format!("{value:.2}");
    let trimmed = fixed.trim_end_matches('0');

    if trimmed.ends_with('.') {
        format!("{trimmed}0")
    } else {
        trimmed.to_string()
    }
}

fn star(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| format!("{}⭐", format_score(v)))
}

fn joined_or_na(values: &[String]) -> String {
    if values.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        values.join(", ")
    }
}

fn watch_link(url: Option<&str>) -> String {
    url.map_or_else(|| NOT_AVAILABLE.to_string(), |u| format!("[Watch]({u})"))
}

/// Search result card
#[must_use]
pub fn find_embed(result: &LookupResult, language: &str) -> Embed {
    let record = &result.record;
    let ratings = &result.ratings;

    let overall = ratings
        .overall
        .map_or_else(|| NOT_AVAILABLE.to_string(), |v| format!("{v:.1}⭐"));

    let detailed = format!(
        "**AniList:** {} | **MAL:** {}\n**Kitsu:** {} | **TMDB:** {}",
        star(ratings.score(SourceId::AniList)),
        star(ratings.score(SourceId::Mal)),
        star(ratings.score(SourceId::Kitsu)),
        star(ratings.score(SourceId::Tmdb)),
    );

    let links = format!(
        "🔴 **{}:** {} | 🟠 **{}:** {}",
        StreamingService::Netflix.label(),
        watch_link(result.streaming.get(StreamingService::Netflix)),
        StreamingService::Crunchyroll.label(),
        watch_link(result.streaming.get(StreamingService::Crunchyroll)),
    );

    let episodes = record
        .episodes
        .map_or_else(|| NOT_AVAILABLE.to_string(), |e| e.to_string());

    Embed {
        title: format!("🎬 {}", record.title),
        description: format!(
            "**{}:**\n{}",
            description_heading(language),
            result.description
        ),
        url: record.url.clone(),
        color: RESULT_COLOR,
        thumbnail: record.image_url.clone(),
        ..Embed::default()
    }
    .field("📌 Type", record.kind.as_str(), true)
    .field("📺 Episodes", episodes, true)
    .field("📡 Status", record.status.as_str(), true)
    .field("🎭 Genres", joined_or_na(&record.genres), false)
    .field("🏢 Studios", joined_or_na(&record.studios), true)
    .field("🏆 Overall Rating", format!("**{overall}**"), true)
    .field("📊 Detailed Ratings", detailed, false)
    .field("🔗 Streaming Links", links, false)
}

#[must_use]
pub fn about_embed() -> Embed {
    let embed = Embed {
        title: "🤖 About Anime Master".to_string(),
        description: "Core details and license information.".to_string(),
        color: ABOUT_COLOR,
        footer: Some("Verified Open Source Build | Integrity Check Passed".to_string()),
        ..Embed::default()
    };

    ABOUT_INFO.iter().fold(embed, |embed, (key, value)| {
        if *key == COMMENT_KEY {
            embed.field("⚖️ Legal/Comment", format!("*{value}*"), false)
        } else {
            embed.field(key, format!("`{value}`"), true)
        }
    })
}

#[must_use]
pub fn sources_embed(tmdb_enabled: bool) -> Embed {
    let mut description = String::from(
        "🔹 **MyAnimeList** (Jikan API)\n🔹 **AniList** (GraphQL)\n🔹 **Kitsu** (API)\n",
    );
    if tmdb_enabled {
        description.push_str("🔹 **TMDB** (API)\n");
    }
    description.push_str("🔹 **Translation:** Google Translate");

    Embed {
        title: "📚 Data Sources Used".to_string(),
        description,
        color: SOURCES_COLOR,
        ..Embed::default()
    }
}

#[must_use]
pub fn start_message(user_name: &str) -> String {
    format!(
        "👋 Hello **{user_name}**! 🍥\n\
         I am your Anime Assistant.\n\n\
         ✅ **Usage:** Type `/find` followed by an anime name.\n\
         I will fetch ratings, studio info, genres, and translate the description to Bangla."
    )
}

/// Notice for `/find` outside the locked channel
#[must_use]
pub fn find_restricted(channel_id: u64) -> String {
    format!("❌ Please use this command in <#{channel_id}>!")
}

/// Notice for other public commands outside the locked channel
#[must_use]
pub fn restricted(channel_id: u64) -> String {
    format!("⚠️ I am restricted to <#{channel_id}>.")
}

#[must_use]
pub fn locked(channel_id: u64) -> String {
    format!("🔒 **Locked!** I will now only reply in <#{channel_id}>.")
}

#[must_use]
pub fn sources_report(reports: &[ProbeReport]) -> String {
    let mut report = String::from("**📡 Source Connection Report**\n\n");

    for probe in reports {
        let ping = probe
            .latency
            .map_or_else(|| NOT_AVAILABLE.to_string(), |l| format!("{}ms", l.as_millis()));

        let (icon, status) = match &probe.error {
            None => ("✅", "OK".to_string()),
            Some(e) => ("❌", format!("Error: {e}")),
        };

        let _ = writeln!(
            report,
            "{icon} **{}**\n   └ Ping: {ping} | Status: {status}",
            probe.name
        );
    }

    report
}

#[must_use]
pub fn system_report(status: &SystemStatus) -> String {
    let restrictions = status.locked_channel.map_or_else(
        || "Unlocked (All Channels)".to_string(),
        |c| format!("<#{c}>"),
    );
    let latency = status
        .platform_latency
        .map_or_else(|| NOT_AVAILABLE.to_string(), |l| format!("{}ms", l.as_millis()));
    let uptime = status.uptime.as_secs();

    format!(
        "**⚙️ System Status**\n\
         -----------------------------\n\
         🕒 **Server Time (BD):** {}\n\
         🤖 **Bot Status:** ✅ Online\n\
         ⏱️ **Uptime:** {}h {}m {}s\n\
         🔒 **Restrictions:** {restrictions}\n\
         📶 **API Latency:** {latency}\n\
         -----------------------------\n\
         ✅ **All Systems Operational**",
        status.server_time,
        uptime / 3600,
        uptime % 3600 / 60,
        uptime % 60,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scraper::{MediaRecord, RatingAggregate, RatingSample, StreamingLinks};
    use std::time::Duration;

    fn naruto() -> LookupResult {
        let record = MediaRecord::new("20", "Naruto")
            .with_score(Some(7.9))
            .with_episodes(Some(220))
            .with_kind(Some("TV".to_string()))
            .with_status(Some("Finished Airing".to_string()))
            .with_genres(vec!["Action".to_string(), "Adventure".to_string()]);

        let samples = [
            RatingSample::new(SourceId::Mal, 7.9),
            RatingSample::new(SourceId::AniList, 81.0),
            RatingSample::new(SourceId::Kitsu, 78.5),
        ];

        LookupResult {
            record,
            ratings: RatingAggregate::from_samples(&samples),
            streaming: StreamingLinks {
                netflix: None,
                crunchyroll: Some("https://www.crunchyroll.com/naruto".to_string()),
            },
            description: "নারুতো".to_string(),
        }
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(8.1), "8.1");
        assert_eq!(format_score(7.85), "7.85");
        assert_eq!(format_score(8.0), "8.0");
        assert_eq!(format_score(10.0), "10.0");
    }

    #[test]
    fn test_find_embed_fields() {
        let embed = find_embed(&naruto(), "bn");

        assert_eq!(embed.title, "🎬 Naruto");
        assert!(embed.description.starts_with("**Bangla Description:**\n"));
        assert_eq!(embed.field_value("📺 Episodes"), Some("220"));
        assert_eq!(embed.field_value("🎭 Genres"), Some("Action, Adventure"));
        assert_eq!(embed.field_value("🏢 Studios"), Some("N/A"));
        assert_eq!(embed.field_value("🏆 Overall Rating"), Some("**8.0⭐**"));
        assert_eq!(
            embed.field_value("📊 Detailed Ratings"),
            Some("**AniList:** 8.1⭐ | **MAL:** 7.9⭐\n**Kitsu:** 7.85⭐ | **TMDB:** N/A")
        );
        assert_eq!(
            embed.field_value("🔗 Streaming Links"),
            Some(
                "🔴 **Netflix:** N/A | 🟠 **Crunchyroll:** [Watch](https://www.crunchyroll.com/naruto)"
            )
        );
    }

    #[test]
    fn test_find_embed_without_ratings() {
        let mut result = naruto();
        result.ratings = RatingAggregate::from_samples(&[]);

        let embed = find_embed(&result, "en");
        assert!(embed.description.starts_with("**Description:**"));
        assert_eq!(embed.field_value("🏆 Overall Rating"), Some("**N/A**"));
    }

    #[test]
    fn test_about_embed_comment_field() {
        let embed = about_embed();
        let comment = embed
            .fields
            .iter()
            .find(|f| f.name == "⚖️ Legal/Comment")
            .unwrap();

        assert!(!comment.inline);
        assert!(comment.value.starts_with('*'));
        assert_eq!(embed.field_value("Version Code"), Some("`9.1`"));
        assert_eq!(embed.fields.len(), ABOUT_INFO.len());
    }

    #[test]
    fn test_sources_embed_lists_tmdb_when_enabled() {
        assert!(sources_embed(true).description.contains("TMDB"));
        assert!(!sources_embed(false).description.contains("TMDB"));
    }

    #[test]
    fn test_reports() {
        let sources = sources_report(&[
            ProbeReport {
                name: "Kitsu API".to_string(),
                latency: Some(Duration::from_millis(120)),
                error: None,
            },
            ProbeReport {
                name: "AniList API".to_string(),
                latency: None,
                error: Some("timed out".to_string()),
            },
        ]);
        assert!(sources.contains("✅ **Kitsu API**\n   └ Ping: 120ms | Status: OK"));
        assert!(sources.contains("❌ **AniList API**\n   └ Ping: N/A | Status: Error: timed out"));

        let system = system_report(&SystemStatus {
            server_time: "09:41 PM".to_string(),
            uptime: Duration::from_secs(3725),
            locked_channel: Some(42),
            platform_latency: Some(Duration::from_millis(87)),
        });
        assert!(system.contains("🕒 **Server Time (BD):** 09:41 PM"));
        assert!(system.contains("⏱️ **Uptime:** 1h 2m 5s"));
        assert!(system.contains("🔒 **Restrictions:** <#42>"));
        assert!(system.contains("📶 **API Latency:** 87ms"));
    }
}
