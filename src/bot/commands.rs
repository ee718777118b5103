//! Command parsing and dispatch, independent of the gateway connection.

use super::presenter::{self, Embed};
use crate::{
    config::AppConfig,
    gate::{ChannelGate, GateError},
    scraper::{self, SourceId},
    services::{AnimeLookup, Diagnostics},
};
use serenity::all::{CommandOptionType, CreateCommand, CreateCommandOption};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Name of the `/find` option carrying the search text
pub const ANIME_NAME_OPTION: &str = "anime_name";

/// Prefix command for admin diagnostics
pub const CHECK_PREFIX: &str = "!check";

/// Slash commands understood by the bot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Find { anime_name: String },
    Start,
    Sources,
    About,
    SetChannel,
    UnlockAll,
}

impl SlashCommand {
    /// Parse a command by name; `/find` needs its `anime_name` option
    pub fn parse(name: &str, anime_name: Option<&str>) -> Option<Self> {
        match name {
            "find" => anime_name.map(|n| Self::Find {
                anime_name: n.to_string(),
            }),
            "start" => Some(Self::Start),
            "sources" => Some(Self::Sources),
            "about" => Some(Self::About),
            "set_channel" => Some(Self::SetChannel),
            "unlock_all" => Some(Self::UnlockAll),
            _ => None,
        }
    }

    /// Admin commands skip the channel gate and check the caller instead
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::SetChannel | Self::UnlockAll)
    }

    /// Commands whose reply arrives after an acknowledgement
    #[must_use]
    pub const fn is_deferred(&self) -> bool {
        matches!(self, Self::Find { .. })
    }

    /// Global command registrations
    #[must_use]
    pub fn definitions() -> Vec<CreateCommand> {
        vec![
            CreateCommand::new("find")
                .description("Search for an anime, get info, ratings & Bangla description")
                .add_option(
                    CreateCommandOption::new(
                        CommandOptionType::String,
                        ANIME_NAME_OPTION,
                        "Name of the anime",
                    )
                    .required(true),
                ),
            CreateCommand::new("start").description("Get welcome info and help"),
            CreateCommand::new("sources").description("See which websites I use for data"),
            CreateCommand::new("about")
                .description("View developer and license information (Encrypted/Protected)"),
            CreateCommand::new("set_channel")
                .description("Admin: Lock the bot to ONLY reply in this current channel."),
            CreateCommand::new("unlock_all")
                .description("Admin: Allow the bot to reply in ALL channels."),
        ]
    }
}

/// Who ran a command, and where
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub user_id: u64,
    pub user_name: String,
    pub channel_id: u64,
}

/// What to send back for a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text { content: String, ephemeral: bool },
    Embed(Embed),
}

impl Reply {
    fn public(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
            ephemeral: false,
        }
    }

    fn ephemeral(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
            ephemeral: true,
        }
    }
}

/// `!check` subcommands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckCommand {
    Usage,
    Sources,
    System,
}

impl CheckCommand {
    /// Parse a message; `None` when it is not a `!check` command at all
    pub fn parse(content: &str) -> Option<Self> {
        let mut words = content.split_whitespace();
        if words.next() != Some(CHECK_PREFIX) {
            return None;
        }

        let check = match words.next().map(str::to_lowercase).as_deref() {
            Some("sources" | "source") => Self::Sources,
            Some("sys" | "system") => Self::System,
            _ => Self::Usage,
        };

        Some(check)
    }

    /// Message posted first and later edited into the report
    #[must_use]
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Usage => presenter::CHECK_USAGE,
            Self::Sources => presenter::CHECKING_SOURCES,
            Self::System => presenter::CHECKING_SYSTEM,
        }
    }
}

/// Routes commands to the lookup pipeline, the gate and diagnostics
pub struct Dispatcher {
    gate: Arc<ChannelGate>,
    lookup: Arc<AnimeLookup>,
    diagnostics: Diagnostics,
}

impl Dispatcher {
    pub fn new(gate: Arc<ChannelGate>, lookup: Arc<AnimeLookup>, diagnostics: Diagnostics) -> Self {
        Self {
            gate,
            lookup,
            diagnostics,
        }
    }

    pub fn from_config(config: &AppConfig) -> scraper::Result<Self> {
        let gate = Arc::new(ChannelGate::new(config.admin_id));
        let lookup = Arc::new(AnimeLookup::from_config(config)?);
        let diagnostics = Diagnostics::new(lookup.probe_targets(), config.request_timeout())?;

        Ok(Self::new(gate, lookup, diagnostics))
    }

    #[must_use]
    pub fn gate(&self) -> &Arc<ChannelGate> {
        &self.gate
    }

    #[must_use]
    pub fn is_admin(&self, user_id: u64) -> bool {
        self.gate.is_admin(user_id)
    }

    /// Channel gate check; `Err` carries the restriction notice to send instead
    pub fn admit(&self, command: &SlashCommand, invocation: &Invocation) -> Result<(), Reply> {
        if command.is_admin() || self.gate.is_allowed(invocation.channel_id) {
            return Ok(());
        }

        let Some(locked) = self.gate.locked_channel() else {
            return Ok(());
        };

        let notice = match command {
            SlashCommand::Find { .. } => presenter::find_restricted(locked),
            _ => presenter::restricted(locked),
        };
        Err(Reply::ephemeral(notice))
    }

    /// Run an admitted command
    pub async fn dispatch(&self, command: SlashCommand, invocation: &Invocation) -> Reply {
        match command {
            SlashCommand::Find { anime_name } => {
                info!("{} searched for {:?}", invocation.user_name, anime_name);
                match self.lookup.find(&anime_name).await {
                    Some(result) => {
                        Reply::Embed(presenter::find_embed(&result, self.lookup.language()))
                    }
                    None => Reply::public(presenter::NOT_FOUND),
                }
            }
            SlashCommand::Start => Reply::public(presenter::start_message(&invocation.user_name)),
            SlashCommand::Sources => {
                let tmdb = self.lookup.rating_sources().contains(&SourceId::Tmdb);
                Reply::Embed(presenter::sources_embed(tmdb))
            }
            SlashCommand::About => Reply::Embed(presenter::about_embed()),
            SlashCommand::SetChannel => {
                match self.gate.lock(invocation.user_id, invocation.channel_id) {
                    Ok(()) => Reply::public(presenter::locked(invocation.channel_id)),
                    Err(e) => Self::unauthorized(&e),
                }
            }
            SlashCommand::UnlockAll => match self.gate.unlock(invocation.user_id) {
                Ok(()) => Reply::public(presenter::UNLOCKED),
                Err(e) => Self::unauthorized(&e),
            },
        }
    }

    fn unauthorized(error: &GateError) -> Reply {
        Reply::ephemeral(format!("❌ {error}"))
    }

    /// Build the report for a `!check` command
    pub async fn run_check(&self, check: CheckCommand, platform_latency: Option<Duration>) -> String {
        match check {
            CheckCommand::Usage => presenter::CHECK_USAGE.to_string(),
            CheckCommand::Sources => {
                presenter::sources_report(&self.diagnostics.probe_sources().await)
            }
            CheckCommand::System => presenter::system_report(
                &self.diagnostics.system_status(&self.gate, platform_latency),
            ),
        }
    }
}
