//! Discord front end: slash commands, the `!check` prefix command and embeds.

pub mod commands;
mod handler;
pub mod presenter;

pub use commands::{CheckCommand, Dispatcher, Invocation, Reply, SlashCommand};
pub use handler::Handler;

use crate::error::Result;
use serenity::all::{Client, GatewayIntents};
use std::sync::Arc;

/// Gateway intents: slash commands plus message content for `!check`
pub fn intents() -> GatewayIntents {
    GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
}

/// Build the gateway client; call `start` on it to connect
pub async fn build_client(token: &str, dispatcher: Arc<Dispatcher>) -> Result<Client> {
    let client = Client::builder(token, intents())
        .event_handler(Handler::new(dispatcher))
        .await?;

    Ok(client)
}
