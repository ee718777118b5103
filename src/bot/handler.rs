use super::{
    commands::{ANIME_NAME_OPTION, CheckCommand, Dispatcher, Invocation, Reply, SlashCommand},
    presenter::Embed,
};
use crate::error::Result;
use serenity::all::{
    ActivityData, Command, CommandInteraction, Context, CreateEmbed, CreateEmbedFooter,
    CreateInteractionResponse, CreateInteractionResponseFollowup,
    CreateInteractionResponseMessage, EditMessage, EventHandler, Interaction, Message, Ready,
};
use serenity::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

const PRESENCE: &str = "/find [anime]";

/// Gateway event handler
pub struct Handler {
    dispatcher: Arc<Dispatcher>,
}

impl Handler {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    async fn handle_command(&self, ctx: &Context, command: &CommandInteraction) -> Result<()> {
        let anime_name = command
            .data
            .options
            .iter()
            .find(|o| o.name == ANIME_NAME_OPTION)
            .and_then(|o| o.value.as_str());

        let Some(parsed) = SlashCommand::parse(&command.data.name, anime_name) else {
            warn!("Unknown command: {}", command.data.name);
            return Ok(());
        };

        let invocation = Invocation {
            user_id: command.user.id.get(),
            user_name: command
                .user
                .global_name
                .clone()
                .unwrap_or_else(|| command.user.name.clone()),
            channel_id: command.channel_id.get(),
        };

        if let Err(notice) = self.dispatcher.admit(&parsed, &invocation) {
            return respond(ctx, command, notice).await;
        }

        if parsed.is_deferred() {
            command.defer(ctx).await?;
            let reply = self.dispatcher.dispatch(parsed, &invocation).await;
            command.create_followup(ctx, to_followup(reply)).await?;
            return Ok(());
        }

        let reply = self.dispatcher.dispatch(parsed, &invocation).await;
        respond(ctx, command, reply).await
    }

    async fn handle_check(&self, ctx: &Context, msg: &Message, check: CheckCommand) -> Result<()> {
        let started = Instant::now();
        let mut placeholder = msg.channel_id.say(&ctx.http, check.placeholder()).await?;
        let latency = started.elapsed();

        if check == CheckCommand::Usage {
            return Ok(());
        }

        let report = self.dispatcher.run_check(check, Some(latency)).await;
        placeholder
            .edit(ctx, EditMessage::new().content(report))
            .await?;

        Ok(())
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("Logged in as {} (ID: {})", ready.user.name, ready.user.id);
        ctx.set_activity(Some(ActivityData::playing(PRESENCE)));

        match Command::set_global_commands(&ctx.http, SlashCommand::definitions()).await {
            Ok(commands) => info!("Registered {} slash commands", commands.len()),
            Err(e) => error!("Failed to register slash commands: {}", e),
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Command(command) = interaction else {
            return;
        };

        if let Err(e) = self.handle_command(&ctx, &command).await {
            error!("Failed to answer /{}: {}", command.data.name, e);
        }
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }

        let Some(check) = CheckCommand::parse(&msg.content) else {
            return;
        };

        if !self.dispatcher.is_admin(msg.author.id.get()) {
            debug!("Ignoring {} from non-admin {}", msg.content, msg.author.id);
            return;
        }

        if let Err(e) = self.handle_check(&ctx, &msg, check).await {
            error!("Failed to answer {}: {}", msg.content, e);
        }
    }
}

async fn respond(ctx: &Context, command: &CommandInteraction, reply: Reply) -> Result<()> {
    let message = match reply {
        Reply::Text { content, ephemeral } => CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(ephemeral),
        Reply::Embed(embed) => CreateInteractionResponseMessage::new().embed(to_create_embed(&embed)),
    };

    command
        .create_response(ctx, CreateInteractionResponse::Message(message))
        .await?;
    Ok(())
}

fn to_followup(reply: Reply) -> CreateInteractionResponseFollowup {
    match reply {
        Reply::Text { content, ephemeral } => CreateInteractionResponseFollowup::new()
            .content(content)
            .ephemeral(ephemeral),
        Reply::Embed(embed) => CreateInteractionResponseFollowup::new().embed(to_create_embed(&embed)),
    }
}

fn to_create_embed(embed: &Embed) -> CreateEmbed {
    let mut builder = CreateEmbed::new()
        .title(&embed.title)
        .description(&embed.description)
        .color(embed.color);

    if let Some(ref url) = embed.url {
        builder = builder.url(url);
    }
    if let Some(ref thumbnail) = embed.thumbnail {
        builder = builder.thumbnail(thumbnail);
    }
    for field in &embed.fields {
        builder = builder.field(&field.name, &field.value, field.inline);
    }
    if let Some(ref footer) = embed.footer {
        builder = builder.footer(CreateEmbedFooter::new(footer));
    }

    builder
}
