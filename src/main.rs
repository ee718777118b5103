use anime_master::{Ctx, bot, config::AppConfig, logging, routes};
use anyhow::Context as _;
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    let _guard = logging::init(&config.logging)?;

    info!("Starting Anime Master v{}", env!("CARGO_PKG_VERSION"));
    if let Some(ref raw) = config.rejected_admin_id {
        warn!("Ignoring invalid ADMN_ID {:?}; admin commands are disabled", raw);
    } else if config.admin_id.is_none() {
        info!("No admin configured; admin commands are disabled");
    }

    let dispatcher = Arc::new(bot::Dispatcher::from_config(&config)?);

    let port = config.port;
    tokio::spawn(async move {
        if let Err(e) = routes::serve(port, Ctx::new()).await {
            error!("Liveness server stopped: {}", e);
        }
    });

    let mut client = bot::build_client(&config.bot_token, dispatcher).await?;

    tokio::select! {
        result = client.start() => result.context("Gateway client stopped")?,
        _ = tokio::signal::ctrl_c() => info!("Shutting down"),
    }

    Ok(())
}
