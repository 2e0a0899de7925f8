use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serenity::all::{Client, GatewayIntents};

use crate::{
    bot::{commands, handler::Handler, RegistryKey, Services},
    config::Config,
    dispatch::{registry::CommandRegistry, Dispatcher},
    error::AppError,
    realtime::Broadcaster,
    service::ai::{
        provider::{AnthropicProvider, ChatProvider, OpenAiProvider},
        AiService,
    },
};

/// Builds the Discord client with the dispatcher and services wired into
/// the event handler. The caller extracts the shared REST/cache/shard
/// handles before spawning [`start_bot`].
pub async fn init_bot(
    config: &Config,
    db: DatabaseConnection,
    broadcaster: Broadcaster,
) -> Result<(Client, Arc<CommandRegistry>), AppError> {
    let mut registry = CommandRegistry::new();
    commands::register_all(&mut registry);
    let registry = Arc::new(registry);

    let dispatcher = Arc::new(Dispatcher::new(
        registry.clone(),
        db.clone(),
        config.app_url.clone(),
        config.default_prefix.clone(),
    ));

    let services = Arc::new(Services {
        db: db.clone(),
        broadcaster,
        ai: AiService::new(db, chat_provider(config)),
        dashboard_url: config.app_url.clone(),
    });

    let handler = Handler {
        dispatcher,
        services,
    };

    // GUILD_MEMBERS and MESSAGE_CONTENT are privileged intents and must be
    // enabled in the Discord developer portal.
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::MESSAGE_CONTENT;

    let client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(handler)
        .await?;

    client
        .data
        .write()
        .await
        .insert::<RegistryKey>(registry.clone());

    Ok((client, registry))
}

/// Starts the Discord bot. Blocks until shutdown; run inside its own task.
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start_autosharded().await?;

    Ok(())
}

/// Picks the chat provider from configured keys: Anthropic first, then
/// OpenAI. No key means the AI module reports itself unavailable.
fn chat_provider(config: &Config) -> Option<Arc<dyn ChatProvider>> {
    let client = reqwest::Client::new();

    if let Some(key) = &config.anthropic_api_key {
        return Some(Arc::new(AnthropicProvider::new(
            client,
            key.clone(),
            config.ai_model.clone(),
        )));
    }
    if let Some(key) = &config.openai_api_key {
        return Some(Arc::new(OpenAiProvider::new(
            client,
            key.clone(),
            "gpt-4o-mini".to_string(),
        )));
    }

    None
}
