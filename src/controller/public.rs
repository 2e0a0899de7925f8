use axum::{
    extract::{Path, State, WebSocketUpgrade},
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    error::AppError,
    model::stats::{CommandInfoDto, CommandListDto, GuildStatsDto},
    realtime,
    state::AppState,
};

/// Tag for grouping public endpoints in OpenAPI documentation
pub static PUBLIC_TAG: &str = "public";

/// Public bot identity and reach, for the dashboard landing page.
#[utoipa::path(
    get,
    path = "/api/bot-info",
    tag = PUBLIC_TAG,
    responses((status = 200, description = "Bot identity and aggregate counts")),
)]
pub async fn bot_info(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.stats.bot_info()))
}

/// Connection state of every gateway shard.
#[utoipa::path(
    get,
    path = "/api/shard-status",
    tag = PUBLIC_TAG,
    responses((status = 200, description = "Per-shard status and latency")),
)]
pub async fn shard_status(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.stats.shard_status().await))
}

/// The registered command surface, grouped by category.
#[utoipa::path(
    get,
    path = "/api/commands",
    tag = PUBLIC_TAG,
    responses((status = 200, description = "Registered commands", body = CommandListDto)),
)]
pub async fn commands(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let mut commands: Vec<CommandInfoDto> = state
        .registry
        .iter()
        .map(|command| {
            let spec = command.spec();
            CommandInfoDto {
                name: spec.name.to_string(),
                description: spec.description.to_string(),
                category: spec.category.key().to_string(),
                aliases: spec.aliases.iter().map(|alias| alias.to_string()).collect(),
            }
        })
        .collect();
    commands.sort_by(|a, b| a.name.cmp(&b.name));

    let mut categories: Vec<String> = commands
        .iter()
        .map(|command| command.category.clone())
        .collect();
    categories.sort();
    categories.dedup();

    Ok(Json(CommandListDto {
        commands,
        categories,
    }))
}

/// Live counts for one guild, read from the shard cache. Guilds the bot is
/// not in report zeros rather than erroring, so the dashboard can render a
/// placeholder.
#[utoipa::path(
    get,
    path = "/api/guild/{guild_id}/stats",
    tag = PUBLIC_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    responses((status = 200, description = "Live guild counts", body = GuildStatsDto)),
)]
pub async fn guild_stats(
    State(state): State<AppState>,
    Path(guild_id): Path<u64>,
) -> Result<impl IntoResponse, AppError> {
    let stats = state.stats.guild_stats(guild_id).unwrap_or(GuildStatsDto {
        member_count: 0,
        channel_count: 0,
        role_count: 0,
    });
    Ok(Json(stats))
}

/// Realtime push channel. Clients subscribe to guild rooms and receive
/// periodic stats plus guild-scoped update events.
pub async fn websocket(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    let broadcaster = state.broadcaster.clone();
    ws.on_upgrade(move |socket| realtime::handle_socket(socket, broadcaster))
}
