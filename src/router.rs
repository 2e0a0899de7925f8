use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_governor::{governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    controller::{auth, guild, public},
    error::{config::ConfigError, AppError},
    model,
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::login,
        auth::callback,
        auth::logout,
        auth::get_user,
        public::bot_info,
        public::shard_status,
        public::commands,
        public::guild_stats,
        guild::get_settings,
        guild::update_settings,
        guild::toggle_module,
        guild::update_welcome,
        guild::upsert_sticky,
        guild::delete_sticky,
        guild::update_tickets,
        guild::list_tickets,
        guild::list_cases,
    ),
    components(schemas(
        model::api::ErrorDto,
        model::api::SuccessDto,
        model::auth::SessionUser,
        model::auth::SessionGuild,
        model::case::CaseDto,
        model::ticket::TicketDto,
        model::guild::GuildSettingsDto,
        model::guild::UpdateGuildSettingsDto,
        model::guild::ModuleToggleDto,
        model::guild::WelcomeSettingsDto,
        model::guild::StickySettingsDto,
        model::guild::TicketSettingsDto,
        model::guild::TicketTypeDto,
        model::stats::BotInfoDto,
        model::stats::GuildStatsDto,
        model::stats::ShardDto,
        model::stats::ShardStatusDto,
        model::stats::CommandInfoDto,
        model::stats::CommandListDto,
    )),
    tags(
        (name = "auth", description = "Discord OAuth login flow"),
        (name = "public", description = "Unauthenticated bot information"),
        (name = "guild", description = "Per-guild configuration, gated on manage-guild"),
    )
)]
struct ApiDoc;

/// Assembles the dashboard API router: REST endpoints, the realtime
/// WebSocket, Swagger UI, CORS and per-IP rate limiting.
pub fn router() -> Result<Router<AppState>, AppError> {
    let governor = GovernorConfigBuilder::default()
        .key_extractor(SmartIpKeyExtractor)
        .per_second(10)
        .burst_size(100)
        .finish()
        .ok_or_else(|| {
            ConfigError::InvalidEnvVar {
                name: "rate limiter".to_string(),
                value: "invalid governor configuration".to_string(),
            }
        })?;

    let api = Router::new()
        .route("/api/auth/login", get(auth::login))
        .route("/api/auth/callback", get(auth::callback))
        .route("/api/auth/logout", get(auth::logout))
        .route("/api/auth/user", get(auth::get_user))
        .route("/api/bot-info", get(public::bot_info))
        .route("/api/shard-status", get(public::shard_status))
        .route("/api/commands", get(public::commands))
        .route("/api/guild/{guild_id}/stats", get(public::guild_stats))
        .route(
            "/api/guild/{guild_id}/settings",
            get(guild::get_settings).post(guild::update_settings),
        )
        .route("/api/guild/{guild_id}/modules", post(guild::toggle_module))
        .route("/api/guild/{guild_id}/welcome", post(guild::update_welcome))
        .route("/api/guild/{guild_id}/sticky", post(guild::upsert_sticky))
        .route(
            "/api/guild/{guild_id}/sticky/{channel_id}",
            delete(guild::delete_sticky),
        )
        .route(
            "/api/guild/{guild_id}/tickets",
            get(guild::list_tickets).post(guild::update_tickets),
        )
        .route("/api/guild/{guild_id}/cases", get(guild::list_cases))
        .layer(GovernorLayer::new(Arc::new(governor)))
        .layer(CorsLayer::permissive());

    let router = Router::new()
        .merge(api)
        // The WebSocket sits outside the rate limiter; it is one long-lived
        // request, not a request stream.
        .route("/api/ws", get(public::websocket))
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()));

    Ok(router)
}
