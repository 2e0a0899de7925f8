use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    data::{case::CaseRepository, guild::GuildRepository, sticky::StickyRepository,
        ticket::TicketRepository},
    dispatch::ModuleCategory,
    error::AppError,
    middleware::auth::{AuthGuard, Permission},
    model::{
        api::SuccessDto,
        case::CaseDto,
        guild::{
            GuildSettingsDto, ModuleToggleDto, StickySettingsDto, TicketSettingsDto,
            UpdateGuildSettingsDto, WelcomeSettingsDto,
        },
        ticket::TicketDto,
    },
    realtime::GuildUpdateKind,
    state::AppState,
};

/// Tag for grouping guild endpoints in OpenAPI documentation
pub static GUILD_TAG: &str = "guild";

/// Cases returned per dashboard page.
const CASE_LIST_LIMIT: u64 = 50;
const TICKET_LIST_LIMIT: u64 = 50;

/// Get a guild's stored settings.
///
/// # Access Control
/// - `ManageGuild` - Session guild list must carry MANAGE_GUILD for the guild
#[utoipa::path(
    get,
    path = "/api/guild/{guild_id}/settings",
    tag = GUILD_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    responses(
        (status = 200, description = "Stored settings, or an empty body for unconfigured guilds", body = GuildSettingsDto),
        (status = 401, description = "Not logged in"),
        (status = 403, description = "Missing manage-guild permission")
    ),
)]
pub async fn get_settings(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&session)
        .require(&[Permission::ManageGuild(guild_id)])
        .await?;

    let settings = GuildRepository::new(&state.db)
        .find_by_guild_id(guild_id)
        .await?
        .map(GuildSettingsDto::from_model)
        .unwrap_or_else(|| GuildSettingsDto::empty(guild_id));

    Ok(Json(settings))
}

/// Update basic guild settings (currently the command prefix).
#[utoipa::path(
    post,
    path = "/api/guild/{guild_id}/settings",
    tag = GUILD_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    request_body = UpdateGuildSettingsDto,
    responses(
        (status = 200, description = "Settings updated", body = GuildSettingsDto),
        (status = 400, description = "Invalid settings"),
        (status = 401, description = "Not logged in"),
        (status = 403, description = "Missing manage-guild permission")
    ),
)]
pub async fn update_settings(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
    Json(payload): Json<UpdateGuildSettingsDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&session)
        .require(&[Permission::ManageGuild(guild_id)])
        .await?;

    let Some(prefix) = payload.prefix else {
        return Err(AppError::BadRequest("Nothing to update".to_string()));
    };
    if prefix.is_empty() || prefix.len() > 5 {
        return Err(AppError::BadRequest(
            "Prefix must be between 1 and 5 characters".to_string(),
        ));
    }

    let guild = GuildRepository::new(&state.db)
        .set_prefix(guild_id, prefix)
        .await?;

    state
        .broadcaster
        .guild_update(guild_id, GuildUpdateKind::SettingsUpdated);

    Ok(Json(GuildSettingsDto::from_model(guild)))
}

/// Toggle a feature module on or off.
#[utoipa::path(
    post,
    path = "/api/guild/{guild_id}/modules",
    tag = GUILD_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    request_body = ModuleToggleDto,
    responses(
        (status = 200, description = "Module toggled", body = SuccessDto),
        (status = 400, description = "Unknown module key"),
        (status = 401, description = "Not logged in"),
        (status = 403, description = "Missing manage-guild permission")
    ),
)]
pub async fn toggle_module(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
    Json(payload): Json<ModuleToggleDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&session)
        .require(&[Permission::ManageGuild(guild_id)])
        .await?;

    let Some(category) = ModuleCategory::from_key(&payload.module) else {
        return Err(AppError::BadRequest(format!(
            "Unknown module: {}",
            payload.module
        )));
    };
    if category.always_enabled() {
        return Err(AppError::BadRequest(format!(
            "The {} module cannot be toggled",
            category
        )));
    }

    GuildRepository::new(&state.db)
        .toggle_module(guild_id, category.key(), payload.enabled)
        .await?;

    state
        .broadcaster
        .guild_update(guild_id, GuildUpdateKind::ModuleToggled);

    Ok(Json(SuccessDto::ok()))
}

/// Store the welcome configuration.
#[utoipa::path(
    post,
    path = "/api/guild/{guild_id}/welcome",
    tag = GUILD_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    request_body = WelcomeSettingsDto,
    responses(
        (status = 200, description = "Welcome settings saved", body = SuccessDto),
        (status = 401, description = "Not logged in"),
        (status = 403, description = "Missing manage-guild permission")
    ),
)]
pub async fn update_welcome(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
    Json(payload): Json<WelcomeSettingsDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&session)
        .require(&[Permission::ManageGuild(guild_id)])
        .await?;

    // Mode decides which body survives; the other is cleared.
    let (message, embed) = if payload.mode == "text" {
        (payload.welcome_message, None)
    } else {
        (None, payload.welcome_embed)
    };

    GuildRepository::new(&state.db)
        .update_welcome(guild_id, payload.welcome_channel, message, embed)
        .await?;

    state
        .broadcaster
        .guild_update(guild_id, GuildUpdateKind::WelcomeUpdated);

    Ok(Json(SuccessDto::ok()))
}

/// Create or replace a channel's sticky message.
#[utoipa::path(
    post,
    path = "/api/guild/{guild_id}/sticky",
    tag = GUILD_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    request_body = StickySettingsDto,
    responses(
        (status = 200, description = "Sticky saved", body = SuccessDto),
        (status = 400, description = "Invalid channel id"),
        (status = 401, description = "Not logged in"),
        (status = 403, description = "Missing manage-guild permission")
    ),
)]
pub async fn upsert_sticky(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
    Json(payload): Json<StickySettingsDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&session)
        .require(&[Permission::ManageGuild(guild_id)])
        .await?;

    let channel_id = payload
        .channel_id
        .parse::<u64>()
        .map_err(|_| AppError::BadRequest("Invalid channel id".to_string()))?;

    StickyRepository::new(&state.db)
        .upsert(guild_id, channel_id, payload.content, payload.embed)
        .await?;

    state
        .broadcaster
        .guild_update(guild_id, GuildUpdateKind::StickyUpdated);

    Ok(Json(SuccessDto::ok()))
}

/// Delete a channel's sticky message.
#[utoipa::path(
    delete,
    path = "/api/guild/{guild_id}/sticky/{channel_id}",
    tag = GUILD_TAG,
    params(
        ("guild_id" = u64, Path, description = "Discord guild ID"),
        ("channel_id" = u64, Path, description = "Channel the sticky lives in")
    ),
    responses(
        (status = 200, description = "Sticky deleted", body = SuccessDto),
        (status = 404, description = "No sticky for this channel"),
        (status = 401, description = "Not logged in"),
        (status = 403, description = "Missing manage-guild permission")
    ),
)]
pub async fn delete_sticky(
    State(state): State<AppState>,
    session: Session,
    Path((guild_id, channel_id)): Path<(u64, u64)>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&session)
        .require(&[Permission::ManageGuild(guild_id)])
        .await?;

    let deleted = StickyRepository::new(&state.db).delete(channel_id).await?;
    if !deleted {
        return Err(AppError::NotFound(
            "No sticky message for this channel".to_string(),
        ));
    }

    state
        .broadcaster
        .guild_update(guild_id, GuildUpdateKind::StickyUpdated);

    Ok(Json(SuccessDto::ok()))
}

/// Store the ticket configuration (parent category, panel message, support
/// roles and ticket types).
#[utoipa::path(
    post,
    path = "/api/guild/{guild_id}/tickets",
    tag = GUILD_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    request_body = TicketSettingsDto,
    responses(
        (status = 200, description = "Ticket settings saved", body = SuccessDto),
        (status = 401, description = "Not logged in"),
        (status = 403, description = "Missing manage-guild permission")
    ),
)]
pub async fn update_tickets(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
    Json(payload): Json<TicketSettingsDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&session)
        .require(&[Permission::ManageGuild(guild_id)])
        .await?;

    let mut patch = serde_json::Map::new();
    if let Some(support_roles) = payload.support_roles {
        patch.insert(
            "support_roles".to_string(),
            serde_json::to_value(support_roles)?,
        );
    }
    if let Some(ticket_types) = payload.ticket_types {
        patch.insert(
            "ticket_types".to_string(),
            serde_json::to_value(ticket_types)?,
        );
    }

    GuildRepository::new(&state.db)
        .update_ticket_config(
            guild_id,
            payload.ticket_category,
            payload.ticket_message,
            serde_json::Value::Object(patch),
        )
        .await?;

    state
        .broadcaster
        .guild_update(guild_id, GuildUpdateKind::SettingsUpdated);

    Ok(Json(SuccessDto::ok()))
}

/// List a guild's most recent tickets.
#[utoipa::path(
    get,
    path = "/api/guild/{guild_id}/tickets",
    tag = GUILD_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    responses(
        (status = 200, description = "Recent tickets", body = [TicketDto]),
        (status = 401, description = "Not logged in"),
        (status = 403, description = "Missing manage-guild permission")
    ),
)]
pub async fn list_tickets(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&session)
        .require(&[Permission::ManageGuild(guild_id)])
        .await?;

    let tickets = TicketRepository::new(&state.db)
        .list_by_guild(guild_id, TICKET_LIST_LIMIT)
        .await?
        .into_iter()
        .map(TicketDto::from_model)
        .collect::<Vec<_>>();

    Ok((StatusCode::OK, Json(tickets)))
}

/// List a guild's most recent moderation cases.
#[utoipa::path(
    get,
    path = "/api/guild/{guild_id}/cases",
    tag = GUILD_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    responses(
        (status = 200, description = "Recent cases, newest first", body = [CaseDto]),
        (status = 401, description = "Not logged in"),
        (status = 403, description = "Missing manage-guild permission")
    ),
)]
pub async fn list_cases(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&session)
        .require(&[Permission::ManageGuild(guild_id)])
        .await?;

    let cases = CaseRepository::new(&state.db)
        .list_by_guild(guild_id, CASE_LIST_LIMIT)
        .await?
        .into_iter()
        .map(CaseDto::from_model)
        .collect::<Vec<_>>();

    Ok((StatusCode::OK, Json(cases)))
}
