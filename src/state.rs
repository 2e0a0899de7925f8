//! Application state shared across all request handlers.
//!
//! Initialized once during startup and cloned (cheaply, everything is a
//! pool, `Arc`, or small value) for each request via Axum's state
//! extraction.

use std::sync::Arc;

use oauth2::basic::{BasicErrorResponseType, BasicTokenType};
use oauth2::{
    Client, EmptyExtraTokenFields, EndpointNotSet, EndpointSet, RevocationErrorResponseType,
    StandardErrorResponse, StandardRevocableToken, StandardTokenIntrospectionResponse,
    StandardTokenResponse,
};
use sea_orm::DatabaseConnection;
use serenity::http::Http;

use crate::{
    dispatch::registry::CommandRegistry, realtime::Broadcaster, service::stats::StatsService,
};

/// Type alias for the OAuth2 client configured for Discord authentication.
pub(crate) type OAuth2Client = Client<
    StandardErrorResponse<BasicErrorResponseType>,
    StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardTokenIntrospectionResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardRevocableToken,
    StandardErrorResponse<RevocationErrorResponseType>,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for persistent storage.
    pub db: DatabaseConnection,

    /// HTTP client for Discord OAuth and other external calls. Redirects
    /// are disabled to keep SSRF surface down.
    pub http_client: reqwest::Client,

    /// OAuth2 client for the Discord login flow.
    pub oauth_client: OAuth2Client,

    /// Discord REST client shared with the bot.
    pub discord_http: Arc<Http>,

    /// Live gateway aggregation (cache + shard runners).
    pub stats: StatsService,

    /// Realtime push channel to dashboard clients.
    pub broadcaster: Broadcaster,

    /// Command registry, for the public command listing.
    pub registry: Arc<CommandRegistry>,

    /// Dashboard base URL for links in responses.
    pub app_url: String,
}

impl AppState {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        db: DatabaseConnection,
        http_client: reqwest::Client,
        oauth_client: OAuth2Client,
        discord_http: Arc<Http>,
        stats: StatsService,
        broadcaster: Broadcaster,
        registry: Arc<CommandRegistry>,
        app_url: String,
    ) -> Self {
        Self {
            db,
            http_client,
            oauth_client,
            discord_http,
            stats,
            broadcaster,
            registry,
            app_url,
        }
    }
}
