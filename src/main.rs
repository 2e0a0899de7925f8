mod bot;
mod config;
mod controller;
mod data;
mod dispatch;
mod error;
mod middleware;
mod model;
mod realtime;
mod router;
mod scheduler;
mod service;
mod startup;
mod state;
mod util;

use std::net::SocketAddr;

use crate::{
    config::Config, error::AppError, realtime::Broadcaster, service::stats::StatsService,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,serenity=warn".into()),
        )
        .init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let session = startup::connect_to_session(&db).await?;
    let http_client = startup::setup_reqwest_client()?;
    let oauth_client = startup::setup_oauth_client(&config)?;
    let broadcaster = Broadcaster::new();

    tracing::info!("Starting server");

    // Initialize the Discord bot and extract the shared gateway handles.
    let (client, registry) =
        bot::start::init_bot(&config, db.clone(), broadcaster.clone()).await?;
    let discord_http = client.http.clone();
    let stats = StatsService::new(client.cache.clone(), client.shard_manager.clone());

    // The bot runs in its own task; it blocks until shutdown.
    tokio::spawn(async move {
        if let Err(err) = bot::start::start_bot(client).await {
            tracing::error!("Discord bot error: {}", err);
        }
    });

    // Sanction sweep and stats broadcast jobs.
    let scheduler_db = db.clone();
    let scheduler_http = discord_http.clone();
    let scheduler_broadcaster = broadcaster.clone();
    let scheduler_stats = stats.clone();
    tokio::spawn(async move {
        if let Err(err) = scheduler::start_scheduler(
            scheduler_db,
            scheduler_http,
            scheduler_broadcaster,
            scheduler_stats,
        )
        .await
        {
            tracing::error!("Scheduler error: {}", err);
        }
    });

    let state = AppState::new(
        db,
        http_client,
        oauth_client,
        discord_http,
        stats,
        broadcaster,
        registry,
        config.app_url.clone(),
    );

    let router = router::router()?.with_state(state).layer(session);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!("Dashboard API listening on {}", config.port);

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
