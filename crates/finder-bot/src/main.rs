//! Wallet Finder Bot
//!
//! Telegram front end for wallet-finder, plus an optional HTTP surface
//! (`BIND_ADDR`) exposing a health check and the same command set.

mod config;
mod handlers;
mod state;
mod telegram;

use std::sync::Arc;

use teloxide::Bot;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wallet_finder::{
    build_registry, CommandOptions, ExplorerClient, ExplorerGateway, SqliteWalletStore,
};

use crate::config::BotConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment first so RUST_LOG from .env applies
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = BotConfig::from_env()?;

    // Durable wallet store
    let store = Arc::new(SqliteWalletStore::open(&config.finder.database_url).await?);

    // Explorer gateway for /scan_address
    let explorer: Arc<dyn ExplorerClient> = Arc::new(ExplorerGateway::new(&config.finder.explorer)?);

    let options = CommandOptions {
        scoped_delete: config.finder.scoped_delete,
    };
    if options.scoped_delete {
        tracing::info!("Owner-scoped /delete_wallet enabled");
    }

    let registry = build_registry(store.clone(), explorer.clone(), options);

    tracing::info!("Registered {} commands:", registry.len());
    for name in registry.names() {
        tracing::info!("  • /{}", name);
    }

    let state = AppState {
        registry: Arc::new(registry),
        store,
        explorer,
        etherscan_configured: config.finder.explorer.etherscan_api_key.is_some(),
        command_api_token: config.command_api_token.as_deref().map(Arc::from),
    };

    if let Some(addr) = config.bind_addr.clone() {
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        let app = handlers::router(state.clone());

        tracing::info!("HTTP surface on http://{}", addr);
        tracing::info!("  GET  /health       - Health check");
        if state.command_api_token.is_some() {
            tracing::info!("  POST /api/command  - Run a bot command (bearer token)");
        } else {
            tracing::info!("  POST /api/command  - disabled (COMMAND_API_TOKEN not set)");
        }

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("HTTP server stopped: {}", e);
            }
        });
    }

    tracing::info!("🚀 Wallet Finder Bot started");
    let polled = telegram::run(Bot::new(config.telegram_token), state.clone()).await;

    state.store.close().await;
    tracing::info!("Bot stopped");

    polled?;
    Ok(())
}
