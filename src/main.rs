mod catalog;
mod config;
mod game;
mod models;
mod routes;
mod utils;
mod websocket;

use std::{sync::Arc, time::Instant};

use anyhow::Result;
use axum::{routing::get, Router};
use catalog::HobbyCatalog;
use config::Config;
use dashmap::DashMap;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

/// Progress of a live session, kept for health reporting
#[derive(Debug, Clone)]
pub struct SessionInfo {
    pub level: usize,
    pub score: i32,
    pub started_at: Instant,
}

impl SessionInfo {
    pub fn new() -> Self {
        Self {
            level: 1,
            score: 0,
            started_at: Instant::now(),
        }
    }
}

/// Application state shared across all handlers
pub struct AppState {
    pub config: Config,
    pub catalog: Arc<HobbyCatalog>,
    /// Live sessions keyed by session id. Each session itself is owned by its connection task.
    pub sessions: DashMap<Uuid, SessionInfo>,
}

impl AppState {
    pub fn new(config: Config, catalog: HobbyCatalog) -> Self {
        Self {
            config,
            catalog: Arc::new(catalog),
            sessions: DashMap::new(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hobby_quest_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Hobby Quest backend server...");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Load hobby catalog
    let catalog = match &config.game.catalog_path {
        Some(path) => match HobbyCatalog::load(path).await {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::warn!(
                    "Failed to load hobby catalog: {:#}. Using the built-in hobbies.",
                    e
                );
                HobbyCatalog::builtin()
            }
        },
        None => HobbyCatalog::builtin(),
    };
    tracing::info!("Hobby catalog ready with {} hobbies", catalog.len());

    if let Some(seed) = config.game.seed {
        tracing::warn!("GAME_SEED={} set, every session plays the same puzzles", seed);
    }

    let state = Arc::new(AppState::new(config.clone(), catalog));

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Serve frontend static files
    let frontend_service = ServeDir::new(&config.server.frontend_dir);

    // Build router
    let app = Router::new()
        // WebSocket endpoint
        .route("/ws", get(websocket::handle_websocket))
        .merge(routes::create_routes())
        .fallback_service(frontend_service)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("WebSocket endpoint: ws://{}/ws", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
