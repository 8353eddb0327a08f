use std::sync::Arc;

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::AppState;

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    let longest_session_secs = state
        .sessions
        .iter()
        .map(|entry| entry.started_at.elapsed().as_secs())
        .max()
        .unwrap_or(0);

    Json(json!({
        "status": "ok",
        "service": "hobby-quest-backend",
        "version": env!("CARGO_PKG_VERSION"),
        "active_sessions": state.sessions.len(),
        "longest_session_secs": longest_session_secs,
        "catalog_size": state.catalog.len()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        catalog::HobbyCatalog,
        config::{Config, GameConfig, ServerConfig},
        SessionInfo,
    };

    fn test_state() -> Arc<AppState> {
        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                frontend_dir: "frontend".to_string(),
            },
            game: GameConfig {
                catalog_path: None,
                pacing_delay_ms: 0,
                word_search_min_size: 8,
                placement_attempts: 500,
                strict_selection: false,
                seed: Some(1),
            },
        };
        Arc::new(AppState::new(config, HobbyCatalog::builtin()))
    }

    #[tokio::test]
    async fn test_health_reports_sessions() {
        let state = test_state();
        state.sessions.insert(uuid::Uuid::new_v4(), SessionInfo::new());

        let Json(body) = health_check(State(state)).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "hobby-quest-backend");
        assert_eq!(body["active_sessions"], 1);
        assert_eq!(body["catalog_size"], 5);
    }
}
