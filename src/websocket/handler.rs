use crate::{
    game::{GameSession, SessionUpdate},
    websocket::messages::{ClientMessage, ServerMessage},
    AppState, SessionInfo,
};
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures::{sink::SinkExt, stream::StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;

/// WebSocket upgrade handler. Every connection plays its own session.
pub async fn handle_websocket(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle individual WebSocket connection
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let mut session = match GameSession::new(
        state.config.game.level_settings(),
        state.catalog.clone(),
        state.config.game.seed,
    ) {
        Ok(session) => session,
        Err(e) => {
            tracing::error!("Failed to start game session: {}", e);
            return;
        }
    };
    let session_id = session.id();

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::channel::<ServerMessage>(100);

    state.sessions.insert(session_id, SessionInfo::new());
    tracing::info!("WebSocket connection established for session {}", session_id);

    // Spawn a task to send messages to the client
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match serde_json::to_string(&msg) {
                Ok(json) => {
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to serialize message: {}", e);
                }
            }
        }
    });

    // Handle incoming messages from the client
    let state_for_recv = state.clone();
    let mut recv_task = tokio::spawn(async move {
        let _ = tx
            .send(ServerMessage::SessionStarted {
                session_id: session_id.to_string(),
                total_levels: GameSession::total_levels(),
            })
            .await;
        let _ = tx.send(level_state(&session)).await;

        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(client_msg) => {
                        if let Err(e) =
                            handle_client_message(client_msg, &mut session, &state_for_recv, &tx)
                                .await
                        {
                            tracing::error!("Error handling message: {}", e);
                            let error_msg = ServerMessage::Error {
                                message: e.to_string(),
                            };
                            let _ = tx.send(error_msg).await;
                        }
                    }
                    Err(e) => {
                        tracing::error!("Failed to parse message: {}", e);
                        let error_msg = ServerMessage::Error {
                            message: format!("Invalid message format: {}", e),
                        };
                        let _ = tx.send(error_msg).await;
                    }
                },
                Message::Close(_) => {
                    tracing::info!("Client disconnected from session {}", session_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // Wait for either task to finish
    tokio::select! {
        _ = (&mut send_task) => {
            recv_task.abort();
        }
        _ = (&mut recv_task) => {
            send_task.abort();
        }
    }

    state.sessions.remove(&session_id);
    tracing::info!("WebSocket connection closed for session {}", session_id);
}

/// Snapshot of the current level, or the final score once every level is done
fn level_state(session: &GameSession) -> ServerMessage {
    match session.view() {
        Some(view) => ServerMessage::LevelState {
            level: session.level_number(),
            total_levels: GameSession::total_levels(),
            score: session.score(),
            view,
        },
        None => ServerMessage::GameOver {
            score: session.score(),
        },
    }
}

fn record_progress(state: &AppState, session: &GameSession) {
    if let Some(mut info) = state.sessions.get_mut(&session.id()) {
        info.level = session.level_number();
        info.score = session.score();
    }
}

/// Handle individual client messages
async fn handle_client_message(
    msg: ClientMessage,
    session: &mut GameSession,
    state: &AppState,
    tx: &mpsc::Sender<ServerMessage>,
) -> anyhow::Result<()> {
    match msg {
        ClientMessage::Play { input } => {
            tracing::debug!(
                "Session {} level {} input: {:?}",
                session.id(),
                session.level_number(),
                input
            );
            let SessionUpdate {
                level,
                score_delta,
                score,
                feedback,
                level_complete,
            } = session.handle_input(input)?;

            tx.send(ServerMessage::Update {
                level,
                score_delta,
                score,
                feedback,
                level_complete,
            })
            .await?;
            record_progress(state, session);

            if level_complete {
                // Let the client show the result before the next level replaces it
                tokio::time::sleep(state.config.game.pacing_delay()).await;
                session.advance()?;
                record_progress(state, session);
                tx.send(level_state(session)).await?;
            }
        }
        ClientMessage::Restart => {
            tracing::info!("Session {} restarting", session.id());
            session.restart()?;
            record_progress(state, session);
            tx.send(level_state(session)).await?;
        }
    }

    Ok(())
}
