use serde::{Deserialize, Serialize};

use crate::game::{Feedback, LevelInput, LevelView};
use crate::models::LevelKind;

/// Messages sent from client to server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Play { input: LevelInput },
    Restart,
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    SessionStarted {
        session_id: String,
        total_levels: usize,
    },
    LevelState {
        level: usize,
        total_levels: usize,
        score: i32,
        view: LevelView,
    },
    Update {
        level: LevelKind,
        score_delta: i32,
        score: i32,
        feedback: Feedback,
        level_complete: bool,
    },
    GameOver {
        score: i32,
    },
    Error {
        message: String,
    },
}
