use std::sync::Arc;

use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;
use uuid::Uuid;

use super::{
    error::GameError,
    level::{Feedback, Level, LevelInput, LevelSettings, LevelView},
    scorer::ScoreBoard,
};
use crate::{catalog::HobbyCatalog, models::LevelKind};

/// Result of one player input, as seen by the session
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SessionUpdate {
    pub level: LevelKind,
    pub score_delta: i32,
    pub score: i32,
    pub feedback: Feedback,
    pub level_complete: bool,
}

/// One playthrough of the five levels.
///
/// The session owns the score; levels only report deltas. A finished
/// session accepts nothing but [`GameSession::restart`].
pub struct GameSession {
    id: Uuid,
    settings: LevelSettings,
    catalog: Arc<HobbyCatalog>,
    rng: StdRng,
    level_index: usize,
    level: Option<Level>,
    score: ScoreBoard,
}

impl GameSession {
    pub fn new(
        settings: LevelSettings,
        catalog: Arc<HobbyCatalog>,
        seed: Option<u64>,
    ) -> Result<Self, GameError> {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut session = Self {
            id: Uuid::new_v4(),
            settings,
            catalog,
            rng,
            level_index: 0,
            level: None,
            score: ScoreBoard::new(),
        };
        session.restart()?;
        Ok(session)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn score(&self) -> i32 {
        self.score.total()
    }

    pub fn total_levels() -> usize {
        LevelKind::ALL.len()
    }

    /// 1-based number of the level being played; past the last level once finished
    pub fn level_number(&self) -> usize {
        self.level_index + 1
    }

    pub fn current_level(&self) -> Option<&Level> {
        self.level.as_ref()
    }

    pub fn view(&self) -> Option<LevelView> {
        self.level.as_ref().map(Level::view)
    }

    pub fn is_finished(&self) -> bool {
        self.level.is_none()
    }

    /// Back to level 1 with a zero score
    pub fn restart(&mut self) -> Result<(), GameError> {
        self.score.reset();
        self.level_index = 0;
        self.level = Some(self.start_level(LevelKind::ALL[0])?);
        tracing::info!("Session {} started", self.id);
        Ok(())
    }

    pub fn handle_input(&mut self, input: LevelInput) -> Result<SessionUpdate, GameError> {
        let level = self.level.as_mut().ok_or(GameError::SessionFinished)?;
        let kind = level.kind();

        if level.is_complete() {
            return Ok(SessionUpdate {
                level: kind,
                score_delta: 0,
                score: self.score.total(),
                feedback: Feedback::Ignored,
                level_complete: true,
            });
        }

        let response = level.handle_input(input)?;
        let score = self.score.apply(response.score_delta);

        if response.completed {
            tracing::info!(
                "Session {} completed level {} with score {}",
                self.id,
                kind.number(),
                score
            );
        }

        Ok(SessionUpdate {
            level: kind,
            score_delta: response.score_delta,
            score,
            feedback: response.feedback,
            level_complete: response.completed,
        })
    }

    /// Move on to the next level. Returns `None` once all levels are done.
    pub fn advance(&mut self) -> Result<Option<LevelKind>, GameError> {
        if self.is_finished() {
            return Err(GameError::SessionFinished);
        }

        self.level_index += 1;
        match LevelKind::ALL.get(self.level_index).copied() {
            Some(kind) => {
                self.level = Some(self.start_level(kind)?);
                Ok(Some(kind))
            }
            None => {
                self.level = None;
                tracing::info!(
                    "Session {} finished with {} points",
                    self.id,
                    self.score.total()
                );
                Ok(None)
            }
        }
    }

    fn start_level(&mut self, kind: LevelKind) -> Result<Level, GameError> {
        Level::start(kind, &self.settings, &self.catalog, &mut self.rng)
    }
}
