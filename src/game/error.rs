use thiserror::Error;

use crate::models::LevelKind;

/// Structural problems with a maze layout. Fatal to the level attempt.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MazeError {
    #[error("maze must have at least one column")]
    ZeroColumns,
    #[error("maze layout is empty")]
    EmptyLayout,
    #[error("layout length {len} is not a multiple of {cols} columns")]
    RaggedLayout { len: usize, cols: usize },
    #[error("maze has no start cell")]
    MissingStart,
    #[error("maze has more than one start cell (found {0})")]
    DuplicateStart(usize),
    #[error("maze has no goal cell")]
    MissingGoal,
    #[error("maze has more than one goal cell (found {0})")]
    DuplicateGoal(usize),
    #[error("unknown maze cell {ch:?} at row {row}")]
    UnknownCell { ch: char, row: usize },
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid maze: {0}")]
    Maze(#[from] MazeError),
    #[error("input {input} does not apply to the {level:?} level")]
    UnexpectedInput {
        level: LevelKind,
        input: &'static str,
    },
    #[error("the game is finished, restart to play again")]
    SessionFinished,
    #[error("hobby catalog needs at least {needed} hobbies, found {found}")]
    NotEnoughHobbies { needed: usize, found: usize },
}
