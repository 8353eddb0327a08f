pub mod game;

pub use game::{LevelKind, Position};
