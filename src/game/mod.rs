// Level engines, scoring and the five-level session

pub mod anagram;
pub mod error;
pub mod level;
pub mod maze;
pub mod memory;
pub mod picture_match;
pub mod scorer;
pub mod session;
pub mod validator;
pub mod word_search;

pub use error::{GameError, MazeError};
pub use level::{Feedback, Level, LevelInput, LevelSettings, LevelView};
pub use maze::{CellKind, MazeEngine, MoveResult};
pub use scorer::{ScoreBoard, Scorer};
pub use session::{GameSession, SessionUpdate};
pub use validator::SelectionMode;
pub use word_search::{LetterGrid, WordGridGenerator};
