use serde::{Deserialize, Serialize};

/// The five levels, in the order a session plays them
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum LevelKind {
    PictureMatch,
    MemoryMatch,
    Anagram,
    Maze,
    WordSearch,
}

impl LevelKind {
    pub const ALL: [LevelKind; 5] = [
        LevelKind::PictureMatch,
        LevelKind::MemoryMatch,
        LevelKind::Anagram,
        LevelKind::Maze,
        LevelKind::WordSearch,
    ];

    /// 1-based level number shown to the player
    pub fn number(self) -> usize {
        Self::ALL
            .iter()
            .position(|kind| *kind == self)
            .map(|idx| idx + 1)
            .unwrap_or(0)
    }
}

/// A row/column pair on a row-major grid
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, Eq, PartialEq)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn from_index(index: usize, cols: usize) -> Self {
        Self {
            row: index / cols,
            col: index % cols,
        }
    }

    pub fn to_index(self, cols: usize) -> usize {
        self.row * cols + self.col
    }

    /// Orthogonal neighbours only; diagonals are not adjacent
    pub fn is_orthogonal_neighbor(self, other: Position) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }
}
