use serde::Serialize;

/// Level 1: picking the matching picture
pub const PICTURE_CORRECT_POINTS: i32 = 10;
pub const PICTURE_WRONG_PENALTY: i32 = -2;

/// Level 2: memory cards
pub const MEMORY_PAIR_POINTS: i32 = 8;
pub const MEMORY_MISS_PENALTY: i32 = -1;

/// Level 3: anagram
pub const ANAGRAM_CORRECT_POINTS: i32 = 12;
pub const ANAGRAM_WRONG_PENALTY: i32 = -2;

/// Level 4: maze
pub const INVALID_MOVE_PENALTY: i32 = -1;
pub const MAZE_FULL_POINTS: i32 = 20;
pub const MAZE_MIN_POINTS: i32 = 5;

/// Level 5: word search
pub const WORD_FOUND_POINTS: i32 = 20;
pub const WORD_MISS_PENALTY: i32 = -3;

pub struct Scorer;

impl Scorer {
    /// Score for reaching the maze goal.
    ///
    /// `round(shortest / steps * 20)`, never below 5. An optimal walk gets
    /// the full 20 points.
    pub fn maze_score(shortest: u32, steps: u32) -> i32 {
        if steps == 0 {
            return MAZE_FULL_POINTS;
        }
        let ratio = f64::from(shortest) / f64::from(steps);
        let score = (ratio * f64::from(MAZE_FULL_POINTS)).round() as i32;
        score.clamp(MAZE_MIN_POINTS, MAZE_FULL_POINTS)
    }

    /// Points for a word-search check that found `found` target words
    pub fn word_search_points(found: usize) -> i32 {
        if found == 0 {
            WORD_MISS_PENALTY
        } else {
            WORD_FOUND_POINTS * found as i32
        }
    }
}

/// Cumulative session score. Clamped at zero after every delta.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct ScoreBoard {
    total: i32,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a delta and return the new total
    pub fn apply(&mut self, delta: i32) -> i32 {
        self.total = self.total.saturating_add(delta).max(0);
        self.total
    }

    pub fn total(&self) -> i32 {
        self.total
    }

    pub fn reset(&mut self) {
        self.total = 0;
    }
}
