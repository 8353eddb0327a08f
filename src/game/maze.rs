use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::{
    error::MazeError,
    scorer::{Scorer, INVALID_MOVE_PENALTY},
};
use crate::models::Position;

/// Distance reported when the goal cannot be reached from the start
pub const UNREACHABLE: u32 = 999;

/// Level 4 layout: 5 rows x 7 columns, start at index 14, goal at index 20
pub const DEFAULT_LAYOUT: [&str; 5] = [
    ".#...#.",
    ".#.#.#.",
    "S..#..G",
    ".#.#.#.",
    ".......",
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    Open,
    Wall,
    Start,
    Goal,
}

impl CellKind {
    pub fn is_walkable(self) -> bool {
        self != CellKind::Wall
    }

    fn from_char(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(CellKind::Open),
            '#' => Some(CellKind::Wall),
            'S' => Some(CellKind::Start),
            'G' => Some(CellKind::Goal),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MazeState {
    AwaitingStart,
    Moving,
    Completed,
}

/// Outcome of a single step attempt
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct MoveResult {
    pub accepted: bool,
    pub reached_goal: bool,
    pub score_delta: i32,
}

impl MoveResult {
    fn rejected(score_delta: i32) -> Self {
        Self {
            accepted: false,
            reached_goal: false,
            score_delta,
        }
    }
}

/// A fixed maze with one player walking it one orthogonal step at a time.
///
/// The shortest Start -> Goal distance is computed once at construction; the
/// score awarded on reaching the goal compares it with the steps taken.
#[derive(Debug, Clone)]
pub struct MazeEngine {
    cells: Vec<CellKind>,
    rows: usize,
    cols: usize,
    start: usize,
    goal: usize,
    player: usize,
    steps: u32,
    visited: Vec<bool>,
    state: MazeState,
    shortest: u32,
}

impl MazeEngine {
    /// Build an engine from a row-major layout
    pub fn new(layout: Vec<CellKind>, cols: usize) -> Result<Self, MazeError> {
        if cols == 0 {
            return Err(MazeError::ZeroColumns);
        }
        if layout.is_empty() {
            return Err(MazeError::EmptyLayout);
        }
        if layout.len() % cols != 0 {
            return Err(MazeError::RaggedLayout {
                len: layout.len(),
                cols,
            });
        }

        let start = Self::find_unique(&layout, CellKind::Start)
            .map_err(|count| match count {
                0 => MazeError::MissingStart,
                n => MazeError::DuplicateStart(n),
            })?;
        let goal = Self::find_unique(&layout, CellKind::Goal).map_err(|count| match count {
            0 => MazeError::MissingGoal,
            n => MazeError::DuplicateGoal(n),
        })?;

        let rows = layout.len() / cols;
        let mut visited = vec![false; layout.len()];
        visited[start] = true;

        let mut engine = Self {
            cells: layout,
            rows,
            cols,
            start,
            goal,
            player: start,
            steps: 0,
            visited,
            state: MazeState::AwaitingStart,
            shortest: UNREACHABLE,
        };
        engine.shortest = engine.compute_shortest_path(start, goal);

        if engine.shortest == UNREACHABLE {
            tracing::warn!(
                "Maze {}x{} has no path from start {} to goal {}",
                rows,
                cols,
                start,
                goal
            );
        } else {
            tracing::debug!(
                "Maze {}x{} ready, shortest path {} moves",
                rows,
                cols,
                engine.shortest
            );
        }

        Ok(engine)
    }

    /// Build an engine from text rows: `#` wall, `.` open, `S` start, `G` goal
    pub fn from_rows(rows: &[&str]) -> Result<Self, MazeError> {
        let Some(first) = rows.first() else {
            return Err(MazeError::EmptyLayout);
        };
        let cols = first.chars().count();
        let total: usize = rows.iter().map(|line| line.chars().count()).sum();

        let mut layout = Vec::with_capacity(total);
        for (row, line) in rows.iter().enumerate() {
            if line.chars().count() != cols {
                return Err(MazeError::RaggedLayout { len: total, cols });
            }
            for ch in line.chars() {
                layout.push(CellKind::from_char(ch).ok_or(MazeError::UnknownCell { ch, row })?);
            }
        }

        Self::new(layout, cols)
    }

    /// Level 4's standard maze
    pub fn standard() -> Result<Self, MazeError> {
        Self::from_rows(&DEFAULT_LAYOUT)
    }

    /// Index of the single cell of `kind`, or the number found when that is not exactly one
    fn find_unique(layout: &[CellKind], kind: CellKind) -> Result<usize, usize> {
        let found: Vec<usize> = layout
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == kind)
            .map(|(idx, _)| idx)
            .collect();
        match found.as_slice() {
            [idx] => Ok(*idx),
            other => Err(other.len()),
        }
    }

    fn is_walkable(&self, index: usize) -> bool {
        self.cells.get(index).is_some_and(|cell| cell.is_walkable())
    }

    /// Walkable orthogonal neighbours. Left/right must stay on the same row.
    fn neighbors(&self, index: usize) -> Vec<usize> {
        let row = index / self.cols;
        let mut out = Vec::with_capacity(4);

        if index >= self.cols {
            out.push(index - self.cols);
        }
        if index + self.cols < self.cells.len() {
            out.push(index + self.cols);
        }
        if index > 0 && (index - 1) / self.cols == row {
            out.push(index - 1);
        }
        if (index + 1) / self.cols == row && index + 1 < self.cells.len() {
            out.push(index + 1);
        }

        out.retain(|&idx| self.is_walkable(idx));
        out
    }

    fn is_adjacent(&self, from: usize, to: usize) -> bool {
        if from >= self.cells.len() || to >= self.cells.len() {
            return false;
        }
        Position::from_index(from, self.cols)
            .is_orthogonal_neighbor(Position::from_index(to, self.cols))
    }

    /// Breadth-first search for the fewest moves between two cells.
    /// Returns [`UNREACHABLE`] when either end is a wall or no path exists.
    pub fn compute_shortest_path(&self, start: usize, goal: usize) -> u32 {
        if !self.is_walkable(start) || !self.is_walkable(goal) {
            return UNREACHABLE;
        }

        let mut dist = vec![UNREACHABLE; self.cells.len()];
        let mut queue = VecDeque::new();
        dist[start] = 0;
        queue.push_back(start);

        while let Some(idx) = queue.pop_front() {
            if idx == goal {
                return dist[idx];
            }
            for next in self.neighbors(idx) {
                if dist[next] == UNREACHABLE {
                    dist[next] = dist[idx] + 1;
                    queue.push_back(next);
                }
            }
        }

        UNREACHABLE
    }

    pub fn shortest_path_length(&self) -> u32 {
        self.shortest
    }

    /// Try to step onto `target`. Walls, non-adjacent cells and out-of-range
    /// indices are rejected with a penalty and leave the engine untouched.
    pub fn attempt_move(&mut self, target: usize) -> MoveResult {
        if self.state == MazeState::Completed {
            return MoveResult::rejected(0);
        }

        if !self.is_walkable(target) || !self.is_adjacent(self.player, target) {
            tracing::debug!(
                "Rejected maze move from {} to {} (steps so far: {})",
                self.player,
                target,
                self.steps
            );
            return MoveResult::rejected(INVALID_MOVE_PENALTY);
        }

        self.player = target;
        self.steps += 1;
        self.visited[target] = true;

        if target == self.goal {
            self.state = MazeState::Completed;
            let score = Scorer::maze_score(self.shortest, self.steps);
            tracing::info!(
                "Maze goal reached in {} steps (shortest {}), scoring {}",
                self.steps,
                self.shortest,
                score
            );
            return MoveResult {
                accepted: true,
                reached_goal: true,
                score_delta: score,
            };
        }

        self.state = MazeState::Moving;
        MoveResult {
            accepted: true,
            reached_goal: false,
            score_delta: 0,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cells(&self) -> &[CellKind] {
        &self.cells
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn goal(&self) -> usize {
        self.goal
    }

    pub fn player(&self) -> usize {
        self.player
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn state(&self) -> MazeState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state == MazeState::Completed
    }

    /// Cells the player has stood on, for drawing the trail
    pub fn visited_cells(&self) -> Vec<usize> {
        self.visited
            .iter()
            .enumerate()
            .filter(|(_, seen)| **seen)
            .map(|(idx, _)| idx)
            .collect()
    }
}
