use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::word_search::LetterGrid;
use crate::models::Position;

/// How word-search selections are judged
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// A word counts when it appears anywhere in the selected letters
    #[default]
    Permissive,
    /// A word counts only when the selection traces its placed cells
    Strict,
}

pub struct SelectionValidator {
    mode: SelectionMode,
}

impl SelectionValidator {
    pub fn new(mode: SelectionMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Number of target words found by the selection
    pub fn count_found<S: AsRef<str>>(
        &self,
        grid: &LetterGrid,
        selection: &[usize],
        words: &[S],
    ) -> usize {
        match self.mode {
            SelectionMode::Permissive => grid.verify(selection, words),
            SelectionMode::Strict => {
                if !Self::is_straight_run(grid.size(), selection) {
                    return 0;
                }
                grid.verify_strict(selection, words)
            }
        }
    }

    /// Check that the selection is one left-to-right row run or one
    /// top-to-bottom column run, with no cell used twice
    pub fn is_straight_run(size: usize, selection: &[usize]) -> bool {
        if selection.is_empty() || size == 0 {
            return false;
        }
        if selection.iter().any(|&idx| idx >= size * size) {
            return false;
        }

        let unique: HashSet<_> = selection.iter().collect();
        if unique.len() != selection.len() {
            return false;
        }

        let positions: Vec<Position> = selection
            .iter()
            .map(|&idx| Position::from_index(idx, size))
            .collect();

        let across = positions
            .windows(2)
            .all(|pair| pair[1].row == pair[0].row && pair[1].col == pair[0].col + 1);
        let down = positions
            .windows(2)
            .all(|pair| pair[1].col == pair[0].col && pair[1].row == pair[0].row + 1);

        across || down
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straight_runs() {
        assert!(SelectionValidator::is_straight_run(3, &[0, 1, 2]));
        assert!(SelectionValidator::is_straight_run(3, &[1, 4, 7]));
        assert!(SelectionValidator::is_straight_run(3, &[4]));
    }

    #[test]
    fn test_rejects_broken_runs() {
        // Wraps from the end of row 0 to the start of row 1
        assert!(!SelectionValidator::is_straight_run(3, &[1, 2, 3]));
        // Right to left
        assert!(!SelectionValidator::is_straight_run(3, &[2, 1, 0]));
        // Diagonal
        assert!(!SelectionValidator::is_straight_run(3, &[0, 4, 8]));
        assert!(!SelectionValidator::is_straight_run(3, &[0, 0]));
        assert!(!SelectionValidator::is_straight_run(3, &[]));
        assert!(!SelectionValidator::is_straight_run(3, &[8, 9]));
    }

    #[test]
    fn test_modes_disagree_on_scattered_selection() {
        let grid = LetterGrid::from_rows(&["CAX", "XXX", "XXT"]);
        let permissive = SelectionValidator::new(SelectionMode::Permissive);
        let strict = SelectionValidator::new(SelectionMode::Strict);

        assert_eq!(permissive.count_found(&grid, &[0, 1, 8], &["CAT"]), 1);
        assert_eq!(strict.count_found(&grid, &[0, 1, 8], &["CAT"]), 0);
    }
}
