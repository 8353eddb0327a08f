use rand::Rng;
use serde::Serialize;

use crate::{
    models::Position,
    utils::letters::{normalize_word, random_letter},
};

/// Placement tries per word before it is dropped
pub const DEFAULT_PLACEMENT_ATTEMPTS: usize = 500;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Left to right along a row
    Horizontal,
    /// Top to bottom along a column
    Vertical,
}

/// Where a word ended up on the grid
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Placement {
    pub word: String,
    pub start: Position,
    pub orientation: Orientation,
}

impl Placement {
    /// Row-major indices covered by the word, first letter first
    pub fn cells(&self, size: usize) -> Vec<usize> {
        let origin = self.start.to_index(size);
        let step = match self.orientation {
            Orientation::Horizontal => 1,
            Orientation::Vertical => size,
        };
        (0..self.word.chars().count())
            .map(|offset| origin + offset * step)
            .collect()
    }
}

/// A square grid of uppercase letters with the placements that produced it
#[derive(Debug, Clone)]
pub struct LetterGrid {
    size: usize,
    letters: Vec<char>,
    placements: Vec<Placement>,
}

impl LetterGrid {
    pub fn size(&self) -> usize {
        self.size
    }

    /// Row-major letters
    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn letter_at(&self, index: usize) -> Option<char> {
        self.letters.get(index).copied()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<char> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.letter_at(Position { row, col }.to_index(self.size))
    }

    /// Letters at the selected cells, in selection order. Out-of-range
    /// indices contribute nothing.
    pub fn extract_word(&self, selection: &[usize]) -> String {
        selection
            .iter()
            .filter_map(|&idx| self.letter_at(idx))
            .collect()
    }

    /// Count the target words that occur anywhere in the selected letters.
    ///
    /// This is a substring check on the concatenated selection. It does not
    /// require the cells to form a line on the grid.
    pub fn verify<S: AsRef<str>>(&self, selection: &[usize], words: &[S]) -> usize {
        let candidate = self.extract_word(selection);
        words
            .iter()
            .map(|word| normalize_word(word.as_ref()))
            .filter(|word| !word.is_empty() && candidate.contains(word.as_str()))
            .count()
    }

    /// Count the target words whose recorded placement is exactly the selected cell path
    pub fn verify_strict<S: AsRef<str>>(&self, selection: &[usize], words: &[S]) -> usize {
        words
            .iter()
            .map(|word| normalize_word(word.as_ref()))
            .filter(|word| {
                self.placements
                    .iter()
                    .any(|p| p.word == *word && p.cells(self.size) == selection)
            })
            .count()
    }

    /// Whether `word` reads left-to-right in some row or top-to-bottom in some column
    pub fn contains_run(&self, word: &str) -> bool {
        let word = normalize_word(word);
        if word.is_empty() {
            return false;
        }
        (0..self.size).any(|line| {
            let row: String = (0..self.size).filter_map(|col| self.get(line, col)).collect();
            let column: String = (0..self.size).filter_map(|row| self.get(row, line)).collect();
            row.contains(word.as_str()) || column.contains(word.as_str())
        })
    }

    #[cfg(test)]
    pub(crate) fn from_rows(rows: &[&str]) -> Self {
        Self {
            size: rows.len(),
            letters: rows.iter().flat_map(|row| row.chars()).collect(),
            placements: Vec::new(),
        }
    }
}

/// Builds word-search grids: target words first, random filler after
pub struct WordGridGenerator {
    placement_attempts: usize,
}

impl Default for WordGridGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_PLACEMENT_ATTEMPTS)
    }
}

impl WordGridGenerator {
    pub fn new(placement_attempts: usize) -> Self {
        Self { placement_attempts }
    }

    /// Generate a grid of side `max(min_size, longest word)`.
    ///
    /// Words are placed in input order, so earlier words win when space is
    /// tight. A word may cross another only where the letters agree. Words
    /// that cannot be placed within the attempt budget are skipped.
    pub fn generate<S: AsRef<str>, R: Rng>(
        &self,
        words: &[S],
        min_size: usize,
        rng: &mut R,
    ) -> LetterGrid {
        let words: Vec<String> = words
            .iter()
            .map(|word| normalize_word(word.as_ref()))
            .filter(|word| !word.is_empty())
            .collect();

        let longest = words.iter().map(|word| word.chars().count()).max().unwrap_or(0);
        let size = min_size.max(longest).max(1);

        let mut slots: Vec<Option<char>> = vec![None; size * size];
        let mut placements = Vec::with_capacity(words.len());

        for word in &words {
            match self.place_word(word, size, &mut slots, rng) {
                Some(placement) => {
                    tracing::debug!(
                        "Placed {} {:?} at ({}, {})",
                        word,
                        placement.orientation,
                        placement.start.row,
                        placement.start.col
                    );
                    placements.push(placement);
                }
                None => {
                    tracing::warn!(
                        "Could not place {} in a {}x{} grid after {} attempts, skipping it",
                        word,
                        size,
                        size,
                        self.placement_attempts
                    );
                }
            }
        }

        let mut letters = Vec::with_capacity(slots.len());
        for slot in slots {
            letters.push(match slot {
                Some(ch) => ch,
                None => random_letter(rng),
            });
        }

        LetterGrid {
            size,
            letters,
            placements,
        }
    }

    fn place_word<R: Rng>(
        &self,
        word: &str,
        size: usize,
        slots: &mut [Option<char>],
        rng: &mut R,
    ) -> Option<Placement> {
        let letters: Vec<char> = word.chars().collect();
        if letters.len() > size {
            return None;
        }
        let span = size - letters.len() + 1;

        for _ in 0..self.placement_attempts {
            let orientation = if rng.random_bool(0.5) {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let (row_range, col_range) = match orientation {
                Orientation::Horizontal => (size, span),
                Orientation::Vertical => (span, size),
            };
            let placement = Placement {
                word: word.to_string(),
                start: Position {
                    row: rng.random_range(0..row_range),
                    col: rng.random_range(0..col_range),
                },
                orientation,
            };

            let cells = placement.cells(size);
            let fits = cells
                .iter()
                .zip(&letters)
                .all(|(&idx, &ch)| slots[idx].map_or(true, |existing| existing == ch));

            if fits {
                for (&idx, &ch) in cells.iter().zip(&letters) {
                    slots[idx] = Some(ch);
                }
                return Some(placement);
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn placement_letters(grid: &LetterGrid, placement: &Placement) -> String {
        placement
            .cells(grid.size())
            .into_iter()
            .filter_map(|idx| grid.letter_at(idx))
            .collect()
    }

    #[test]
    fn test_generate_places_both_words() {
        let mut rng = StdRng::seed_from_u64(42);
        let grid = WordGridGenerator::default().generate(&["CAT", "DOG"], 8, &mut rng);

        assert_eq!(grid.size(), 8);
        assert_eq!(grid.letters().len(), 64);
        assert!(grid.letters().iter().all(|ch| ch.is_ascii_uppercase()));
        assert!(grid.contains_run("CAT"));
        assert!(grid.contains_run("DOG"));
        assert_eq!(grid.placements().len(), 2);
    }

    #[test]
    fn test_placements_hold_their_words_across_seeds() {
        let generator = WordGridGenerator::default();
        let words = ["MEMBACA", "MENULIS", "MELUKIS", "CAT"];
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let grid = generator.generate(&words, 8, &mut rng);
            for placement in grid.placements() {
                assert_eq!(
                    placement_letters(&grid, placement),
                    placement.word,
                    "seed {} overwrote {}",
                    seed,
                    placement.word
                );
                assert!(grid.contains_run(&placement.word));
            }
        }
    }

    #[test]
    fn test_same_seed_gives_same_grid() {
        let generator = WordGridGenerator::default();
        let a = generator.generate(&["CAT", "DOG"], 8, &mut StdRng::seed_from_u64(9));
        let b = generator.generate(&["CAT", "DOG"], 8, &mut StdRng::seed_from_u64(9));
        assert_eq!(a.letters(), b.letters());
        assert_eq!(a.placements(), b.placements());
    }

    #[test]
    fn test_grid_grows_to_longest_word() {
        let mut rng = StdRng::seed_from_u64(1);
        let grid = WordGridGenerator::default().generate(&["Menggambar", "cat"], 5, &mut rng);
        assert_eq!(grid.size(), 10);
        assert!(grid.contains_run("MENGGAMBAR"));
        assert!(grid.contains_run("CAT"));
    }

    #[test]
    fn test_overlapping_duplicates_share_letters() {
        let mut rng = StdRng::seed_from_u64(3);
        let grid = WordGridGenerator::default().generate(&["AAAA", "AAAA"], 4, &mut rng);
        assert_eq!(grid.placements().len(), 2);
    }

    #[test]
    fn test_unplaceable_word_is_skipped() {
        let mut rng = StdRng::seed_from_u64(5);
        let grid = WordGridGenerator::new(20).generate(&["A", "B"], 1, &mut rng);
        assert_eq!(grid.size(), 1);
        assert_eq!(grid.letters(), &['A']);
        assert_eq!(grid.placements().len(), 1);
        assert_eq!(grid.verify(&[0], &["A", "B"]), 1);
    }

    #[test]
    fn test_verify_counts_selected_word() {
        let mut rng = StdRng::seed_from_u64(11);
        let words = ["CAT", "DOG"];
        let grid = WordGridGenerator::default().generate(&words, 8, &mut rng);
        let cat = grid
            .placements()
            .iter()
            .find(|p| p.word == "CAT")
            .unwrap()
            .cells(grid.size());

        assert!(grid.verify(&cat, &words) >= 1);
        assert_eq!(grid.verify(&[], &words), 0);
        assert_eq!(grid.verify_strict(&cat, &words), 1);
    }

    #[test]
    fn test_verify_on_fixed_grid() {
        let grid = LetterGrid::from_rows(&["CAT", "XDX", "XOG"]);
        let words = ["CAT", "DOG"];

        assert_eq!(grid.verify(&[0, 1, 2], &words), 1);
        // D, O, G down the middle column then right: 4, 7, 8
        assert_eq!(grid.verify(&[4, 7, 8], &words), 1);
        assert_eq!(grid.verify(&[0, 1, 2, 4, 7, 8], &words), 2);
        assert_eq!(grid.verify(&[2, 1, 0], &words), 0);
        assert_eq!(grid.verify(&[0, 1, 99, 2], &words), 1);
    }

    #[test]
    fn test_verify_accepts_scattered_cells() {
        // C(0), A(1) then T from anywhere: the check ignores geometry
        let grid = LetterGrid::from_rows(&["CAX", "XXX", "XXT"]);
        assert_eq!(grid.verify(&[0, 1, 8], &["CAT"]), 1);
        assert_eq!(grid.verify_strict(&[0, 1, 8], &["CAT"]), 0);
    }

    #[test]
    fn test_contains_run_directions() {
        let grid = LetterGrid::from_rows(&["CAT", "AXX", "TXX"]);
        assert!(grid.contains_run("CAT"));
        assert!(grid.contains_run("cat"));
        assert!(!grid.contains_run("TAC"));
        assert!(!grid.contains_run(""));
    }

    #[test]
    fn test_placement_cells() {
        let across = Placement {
            word: "CAT".to_string(),
            start: Position { row: 1, col: 2 },
            orientation: Orientation::Horizontal,
        };
        let down = Placement {
            orientation: Orientation::Vertical,
            ..across.clone()
        };
        assert_eq!(across.cells(8), vec![10, 11, 12]);
        assert_eq!(down.cells(8), vec![10, 18, 26]);
    }
}
