use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{
    anagram::{Anagram, TileView},
    error::GameError,
    maze::{CellKind, MazeEngine, MazeState},
    memory::{CardView, MemoryMatch},
    picture_match::PictureMatch,
    scorer::Scorer,
    validator::{SelectionMode, SelectionValidator},
    word_search::{LetterGrid, WordGridGenerator, DEFAULT_PLACEMENT_ATTEMPTS},
};
use crate::{
    catalog::{Hobby, HobbyCatalog},
    models::LevelKind,
};

/// Knobs for building levels, filled from [`crate::config::GameConfig`]
#[derive(Debug, Clone)]
pub struct LevelSettings {
    pub word_search_min_size: usize,
    pub word_search_words: usize,
    pub placement_attempts: usize,
    pub selection_mode: SelectionMode,
}

impl Default for LevelSettings {
    fn default() -> Self {
        Self {
            word_search_min_size: 8,
            word_search_words: 3,
            placement_attempts: DEFAULT_PLACEMENT_ATTEMPTS,
            selection_mode: SelectionMode::Permissive,
        }
    }
}

/// Player actions. Each one belongs to exactly one level type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum LevelInput {
    ChooseOption { key: String },
    FlipCard { card: usize },
    PickLetter { tile: usize },
    ResetLetters,
    CheckAnswer,
    Move { cell: usize },
    ToggleCell { cell: usize },
    ResetSelection,
    CheckSelection,
}

impl LevelInput {
    pub fn name(&self) -> &'static str {
        match self {
            LevelInput::ChooseOption { .. } => "choose_option",
            LevelInput::FlipCard { .. } => "flip_card",
            LevelInput::PickLetter { .. } => "pick_letter",
            LevelInput::ResetLetters => "reset_letters",
            LevelInput::CheckAnswer => "check_answer",
            LevelInput::Move { .. } => "move",
            LevelInput::ToggleCell { .. } => "toggle_cell",
            LevelInput::ResetSelection => "reset_selection",
            LevelInput::CheckSelection => "check_selection",
        }
    }
}

/// What happened in response to an input, for the client to animate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Feedback {
    /// Input had no effect (repeated tap, finished level, unknown option)
    Ignored,
    Correct { key: String },
    Wrong { chosen: String, correct: String },
    CardRevealed { card: usize, emoji: String },
    PairMatched { first: usize, second: usize },
    PairMissed { first: usize, second: usize, emoji: String },
    LetterPicked { tile: usize, answer: String },
    LettersReset,
    AnswerCorrect { word: String },
    AnswerWrong { answer: String },
    Moved { cell: usize, steps: u32 },
    MoveRejected { cell: usize },
    GoalReached { steps: u32, shortest: u32 },
    CellToggled { cell: usize, selected: bool },
    SelectionReset,
    WordsFound { count: usize },
    NoWordsFound,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LevelResponse {
    pub score_delta: i32,
    pub feedback: Feedback,
    pub completed: bool,
}

/// Client-facing snapshot of a level
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LevelView {
    PictureMatch {
        target: Hobby,
        options: Vec<Hobby>,
    },
    MemoryMatch {
        cards: Vec<CardView>,
        matched_pairs: usize,
        total_pairs: usize,
    },
    Anagram {
        emoji: String,
        tiles: Vec<TileView>,
        answer: String,
    },
    Maze {
        rows: usize,
        cols: usize,
        cells: Vec<CellKind>,
        player: usize,
        visited: Vec<usize>,
        steps: u32,
        state: MazeState,
    },
    WordSearch {
        size: usize,
        letters: Vec<char>,
        words: Vec<String>,
        selection: Vec<usize>,
    },
}

/// Level 5: find hobby words in a letter grid
pub struct WordSearchLevel {
    grid: LetterGrid,
    words: Vec<String>,
    selection: Vec<usize>,
    validator: SelectionValidator,
    words_found: usize,
}

impl WordSearchLevel {
    pub fn new<R: Rng>(settings: &LevelSettings, catalog: &HobbyCatalog, rng: &mut R) -> Self {
        let words = catalog.leading_words(settings.word_search_words);
        let grid = WordGridGenerator::new(settings.placement_attempts).generate(
            &words,
            settings.word_search_min_size,
            rng,
        );
        Self {
            grid,
            words,
            selection: Vec::new(),
            validator: SelectionValidator::new(settings.selection_mode),
            words_found: 0,
        }
    }

    pub fn grid(&self) -> &LetterGrid {
        &self.grid
    }

    pub fn selection(&self) -> &[usize] {
        &self.selection
    }

    /// Tap a cell: select it, or unselect it when it is already selected
    pub fn toggle(&mut self, cell: usize) -> (i32, Feedback) {
        if self.is_complete() || cell >= self.grid.letters().len() {
            return (0, Feedback::Ignored);
        }
        let selected = match self.selection.iter().position(|&idx| idx == cell) {
            Some(pos) => {
                self.selection.remove(pos);
                false
            }
            None => {
                self.selection.push(cell);
                true
            }
        };
        (0, Feedback::CellToggled { cell, selected })
    }

    pub fn reset_selection(&mut self) -> (i32, Feedback) {
        if self.is_complete() {
            return (0, Feedback::Ignored);
        }
        self.selection.clear();
        (0, Feedback::SelectionReset)
    }

    /// Score the selection. A miss clears it for the next try.
    pub fn check(&mut self) -> (i32, Feedback) {
        if self.is_complete() {
            return (0, Feedback::Ignored);
        }
        let found = self
            .validator
            .count_found(&self.grid, &self.selection, &self.words);
        let delta = Scorer::word_search_points(found);

        if found > 0 {
            self.words_found = found;
            tracing::debug!("Word search selection found {} words", found);
            (delta, Feedback::WordsFound { count: found })
        } else {
            self.selection.clear();
            (delta, Feedback::NoWordsFound)
        }
    }

    pub fn is_complete(&self) -> bool {
        self.words_found > 0
    }

    pub fn view(&self) -> LevelView {
        LevelView::WordSearch {
            size: self.grid.size(),
            letters: self.grid.letters().to_vec(),
            words: self.words.clone(),
            selection: self.selection.clone(),
        }
    }
}

/// One playable level
pub enum Level {
    PictureMatch(PictureMatch),
    MemoryMatch(MemoryMatch),
    Anagram(Anagram),
    Maze(MazeEngine),
    WordSearch(WordSearchLevel),
}

impl Level {
    /// Build a fresh attempt of `kind`
    pub fn start<R: Rng>(
        kind: LevelKind,
        settings: &LevelSettings,
        catalog: &HobbyCatalog,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        let level = match kind {
            LevelKind::PictureMatch => Level::PictureMatch(PictureMatch::new(catalog, rng)?),
            LevelKind::MemoryMatch => Level::MemoryMatch(MemoryMatch::new(catalog, rng)?),
            LevelKind::Anagram => Level::Anagram(Anagram::new(catalog, rng)?),
            LevelKind::Maze => Level::Maze(MazeEngine::standard()?),
            LevelKind::WordSearch => {
                Level::WordSearch(WordSearchLevel::new(settings, catalog, rng))
            }
        };
        tracing::debug!("Started level {} ({:?})", kind.number(), kind);
        Ok(level)
    }

    pub fn kind(&self) -> LevelKind {
        match self {
            Level::PictureMatch(_) => LevelKind::PictureMatch,
            Level::MemoryMatch(_) => LevelKind::MemoryMatch,
            Level::Anagram(_) => LevelKind::Anagram,
            Level::Maze(_) => LevelKind::Maze,
            Level::WordSearch(_) => LevelKind::WordSearch,
        }
    }

    pub fn is_complete(&self) -> bool {
        match self {
            Level::PictureMatch(level) => level.is_complete(),
            Level::MemoryMatch(level) => level.is_complete(),
            Level::Anagram(level) => level.is_complete(),
            Level::Maze(engine) => engine.is_complete(),
            Level::WordSearch(level) => level.is_complete(),
        }
    }

    pub fn handle_input(&mut self, input: LevelInput) -> Result<LevelResponse, GameError> {
        let (score_delta, feedback) = match (&mut *self, input) {
            (Level::PictureMatch(level), LevelInput::ChooseOption { key }) => level.choose(&key),
            (Level::MemoryMatch(level), LevelInput::FlipCard { card }) => level.flip(card),
            (Level::Anagram(level), LevelInput::PickLetter { tile }) => level.pick(tile),
            (Level::Anagram(level), LevelInput::ResetLetters) => level.reset(),
            (Level::Anagram(level), LevelInput::CheckAnswer) => level.check(),
            (Level::Maze(engine), LevelInput::Move { cell }) => Self::step(engine, cell),
            (Level::WordSearch(level), LevelInput::ToggleCell { cell }) => level.toggle(cell),
            (Level::WordSearch(level), LevelInput::ResetSelection) => level.reset_selection(),
            (Level::WordSearch(level), LevelInput::CheckSelection) => level.check(),
            (level, input) => {
                return Err(GameError::UnexpectedInput {
                    level: level.kind(),
                    input: input.name(),
                })
            }
        };

        Ok(LevelResponse {
            score_delta,
            feedback,
            completed: self.is_complete(),
        })
    }

    fn step(engine: &mut MazeEngine, cell: usize) -> (i32, Feedback) {
        let result = engine.attempt_move(cell);
        let feedback = if result.reached_goal {
            Feedback::GoalReached {
                steps: engine.steps(),
                shortest: engine.shortest_path_length(),
            }
        } else if result.accepted {
            Feedback::Moved {
                cell,
                steps: engine.steps(),
            }
        } else {
            Feedback::MoveRejected { cell }
        };
        (result.score_delta, feedback)
    }

    pub fn view(&self) -> LevelView {
        match self {
            Level::PictureMatch(level) => level.view(),
            Level::MemoryMatch(level) => level.view(),
            Level::Anagram(level) => level.view(),
            Level::Maze(engine) => LevelView::Maze {
                rows: engine.rows(),
                cols: engine.cols(),
                cells: engine.cells().to_vec(),
                player: engine.player(),
                visited: engine.visited_cells(),
                steps: engine.steps(),
                state: engine.state(),
            },
            Level::WordSearch(level) => level.view(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn start(kind: LevelKind) -> Level {
        let mut rng = StdRng::seed_from_u64(21);
        Level::start(
            kind,
            &LevelSettings::default(),
            &HobbyCatalog::builtin(),
            &mut rng,
        )
        .unwrap()
    }

    #[test]
    fn test_every_kind_starts() {
        for kind in LevelKind::ALL {
            let level = start(kind);
            assert_eq!(level.kind(), kind);
            assert!(!level.is_complete());
        }
    }

    #[test]
    fn test_input_for_another_level_is_an_error() {
        let mut level = start(LevelKind::Maze);
        let err = level
            .handle_input(LevelInput::FlipCard { card: 0 })
            .unwrap_err();
        assert!(matches!(
            err,
            GameError::UnexpectedInput {
                level: LevelKind::Maze,
                input: "flip_card"
            }
        ));
    }

    #[test]
    fn test_maze_level_reports_rejected_moves() {
        let mut level = start(LevelKind::Maze);
        let response = level.handle_input(LevelInput::Move { cell: 0 }).unwrap();
        assert_eq!(response.score_delta, -1);
        assert_eq!(response.feedback, Feedback::MoveRejected { cell: 0 });
        assert!(!response.completed);

        let response = level.handle_input(LevelInput::Move { cell: 15 }).unwrap();
        assert_eq!(response.feedback, Feedback::Moved { cell: 15, steps: 1 });
    }

    #[test]
    fn test_word_search_level_flow() {
        let mut level = start(LevelKind::WordSearch);
        let Level::WordSearch(inner) = &level else {
            panic!("expected word search");
        };
        assert_eq!(inner.grid().size(), 10);
        let path = inner.grid().placements()[0].cells(inner.grid().size());

        // Miss first: a single cell never spells a catalog word
        level
            .handle_input(LevelInput::ToggleCell { cell: path[0] })
            .unwrap();
        let miss = level.handle_input(LevelInput::CheckSelection).unwrap();
        assert_eq!(miss.score_delta, -3);
        assert_eq!(miss.feedback, Feedback::NoWordsFound);
        let Level::WordSearch(inner) = &level else {
            unreachable!()
        };
        assert!(inner.selection().is_empty());

        for cell in &path {
            level
                .handle_input(LevelInput::ToggleCell { cell: *cell })
                .unwrap();
        }
        let hit = level.handle_input(LevelInput::CheckSelection).unwrap();
        assert_eq!(hit.score_delta, 20);
        assert_eq!(hit.feedback, Feedback::WordsFound { count: 1 });
        assert!(hit.completed);
    }

    #[test]
    fn test_toggle_twice_unselects() {
        let mut level = start(LevelKind::WordSearch);
        level.handle_input(LevelInput::ToggleCell { cell: 3 }).unwrap();
        let response = level.handle_input(LevelInput::ToggleCell { cell: 3 }).unwrap();
        assert_eq!(
            response.feedback,
            Feedback::CellToggled {
                cell: 3,
                selected: false
            }
        );
    }

    #[test]
    fn test_level_input_wire_format() {
        let input: LevelInput = serde_json::from_str(r#"{"action":"move","cell":15}"#).unwrap();
        assert_eq!(input, LevelInput::Move { cell: 15 });
        let input: LevelInput = serde_json::from_str(r#"{"action":"check_answer"}"#).unwrap();
        assert_eq!(input, LevelInput::CheckAnswer);
    }
}
