use rand::{seq::SliceRandom, Rng};
use serde::Serialize;

use super::{
    error::GameError,
    level::{Feedback, LevelView},
    scorer::{ANAGRAM_CORRECT_POINTS, ANAGRAM_WRONG_PENALTY},
};
use crate::{
    catalog::{Hobby, HobbyCatalog},
    utils::letters::{distractor_count, DISTRACTOR_LETTERS},
};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TileView {
    pub letter: char,
    pub used: bool,
}

/// Level 3: rebuild a hobby name from its shuffled letters
#[derive(Debug, Clone)]
pub struct Anagram {
    hobby: Hobby,
    target: String,
    tiles: Vec<char>,
    picked: Vec<usize>,
    solved: bool,
}

impl Anagram {
    pub fn new<R: Rng>(catalog: &HobbyCatalog, rng: &mut R) -> Result<Self, GameError> {
        let hobby = catalog
            .choose(rng)
            .cloned()
            .ok_or(GameError::NotEnoughHobbies {
                needed: 1,
                found: 0,
            })?;
        Ok(Self::with_hobby(hobby, rng))
    }

    fn with_hobby<R: Rng>(hobby: Hobby, rng: &mut R) -> Self {
        let target = hobby.word();
        let mut tiles: Vec<char> = target.chars().collect();
        let extra = distractor_count(tiles.len());
        tiles.extend(DISTRACTOR_LETTERS.chars().take(extra));
        tiles.shuffle(rng);

        Self {
            hobby,
            target,
            tiles,
            picked: Vec::new(),
            solved: false,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn tiles(&self) -> &[char] {
        &self.tiles
    }

    /// Letters picked so far, in order
    pub fn answer(&self) -> String {
        self.picked.iter().map(|&idx| self.tiles[idx]).collect()
    }

    pub fn pick(&mut self, tile: usize) -> (i32, Feedback) {
        if self.solved || tile >= self.tiles.len() || self.picked.contains(&tile) {
            return (0, Feedback::Ignored);
        }
        self.picked.push(tile);
        (
            0,
            Feedback::LetterPicked {
                tile,
                answer: self.answer(),
            },
        )
    }

    pub fn reset(&mut self) -> (i32, Feedback) {
        if self.solved {
            return (0, Feedback::Ignored);
        }
        self.picked.clear();
        (0, Feedback::LettersReset)
    }

    /// Compare the picked letters with the target. A wrong answer keeps the
    /// picked letters so the player can reset or keep going.
    pub fn check(&mut self) -> (i32, Feedback) {
        if self.solved {
            return (0, Feedback::Ignored);
        }
        let answer = self.answer();
        if answer == self.target {
            self.solved = true;
            (
                ANAGRAM_CORRECT_POINTS,
                Feedback::AnswerCorrect { word: answer },
            )
        } else {
            (ANAGRAM_WRONG_PENALTY, Feedback::AnswerWrong { answer })
        }
    }

    pub fn is_complete(&self) -> bool {
        self.solved
    }

    pub fn view(&self) -> LevelView {
        LevelView::Anagram {
            emoji: self.hobby.emoji.clone(),
            tiles: self
                .tiles
                .iter()
                .enumerate()
                .map(|(idx, &letter)| TileView {
                    letter,
                    used: self.picked.contains(&idx),
                })
                .collect(),
            answer: self.answer(),
        }
    }
}
