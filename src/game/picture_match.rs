use rand::{
    seq::{IndexedRandom, SliceRandom},
    Rng,
};

use super::{
    error::GameError,
    level::{Feedback, LevelView},
    scorer::{PICTURE_CORRECT_POINTS, PICTURE_WRONG_PENALTY},
};
use crate::catalog::{Hobby, HobbyCatalog};

pub const OPTION_COUNT: usize = 4;

/// Level 1: pick the picture that matches the named hobby.
/// One answer ends the level whether it was right or not.
#[derive(Debug, Clone)]
pub struct PictureMatch {
    target: Hobby,
    options: Vec<Hobby>,
    answered: bool,
}

impl PictureMatch {
    pub fn new<R: Rng>(catalog: &HobbyCatalog, rng: &mut R) -> Result<Self, GameError> {
        let mut options = catalog.sample(OPTION_COUNT, rng);
        if options.len() < OPTION_COUNT {
            return Err(GameError::NotEnoughHobbies {
                needed: OPTION_COUNT,
                found: options.len(),
            });
        }

        let target = options
            .choose(rng)
            .cloned()
            .ok_or(GameError::NotEnoughHobbies {
                needed: OPTION_COUNT,
                found: 0,
            })?;
        options.shuffle(rng);

        Ok(Self {
            target,
            options,
            answered: false,
        })
    }

    pub fn target(&self) -> &Hobby {
        &self.target
    }

    pub fn options(&self) -> &[Hobby] {
        &self.options
    }

    pub fn choose(&mut self, key: &str) -> (i32, Feedback) {
        if self.answered || !self.options.iter().any(|option| option.key == key) {
            return (0, Feedback::Ignored);
        }
        self.answered = true;

        if key == self.target.key {
            (
                PICTURE_CORRECT_POINTS,
                Feedback::Correct {
                    key: key.to_string(),
                },
            )
        } else {
            (
                PICTURE_WRONG_PENALTY,
                Feedback::Wrong {
                    chosen: key.to_string(),
                    correct: self.target.key.clone(),
                },
            )
        }
    }

    pub fn is_complete(&self) -> bool {
        self.answered
    }

    pub fn view(&self) -> LevelView {
        LevelView::PictureMatch {
            target: self.target.clone(),
            options: self.options.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashSet;

    fn level(seed: u64) -> PictureMatch {
        let mut rng = StdRng::seed_from_u64(seed);
        PictureMatch::new(&HobbyCatalog::builtin(), &mut rng).unwrap()
    }

    #[test]
    fn test_options_are_distinct_and_include_target() {
        for seed in 0..20 {
            let level = level(seed);
            let keys: HashSet<_> = level.options().iter().map(|h| h.key.as_str()).collect();
            assert_eq!(keys.len(), OPTION_COUNT);
            assert!(keys.contains(level.target().key.as_str()));
        }
    }

    #[test]
    fn test_correct_answer() {
        let mut level = level(1);
        let key = level.target().key.clone();
        let (delta, feedback) = level.choose(&key);
        assert_eq!(delta, PICTURE_CORRECT_POINTS);
        assert_eq!(feedback, Feedback::Correct { key });
        assert!(level.is_complete());

        // A second answer changes nothing
        assert_eq!(level.choose("membaca"), (0, Feedback::Ignored));
    }

    #[test]
    fn test_wrong_answer_reveals_target_and_completes() {
        let mut level = level(4);
        let target = level.target().key.clone();
        let wrong = level
            .options()
            .iter()
            .find(|h| h.key != target)
            .unwrap()
            .key
            .clone();

        let (delta, feedback) = level.choose(&wrong);
        assert_eq!(delta, PICTURE_WRONG_PENALTY);
        assert_eq!(
            feedback,
            Feedback::Wrong {
                chosen: wrong,
                correct: target
            }
        );
        assert!(level.is_complete());
    }

    #[test]
    fn test_unknown_option_is_ignored() {
        let mut level = level(2);
        assert_eq!(level.choose("bersepeda"), (0, Feedback::Ignored));
        assert!(!level.is_complete());
    }
}
