use rand::{seq::SliceRandom, Rng};
use serde::Serialize;

use super::{
    error::GameError,
    level::{Feedback, LevelView},
    scorer::{MEMORY_MISS_PENALTY, MEMORY_PAIR_POINTS},
};
use crate::catalog::{Hobby, HobbyCatalog};

pub const PAIR_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CardFace {
    Down,
    Up,
    Matched,
}

#[derive(Debug, Clone)]
pub struct Card {
    pub hobby: Hobby,
    pub face: CardFace,
}

/// What the client may see of a card
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CardView {
    pub face: CardFace,
    pub emoji: Option<String>,
}

/// Level 2: turn over cards two at a time to find matching pairs
#[derive(Debug, Clone)]
pub struct MemoryMatch {
    cards: Vec<Card>,
    revealed: Option<usize>,
    matched_pairs: usize,
    total_pairs: usize,
}

impl MemoryMatch {
    pub fn new<R: Rng>(catalog: &HobbyCatalog, rng: &mut R) -> Result<Self, GameError> {
        let hobbies = catalog.sample(PAIR_COUNT, rng);
        if hobbies.len() < PAIR_COUNT {
            return Err(GameError::NotEnoughHobbies {
                needed: PAIR_COUNT,
                found: hobbies.len(),
            });
        }

        let mut cards: Vec<Card> = hobbies
            .iter()
            .flat_map(|hobby| [hobby.clone(), hobby.clone()])
            .map(|hobby| Card {
                hobby,
                face: CardFace::Down,
            })
            .collect();
        cards.shuffle(rng);

        Ok(Self {
            cards,
            revealed: None,
            matched_pairs: 0,
            total_pairs: PAIR_COUNT,
        })
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Turn a card face up. The second card of a turn either completes a
    /// pair or sends both cards face down again.
    pub fn flip(&mut self, card: usize) -> (i32, Feedback) {
        match self.cards.get(card) {
            Some(c) if c.face == CardFace::Down => {}
            _ => return (0, Feedback::Ignored),
        }

        let Some(first) = self.revealed.take() else {
            self.cards[card].face = CardFace::Up;
            self.revealed = Some(card);
            return (
                0,
                Feedback::CardRevealed {
                    card,
                    emoji: self.cards[card].hobby.emoji.clone(),
                },
            );
        };

        if self.cards[first].hobby.key == self.cards[card].hobby.key {
            self.cards[first].face = CardFace::Matched;
            self.cards[card].face = CardFace::Matched;
            self.matched_pairs += 1;
            tracing::debug!(
                "Memory pair {} matched ({}/{})",
                self.cards[card].hobby.key,
                self.matched_pairs,
                self.total_pairs
            );
            (
                MEMORY_PAIR_POINTS,
                Feedback::PairMatched {
                    first,
                    second: card,
                },
            )
        } else {
            self.cards[first].face = CardFace::Down;
            (
                MEMORY_MISS_PENALTY,
                Feedback::PairMissed {
                    first,
                    second: card,
                    emoji: self.cards[card].hobby.emoji.clone(),
                },
            )
        }
    }

    pub fn is_complete(&self) -> bool {
        self.matched_pairs == self.total_pairs
    }

    pub fn view(&self) -> LevelView {
        LevelView::MemoryMatch {
            cards: self
                .cards
                .iter()
                .map(|card| CardView {
                    face: card.face,
                    emoji: (card.face != CardFace::Down).then(|| card.hobby.emoji.clone()),
                })
                .collect(),
            matched_pairs: self.matched_pairs,
            total_pairs: self.total_pairs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn level() -> MemoryMatch {
        let mut rng = StdRng::seed_from_u64(8);
        MemoryMatch::new(&HobbyCatalog::builtin(), &mut rng).unwrap()
    }

    fn partner_of(level: &MemoryMatch, card: usize) -> usize {
        let key = &level.cards()[card].hobby.key;
        (0..level.cards().len())
            .find(|&idx| idx != card && level.cards()[idx].hobby.key == *key)
            .unwrap()
    }

    fn stranger_of(level: &MemoryMatch, card: usize) -> usize {
        let key = &level.cards()[card].hobby.key;
        (0..level.cards().len())
            .find(|&idx| level.cards()[idx].hobby.key != *key)
            .unwrap()
    }

    #[test]
    fn test_deck_has_three_pairs() {
        let level = level();
        assert_eq!(level.cards().len(), 6);
        for idx in 0..6 {
            partner_of(&level, idx);
        }
        assert!(level.cards().iter().all(|c| c.face == CardFace::Down));
    }

    #[test]
    fn test_matching_all_pairs_completes() {
        let mut level = level();
        let mut total = 0;
        for card in 0..6 {
            if level.cards()[card].face != CardFace::Down {
                continue;
            }
            let partner = partner_of(&level, card);
            let (delta, _) = level.flip(card);
            total += delta;
            let (delta, feedback) = level.flip(partner);
            total += delta;
            assert_eq!(
                feedback,
                Feedback::PairMatched {
                    first: card,
                    second: partner
                }
            );
        }
        assert!(level.is_complete());
        assert_eq!(total, 3 * MEMORY_PAIR_POINTS);
    }

    #[test]
    fn test_mismatch_turns_cards_back() {
        let mut level = level();
        let other = stranger_of(&level, 0);

        level.flip(0);
        let (delta, feedback) = level.flip(other);
        assert_eq!(delta, MEMORY_MISS_PENALTY);
        assert!(matches!(feedback, Feedback::PairMissed { first: 0, .. }));
        assert_eq!(level.cards()[0].face, CardFace::Down);
        assert_eq!(level.cards()[other].face, CardFace::Down);
        assert!(!level.is_complete());
    }

    #[test]
    fn test_flipping_revealed_or_matched_cards_is_ignored() {
        let mut level = level();
        level.flip(0);
        assert_eq!(level.flip(0), (0, Feedback::Ignored));

        let partner = partner_of(&level, 0);
        level.flip(partner);
        assert_eq!(level.flip(partner), (0, Feedback::Ignored));
        assert_eq!(level.flip(99), (0, Feedback::Ignored));
    }

    #[test]
    fn test_view_hides_face_down_cards() {
        let mut level = level();
        level.flip(2);
        let LevelView::MemoryMatch { cards, .. } = level.view() else {
            panic!("expected memory view");
        };
        assert!(cards[2].emoji.is_some());
        assert!(cards
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != 2)
            .all(|(_, card)| card.emoji.is_none()));
    }
}
