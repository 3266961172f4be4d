use crate::{Card, RandomSource, Rank, Suit};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// A side's private draw pile. Cards are drawn from the tail.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub draw: Vec<Card>,
}

impl Deck {
    pub fn standard52() -> Self {
        let mut draw = Vec::with_capacity(52);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                draw.push(Card::new(suit, rank));
            }
        }
        Self { draw }
    }

    /// Fresh, shuffled 52-card deck.
    pub fn fresh(rng: &mut dyn RandomSource) -> Self {
        Self::standard52().shuffled(rng)
    }

    /// Shuffled copy; `self` is left as it was.
    pub fn shuffled(&self, rng: &mut dyn RandomSource) -> Self {
        let mut copy = self.clone();
        copy.shuffle(rng);
        copy
    }

    pub fn shuffle(&mut self, rng: &mut dyn RandomSource) {
        self.draw.shuffle(rng);
    }

    pub fn draw_card(&mut self) -> Option<Card> {
        self.draw.pop()
    }

    /// The next `count` cards in the order they would be drawn.
    pub fn peek_next(&self, count: usize) -> Vec<Card> {
        self.draw.iter().rev().take(count).copied().collect()
    }

    pub fn len(&self) -> usize {
        self.draw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draw.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RngState, ScriptedRng};
    use std::collections::HashSet;

    #[test]
    fn standard_deck_has_every_card_once() {
        let deck = Deck::standard52();
        assert_eq!(deck.len(), 52);
        let unique: HashSet<_> = deck.draw.iter().map(|c| (c.suit, c.rank)).collect();
        assert_eq!(unique.len(), 52);
        let aces = deck.draw.iter().filter(|c| c.is_ace()).count();
        assert_eq!(aces, 4);
        let tens = deck.draw.iter().filter(|c| c.value() == 10).count();
        assert_eq!(tens, 16);
    }

    #[test]
    fn shuffled_leaves_source_untouched() {
        let deck = Deck::standard52();
        let mut rng = RngState::from_seed(3);
        let shuffled = deck.shuffled(&mut rng);
        assert_eq!(deck, Deck::standard52());
        assert_eq!(shuffled.len(), 52);
        let mut a: Vec<_> = shuffled.draw.iter().map(|c| format!("{c}")).collect();
        let mut b: Vec<_> = deck.draw.iter().map(|c| format!("{c}")).collect();
        a.sort();
        b.sort();
        assert_eq!(a, b);
    }

    #[test]
    fn zero_rolls_rotate_first_card_to_the_tail() {
        // j = 0 on every step walks the first card to the back.
        let mut rng = ScriptedRng::new();
        let deck = Deck::standard52().shuffled(&mut rng);
        assert_eq!(deck.draw[51], Deck::standard52().draw[0]);
    }

    #[test]
    fn seeded_shuffles_repeat() {
        let a = Deck::fresh(&mut RngState::from_seed(11));
        let b = Deck::fresh(&mut RngState::from_seed(11));
        assert_eq!(a, b);
        assert_ne!(a, Deck::standard52());
    }

    #[test]
    fn draws_from_the_tail_and_peeks_in_draw_order() {
        let mut deck = Deck::standard52();
        let next = deck.peek_next(3);
        assert_eq!(next[0], deck.draw[51]);
        assert_eq!(next[2], deck.draw[49]);
        assert_eq!(deck.draw_card(), Some(next[0]));
        assert_eq!(deck.draw_card(), Some(next[1]));
        assert_eq!(deck.len(), 50);
    }

    #[test]
    fn empty_deck_draw_is_none() {
        let mut deck = Deck::default();
        assert!(deck.is_empty());
        assert_eq!(deck.draw_card(), None);
        assert!(deck.peek_next(3).is_empty());
    }
}
