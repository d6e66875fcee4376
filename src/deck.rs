use crate::cards::{Card, Joker, Rank, Suit};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Cards in one deck copy: 52 standard cards plus two jokers.
pub const CARDS_PER_DECK: usize = 54;

/// One or more 54-card decks shuffled together.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// ```
    /// use shedding_rs::deck::Deck;
    ///
    /// assert_eq!(Deck::standard(1).len(), 54);
    /// assert_eq!(Deck::standard(2).len(), 108);
    /// ```
    pub fn standard(deck_count: usize) -> Self {
        let mut cards = Vec::with_capacity(CARDS_PER_DECK * deck_count);
        for _ in 0..deck_count {
            for &s in &Suit::ALL {
                for &r in &Rank::ALL {
                    cards.push(Card::new(r, s));
                }
            }
            cards.push(Card::joker(Joker::Small));
            cards.push(Card::joker(Joker::Big));
        }
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Shuffle using a seeded RNG for reproducibility.
    pub fn shuffle_seeded(&mut self, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.cards.shuffle(&mut rng);
    }

    /// Draw one card from the top of the deck.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Deal the same number of cards to each of `players` seats, one at a time
    /// round the table. Cards that do not divide evenly stay in the deck.
    pub fn deal(&mut self, players: usize) -> Vec<Vec<Card>> {
        if players == 0 {
            return Vec::new();
        }
        let per_player = self.cards.len() / players;
        let mut hands = vec![Vec::with_capacity(per_player); players];
        for _ in 0..per_player {
            for hand in hands.iter_mut() {
                if let Some(card) = self.draw() {
                    hand.push(card);
                }
            }
        }
        hands
    }

    /// Cards still in the deck.
    pub fn remaining(&self) -> &[Card] {
        &self.cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn single_deck_has_each_card_once() {
        let d = Deck::standard(1);
        let mut counts: HashMap<Card, usize> = HashMap::new();
        for c in d.remaining() {
            *counts.entry(*c).or_default() += 1;
        }
        assert_eq!(counts.len(), 54);
        assert!(counts.values().all(|&n| n == 1));
        assert_eq!(counts[&Card::DISTINGUISHED], 1);
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let mut d1 = Deck::standard(1);
        let mut d2 = Deck::standard(1);
        d1.shuffle_seeded(42);
        d2.shuffle_seeded(42);
        assert_eq!(d1.cards, d2.cards);
    }

    #[test]
    fn deal_splits_evenly_and_keeps_remainder() {
        let mut d = Deck::standard(1);
        d.shuffle_seeded(7);
        let hands = d.deal(4);
        assert_eq!(hands.len(), 4);
        assert!(hands.iter().all(|h| h.len() == 13));
        assert_eq!(d.len(), 2);

        let mut six = Deck::standard(2);
        let hands = six.deal(6);
        assert!(hands.iter().all(|h| h.len() == 18));
        assert!(six.is_empty());
    }

    #[test]
    fn draw_reduces_length_and_returns_cards() {
        let mut d = Deck::standard(1);
        d.shuffle_seeded(7);
        let c1 = d.draw().unwrap();
        let c2 = d.draw().unwrap();
        assert_ne!(c1, c2);
        assert_eq!(d.len(), 52);
    }
}
