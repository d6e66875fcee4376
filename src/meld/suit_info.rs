use crate::cards::{Card, Suit};

/// Whether every card in a set shares one suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuitInfo {
    pub single_suit: Option<Suit>,
}

impl SuitInfo {
    /// Jokers have no suit, so any joker breaks a single-suit set.
    pub fn detect(cards: &[Card]) -> Self {
        let first = cards.first().and_then(|c| c.suit());
        let all_same = first.is_some() && cards.iter().all(|c| c.suit() == first);
        SuitInfo { single_suit: if all_same { first } else { None } }
    }
}
