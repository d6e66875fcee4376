use crate::cards::{parse_cards, Card, Rank};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandError {
    #[error("hand does not hold {0}")]
    MissingCard(Card),
    #[error("card parse error: {0}")]
    CardParse(String),
}

/// The multiset of cards one player holds, kept in canonical sorted order.
///
/// Only the deal and accepted plays change a hand; both go through
/// [`crate::game::Game`].
///
/// ```
/// use shedding_rs::hand::Hand;
///
/// let hand: Hand = "3D 3C 5H BJ".parse().unwrap();
/// assert_eq!(hand.len(), 4);
/// assert_eq!(hand.to_string(), "3C 3D 5H BJ");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new(mut cards: Vec<Card>) -> Self {
        cards.sort();
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.binary_search(&card).is_ok()
    }

    /// Number of copies of `card` held (more than one only with several decks).
    pub fn count(&self, card: Card) -> usize {
        self.cards.iter().filter(|&&c| c == card).count()
    }

    /// Number of cards of `rank` held.
    pub fn count_rank(&self, rank: Rank) -> usize {
        self.cards.iter().filter(|c| c.rank() == Some(rank)).count()
    }

    /// Whether every card of `cards` is held, respecting multiplicity.
    pub fn contains_all(&self, cards: &[Card]) -> bool {
        self.first_missing(cards).is_none()
    }

    fn first_missing(&self, cards: &[Card]) -> Option<Card> {
        let mut wanted: HashMap<Card, usize> = HashMap::new();
        for &c in cards {
            *wanted.entry(c).or_default() += 1;
        }
        cards.iter().copied().find(|&c| wanted[&c] > self.count(c))
    }

    /// Cards grouped by standard rank; jokers are left out.
    pub fn rank_partition(&self) -> BTreeMap<Rank, Vec<Card>> {
        let mut groups: BTreeMap<Rank, Vec<Card>> = BTreeMap::new();
        for &c in &self.cards {
            if let Some(rank) = c.rank() {
                groups.entry(rank).or_default().push(c);
            }
        }
        groups
    }

    /// Remove exactly `cards`. Nothing is removed unless all are held.
    pub(crate) fn remove_all(&mut self, cards: &[Card]) -> Result<(), HandError> {
        if let Some(missing) = self.first_missing(cards) {
            return Err(HandError::MissingCard(missing));
        }
        for c in cards {
            if let Ok(pos) = self.cards.binary_search(c) {
                self.cards.remove(pos);
            }
        }
        Ok(())
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.cards.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl FromStr for Hand {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s).map_err(|e| HandError::CardParse(e.to_string()))?;
        Ok(Hand::new(cards))
    }
}
