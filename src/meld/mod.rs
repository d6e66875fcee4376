pub(crate) mod analysis;
pub mod compare;
pub(crate) mod detector;
pub(crate) mod rank_groups;
pub(crate) mod run_info;
pub(crate) mod suit_info;

pub use compare::can_beat;
pub use run_info::MIN_RUN_LEN;

use crate::cards::Card;
use serde::Serialize;
use std::fmt;

/// The eight recognised combination kinds, declared weakest listing first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[non_exhaustive]
pub enum MeldKind {
    Single,
    Pair,
    Triple,
    FullHouse,
    Sisters,
    Run,
    QuadBomb,
    StraightFlushBomb,
}

impl MeldKind {
    pub const ALL: [MeldKind; 8] = [
        MeldKind::Single,
        MeldKind::Pair,
        MeldKind::Triple,
        MeldKind::FullHouse,
        MeldKind::Sisters,
        MeldKind::Run,
        MeldKind::QuadBomb,
        MeldKind::StraightFlushBomb,
    ];

    /// Bombs may be played over any established kind.
    pub const fn is_bomb(self) -> bool {
        matches!(self, MeldKind::QuadBomb | MeldKind::StraightFlushBomb)
    }

    /// Run-based kinds only meet melds of the same length.
    pub const fn is_run_based(self) -> bool {
        matches!(self, MeldKind::Run | MeldKind::StraightFlushBomb)
    }

    pub fn label(self) -> &'static str {
        match self {
            MeldKind::Single => "Single",
            MeldKind::Pair => "Pair",
            MeldKind::Triple => "Triple",
            MeldKind::FullHouse => "Full House",
            MeldKind::Sisters => "Sisters",
            MeldKind::Run => "Run",
            MeldKind::QuadBomb => "Quad Bomb",
            MeldKind::StraightFlushBomb => "Straight Flush Bomb",
        }
    }
}

impl fmt::Display for MeldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Kind and strength of a classified card set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Classification {
    pub kind: MeldKind,
    pub strength: u8,
}

/// Classify a card set. Total: any set that fits no pattern, including the
/// empty set, yields `None`.
///
/// ```
/// use shedding_rs::cards::parse_cards;
/// use shedding_rs::meld::{classify, MeldKind};
///
/// let c = classify(&parse_cards("5H 5D 5C 7H 7D").unwrap()).unwrap();
/// assert_eq!(c.kind, MeldKind::FullHouse);
/// assert_eq!(c.strength, 16);
/// assert!(classify(&parse_cards("JC QD KS AH").unwrap()).is_none());
/// ```
pub fn classify(cards: &[Card]) -> Option<Classification> {
    use analysis::MeldAnalysis;
    use detector::DETECTORS;

    if cards.is_empty() {
        return None;
    }
    let analysis = MeldAnalysis::new(cards);
    DETECTORS
        .iter()
        .find_map(|d| d.detect(&analysis).map(|strength| Classification { kind: d.kind(), strength }))
}

/// A validated combination: cards in canonical order with their derived kind
/// and strength. Only obtainable through classification, so strength always
/// matches the cards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Meld {
    kind: MeldKind,
    cards: Vec<Card>,
    strength: u8,
}

impl Meld {
    /// Classify `cards` into a meld, or `None` if they form no combination.
    pub fn from_cards(mut cards: Vec<Card>) -> Option<Meld> {
        let Classification { kind, strength } = classify(&cards)?;
        cards.sort();
        Some(Meld { kind, cards, strength })
    }

    pub fn kind(&self) -> MeldKind {
        self.kind
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn strength(&self) -> u8 {
        self.strength
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_bomb(&self) -> bool {
        self.kind.is_bomb()
    }

    pub fn contains_distinguished(&self) -> bool {
        self.cards.iter().any(|c| c.is_distinguished())
    }

    pub fn classification(&self) -> Classification {
        Classification { kind: self.kind, strength: self.strength }
    }
}

impl fmt::Display for Meld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [", self.kind)?;
        for (i, c) in self.cards.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{c}")?;
        }
        f.write_str("]")
    }
}
