//! Legal-move enumeration.
//!
//! Candidates are built from a rank partition of the hand (same-rank groups,
//! full houses, sister chains) and from sliding windows over run order, then
//! classified, deduplicated by card multiset and filtered against the trick.

mod combinations;

pub use combinations::Combinations;

use crate::cards::{Card, Rank, ACE_LOW_RUN_VALUE};
use crate::hand::Hand;
use crate::meld::{can_beat, Meld, MeldKind, MIN_RUN_LEN};
use crate::trick::TrickState;
use std::collections::{BTreeMap, HashSet};

/// Ordered, indexable list of legal melds.
///
/// Ordering is by kind, then length, then strength, then cards, so index `n`
/// is stable for a given hand and trick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegalMoves {
    moves: Vec<Meld>,
}

impl LegalMoves {
    fn from_candidates(candidates: impl IntoIterator<Item = Meld>) -> Self {
        let unique: HashSet<Meld> = candidates.into_iter().collect();
        let mut moves: Vec<Meld> = unique.into_iter().collect();
        moves.sort_by(|a, b| {
            (a.kind(), a.len(), a.strength(), a.cards()).cmp(&(b.kind(), b.len(), b.strength(), b.cards()))
        });
        Self { moves }
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Meld> {
        self.moves.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Meld> {
        self.moves.iter()
    }

    pub fn as_slice(&self) -> &[Meld] {
        &self.moves
    }

    pub fn contains(&self, meld: &Meld) -> bool {
        self.moves.contains(meld)
    }

    pub fn into_vec(self) -> Vec<Meld> {
        self.moves
    }
}

impl<'a> IntoIterator for &'a LegalMoves {
    type Item = &'a Meld;
    type IntoIter = std::slice::Iter<'a, Meld>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

/// Whether `meld` may be played into `trick`.
///
/// An open trick accepts anything from the leader and nothing from anyone
/// else. Otherwise the meld must be a bomb or match the established kind (and
/// the standing play's length for run-based kinds), and beat the last play.
pub fn is_legal(meld: &Meld, trick: &TrickState, is_leader: bool) -> bool {
    let Some(last) = trick.last_play() else {
        return is_leader;
    };
    let established = trick.established().unwrap_or(last.meld.kind());
    let fits = meld.is_bomb() || meld.kind() == established;
    fits && can_beat(meld, &last.meld)
}

/// Every legal meld for `hand` given the current trick.
///
/// ```
/// use shedding_rs::hand::Hand;
/// use shedding_rs::moves::legal_moves;
/// use shedding_rs::trick::TrickState;
///
/// let hand: Hand = "3C 3D 4H".parse().unwrap();
/// let moves = legal_moves(&hand, &TrickState::new(0), true);
/// // three singles and one pair
/// assert_eq!(moves.len(), 4);
/// ```
pub fn legal_moves(hand: &Hand, trick: &TrickState, is_leader: bool) -> LegalMoves {
    let partition = hand.rank_partition();
    let Some(last) = trick.last_play() else {
        if !is_leader {
            return LegalMoves::default();
        }
        return LegalMoves::from_candidates(all_melds(hand, &partition));
    };

    let established = trick.established().unwrap_or(last.meld.kind());
    let mut candidates = melds_of_kind(hand, &partition, established);
    candidates.extend(same_rank(&partition, 4));
    candidates.extend(straight_flushes(hand));
    candidates.retain(|m| is_legal(m, trick, is_leader));
    LegalMoves::from_candidates(candidates)
}

fn all_melds(hand: &Hand, partition: &BTreeMap<Rank, Vec<Card>>) -> Vec<Meld> {
    let mut out = singles(hand);
    for size in 2..=4 {
        out.extend(same_rank(partition, size));
    }
    out.extend(full_houses(partition));
    out.extend(sisters(partition));
    out.extend(runs(hand.as_slice()));
    out
}

fn melds_of_kind(hand: &Hand, partition: &BTreeMap<Rank, Vec<Card>>, kind: MeldKind) -> Vec<Meld> {
    match kind {
        MeldKind::Single => singles(hand),
        MeldKind::Pair => same_rank(partition, 2),
        MeldKind::Triple => same_rank(partition, 3),
        MeldKind::QuadBomb => same_rank(partition, 4),
        MeldKind::FullHouse => full_houses(partition),
        MeldKind::Sisters => sisters(partition),
        MeldKind::Run => runs(hand.as_slice()),
        MeldKind::StraightFlushBomb => straight_flushes(hand),
    }
}

fn singles(hand: &Hand) -> Vec<Meld> {
    let mut cards = hand.as_slice().to_vec();
    cards.dedup();
    cards.into_iter().filter_map(|c| Meld::from_cards(vec![c])).collect()
}

/// Every `size`-card subset of each rank's cards.
fn rank_subsets(cards: &[Card], size: usize) -> Vec<Vec<Card>> {
    Combinations::new(cards.len(), size)
        .map(|idx| idx.into_iter().map(|i| cards[i]).collect())
        .collect()
}

fn same_rank(partition: &BTreeMap<Rank, Vec<Card>>, size: usize) -> Vec<Meld> {
    partition
        .values()
        .flat_map(|cards| rank_subsets(cards, size))
        .filter_map(Meld::from_cards)
        .collect()
}

fn full_houses(partition: &BTreeMap<Rank, Vec<Card>>) -> Vec<Meld> {
    let mut out = Vec::new();
    for (&trip_rank, trip_cards) in partition {
        let triples = rank_subsets(trip_cards, 3);
        if triples.is_empty() {
            continue;
        }
        for (&pair_rank, pair_cards) in partition {
            if pair_rank == trip_rank {
                continue;
            }
            for pair in rank_subsets(pair_cards, 2) {
                for triple in &triples {
                    let mut cards = triple.clone();
                    cards.extend_from_slice(&pair);
                    out.extend(Meld::from_cards(cards));
                }
            }
        }
    }
    out
}

/// Chains of two or more adjacent ranks (single-play order), each contributing
/// a pair or each contributing a triple.
fn sisters(partition: &BTreeMap<Rank, Vec<Card>>) -> Vec<Meld> {
    let mut out = Vec::new();
    for group in [2, 3] {
        // BTreeMap iterates ranks in single-play order.
        let eligible: Vec<(Rank, Vec<Vec<Card>>)> = partition
            .iter()
            .filter(|(_, cards)| cards.len() >= group)
            .map(|(&rank, cards)| (rank, rank_subsets(cards, group)))
            .collect();

        let mut start = 0;
        while start < eligible.len() {
            let mut end = start;
            while end + 1 < eligible.len()
                && eligible[end + 1].0.single_value() == eligible[end].0.single_value() + 1
            {
                end += 1;
            }
            for lo in start..=end {
                for hi in (lo + 1)..=end {
                    let options: Vec<&[Vec<Card>]> = eligible[lo..=hi].iter().map(|(_, o)| o.as_slice()).collect();
                    out.extend(product(&options).into_iter().filter_map(Meld::from_cards));
                }
            }
            start = end + 1;
        }
    }
    out
}

/// Cards bucketed by run-order value; aces land in both the low and the high
/// slot. Jokers never join runs.
fn run_slots(cards: &[Card]) -> Vec<Vec<Vec<Card>>> {
    let mut slots: Vec<Vec<Vec<Card>>> = vec![Vec::new(); 14];
    for &c in cards {
        let Some(value) = c.run_value() else { continue };
        slots[usize::from(value)].push(vec![c]);
        if c.rank() == Some(Rank::Ace) {
            slots[usize::from(ACE_LOW_RUN_VALUE)].push(vec![c]);
        }
    }
    for slot in &mut slots {
        slot.dedup();
    }
    slots
}

/// Every run window of at least five consecutive values, taking each suit
/// variant. An ace cannot close both ends of one window.
fn runs(cards: &[Card]) -> Vec<Meld> {
    let slots = run_slots(cards);
    let top = slots.len() - 1;
    let mut out = Vec::new();
    for lo in 0..slots.len() {
        let mut hi = lo;
        while hi < slots.len() && !slots[hi].is_empty() {
            let len = hi - lo + 1;
            if len >= MIN_RUN_LEN && !(lo == usize::from(ACE_LOW_RUN_VALUE) && hi == top) {
                let options: Vec<&[Vec<Card>]> = slots[lo..=hi].iter().map(Vec::as_slice).collect();
                out.extend(product(&options).into_iter().filter_map(Meld::from_cards));
            }
            hi += 1;
        }
    }
    out
}

fn straight_flushes(hand: &Hand) -> Vec<Meld> {
    let mut by_suit: BTreeMap<_, Vec<Card>> = BTreeMap::new();
    for &c in hand.as_slice() {
        if let Some(suit) = c.suit() {
            by_suit.entry(suit).or_default().push(c);
        }
    }
    by_suit
        .values()
        .flat_map(|cards| runs(cards))
        .filter(|m| m.kind() == MeldKind::StraightFlushBomb)
        .collect()
}

/// Cartesian product: one chunk from each option list, concatenated.
fn product(options: &[&[Vec<Card>]]) -> Vec<Vec<Card>> {
    let mut acc: Vec<Vec<Card>> = vec![Vec::new()];
    for choices in options {
        let mut next = Vec::with_capacity(acc.len() * choices.len());
        for prefix in &acc {
            for chunk in choices.iter() {
                let mut cards = prefix.clone();
                cards.extend_from_slice(chunk);
                next.push(cards);
            }
        }
        acc = next;
    }
    acc
}
