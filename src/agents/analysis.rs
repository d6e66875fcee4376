//! Situational analysis and move scoring shared by the bot tiers.

use crate::cards::DISTINGUISHED_VALUE;
use crate::hand::Hand;
use crate::meld::{Meld, MeldKind};

/// An opponent at or below this many cards is about to go out.
const DANGER_CARDS: usize = 2;
/// At or below this many cards a bomb is worth spending.
const NEAR_EMPTY: usize = 4;
/// Hands at or above this size reward shedding small melds first.
const LARGE_HAND: usize = 10;

const LEAD_CARD_PENALTY: f64 = 0.75;
const SMALL_MELD_BONUS: f64 = 3.0;
const BOMB_BOOST: f64 = 12.0;
const BOMB_RESERVE_PENALTY: f64 = 20.0;
const DISTINGUISHED_BOOST: f64 = 8.0;
const DISTINGUISHED_PENALTY: f64 = 20.0;
const EXHAUST_BONUS: f64 = 2.0;
const FINISH_BONUS: f64 = 100.0;

/// A follower passes when nothing scores above this and nobody is close to
/// going out.
pub(crate) const CONSERVE_THRESHOLD: f64 = 0.0;

/// What a seat knows about the table when choosing a move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Situation {
    pub(crate) cards_left: usize,
    pub(crate) is_leader: bool,
    /// Fewest cards any opponent holds.
    pub(crate) min_opponent: usize,
    pub(crate) has_bomb: bool,
    pub(crate) holds_distinguished: bool,
    pub(crate) danger: bool,
}

impl Situation {
    pub(crate) fn assess(seat: usize, hand: &Hand, card_counts: &[usize], is_leader: bool, moves: &[Meld]) -> Self {
        let min_opponent = card_counts
            .iter()
            .enumerate()
            .filter(|&(s, _)| s != seat)
            .map(|(_, &n)| n)
            .min()
            .unwrap_or(usize::MAX);
        Self {
            cards_left: hand.len(),
            is_leader,
            min_opponent,
            has_bomb: moves.iter().any(Meld::is_bomb),
            holds_distinguished: hand.as_slice().iter().any(|c| c.is_distinguished()),
            danger: min_opponent <= DANGER_CARDS,
        }
    }

    fn finishes(&self, meld: &Meld) -> bool {
        meld.len() == self.cards_left
    }
}

/// Per-move score for the scored tier; higher is better.
pub(crate) fn score(meld: &Meld, hand: &Hand, s: &Situation) -> f64 {
    let mut score = f64::from(meld.strength());

    if s.is_leader {
        score -= LEAD_CARD_PENALTY * meld.len() as f64;
        if s.cards_left >= LARGE_HAND && meld.len() <= 2 {
            score += SMALL_MELD_BONUS;
        }
    }

    if meld.is_bomb() {
        if s.danger || s.cards_left <= NEAR_EMPTY {
            score += BOMB_BOOST;
        } else {
            score -= BOMB_RESERVE_PENALTY;
        }
    }

    if meld.contains_distinguished() {
        if s.finishes(meld) || s.danger {
            score += DISTINGUISHED_BOOST;
        } else {
            score -= DISTINGUISHED_PENALTY;
        }
    }

    if exhausts_group(meld, hand) {
        score += EXHAUST_BONUS;
    }
    if s.finishes(meld) {
        score += FINISH_BONUS;
    }
    score
}

/// Whether playing `meld` leaves no card of any rank it uses.
pub(crate) fn exhausts_group(meld: &Meld, hand: &Hand) -> bool {
    if meld.kind().is_run_based() || meld.kind() == MeldKind::QuadBomb {
        return false;
    }
    meld.cards().iter().all(|&c| match c.rank() {
        Some(rank) => meld.cards().iter().filter(|m| m.rank() == Some(rank)).count() == hand.count_rank(rank),
        None => hand.count(c) == 1,
    })
}

/// Rough hand quality in `0.0..=1.0`: mean single-play value over the maximum.
pub(crate) fn hand_strength(hand: &Hand) -> f64 {
    if hand.is_empty() {
        return 0.0;
    }
    let total: u32 = hand.as_slice().iter().map(|c| u32::from(c.single_value())).sum();
    f64::from(total) / (hand.len() as f64 * f64::from(DISTINGUISHED_VALUE))
}

/// Sort key putting the cheapest plays first: non-bombs before bombs, the
/// distinguished card last among equals, then by strength and length.
pub(crate) fn cost_key(meld: &Meld) -> (bool, bool, u8, usize) {
    (meld.is_bomb(), meld.contains_distinguished(), meld.strength(), meld.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn meld(s: &str) -> Meld {
        Meld::from_cards(parse_cards(s).unwrap()).unwrap()
    }

    fn hand(s: &str) -> Hand {
        s.parse().unwrap()
    }

    fn situation(h: &Hand, counts: &[usize], is_leader: bool) -> Situation {
        Situation::assess(0, h, counts, is_leader, &[])
    }

    #[test]
    fn danger_tracks_smallest_opponent() {
        let h = hand("3C 4D 5H");
        let s = situation(&h, &[3, 7, 2], false);
        assert_eq!(s.min_opponent, 2);
        assert!(s.danger);
        assert!(s.holds_distinguished);
        assert!(!situation(&h, &[3, 7, 9], false).danger);
    }

    #[test]
    fn bombs_are_reserved_without_danger() {
        let h = hand("9C 9D 9H 9S 3C 4C 5C 6C 7D 8D JD");
        let quad = meld("9C 9D 9H 9S");
        let calm = situation(&h, &[11, 10, 10], false);
        let tense = situation(&h, &[11, 1, 10], false);
        assert!(score(&quad, &h, &calm) < CONSERVE_THRESHOLD);
        assert!(score(&quad, &h, &tense) > score(&quad, &h, &calm));
    }

    #[test]
    fn distinguished_card_is_kept_unless_it_finishes() {
        let h = hand("5H 8C 9C 9D 9H 9S JD QD KD AD");
        let five = meld("5H");
        let s = situation(&h, &[10, 9, 9], false);
        assert!(score(&five, &h, &s) < score(&meld("8C"), &h, &s));

        let last = hand("5H");
        let s = situation(&last, &[1, 9, 9], false);
        assert!(score(&five, &last, &s) > FINISH_BONUS);
    }

    #[test]
    fn exhausting_a_rank_is_detected() {
        let h = hand("7C 7D 8S");
        assert!(exhausts_group(&meld("7C 7D"), &h));
        assert!(!exhausts_group(&meld("7C"), &h));
        assert!(exhausts_group(&meld("8S"), &h));
    }

    #[test]
    fn hand_strength_is_normalised() {
        assert_eq!(hand_strength(&Hand::default()), 0.0);
        assert!((hand_strength(&hand("5H")) - 1.0).abs() < f64::EPSILON);
        assert!(hand_strength(&hand("3C 4C")) < 0.2);
    }
}
