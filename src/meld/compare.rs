use super::{Meld, MeldKind};

/// Whether `candidate` may be played over `current`.
///
/// Bombs beat any non-bomb and a straight flush bomb beats a quad bomb.
/// Otherwise kinds must match (and lengths, for run-based kinds) and the
/// candidate must be strictly stronger; equal strength never beats.
///
/// ```
/// use shedding_rs::cards::parse_cards;
/// use shedding_rs::meld::{can_beat, Meld};
///
/// let pair = Meld::from_cards(parse_cards("KC KD").unwrap()).unwrap();
/// let quad = Meld::from_cards(parse_cards("3C 3D 3H 3S").unwrap()).unwrap();
/// assert!(can_beat(&quad, &pair));
/// assert!(!can_beat(&pair, &quad));
/// ```
pub fn can_beat(candidate: &Meld, current: &Meld) -> bool {
    let (cand, cur) = (candidate.kind(), current.kind());
    match (cand.is_bomb(), cur.is_bomb()) {
        (true, false) => return true,
        (false, true) => return false,
        _ => {}
    }
    match (cand, cur) {
        (MeldKind::StraightFlushBomb, MeldKind::QuadBomb) => return true,
        (MeldKind::QuadBomb, MeldKind::StraightFlushBomb) => return false,
        _ => {}
    }
    if cand != cur {
        return false;
    }
    if cand.is_run_based() && candidate.len() != current.len() {
        return false;
    }
    candidate.strength() > current.strength()
}
