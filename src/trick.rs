use crate::meld::{Meld, MeldKind};
use serde::Serialize;

/// The play currently standing in a trick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LastPlay {
    pub seat: usize,
    pub meld: Meld,
}

/// State of the trick in progress.
///
/// Open (no established kind, no last play) until someone plays; reset when
/// every other player has passed on the last play or a round starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrickState {
    established: Option<MeldKind>,
    last_play: Option<LastPlay>,
    passes: usize,
    leader: usize,
}

impl TrickState {
    pub fn new(leader: usize) -> Self {
        Self { established: None, last_play: None, passes: 0, leader }
    }

    /// A trick whose standing play is `meld` by `seat`, who also led it.
    pub fn with_last_play(seat: usize, meld: Meld) -> Self {
        let mut trick = Self::new(seat);
        trick.record_play(seat, meld);
        trick
    }

    /// Kind the trick is locked to, if anyone has played.
    pub fn established(&self) -> Option<MeldKind> {
        self.established
    }

    pub fn last_play(&self) -> Option<&LastPlay> {
        self.last_play.as_ref()
    }

    /// Consecutive passes since the last play.
    pub fn passes(&self) -> usize {
        self.passes
    }

    pub fn leader(&self) -> usize {
        self.leader
    }

    /// No play yet: the leader may open with any kind.
    pub fn is_open(&self) -> bool {
        self.last_play.is_none()
    }

    pub(crate) fn record_play(&mut self, seat: usize, meld: Meld) {
        if self.established.is_none() {
            self.established = Some(meld.kind());
        }
        self.last_play = Some(LastPlay { seat, meld });
        self.passes = 0;
    }

    /// Count a pass. When `player_count - 1` players have passed in a row the
    /// trick resolves and the owner of the last play becomes leader, which is
    /// returned.
    pub(crate) fn record_pass(&mut self, player_count: usize) -> Option<usize> {
        self.passes += 1;
        if self.passes + 1 < player_count {
            return None;
        }
        let winner = self.last_play.as_ref().map(|p| p.seat)?;
        *self = TrickState::new(winner);
        Some(winner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn meld(s: &str) -> Meld {
        Meld::from_cards(parse_cards(s).unwrap()).unwrap()
    }

    #[test]
    fn first_play_establishes_kind() {
        let mut t = TrickState::new(0);
        assert!(t.is_open());
        t.record_play(0, meld("9C 9D"));
        assert_eq!(t.established(), Some(MeldKind::Pair));
        t.record_play(1, meld("3C 3D 3H 3S"));
        assert_eq!(t.established(), Some(MeldKind::Pair), "a bomb does not relock the trick");
        assert_eq!(t.last_play().map(|p| p.seat), Some(1));
    }

    #[test]
    fn resolves_after_all_others_pass() {
        let mut t = TrickState::new(0);
        t.record_play(2, meld("7C"));
        assert_eq!(t.record_pass(4), None);
        assert_eq!(t.record_pass(4), None);
        assert_eq!(t.record_pass(4), Some(2));
        assert!(t.is_open());
        assert_eq!(t.leader(), 2);
        assert_eq!(t.passes(), 0);
        assert_eq!(t.established(), None);
    }

    #[test]
    fn play_resets_pass_counter() {
        let mut t = TrickState::new(0);
        t.record_play(0, meld("7C"));
        t.record_pass(3);
        assert_eq!(t.passes(), 1);
        t.record_play(2, meld("8C"));
        assert_eq!(t.passes(), 0);
    }
}
