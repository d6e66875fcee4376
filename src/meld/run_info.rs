use crate::cards::{Card, ACE_LOW_RUN_VALUE};

/// Shortest card count that forms a run.
pub const MIN_RUN_LEN: usize = 5;

/// Whether a card set is one unbroken run-order sequence, and its top value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunInfo {
    pub is_run: bool,
    pub top_value: Option<u8>,
}

impl RunInfo {
    const NONE: RunInfo = RunInfo { is_run: false, top_value: None };

    /// Detect a run of five or more jokerless cards with distinct ranks.
    /// The Ace is tried high first (10-J-Q-K-A), then as the low anchor
    /// (A-2-3-4-5). One run never uses an Ace at both ends.
    pub fn detect(cards: &[Card]) -> Self {
        if cards.len() < MIN_RUN_LEN {
            return Self::NONE;
        }
        let mut values = Vec::with_capacity(cards.len());
        for c in cards {
            match c.run_value() {
                Some(v) => values.push(v),
                None => return Self::NONE,
            }
        }
        values.sort_unstable();

        if let Some(top) = consecutive_top(&values) {
            return RunInfo { is_run: true, top_value: Some(top) };
        }

        let ace_high = crate::cards::Rank::Ace.run_value();
        if values.last() == Some(&ace_high) {
            values.pop();
            if values.last() == Some(&ace_high) {
                return Self::NONE;
            }
            values.insert(0, ACE_LOW_RUN_VALUE);
            if let Some(top) = consecutive_top(&values) {
                return RunInfo { is_run: true, top_value: Some(top) };
            }
        }

        Self::NONE
    }
}

fn consecutive_top(sorted: &[u8]) -> Option<u8> {
    let unbroken = sorted.windows(2).all(|w| w[1] == w[0] + 1);
    if unbroken {
        sorted.last().copied()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn detect(s: &str) -> RunInfo {
        RunInfo::detect(&parse_cards(s).unwrap())
    }

    #[test]
    fn plain_run() {
        let info = detect("3C 4D 5S 6H 7C");
        assert!(info.is_run);
        assert_eq!(info.top_value, Some(6));
    }

    #[test]
    fn ace_high_run() {
        let info = detect("TC JD QS KH AC");
        assert!(info.is_run);
        assert_eq!(info.top_value, Some(13));
    }

    #[test]
    fn ace_low_run() {
        let info = detect("AC 2D 3S 4H 5C");
        assert!(info.is_run);
        assert_eq!(info.top_value, Some(4));
    }

    #[test]
    fn two_starts_a_run_without_ace() {
        let info = detect("2C 3D 4S 5H 6C");
        assert!(info.is_run);
        assert_eq!(info.top_value, Some(5));
    }

    #[test]
    fn no_wrap_through_king_ace_two() {
        assert!(!detect("QC KD AS 2H 3C").is_run);
        assert!(!detect("KD AS 2H 3C 4D").is_run);
    }

    #[test]
    fn too_short_or_joker_or_duplicate() {
        assert!(!detect("JC QD KS AH").is_run);
        assert!(!detect("3C 4D 5S 6H SJ").is_run);
        assert!(!detect("3C 4D 5S 6H 6C").is_run);
    }

    #[test]
    fn ace_cannot_close_both_ends() {
        assert!(!detect("AC 2D 3H 4S 5C 6D 7H 8S 9C TD JH QS KC AD").is_run);
        assert!(!detect("AC AD 2D 3H 4S 5C").is_run);

        let info = detect("AC 2D 3H 4S 5C 6D 7H 8S 9C TD JH QS KC");
        assert!(info.is_run);
        assert_eq!(info.top_value, Some(13));
    }
}
