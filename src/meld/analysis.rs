use super::rank_groups::RankGroups;
use super::run_info::RunInfo;
use super::suit_info::SuitInfo;
use crate::cards::{Card, Rank};

/// Pre-computed analysis of a candidate card set.
/// Built once and shared by all meld detectors.
#[derive(Debug, Clone)]
pub struct MeldAnalysis {
    pub sorted_cards: Vec<Card>,
    pub jokers: usize,
    pub rank_groups: RankGroups,
    pub run_info: RunInfo,
    pub suit_info: SuitInfo,
}

impl MeldAnalysis {
    pub fn new(cards: &[Card]) -> Self {
        let mut sorted_cards = cards.to_vec();
        sorted_cards.sort();

        let mut rank_counts = [0u8; 14];
        let mut jokers = 0;
        for c in &sorted_cards {
            match c.rank() {
                Some(rank) => {
                    let slot = &mut rank_counts[rank.single_value() as usize];
                    *slot = slot.saturating_add(1);
                }
                None => jokers += 1,
            }
        }

        let rank_groups = RankGroups::from_counts(&rank_counts);
        let run_info = RunInfo::detect(&sorted_cards);
        let suit_info = SuitInfo::detect(&sorted_cards);

        Self { sorted_cards, jokers, rank_groups, run_info, suit_info }
    }

    pub fn len(&self) -> usize {
        self.sorted_cards.len()
    }

    /// Strength of the same-rank group of `rank` inside this set: its
    /// single-play value, or the distinguished value when that card is in it.
    pub fn group_strength(&self, rank: Rank) -> u8 {
        self.sorted_cards
            .iter()
            .filter(|c| c.rank() == Some(rank))
            .map(|c| c.single_value())
            .max()
            .unwrap_or_else(|| rank.single_value())
    }
}
