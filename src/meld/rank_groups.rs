use crate::cards::Rank;

/// Groups ranks by their frequency in a card set, sorted by (count desc, rank desc).
///
/// Example: 9 9 9 K K groups as [(Nine, 3), (King, 2)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankGroups {
    groups: Vec<(Rank, u8)>,
}

impl RankGroups {
    /// Create RankGroups from a rank count array indexed by single-play value (1-13).
    pub fn from_counts(rank_counts: &[u8; 14]) -> Self {
        let mut groups = Vec::new();

        for rank in Rank::ALL.iter().copied() {
            let count = rank_counts[rank.single_value() as usize];
            if count > 0 {
                groups.push((rank, count));
            }
        }

        groups.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));

        Self { groups }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// The only rank present and its count, when every card shares one rank.
    pub fn single_rank(&self) -> Option<(Rank, u8)> {
        match self.groups.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    /// Triple and pair ranks when the counts are exactly {3, 2}.
    pub fn full_house(&self) -> Option<(Rank, Rank)> {
        match self.groups.as_slice() {
            [(trips, 3), (pair, 2)] => Some((*trips, *pair)),
            _ => None,
        }
    }

    /// The shared group size when every rank appears the same number of times.
    pub fn uniform_size(&self) -> Option<u8> {
        let first = self.groups.first()?.1;
        self.groups.iter().all(|(_, count)| *count == first).then_some(first)
    }

    /// Whether the ranks form an unbroken sequence in single-play order.
    pub fn is_contiguous(&self) -> bool {
        let mut values: Vec<u8> = self.groups.iter().map(|(r, _)| r.single_value()).collect();
        values.sort_unstable();
        values.windows(2).all(|w| w[1] == w[0] + 1)
    }

    /// Highest rank present in single-play order.
    pub fn highest(&self) -> Option<Rank> {
        self.groups.iter().map(|(r, _)| *r).max()
    }

    #[cfg(test)]
    pub fn groups(&self) -> &[(Rank, u8)] {
        &self.groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_counts(pairs: &[(Rank, u8)]) -> [u8; 14] {
        let mut counts = [0u8; 14];
        for &(rank, count) in pairs {
            counts[rank.single_value() as usize] = count;
        }
        counts
    }

    #[test]
    fn single_rank_group() {
        let groups = RankGroups::from_counts(&make_counts(&[(Rank::Ace, 4)]));
        assert_eq!(groups.single_rank(), Some((Rank::Ace, 4)));
        assert_eq!(groups.full_house(), None);
    }

    #[test]
    fn full_house_counts() {
        let groups = RankGroups::from_counts(&make_counts(&[(Rank::Seven, 2), (Rank::Five, 3)]));
        assert_eq!(groups.full_house(), Some((Rank::Five, Rank::Seven)));
        assert_eq!(groups.uniform_size(), None);
    }

    #[test]
    fn contiguity_follows_single_play_order() {
        // A and 2 are neighbours in single-play order
        let groups = RankGroups::from_counts(&make_counts(&[(Rank::Ace, 2), (Rank::Two, 2)]));
        assert!(groups.is_contiguous());
        assert_eq!(groups.uniform_size(), Some(2));
        assert_eq!(groups.highest(), Some(Rank::Two));

        let gap = RankGroups::from_counts(&make_counts(&[(Rank::Three, 2), (Rank::Five, 2)]));
        assert!(!gap.is_contiguous());
    }

    #[test]
    fn sorting_by_count_then_rank() {
        let groups = RankGroups::from_counts(&make_counts(&[
            (Rank::Four, 1),
            (Rank::King, 1),
            (Rank::Nine, 3),
        ]));
        let ranks: Vec<Rank> = groups.groups().iter().map(|(r, _)| *r).collect();
        assert_eq!(ranks, vec![Rank::Nine, Rank::King, Rank::Four]);
    }
}
