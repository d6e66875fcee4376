use super::analysis::MeldAnalysis;
use super::MeldKind;

/// Each meld kind knows how to recognise itself and compute its strength.
pub trait MeldDetector {
    fn kind(&self) -> MeldKind;
    /// Strength when the analysed set forms this kind, `None` otherwise.
    fn detect(&self, analysis: &MeldAnalysis) -> Option<u8>;
}

// ============================================================================
// Detector Implementations (in priority order: longest/strongest first)
// ============================================================================

/// Straight Flush Bomb: a run whose cards all share one suit
pub struct StraightFlushBombDetector;

impl MeldDetector for StraightFlushBombDetector {
    fn kind(&self) -> MeldKind {
        MeldKind::StraightFlushBomb
    }

    fn detect(&self, analysis: &MeldAnalysis) -> Option<u8> {
        analysis.suit_info.single_suit?;
        run_strength(analysis)
    }
}

/// Run: five or more consecutive ranks in run order, no jokers
pub struct RunDetector;

impl MeldDetector for RunDetector {
    fn kind(&self) -> MeldKind {
        MeldKind::Run
    }

    fn detect(&self, analysis: &MeldAnalysis) -> Option<u8> {
        run_strength(analysis)
    }
}

fn run_strength(analysis: &MeldAnalysis) -> Option<u8> {
    if analysis.run_info.is_run {
        analysis.run_info.top_value
    } else {
        None
    }
}

/// Quad Bomb: exactly four cards of one rank
pub struct QuadBombDetector;

impl MeldDetector for QuadBombDetector {
    fn kind(&self) -> MeldKind {
        MeldKind::QuadBomb
    }

    fn detect(&self, analysis: &MeldAnalysis) -> Option<u8> {
        same_rank_strength(analysis, 4)
    }
}

/// Full House: a triple plus a pair of another rank; ranked by the triple
pub struct FullHouseDetector;

impl MeldDetector for FullHouseDetector {
    fn kind(&self) -> MeldKind {
        MeldKind::FullHouse
    }

    fn detect(&self, analysis: &MeldAnalysis) -> Option<u8> {
        if analysis.jokers > 0 || analysis.len() != 5 {
            return None;
        }
        let (trips, _pair) = analysis.rank_groups.full_house()?;
        Some(analysis.group_strength(trips))
    }
}

/// Sisters: two or more consecutive ranks, all pairs or all triples
pub struct SistersDetector;

impl MeldDetector for SistersDetector {
    fn kind(&self) -> MeldKind {
        MeldKind::Sisters
    }

    fn detect(&self, analysis: &MeldAnalysis) -> Option<u8> {
        let groups = &analysis.rank_groups;
        if analysis.jokers > 0 || analysis.len() < 4 || groups.len() < 2 {
            return None;
        }
        if !matches!(groups.uniform_size(), Some(2 | 3)) || !groups.is_contiguous() {
            return None;
        }
        groups.highest().map(|r| r.single_value())
    }
}

/// Triple: exactly three cards of one rank
pub struct TripleDetector;

impl MeldDetector for TripleDetector {
    fn kind(&self) -> MeldKind {
        MeldKind::Triple
    }

    fn detect(&self, analysis: &MeldAnalysis) -> Option<u8> {
        same_rank_strength(analysis, 3)
    }
}

/// Pair: exactly two cards of one rank
pub struct PairDetector;

impl MeldDetector for PairDetector {
    fn kind(&self) -> MeldKind {
        MeldKind::Pair
    }

    fn detect(&self, analysis: &MeldAnalysis) -> Option<u8> {
        same_rank_strength(analysis, 2)
    }
}

fn same_rank_strength(analysis: &MeldAnalysis, size: u8) -> Option<u8> {
    if analysis.jokers > 0 || analysis.len() != size as usize {
        return None;
    }
    match analysis.rank_groups.single_rank() {
        Some((rank, count)) if count == size => Some(analysis.group_strength(rank)),
        _ => None,
    }
}

/// Single: any one card, jokers included (fallback)
pub struct SingleDetector;

impl MeldDetector for SingleDetector {
    fn kind(&self) -> MeldKind {
        MeldKind::Single
    }

    fn detect(&self, analysis: &MeldAnalysis) -> Option<u8> {
        match analysis.sorted_cards.as_slice() {
            [only] => Some(only.single_value()),
            _ => None,
        }
    }
}

// ============================================================================
// Static detector list (in priority order)
// ============================================================================

pub const DETECTORS: [&dyn MeldDetector; 8] = [
    &StraightFlushBombDetector,
    &RunDetector,
    &QuadBombDetector,
    &FullHouseDetector,
    &SistersDetector,
    &TripleDetector,
    &PairDetector,
    &SingleDetector,
];
