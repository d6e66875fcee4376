//! Owned, read-only views of a game for renderers.

use crate::cards::Card;
use crate::game::{HistoryEntry, Phase, RoundResult};
use crate::trick::TrickState;
use serde::Serialize;

/// Bumped whenever the snapshot layout changes.
pub const SNAPSHOT_SCHEMA: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerView {
    pub name: String,
    pub card_count: usize,
    pub wins: u32,
    pub losses: u32,
    /// Present only for the viewing seat.
    pub hand: Option<Vec<Card>>,
}

/// Point-in-time copy of the table, built by [`crate::game::Game::snapshot`].
///
/// `revision` increases with every accepted change, so a renderer can skip
/// redraws when it has not moved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub schema: u32,
    pub revision: u64,
    pub round: u32,
    pub phase: Phase,
    pub current: usize,
    pub trick: TrickState,
    pub players: Vec<PlayerView>,
    pub recent: Vec<HistoryEntry>,
    pub last_round: Option<RoundResult>,
    pub halted: bool,
}

impl GameSnapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Whether `other` is a newer view of the same table.
    pub fn is_newer(&self, other: &GameSnapshot) -> bool {
        other.revision > self.revision
    }
}
