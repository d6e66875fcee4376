// Engine boundary agents and frontends drive. It exposes turn actions and the
// queries a decision needs, so controllers never reach into `Game` internals.
// Implemented for the core `Game` type.

use crate::cards::Card;
use crate::game::{Game, Phase, PlayError, TurnOutcome};
use crate::hand::Hand;
use crate::moves::LegalMoves;
use crate::snapshot::GameSnapshot;
use crate::trick::TrickState;

pub trait GameEngine {
    // Round lifecycle
    fn new_round(&mut self) -> Result<(), PlayError>;

    // Player actions
    fn play(&mut self, seat: usize, cards: &[Card]) -> Result<TurnOutcome, PlayError>;
    fn pass(&mut self, seat: usize) -> Result<TurnOutcome, PlayError>;

    // Queries
    fn legal_moves(&self, seat: usize) -> LegalMoves;
    fn hand(&self, seat: usize) -> Option<&Hand>;
    fn trick(&self) -> &TrickState;
    fn card_counts(&self) -> Vec<usize>;
    fn current(&self) -> usize;
    fn phase(&self) -> Phase;
    fn num_players(&self) -> usize;
    fn snapshot(&self, viewer: Option<usize>) -> GameSnapshot;
}

impl GameEngine for Game {
    fn new_round(&mut self) -> Result<(), PlayError> {
        self.new_round()
    }

    fn play(&mut self, seat: usize, cards: &[Card]) -> Result<TurnOutcome, PlayError> {
        self.play(seat, cards)
    }
    fn pass(&mut self, seat: usize) -> Result<TurnOutcome, PlayError> {
        self.pass(seat)
    }

    fn legal_moves(&self, seat: usize) -> LegalMoves {
        self.legal_moves(seat)
    }
    fn hand(&self, seat: usize) -> Option<&Hand> {
        self.hand(seat)
    }
    fn trick(&self) -> &TrickState {
        &self.trick
    }
    fn card_counts(&self) -> Vec<usize> {
        self.card_counts()
    }
    fn current(&self) -> usize {
        self.current
    }
    fn phase(&self) -> Phase {
        self.phase
    }
    fn num_players(&self) -> usize {
        self.players.len()
    }
    fn snapshot(&self, viewer: Option<usize>) -> GameSnapshot {
        self.snapshot(viewer)
    }
}
