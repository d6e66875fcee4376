use crate::cards::Card;
use crate::config::{GameConfig, ValidationError};
use crate::deck::{Deck, CARDS_PER_DECK};
use crate::hand::Hand;
use crate::meld::Meld;
use crate::moves::{legal_moves, LegalMoves};
use crate::snapshot::{GameSnapshot, PlayerView, SNAPSHOT_SCHEMA};
use crate::trick::TrickState;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// History entries included in a snapshot.
const SNAPSHOT_HISTORY: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub enum Phase {
    /// Trick is empty; the leader must open with any meld.
    LeadOpen,
    /// A play stands; others beat it or pass.
    FollowOpen,
    /// Between rounds; call [`Game::new_round`].
    RoundOver,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PlayError {
    #[error("not seat {got}'s turn, waiting on seat {expected}")]
    NotYourTurn { expected: usize, got: usize },
    #[error("the round is over")]
    RoundOver,
    #[error("a round is still in progress")]
    RoundInProgress,
    #[error("cards are not all in the player's hand")]
    HandMismatch,
    #[error("cards do not form a recognised combination")]
    Unclassifiable,
    #[error("{0} cannot be played on this trick")]
    IllegalPlay(Meld),
    #[error("the leader must play on an open trick")]
    LeaderMustPlay,
    #[error("no legal move at index {0}")]
    NoSuchMove(usize),
    #[error("game halted: {0}")]
    Halted(InvariantViolation),
}

/// Card accounting broken: the game cannot continue.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvariantViolation {
    #[error("{card} appears {found} times, at most {allowed} allowed")]
    DuplicateCard { card: Card, found: usize, allowed: usize },
    #[error("{found} cards accounted for, deck holds {expected}")]
    CardCount { expected: usize, found: usize },
    #[error("expected {expected} hands, got {got}")]
    HandCount { expected: usize, got: usize },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] ValidationError),
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum HistoryAction {
    Play(Meld),
    Pass,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct HistoryEntry {
    pub seat: usize,
    pub round: u32,
    pub action: HistoryAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundResult {
    pub round: u32,
    pub winner: usize,
    /// Seats still holding cards when the round ended.
    pub losers: Vec<usize>,
}

/// What an accepted action led to.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TurnOutcome {
    /// Turn passed to the next seat.
    Continue,
    /// Everyone else passed; `leader` opens the next trick.
    TrickResolved { leader: usize },
    RoundWon(RoundResult),
}

#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Player {
    pub(crate) name: String,
    pub(crate) hand: Hand,
    pub(crate) wins: u32,
    pub(crate) losses: u32,
}

impl Player {
    fn new(name: String) -> Self {
        Self { name, hand: Hand::default(), wins: 0, losses: 0 }
    }

    /// Returns the player's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the cards the player holds
    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    /// Returns the rounds this player has won
    pub fn wins(&self) -> u32 {
        self.wins
    }

    /// Returns the rounds this player ended holding cards
    pub fn losses(&self) -> u32 {
        self.losses
    }
}

/// Turn, trick and round state for one table.
///
/// A turn is atomic: a rejected `play` or `pass` leaves the game untouched.
#[derive(Debug)]
#[non_exhaustive]
pub struct Game {
    pub(crate) deck_count: usize,
    pub(crate) players: Vec<Player>,
    pub(crate) current: usize,
    pub(crate) trick: TrickState,
    pub(crate) phase: Phase,
    pub(crate) round: u32,
    /// Cards left over after an uneven deal.
    pub(crate) undealt: Vec<Card>,
    /// Cards played this round.
    pub(crate) discards: Vec<Card>,
    pub(crate) last_round: Option<RoundResult>,
    pub(crate) halted: Option<InvariantViolation>,
    pub(crate) revision: u64,
    rng: ChaCha8Rng,
    history: Vec<HistoryEntry>,
}

impl Game {
    /// A table with no cards dealt yet; call [`Game::new_round`] to deal.
    pub fn new(config: &GameConfig) -> Result<Self, ValidationError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => {
                let mut seed = [0u8; 32];
                rand::rng().fill_bytes(&mut seed);
                ChaCha8Rng::from_seed(seed)
            }
        };
        let players = (1..=config.player_count).map(|i| Player::new(format!("P{i}"))).collect();
        Ok(Self {
            deck_count: config.deck_count(),
            players,
            current: 0,
            trick: TrickState::new(0),
            phase: Phase::RoundOver,
            round: 0,
            undealt: Vec::new(),
            discards: Vec::new(),
            last_round: None,
            halted: None,
            revision: 0,
            rng,
            history: Vec::new(),
        })
    }

    /// Start round one from fixed hands instead of a shuffled deal.
    ///
    /// Cards of the deck not in any hand are treated as undealt. Fails if the
    /// hands hold more copies of a card than the deck has.
    pub fn with_hands(config: &GameConfig, hands: Vec<Vec<Card>>) -> Result<Self, SetupError> {
        let mut game = Self::new(config)?;
        if hands.len() != game.players.len() {
            return Err(InvariantViolation::HandCount { expected: game.players.len(), got: hands.len() }.into());
        }

        let mut held: HashMap<Card, usize> = HashMap::new();
        for &c in hands.iter().flatten() {
            *held.entry(c).or_default() += 1;
        }
        if let Some((&card, &found)) = held.iter().find(|&(_, &n)| n > game.deck_count) {
            return Err(InvariantViolation::DuplicateCard { card, found, allowed: game.deck_count }.into());
        }

        let mut undealt = Vec::new();
        for c in Deck::standard(game.deck_count).remaining() {
            match held.get_mut(c) {
                Some(n) if *n > 0 => *n -= 1,
                _ => undealt.push(*c),
            }
        }

        game.start_round(hands, undealt);
        game.check_integrity()?;
        Ok(game)
    }

    /// Returns the number of seats
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Returns how many 54-card decks are in play
    pub fn deck_count(&self) -> usize {
        self.deck_count
    }

    /// Returns a reference to the players
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Returns the hand held by `seat`
    pub fn hand(&self, seat: usize) -> Option<&Hand> {
        self.players.get(seat).map(|p| &p.hand)
    }

    /// Returns the number of cards each seat holds
    pub fn card_counts(&self) -> Vec<usize> {
        self.players.iter().map(|p| p.hand.len()).collect()
    }

    /// Returns the seat whose turn it is
    pub fn current(&self) -> usize {
        self.current
    }

    /// Returns the current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the trick in progress
    pub fn trick(&self) -> &TrickState {
        &self.trick
    }

    /// Returns the round number, starting at 1 once dealt
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Returns the cards left over from the deal
    pub fn undealt(&self) -> &[Card] {
        &self.undealt
    }

    /// Returns the result of the most recently finished round
    pub fn last_round(&self) -> Option<&RoundResult> {
        self.last_round.as_ref()
    }

    /// Returns the violation that halted the game, if any
    pub fn halted(&self) -> Option<&InvariantViolation> {
        self.halted.as_ref()
    }

    /// Returns a counter bumped on every state change
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn history_recent(&self, n: usize) -> Vec<HistoryEntry> {
        if n == 0 {
            return Vec::new();
        }
        let start = self.history.len().saturating_sub(n);
        self.history[start..].to_vec()
    }

    pub fn history_recent_offset(&self, n: usize, offset: usize) -> Vec<HistoryEntry> {
        let len = self.history.len();
        if n == 0 || len == 0 {
            return Vec::new();
        }
        let offset = offset.min(len.saturating_sub(n));
        let end = len.saturating_sub(offset);
        let start = end.saturating_sub(n);
        self.history[start..end].to_vec()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Legal melds for `seat`; empty unless it is that seat's turn.
    pub fn legal_moves(&self, seat: usize) -> LegalMoves {
        if self.ensure_can_act(seat).is_err() {
            return LegalMoves::default();
        }
        legal_moves(&self.players[seat].hand, &self.trick, seat == self.trick.leader())
    }

    /// Shuffle and deal a new round.
    ///
    /// Round one is led by whoever holds the starter card (seat 0 if nobody
    /// does); later rounds by the previous round's winner.
    pub fn new_round(&mut self) -> Result<(), PlayError> {
        if let Some(v) = &self.halted {
            return Err(PlayError::Halted(v.clone()));
        }
        if self.phase != Phase::RoundOver {
            return Err(PlayError::RoundInProgress);
        }
        let mut deck = Deck::standard(self.deck_count);
        deck.shuffle_seeded(self.rng.random());
        let hands = deck.deal(self.players.len());
        self.start_round(hands, deck.remaining().to_vec());
        self.check_integrity()?;
        Ok(())
    }

    fn start_round(&mut self, hands: Vec<Vec<Card>>, undealt: Vec<Card>) {
        for (player, cards) in self.players.iter_mut().zip(hands) {
            player.hand = Hand::new(cards);
        }
        self.undealt = undealt;
        self.discards.clear();
        self.round += 1;

        let leader = match &self.last_round {
            Some(result) => result.winner,
            None => self.players.iter().position(|p| p.hand.contains(Card::STARTER)).unwrap_or(0),
        };
        self.trick = TrickState::new(leader);
        self.current = leader;
        self.phase = Phase::LeadOpen;
        self.revision += 1;
        info!(round = self.round, leader, "round dealt");
    }

    fn ensure_can_act(&self, seat: usize) -> Result<(), PlayError> {
        if let Some(v) = &self.halted {
            return Err(PlayError::Halted(v.clone()));
        }
        if self.phase == Phase::RoundOver {
            return Err(PlayError::RoundOver);
        }
        if seat != self.current {
            return Err(PlayError::NotYourTurn { expected: self.current, got: seat });
        }
        Ok(())
    }

    /// Play `cards` from `seat`'s hand. The meld must appear in
    /// [`Game::legal_moves`] for that seat.
    pub fn play(&mut self, seat: usize, cards: &[Card]) -> Result<TurnOutcome, PlayError> {
        self.ensure_can_act(seat)?;
        if !self.players[seat].hand.contains_all(cards) {
            return Err(PlayError::HandMismatch);
        }
        let meld = Meld::from_cards(cards.to_vec()).ok_or(PlayError::Unclassifiable)?;
        if !self.legal_moves(seat).contains(&meld) {
            return Err(PlayError::IllegalPlay(meld));
        }
        self.players[seat].hand.remove_all(meld.cards()).map_err(|_| PlayError::HandMismatch)?;

        debug!(seat, round = self.round, meld = %meld, "play");
        self.discards.extend_from_slice(meld.cards());
        self.record_history(seat, HistoryAction::Play(meld.clone()));
        self.trick.record_play(seat, meld);
        self.revision += 1;
        self.check_integrity()?;

        if self.players[seat].hand.is_empty() {
            return Ok(TurnOutcome::RoundWon(self.finish_round(seat)));
        }
        self.phase = Phase::FollowOpen;
        self.current = self.next_seat(seat);
        Ok(TurnOutcome::Continue)
    }

    /// Pass on the standing play.
    pub fn pass(&mut self, seat: usize) -> Result<TurnOutcome, PlayError> {
        self.ensure_can_act(seat)?;
        if self.trick.is_open() {
            return Err(PlayError::LeaderMustPlay);
        }

        debug!(seat, round = self.round, "pass");
        self.record_history(seat, HistoryAction::Pass);
        self.revision += 1;

        match self.trick.record_pass(self.players.len()) {
            Some(leader) => {
                info!(leader, round = self.round, "trick resolved");
                self.current = leader;
                self.phase = Phase::LeadOpen;
                Ok(TurnOutcome::TrickResolved { leader })
            }
            None => {
                self.current = self.next_seat(seat);
                Ok(TurnOutcome::Continue)
            }
        }
    }

    fn next_seat(&self, seat: usize) -> usize {
        (seat + 1) % self.players.len()
    }

    fn finish_round(&mut self, winner: usize) -> RoundResult {
        let mut losers = Vec::new();
        for (seat, player) in self.players.iter_mut().enumerate() {
            if seat == winner {
                player.wins += 1;
            } else if !player.hand.is_empty() {
                player.losses += 1;
                losers.push(seat);
            }
        }
        let result = RoundResult { round: self.round, winner, losers };
        info!(round = self.round, winner, "round won");
        self.phase = Phase::RoundOver;
        self.current = winner;
        self.trick = TrickState::new(winner);
        self.last_round = Some(result.clone());
        result
    }

    /// Every physical card is in exactly one place: a hand, the discards or
    /// the undealt remainder.
    fn check_integrity(&mut self) -> Result<(), InvariantViolation> {
        if let Err(violation) = self.audit_cards() {
            warn!(%violation, round = self.round, "halting game");
            self.halted = Some(violation.clone());
            return Err(violation);
        }
        Ok(())
    }

    fn audit_cards(&self) -> Result<(), InvariantViolation> {
        let mut counts: HashMap<Card, usize> = HashMap::new();
        let all = self
            .players
            .iter()
            .flat_map(|p| p.hand.as_slice())
            .chain(&self.discards)
            .chain(&self.undealt);
        let mut found = 0;
        for &c in all {
            found += 1;
            let n = counts.entry(c).or_default();
            *n += 1;
            if *n > self.deck_count {
                return Err(InvariantViolation::DuplicateCard { card: c, found: *n, allowed: self.deck_count });
            }
        }
        let expected = CARDS_PER_DECK * self.deck_count;
        if found != expected {
            return Err(InvariantViolation::CardCount { expected, found });
        }
        Ok(())
    }

    fn record_history(&mut self, seat: usize, action: HistoryAction) {
        self.history.push(HistoryEntry { seat, round: self.round, action });
    }

    /// Read-only view for rendering. Only `viewer`'s hand is revealed.
    pub fn snapshot(&self, viewer: Option<usize>) -> GameSnapshot {
        let players = self
            .players
            .iter()
            .enumerate()
            .map(|(seat, p)| PlayerView {
                name: p.name.clone(),
                card_count: p.hand.len(),
                wins: p.wins,
                losses: p.losses,
                hand: (viewer == Some(seat)).then(|| p.hand.as_slice().to_vec()),
            })
            .collect();
        GameSnapshot {
            schema: SNAPSHOT_SCHEMA,
            revision: self.revision,
            round: self.round,
            phase: self.phase,
            current: self.current,
            trick: self.trick.clone(),
            players,
            recent: self.history_recent(SNAPSHOT_HISTORY),
            last_round: self.last_round.clone(),
            halted: self.halted.is_some(),
        }
    }
}

impl From<InvariantViolation> for PlayError {
    fn from(v: InvariantViolation) -> Self {
        PlayError::Halted(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::bots::BotTier;
    use crate::cards::parse_cards;
    use crate::meld::MeldKind;

    fn mk_game(hands: &[&str]) -> Game {
        let cfg = GameConfig::all_bots(hands.len(), BotTier::Basic);
        let hands = hands.iter().map(|h| parse_cards(h).unwrap()).collect();
        Game::with_hands(&cfg, hands).unwrap()
    }

    fn cards(s: &str) -> Vec<Card> {
        parse_cards(s).unwrap()
    }

    #[test]
    fn starter_holder_leads_round_one() {
        let g = mk_game(&["4C 5C", "3D 6C", "7C 8C"]);
        assert_eq!(g.current(), 1);
        assert_eq!(g.phase(), Phase::LeadOpen);
        assert_eq!(g.round(), 1);
    }

    #[test]
    fn seat_zero_leads_without_starter() {
        let g = mk_game(&["4C 5C", "6C", "7C 8C"]);
        assert_eq!(g.current(), 0);
    }

    #[test]
    fn rejected_actions_leave_state_untouched() {
        let mut g = mk_game(&["3D 4C 4D", "6C 9C", "7C 8C"]);
        let rev = g.revision();
        assert_eq!(g.play(1, &cards("6C")), Err(PlayError::NotYourTurn { expected: 0, got: 1 }));
        assert_eq!(g.play(0, &cards("KD")), Err(PlayError::HandMismatch));
        assert_eq!(g.play(0, &cards("3D 4C")), Err(PlayError::Unclassifiable));
        assert_eq!(g.pass(0), Err(PlayError::LeaderMustPlay));
        assert_eq!(g.revision(), rev);
        assert_eq!(g.hand(0).unwrap().len(), 3);
        assert_eq!(g.history_len(), 0);
    }

    #[test]
    fn illegal_follow_is_rejected() {
        let mut g = mk_game(&["3D 9C", "6C 7D", "7C 8C"]);
        g.play(0, &cards("9C")).unwrap();
        let err = g.play(1, &cards("6C")).unwrap_err();
        assert!(matches!(err, PlayError::IllegalPlay(ref m) if m.kind() == MeldKind::Single));
        assert_eq!(g.current(), 1);
    }

    #[test]
    fn trick_resolves_to_last_player() {
        let mut g = mk_game(&["3D 4C", "6C 7D", "7C 8C"]);
        g.play(0, &cards("4C")).unwrap();
        g.play(1, &cards("6C")).unwrap();
        assert_eq!(g.pass(2), Ok(TurnOutcome::Continue));
        assert_eq!(g.pass(0), Ok(TurnOutcome::TrickResolved { leader: 1 }));
        assert_eq!(g.current(), 1);
        assert!(g.trick().is_open());
        assert_eq!(g.phase(), Phase::LeadOpen);
    }

    #[test]
    fn emptying_a_hand_wins_the_round() {
        let mut g = mk_game(&["3D", "6C 7D", "7C 8C"]);
        let outcome = g.play(0, &cards("3D")).unwrap();
        let expected = RoundResult { round: 1, winner: 0, losers: vec![1, 2] };
        assert_eq!(outcome, TurnOutcome::RoundWon(expected));
        assert_eq!(g.phase(), Phase::RoundOver);
        assert_eq!(g.players()[0].wins(), 1);
        assert_eq!(g.players()[1].losses(), 1);
        assert_eq!(g.play(1, &cards("6C")), Err(PlayError::RoundOver));
    }

    #[test]
    fn winner_leads_the_next_round() {
        let mut g = mk_game(&["3D", "6C 7D", "7C 8C"]);
        assert_eq!(g.new_round(), Err(PlayError::RoundInProgress));
        g.play(0, &cards("3D")).unwrap();
        g.new_round().unwrap();
        assert_eq!(g.round(), 2);
        assert_eq!(g.current(), 0);
        assert_eq!(g.card_counts(), vec![18, 18, 18]);
    }

    #[test]
    fn duplicate_cards_are_rejected_at_setup() {
        let cfg = GameConfig::all_bots(2, BotTier::Basic);
        let err = Game::with_hands(&cfg, vec![cards("3D 4C"), cards("4C")]).unwrap_err();
        assert!(matches!(err, SetupError::Invariant(InvariantViolation::DuplicateCard { .. })));
    }

    #[test]
    fn corrupted_accounting_halts_the_game() {
        let mut g = mk_game(&["3D 4C", "6C 7D"]);
        g.discards.push(Card::BIG_JOKER);
        let err = g.play(0, &cards("3D")).unwrap_err();
        assert!(matches!(err, PlayError::Halted(_)));
        assert!(g.halted().is_some());
        assert!(matches!(g.pass(1), Err(PlayError::Halted(_))));
        assert!(g.legal_moves(1).is_empty());
    }

    #[test]
    fn history_pages_from_the_end() {
        let mut g = mk_game(&["3D 4C", "6C 7D", "7C 8C"]);
        g.play(0, &cards("4C")).unwrap();
        g.pass(1).unwrap();
        g.pass(2).unwrap();
        assert_eq!(g.history_len(), 3);
        let recent = g.history_recent(2);
        assert_eq!(recent[0].seat, 1);
        assert_eq!(recent[1].action, HistoryAction::Pass);
        let older = g.history_recent_offset(1, 2);
        assert!(matches!(older[0].action, HistoryAction::Play(_)));
    }

    #[test]
    fn snapshot_hides_other_hands() {
        let g = mk_game(&["3D 4C", "6C 7D"]);
        let snap = g.snapshot(Some(1));
        assert_eq!(snap.players[0].hand, None);
        assert_eq!(snap.players[1].hand.as_deref(), Some(&cards("6C 7D")[..]));
        assert_eq!(snap.players[0].card_count, 2);
        assert_eq!(snap.revision, g.revision());
    }
}
