//! Match control: alternates agents and the state machine, restarting rounds
//! until a seat reaches the win threshold.

use crate::agents::AgentTable;
use crate::config::{GameConfig, ValidationError};
use crate::game::{Game, Phase, PlayError, TurnOutcome};
use serde::Serialize;
use tracing::info;

/// A round that runs this many turns without ending is treated as stuck.
const MAX_TURNS_PER_ROUND: u64 = 20_000;

/// When a match is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchPolicy {
    pub win_threshold: u32,
}

impl MatchPolicy {
    /// The first seat with at least `win_threshold` round wins.
    pub fn winner(&self, game: &Game) -> Option<usize> {
        game.players().iter().position(|p| p.wins() >= self.win_threshold)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchSummary {
    pub winner: usize,
    pub rounds: u32,
    pub turns: u64,
    pub wins: Vec<u32>,
    pub losses: Vec<u32>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    Play(#[from] PlayError),
    #[error("seat {seat} has no action to take")]
    AwaitingInput { seat: usize },
    #[error("round {round} made no progress after {turns} turns")]
    Stalled { round: u32, turns: u64 },
}

#[derive(Debug)]
pub struct Session {
    game: Game,
    agents: AgentTable,
    policy: MatchPolicy,
    turns: u64,
    round_turns: u64,
}

impl Session {
    pub fn new(config: &GameConfig) -> Result<Self, ValidationError> {
        let game = Game::new(config)?;
        let agents = AgentTable::from_config(config);
        Ok(Self::from_parts(game, agents, MatchPolicy { win_threshold: config.win_threshold }))
    }

    pub fn from_parts(game: Game, agents: AgentTable, policy: MatchPolicy) -> Self {
        Self { game, agents, policy, turns: 0, round_turns: 0 }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn agents_mut(&mut self) -> &mut AgentTable {
        &mut self.agents
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// Returns the match winner once the policy is satisfied
    pub fn winner(&self) -> Option<usize> {
        self.policy.winner(&self.game)
    }

    /// Advance by one action: deal if between rounds, otherwise let the
    /// current seat's agent act. `Ok(None)` means nothing happened (match over
    /// or the current agent is waiting for input).
    pub fn step(&mut self) -> Result<Option<TurnOutcome>, SessionError> {
        if self.winner().is_some() {
            return Ok(None);
        }
        if self.game.phase() == Phase::RoundOver {
            self.game.new_round()?;
            self.round_turns = 0;
        }
        let outcome = self.agents.on_turn(&mut self.game)?;
        if outcome.is_some() {
            self.turns += 1;
            self.round_turns += 1;
        }
        if let Some(TurnOutcome::RoundWon(result)) = &outcome {
            info!(round = result.round, winner = result.winner, "round finished");
        }
        Ok(outcome)
    }

    /// Drive the match until the policy names a winner.
    pub fn run_to_completion(&mut self) -> Result<MatchSummary, SessionError> {
        loop {
            if let Some(winner) = self.winner() {
                info!(winner, rounds = self.game.round(), turns = self.turns, "match over");
                return Ok(self.summary(winner));
            }
            if self.step()?.is_none() {
                return Err(SessionError::AwaitingInput { seat: self.game.current() });
            }
            if self.round_turns >= MAX_TURNS_PER_ROUND {
                return Err(SessionError::Stalled { round: self.game.round(), turns: self.round_turns });
            }
        }
    }

    fn summary(&self, winner: usize) -> MatchSummary {
        let players = self.game.players();
        MatchSummary {
            winner,
            rounds: self.game.round(),
            turns: self.turns,
            wins: players.iter().map(|p| p.wins()).collect(),
            losses: players.iter().map(|p| p.losses()).collect(),
        }
    }
}
