//! Agents: pluggable seat controllers (bots, or humans fed by a frontend).
//!
//! `PlayerAgent` acts for one seat through the [`GameEngine`] boundary and
//! `AgentTable` tracks which agent controls which seat, so frontends stay thin
//! and never coordinate bots themselves.

use crate::cards::Card;
use crate::config::{GameConfig, SeatKind};
use crate::engine::GameEngine;
use crate::game::{Phase, PlayError, TurnOutcome};
use core::fmt;

/// Kinds of agents attached to seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AgentKind {
    Human,
    Bot,
}

/// Seat-level intents, typically produced by a frontend for a human player.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Action {
    Play(Vec<Card>),
    /// Play entry `n` of the seat's legal-move listing.
    PlayIndex(usize),
    Pass,
}

/// A seat controller that can act for a player when it is their turn.
pub trait PlayerAgent {
    /// Called when `seat` is the current actor. Returns `None` when the agent
    /// did not act (nothing pending, not its turn, round over).
    fn on_turn(&mut self, engine: &mut dyn GameEngine, seat: usize) -> Result<Option<TurnOutcome>, PlayError>;
    /// The kind of this agent (human, bot, etc.).
    fn kind(&self) -> AgentKind {
        AgentKind::Human
    }
    /// Optionally receive a seat intent; default is to ignore and return false.
    fn receive(&mut self, _action: Action) -> bool {
        false
    }
}

pub(crate) mod analysis;
pub mod bots;

pub use bots::{BotAgent, BotProfile, BotTier};

/// Apply `action` for `seat`.
pub(crate) fn apply(
    engine: &mut dyn GameEngine,
    seat: usize,
    action: Action,
) -> Result<TurnOutcome, PlayError> {
    match action {
        Action::Play(cards) => engine.play(seat, &cards),
        Action::PlayIndex(n) => {
            let moves = engine.legal_moves(seat);
            let meld = moves.get(n).ok_or(PlayError::NoSuchMove(n))?;
            engine.play(seat, meld.cards())
        }
        Action::Pass => engine.pass(seat),
    }
}

/// An agent that executes user-intended actions when it's their turn.
pub struct HumanAgent {
    pending: Option<Action>,
}

impl HumanAgent {
    pub fn new() -> Self {
        Self { pending: None }
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Default for HumanAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerAgent for HumanAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Human
    }
    fn receive(&mut self, action: Action) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(action);
        true
    }
    fn on_turn(&mut self, engine: &mut dyn GameEngine, seat: usize) -> Result<Option<TurnOutcome>, PlayError> {
        if engine.phase() == Phase::RoundOver {
            self.pending = None;
            return Ok(None);
        }
        if engine.current() != seat {
            return Ok(None);
        }
        match self.pending.take() {
            Some(action) => apply(engine, seat, action).map(Some),
            None => Ok(None),
        }
    }
}

/// Manages a set of optional agents, one per seat, and drives the agent at the
/// current seat.
pub struct AgentTable {
    seats: Vec<Option<Box<dyn PlayerAgent>>>,
}

impl fmt::Debug for AgentTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags: String = self
            .seats
            .iter()
            .map(|a| match a.as_deref().map(|ag| ag.kind()) {
                Some(AgentKind::Bot) => 'B',
                Some(AgentKind::Human) => 'H',
                None => '-',
            })
            .collect();
        write!(f, "AgentTable({flags})")
    }
}

impl AgentTable {
    /// Create a table with `n` seats, all empty.
    pub fn for_seats(n: usize) -> Self {
        let mut seats = Vec::with_capacity(n);
        seats.resize_with(n, || None);
        Self { seats }
    }

    /// One agent per configured seat. Bots get per-seat seeds derived from the
    /// config seed so a seeded match is reproducible.
    pub fn from_config(config: &GameConfig) -> Self {
        let mut table = Self::for_seats(config.seats.len());
        for (seat, kind) in config.seats.iter().enumerate() {
            let agent: Box<dyn PlayerAgent> = match *kind {
                SeatKind::Human => Box::new(HumanAgent::new()),
                SeatKind::Bot(tier) => {
                    let mut profile = BotProfile::for_tier(tier);
                    if let Some(seed) = config.seed {
                        profile = profile.with_seed(seed.wrapping_add(seat as u64 + 1));
                    }
                    Box::new(BotAgent::new(profile))
                }
            };
            table.seats[seat] = Some(agent);
        }
        table
    }

    /// Assign an agent to a seat (or remove when `None`).
    pub fn set_agent(&mut self, seat: usize, agent: Option<Box<dyn PlayerAgent>>) {
        if seat >= self.seats.len() {
            self.seats.resize_with(seat + 1, || None);
        }
        self.seats[seat] = agent;
    }

    /// Return the kind of agent at a seat, if any.
    pub fn agent_kind(&self, seat: usize) -> Option<AgentKind> {
        self.seats.get(seat).and_then(|a| a.as_deref().map(|ag| ag.kind()))
    }

    /// Send an action intent to a specific seat agent, if any.
    pub fn receive(&mut self, seat: usize, action: Action) -> bool {
        if let Some(Some(agent)) = self.seats.get_mut(seat) {
            return agent.receive(action);
        }
        false
    }

    /// Whether a seat currently has an agent assigned.
    pub fn has_agent(&self, seat: usize) -> bool {
        self.seats.get(seat).map(|a| a.is_some()).unwrap_or(false)
    }

    /// Whether any non-human (bot) agents are assigned.
    pub fn any_bots(&self) -> bool {
        self.seats.iter().filter_map(|a| a.as_deref()).any(|ag| matches!(ag.kind(), AgentKind::Bot))
    }

    /// Drive the agent assigned to the current seat, if any.
    pub fn on_turn(&mut self, engine: &mut dyn GameEngine) -> Result<Option<TurnOutcome>, PlayError> {
        let seat = engine.current();
        match self.seats.get_mut(seat) {
            Some(Some(agent)) => agent.on_turn(engine, seat),
            _ => Ok(None),
        }
    }

    /// Remove all agents.
    pub fn clear(&mut self) {
        for a in &mut self.seats {
            *a = None;
        }
    }
}
