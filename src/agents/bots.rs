use crate::engine::GameEngine;
use crate::game::{Phase, PlayError, TurnOutcome};
use crate::hand::Hand;
use crate::meld::Meld;
use crate::moves::LegalMoves;
use crate::trick::TrickState;
use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{event, Level};

use super::analysis::{self, Situation, CONSERVE_THRESHOLD};
use super::{AgentKind, PlayerAgent};

/// Bot policy tiers, from random play to situational scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BotTier {
    Basic,
    Heuristic,
    Scored,
}

impl BotTier {
    pub const ALL: [BotTier; 3] = [BotTier::Basic, BotTier::Heuristic, BotTier::Scored];
}

/// Tunables for a bot's play style and randomness.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct BotProfile {
    pub tier: BotTier,
    /// Chance a basic follower passes even when it could play.
    pub pass_probability: f64,
    /// A basic leader picks uniformly among this many weakest melds.
    pub lead_pool: usize,
    /// At or below this many cards a heuristic follower plays its strongest.
    pub few_cards: usize,
    /// Hand strength above which a heuristic follower keeps its bombs.
    pub strong_hand: f64,
    pub rng_seed: Option<u64>,
}

impl BotProfile {
    /// Create a profile with tuned defaults for a tier.
    pub fn for_tier(tier: BotTier) -> Self {
        let (pass_probability, lead_pool, few_cards, strong_hand) = match tier {
            BotTier::Basic => (0.25, 3, 0, 1.0),
            BotTier::Heuristic => (0.0, 1, 3, 0.55),
            BotTier::Scored => (0.0, 1, 4, 0.5),
        };
        Self { tier, pass_probability, lead_pool, few_cards, strong_hand, rng_seed: None }
    }

    /// Set a deterministic RNG seed for reproducible decisions.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }
}

impl Default for BotProfile {
    fn default() -> Self {
        Self::for_tier(BotTier::Heuristic)
    }
}

#[derive(Debug)]
struct BotState {
    rng: StdRng,
}

impl BotState {
    fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(v) => StdRng::seed_from_u64(v),
            None => {
                let mut seed = [0u8; 32];
                rand::rng().fill_bytes(&mut seed);
                StdRng::from_seed(seed)
            }
        };
        Self { rng }
    }
}

#[derive(Debug, Clone)]
struct BotDecision {
    /// `None` passes.
    play: Option<Meld>,
    reason: &'static str,
}

impl BotDecision {
    fn play(meld: &Meld, reason: &'static str) -> Self {
        Self { play: Some(meld.clone()), reason }
    }

    fn pass(reason: &'static str) -> Self {
        Self { play: None, reason }
    }
}

struct BotContext<'a> {
    seat: usize,
    hand: &'a Hand,
    card_counts: &'a [usize],
    is_leader: bool,
}

impl<'a> BotContext<'a> {
    fn new(seat: usize, hand: &'a Hand, trick: &TrickState, card_counts: &'a [usize]) -> Self {
        Self { seat, hand, card_counts, is_leader: trick.is_open() && trick.leader() == seat }
    }
}

struct BotPolicy;

impl BotPolicy {
    fn decide(ctx: &BotContext<'_>, moves: &LegalMoves, profile: &BotProfile, state: &mut BotState) -> BotDecision {
        if moves.is_empty() {
            return BotDecision::pass("no_moves");
        }
        match profile.tier {
            BotTier::Basic => decide_basic(ctx, moves, profile, state),
            BotTier::Heuristic => decide_heuristic(ctx, moves, profile),
            BotTier::Scored => decide_scored(ctx, moves),
        }
    }
}

fn by_cost(moves: &LegalMoves) -> Vec<&Meld> {
    let mut sorted: Vec<&Meld> = moves.iter().collect();
    sorted.sort_by_key(|m| analysis::cost_key(m));
    sorted
}

fn decide_basic(ctx: &BotContext<'_>, moves: &LegalMoves, profile: &BotProfile, state: &mut BotState) -> BotDecision {
    if ctx.is_leader {
        let sorted = by_cost(moves);
        let pool = profile.lead_pool.clamp(1, sorted.len());
        return BotDecision::play(sorted[state.rng.random_range(0..pool)], "lead_weak");
    }
    if state.rng.random::<f64>() < profile.pass_probability {
        return BotDecision::pass("random_pass");
    }
    let pick = state.rng.random_range(0..moves.len());
    match moves.get(pick) {
        Some(m) => BotDecision::play(m, "random_follow"),
        None => BotDecision::pass("no_moves"),
    }
}

fn decide_heuristic(ctx: &BotContext<'_>, moves: &LegalMoves, profile: &BotProfile) -> BotDecision {
    let sorted = by_cost(moves);
    if ctx.is_leader {
        return BotDecision::play(sorted[0], "lead_weakest");
    }
    if ctx.hand.len() <= profile.few_cards {
        let strongest = sorted.iter().max_by_key(|m| (m.is_bomb(), m.strength(), m.len()));
        if let Some(m) = strongest {
            return BotDecision::play(m, "few_cards_strongest");
        }
    }
    // a strong hand keeps its bombs; a weak one spends the cheapest to take the lead
    let strong = analysis::hand_strength(ctx.hand) >= profile.strong_hand;
    let plain = sorted.iter().find(|m| !m.is_bomb());
    let bomb = sorted.iter().find(|m| m.is_bomb());
    match (plain, bomb) {
        (Some(m), _) if strong => BotDecision::play(m, "follow_weakest"),
        (None, Some(_)) if strong => BotDecision::pass("reserve_bomb"),
        (_, Some(b)) => BotDecision::play(b, "bomb"),
        (Some(m), None) => BotDecision::play(m, "follow_weakest"),
        (None, None) => BotDecision::pass("no_moves"),
    }
}

fn decide_scored(ctx: &BotContext<'_>, moves: &LegalMoves) -> BotDecision {
    let situation = Situation::assess(ctx.seat, ctx.hand, ctx.card_counts, ctx.is_leader, moves.as_slice());
    let mut best: Option<(&Meld, f64)> = None;
    for m in moves {
        let s = analysis::score(m, ctx.hand, &situation);
        if best.map_or(true, |(_, b)| s > b) {
            best = Some((m, s));
        }
    }
    let Some((meld, score)) = best else {
        return BotDecision::pass("no_moves");
    };

    event!(
        target: "shedding_rs::bot::scored",
        Level::TRACE,
        seat = ctx.seat,
        cards_left = situation.cards_left,
        min_opponent = situation.min_opponent,
        danger = situation.danger,
        has_bomb = situation.has_bomb,
        holds_distinguished = situation.holds_distinguished,
        best = %meld,
        score,
    );

    if !situation.is_leader && !situation.danger && score < CONSERVE_THRESHOLD {
        return BotDecision::pass("conserve");
    }
    BotDecision::play(meld, if situation.danger { "block" } else { "best_score" })
}

fn log_decision(ctx: &BotContext<'_>, tier: BotTier, moves: &LegalMoves, decision: &BotDecision) {
    if !tracing::enabled!(target: "shedding_rs::bot", Level::DEBUG) {
        return;
    }
    let chosen = decision.play.as_ref().map_or_else(|| "pass".to_string(), |m| m.to_string());
    event!(
        target: "shedding_rs::bot",
        Level::DEBUG,
        seat = ctx.seat,
        tier = ?tier,
        leader = ctx.is_leader,
        hand_size = ctx.hand.len(),
        legal_count = moves.len(),
        chosen = %chosen,
        reason = decision.reason,
    );
}

/// A bot agent driven by a [`BotProfile`].
pub struct BotAgent {
    profile: BotProfile,
    state: BotState,
}

impl BotAgent {
    pub fn new(profile: BotProfile) -> Self {
        let state = BotState::new(profile.rng_seed);
        Self { profile, state }
    }

    pub fn tier(&self) -> BotTier {
        self.profile.tier
    }

    /// Pick a meld from `moves` for `seat`, or `None` to pass. The result is
    /// always a member of `moves`.
    pub fn choose(
        &mut self,
        seat: usize,
        hand: &Hand,
        trick: &TrickState,
        card_counts: &[usize],
        moves: &LegalMoves,
    ) -> Option<Meld> {
        let ctx = BotContext::new(seat, hand, trick, card_counts);
        let decision = BotPolicy::decide(&ctx, moves, &self.profile, &mut self.state);
        log_decision(&ctx, self.profile.tier, moves, &decision);
        decision.play
    }
}

impl PlayerAgent for BotAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Bot
    }

    fn on_turn(&mut self, engine: &mut dyn GameEngine, seat: usize) -> Result<Option<TurnOutcome>, PlayError> {
        if engine.phase() == Phase::RoundOver || engine.current() != seat {
            return Ok(None);
        }
        let Some(hand) = engine.hand(seat) else {
            return Ok(None);
        };
        let moves = engine.legal_moves(seat);
        let counts = engine.card_counts();
        let choice = self.choose(seat, hand, engine.trick(), &counts, &moves);

        let outcome = match choice {
            Some(meld) => engine.play(seat, meld.cards()),
            None => engine.pass(seat),
        };
        outcome.map(Some)
    }
}
