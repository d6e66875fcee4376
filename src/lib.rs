//! shedding-rs: rules engine for a trick-based shedding card game
//!
//! Goals:
//! - Classify any card set into one of eight meld kinds, with a strength
//! - Enumerate every legal response to the current trick
//! - Drive turns, tricks and rounds as an atomic state machine
//! - Bots in three tiers that always choose from the legal listing
//! - No panics for invalid input; use `Result` for recoverable errors
//!
//! ## Quick start: classify and compare melds
//! ```
//! use shedding_rs::cards::parse_cards;
//! use shedding_rs::meld::{can_beat, Meld, MeldKind};
//!
//! let pair = Meld::from_cards(parse_cards("KC KD").unwrap()).unwrap();
//! let sisters = Meld::from_cards(parse_cards("3H 3D 4H 4C").unwrap()).unwrap();
//! assert_eq!(sisters.kind(), MeldKind::Sisters);
//! assert!(!can_beat(&sisters, &pair));
//! ```
//!
//! ## Playing a round
//! ```
//! use shedding_rs::agents::BotTier;
//! use shedding_rs::config::GameConfig;
//! use shedding_rs::game::{Game, TurnOutcome};
//!
//! let cfg = GameConfig::all_bots(4, BotTier::Basic).with_seed(5);
//! let mut game = Game::new(&cfg).unwrap();
//! game.new_round().unwrap();
//! let seat = game.current();
//! let opening = game.legal_moves(seat).get(0).cloned().unwrap();
//! assert_eq!(game.play(seat, opening.cards()), Ok(TurnOutcome::Continue));
//! ```
//!
//! ## CLI
//! Run an all-bot match with:
//! ```sh
//! cargo run --bin shedding-rs -- --players 4 --threshold 3 --seed 7
//! ```

pub mod agents;
pub mod cards;
pub mod config;
pub mod deck;
pub mod engine;
pub mod game;
pub mod hand;
pub mod meld;
pub mod moves;
pub mod session;
pub mod snapshot;
pub mod trick;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
