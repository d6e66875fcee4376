use crate::agents::bots::BotTier;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 6;
const DEFAULT_PLAYERS: usize = 4;
const DEFAULT_WIN_THRESHOLD: u32 = 5;

/// Who controls a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatKind {
    Human,
    Bot(BotTier),
}

/// Table setup consumed by [`crate::game::Game::new`] and the session
/// controller.
///
/// ```
/// use shedding_rs::config::GameConfig;
///
/// let cfg = GameConfig::from_json_str(r#"{
///     "player_count": 3,
///     "win_threshold": 2,
///     "seats": [{"bot": "basic"}, {"bot": "heuristic"}, {"bot": "scored"}],
///     "seed": 7
/// }"#).unwrap();
/// assert_eq!(cfg.deck_count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub player_count: usize,
    pub win_threshold: u32,
    pub seats: Vec<SeatKind>,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_count: DEFAULT_PLAYERS,
            win_threshold: DEFAULT_WIN_THRESHOLD,
            seats: vec![
                SeatKind::Human,
                SeatKind::Bot(BotTier::Scored),
                SeatKind::Bot(BotTier::Heuristic),
                SeatKind::Bot(BotTier::Basic),
            ],
            seed: None,
        }
    }
}

impl GameConfig {
    /// Every seat a bot of `tier`.
    pub fn all_bots(player_count: usize, tier: BotTier) -> Self {
        Self { player_count, seats: vec![SeatKind::Bot(tier); player_count], ..Self::default() }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Two decks for six players, one otherwise.
    pub fn deck_count(&self) -> usize {
        if self.player_count >= MAX_PLAYERS {
            2
        } else {
            1
        }
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.player_count) {
            return Err(ValidationError::PlayerCount(self.player_count));
        }
        if self.win_threshold == 0 {
            return Err(ValidationError::InvalidField {
                field: "win_threshold".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if self.seats.len() != self.player_count {
            return Err(ValidationError::SeatCount { expected: self.player_count, got: self.seats.len() });
        }
        Ok(())
    }

    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        let cfg: GameConfig = serde_json::from_str(input).map_err(ConfigError::Parse)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load and validate a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text =
            fs::read_to_string(path).map_err(|source| ConfigError::Read { source, path: path.to_path_buf() })?;
        Self::from_json_str(&text)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(#[from] ValidationError),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    #[error("player count must be {MIN_PLAYERS}-{MAX_PLAYERS}, got {0}")]
    PlayerCount(usize),
    #[error("expected {expected} seats, got {got}")]
    SeatCount { expected: usize, got: usize },
    #[error("invalid field `{field}`: {message}")]
    InvalidField { field: String, message: String },
}
