use std::env;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{Faction, RoleId};
use crate::error::GameError;

/// Per-faction victory payments. Scaled by how many full minimum tables were seated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardRules {
    pub criminals_victory: i64,
    pub civilians_victory: i64,
    pub other_victory: i64,
    /// Table size the victory payment is multiplied by.
    pub min_players: usize,
}

impl Default for RewardRules {
    fn default() -> Self {
        Self {
            criminals_victory: 30,
            civilians_victory: 20,
            other_victory: 40,
            min_players: 4,
        }
    }
}

impl RewardRules {
    pub fn victory_payment(&self, faction: Faction, players: usize) -> i64 {
        let base = match faction {
            Faction::Criminals => self.criminals_victory,
            Faction::Civilians => self.civilians_victory,
            Faction::Other => self.other_victory,
        };
        let tables = players.checked_div(self.min_players).unwrap_or(0) as i64;
        base * tables
    }
}

/// Session configuration. Unknown JSON keys are kept in `custom`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub night_window_secs: u64,
    pub vote_window_secs: u64,
    pub min_players: usize,
    /// Consecutive unanswered windows before a player is dropped.
    pub max_missed_windows: u32,
    pub seed: Option<u64>,
    /// Deal order; players beyond its length become civilians.
    pub role_order: Option<Vec<RoleId>>,
    pub rewards: RewardRules,
    #[serde(flatten)]
    pub custom: Map<String, Value>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            night_window_secs: 35,
            vote_window_secs: 30,
            min_players: 4,
            max_missed_windows: 2,
            seed: None,
            role_order: None,
            rewards: RewardRules::default(),
            custom: Map::new(),
        }
    }
}

impl GameSettings {
    /// Defaults overridden by `MAFIA_*` environment variables.
    pub fn from_env() -> Result<Self, GameError> {
        let mut settings = Self::default();
        if let Some(v) = parsed("MAFIA_NIGHT_SECS")? {
            settings.night_window_secs = v;
        }
        if let Some(v) = parsed("MAFIA_VOTE_SECS")? {
            settings.vote_window_secs = v;
        }
        if let Some(v) = parsed("MAFIA_MIN_PLAYERS")? {
            settings.min_players = v;
            settings.rewards.min_players = v;
        }
        if let Some(v) = parsed("MAFIA_MAX_MISSED")? {
            settings.max_missed_windows = v;
        }
        settings.seed = parsed("MAFIA_SEED")?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_json(raw: &str) -> Result<Self, GameError> {
        let settings: Self = serde_json::from_str(raw)
            .map_err(|e| GameError::config(format!("invalid game settings: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.min_players < 2 {
            return Err(GameError::config(format!(
                "min_players must be at least 2, got {}",
                self.min_players
            )));
        }
        if self.max_missed_windows == 0 {
            return Err(GameError::config("max_missed_windows must be positive"));
        }
        if self.rewards.min_players == 0 {
            return Err(GameError::config("rewards.min_players must be positive"));
        }
        Ok(())
    }

    pub fn night_window(&self) -> Duration {
        Duration::from_secs(self.night_window_secs)
    }

    pub fn vote_window(&self) -> Duration {
        Duration::from_secs(self.vote_window_secs)
    }
}

fn parsed<T: FromStr>(key: &str) -> Result<Option<T>, GameError>
where
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| GameError::config(format!("{key}={raw:?}: {e}"))),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
