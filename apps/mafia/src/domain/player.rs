use serde::{Deserialize, Serialize};

use crate::domain::{Faction, RoleId};

pub type PlayerId = i64;
pub type ChatId = i64;

/// How a player left the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathCause {
    Night,
    Vote,
    /// Removed for inactivity.
    Dropout,
}

/// One line of a player's running score sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub message: String,
    pub delta: i64,
}

/// A seated participant. Never removed from the cache; death only flips `alive`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub handle: String,
    pub faction: Faction,
    /// Current role; changes on alias promotion.
    pub role: RoleId,
    /// Role dealt at assignment, used for scoring.
    pub initial_role: RoleId,
    /// Role shown to others (inspections, end-game roll call). Forging edits this only.
    pub displayed_role: RoleId,
    pub alive: bool,
    pub money: i64,
    pub achievements: Vec<Achievement>,
    pub night_of_death: Option<u32>,
    pub death_cause: Option<DeathCause>,
    pub dropped_out: bool,
}

impl Player {
    pub fn new(id: PlayerId, handle: impl Into<String>, role: RoleId, faction: Faction) -> Self {
        Self {
            id,
            handle: handle.into(),
            faction,
            role,
            initial_role: role,
            displayed_role: role,
            alive: true,
            money: 0,
            achievements: Vec::new(),
            night_of_death: None,
            death_cause: None,
            dropped_out: false,
        }
    }

    /// Credit `delta` and log it on the score sheet.
    pub fn credit(&mut self, delta: i64, message: impl Into<String>) {
        self.money += delta;
        self.achievements.push(Achievement {
            message: message.into(),
            delta,
        });
    }
}
