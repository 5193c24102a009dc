use serde::{Deserialize, Serialize};

use crate::domain::{Faction, PlayerId};

/// Terminal result of a game. Produced once, at the death event that decides it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub winner: Faction,
    /// Set when a single independent player takes the game.
    pub solo: Option<PlayerId>,
    pub night: u32,
}
