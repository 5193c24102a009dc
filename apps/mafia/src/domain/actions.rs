use serde::{Deserialize, Serialize};

use crate::domain::{PlayerId, RoleId};

/// What a night actor picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Choice {
    /// Default action against a player (kill, heal, protect, ...).
    Target { player: PlayerId },
    /// Learn a player's displayed role instead of the default action.
    Inspect { player: PlayerId },
    /// Change what a player is shown as.
    Forge { player: PlayerId, shown_as: RoleId },
    /// Kill everyone poisoned so far.
    ReleasePoison,
    /// Explicit "nobody" pick.
    Nobody,
}

/// Variant tag of [`Choice`], used by role descriptors to declare what they accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChoiceKind {
    Target,
    Inspect,
    Forge,
    ReleasePoison,
    Nobody,
}

impl Choice {
    pub fn kind(&self) -> ChoiceKind {
        match self {
            Choice::Target { .. } => ChoiceKind::Target,
            Choice::Inspect { .. } => ChoiceKind::Inspect,
            Choice::Forge { .. } => ChoiceKind::Forge,
            Choice::ReleasePoison => ChoiceKind::ReleasePoison,
            Choice::Nobody => ChoiceKind::Nobody,
        }
    }

    /// Player this choice interacts with, if any.
    pub fn subject(&self) -> Option<PlayerId> {
        match *self {
            Choice::Target { player } | Choice::Inspect { player } | Choice::Forge { player, .. } => {
                Some(player)
            }
            Choice::ReleasePoison | Choice::Nobody => None,
        }
    }
}

/// A pending night submission. `slot` is the primary role the action counts for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NightAction {
    pub actor: PlayerId,
    pub role: RoleId,
    pub slot: RoleId,
    pub choice: Choice,
    pub night: u32,
    /// Arrival order within the night; lower is earlier.
    pub seq: u64,
}

/// Analyst's forecast for the coming vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Prediction {
    Lynch { player: PlayerId },
    NoLynch,
}
