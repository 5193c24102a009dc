use serde::{Deserialize, Serialize};

/// Alignment group used for win-condition evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Faction {
    Criminals,
    Civilians,
    /// Roles whose goal is independent of both teams.
    Other,
}

impl Faction {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Faction::Criminals => "criminals",
            Faction::Civilians => "civilians",
            Faction::Other => "other",
        }
    }
}
