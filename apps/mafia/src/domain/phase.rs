use serde::{Deserialize, Serialize};

/// Lifecycle of one game session.
///
/// Lobby -> Night -> NightTally -> Vote -> VoteTally -> Night ... with
/// GameOver reachable from either tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Lobby,
    Night,
    NightTally,
    Vote,
    VoteTally,
    GameOver,
}

impl Phase {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Phase::Lobby => "lobby",
            Phase::Night => "night",
            Phase::NightTally => "night_tally",
            Phase::Vote => "vote",
            Phase::VoteTally => "vote_tally",
            Phase::GameOver => "game_over",
        }
    }

    pub fn can_transition_to(self, next: Phase) -> bool {
        use Phase::*;
        matches!(
            (self, next),
            (Lobby, Night)
                | (Night, NightTally)
                | (NightTally, Vote)
                | (NightTally, GameOver)
                | (Vote, VoteTally)
                | (VoteTally, Night)
                | (VoteTally, GameOver)
        )
    }
}
