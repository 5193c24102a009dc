//! Terminal-state detection, run after every death event.

use crate::domain::{Faction, GameCache, Outcome, RoleId};

/// Checked in order:
/// 1. a living killer with at most one other living player wins alone;
/// 2. no living criminals: civilians win (this also covers an empty table);
/// 3. no living non-criminals: criminals win.
pub fn evaluate(game: &GameCache) -> Option<Outcome> {
    let living = game.living();
    let night = game.night;
    if living.len() <= 2 {
        let killer = living
            .iter()
            .copied()
            .find(|id| game.player(*id).is_some_and(|p| p.role == RoleId::Killer));
        if let Some(killer) = killer {
            return Some(Outcome {
                winner: Faction::Other,
                solo: Some(killer),
                night,
            });
        }
    }
    let criminals = game.living_in(Faction::Criminals).len();
    if criminals == 0 {
        return Some(Outcome {
            winner: Faction::Civilians,
            solo: None,
            night,
        });
    }
    if criminals == living.len() {
        return Some(Outcome {
            winner: Faction::Criminals,
            solo: None,
            night,
        });
    }
    None
}
