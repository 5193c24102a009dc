//! Applying a death to the game state, shared by night, vote and drop-out handling.

use tracing::{debug, warn};

use crate::domain::{DeathCause, GameCache, Outbox, PlayerId};
use crate::roles::{catalog, DeathContext};

/// Mark `dead` as dead, release their slot, and run their role's death hook.
///
/// Returns false when the player was already dead or is unknown.
pub fn apply_death(game: &mut GameCache, dead: PlayerId, cause: DeathCause, outbox: &mut Outbox) -> bool {
    let night = game.night;
    let Some(player) = game.player_mut(dead) else {
        warn!(player_id = dead, "Death for unknown player ignored");
        return false;
    };
    if !player.alive {
        return false;
    }
    player.alive = false;
    player.night_of_death = Some(night);
    player.death_cause = Some(cause);
    if cause == DeathCause::Dropout {
        player.dropped_out = true;
    }
    let role = catalog::resolve(player.role);
    game.pending.remove(&dead);
    game.ballots.remove(&dead);
    game.poisoned.retain(|id| *id != dead);

    let Some((slot, index)) = game.assignment.remove(dead) else {
        return true;
    };
    debug!(player_id = dead, role = %role.id, ?cause, night, "Player died");

    let Some(hook) = role.on_death else {
        return true;
    };
    let outcome = hook(&DeathContext {
        game: &*game,
        role,
        dead,
        slot,
        index,
        cause,
    });
    if outcome.solo_win {
        game.solo_winners.insert(dead);
    }
    if let Some(successor) = outcome.promoted {
        if let Some(p) = game.player_mut(successor) {
            p.role = slot;
            p.displayed_role = slot;
            debug!(player_id = successor, role = %slot, "Alias promoted");
        }
    }
    for (recipient, text) in outcome.notices {
        outbox.private(recipient, text);
    }
    true
}
