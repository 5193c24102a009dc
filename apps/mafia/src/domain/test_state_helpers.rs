//! Test-only game state builders for unit tests.

use crate::domain::{DeathCause, GameCache, Phase, Player, PlayerId, RoleId};
use crate::roles::catalog;

/// Seat players 1..=n with the given roles, in order, on night 1.
///
/// Handles are `p1`, `p2`, ... Alias holders are appended to their
/// primary's slot in the order given, so list primaries first.
pub fn cache_with_roles(roles: &[RoleId]) -> GameCache {
    let mut cache = GameCache::new(-1000);
    for (i, role_id) in roles.iter().enumerate() {
        let id = i as PlayerId + 1;
        let role = catalog::resolve(*role_id);
        cache
            .players
            .insert(id, Player::new(id, format!("p{id}"), *role_id, role.faction));
        cache.seating.push(id);
        cache.assignment.push(role.slot(), id);
    }
    cache.phase = Phase::Night;
    cache.night = 1;
    cache
}

/// Mark a player dead and drop them from the assignment; returns the slot and index they held.
pub fn kill(cache: &mut GameCache, id: PlayerId, cause: DeathCause) -> (RoleId, usize) {
    let night = cache.night;
    let player = cache.player_mut(id).expect("player is seated");
    player.alive = false;
    player.night_of_death = Some(night);
    player.death_cause = Some(cause);
    cache.assignment.remove(id).expect("player holds a slot")
}
