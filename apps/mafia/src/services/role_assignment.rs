//! Seeded role dealing.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::domain::{Faction, GameCache, Outbox, Player, PlayerId, RoleId};
use crate::error::GameError;
use crate::roles::catalog;

/// Deal order. Seats beyond its length are civilians.
pub const DEFAULT_ROLE_ORDER: &[RoleId] = &[
    RoleId::Don,
    RoleId::Doctor,
    RoleId::Civilian,
    RoleId::Policeman,
    RoleId::Mafia,
    RoleId::Masochist,
    RoleId::Bodyguard,
    RoleId::Traitor,
    RoleId::Punisher,
    RoleId::Agent,
    RoleId::Lawyer,
    RoleId::Poisoner,
    RoleId::Journalist,
    RoleId::Prosecutor,
    RoleId::Killer,
    RoleId::Analyst,
    RoleId::Forger,
    RoleId::AngelOfDeath,
    RoleId::Nurse,
    RoleId::General,
    RoleId::PrimeMinister,
    RoleId::SuicideBomber,
    RoleId::Mafia,
];

/// Roles for `count` seats: the prefix of `order`, padded with civilians.
///
/// An alias listed before its primary is an error.
pub fn roles_for(count: usize, order: &[RoleId]) -> Result<Vec<RoleId>, GameError> {
    let mut roles: Vec<RoleId> = order.iter().copied().take(count).collect();
    for (i, role) in roles.iter().enumerate() {
        if let Some(primary) = catalog::resolve(*role).alias_of {
            if !roles[..i].contains(&primary) {
                return Err(GameError::InvalidRoster {
                    detail: format!("{role} is dealt before its primary {primary}"),
                });
            }
        }
    }
    roles.resize(count, RoleId::Civilian);
    Ok(roles)
}

/// Seat the roster, deal roles with a seeded shuffle and fill the assignment.
///
/// The same seed and roster always produce the same deal.
pub fn assign_roles(
    game: &mut GameCache,
    roster: &[(PlayerId, String)],
    order: &[RoleId],
    seed: u64,
) -> Result<(), GameError> {
    let roles = roles_for(roster.len(), order)?;
    let mut seats: Vec<usize> = (0..roster.len()).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    seats.shuffle(&mut rng);

    game.players.clear();
    game.seating = roster.iter().map(|(id, _)| *id).collect();
    // Roles are dealt in order so primaries land in their slot before aliases.
    for (role_id, seat) in roles.iter().zip(seats) {
        let (id, handle) = &roster[seat];
        let role = catalog::resolve(*role_id);
        game.players
            .insert(*id, Player::new(*id, handle.clone(), *role_id, role.faction));
        game.assignment.push(role.slot(), *id);
        debug!(player_id = *id, role = %role_id, "Role dealt");
    }
    Ok(())
}

/// Private role cards plus the list of teammates for shared slots and criminals.
pub fn familiarize(game: &GameCache) -> Outbox {
    let mut outbox = Outbox::default();
    for id in &game.seating {
        let Some(player) = game.player(*id) else {
            continue;
        };
        let role = catalog::resolve(player.role);
        outbox.private(*id, format!("Your role: {}. {}", role.name, role.purpose));
    }
    for (slot, holders) in game.assignment.slots() {
        let role = catalog::resolve(*slot);
        if holders.len() < 2 || role.faction == Faction::Criminals {
            continue;
        }
        let names: Vec<String> = holders.iter().map(|id| describe_holder(game, *id)).collect();
        let text = format!("Your team ({}): {}", role.name, names.join(", "));
        for id in holders {
            outbox.private(*id, text.clone());
        }
    }
    let criminals = game.living_in(Faction::Criminals);
    if criminals.len() > 1 {
        let names: Vec<String> = criminals.iter().map(|id| describe_holder(game, *id)).collect();
        let text = format!("The family: {}", names.join(", "));
        for id in &criminals {
            outbox.private(*id, text.clone());
        }
    }
    outbox
}

fn describe_holder(game: &GameCache, id: PlayerId) -> String {
    match game.player(id) {
        Some(p) => format!("@{} - {}", p.handle, catalog::resolve(p.role).name),
        None => format!("#{id}"),
    }
}
