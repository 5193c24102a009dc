//! Validation and storage of night submissions and day ballots.
//!
//! Pure over `GameCache`; the session wraps these calls with locking and persistence.

use tracing::debug;

use crate::domain::{Choice, ChoiceKind, GameCache, NightAction, Phase, PlayerId, RoleId, Visit};
use crate::error::GameError;
use crate::errors::{Rejection, RejectionKind};
use crate::roles::{catalog, Actors, Role};

/// Receipt for an accepted submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accepted {
    pub night: u32,
    pub seq: u64,
    /// An earlier submission by the same actor was overwritten.
    pub replaced: bool,
}

fn reject(kind: RejectionKind, detail: impl Into<String>) -> GameError {
    Rejection::new(kind, detail).into()
}

/// Refuse a request unless `phase` is the open window.
pub fn require_phase(game: &GameCache, phase: Phase) -> Result<(), GameError> {
    if game.phase == phase {
        return Ok(());
    }
    Err(reject(
        RejectionKind::PhaseMismatch,
        format!("expected {phase:?}, game is in {:?}", game.phase),
    ))
}

/// Record a night action, replacing any earlier one by the same actor.
///
/// A rejected submission leaves the previous one in place.
pub fn submit(
    game: &mut GameCache,
    night: u32,
    actor: PlayerId,
    role: RoleId,
    choice: Choice,
) -> Result<Accepted, GameError> {
    if game.phase != Phase::Night || night != game.night {
        debug!(actor, night, current = game.night, phase = game.phase.as_str(), "Dropping stale submission");
        return Err(GameError::StaleSubmission { night });
    }
    let player = game
        .player(actor)
        .ok_or(GameError::PlayerNotFound { player_id: actor })?;
    if player.role != role {
        return Err(reject(
            RejectionKind::NotRoleHolder,
            format!("player {actor} does not hold {role}"),
        ));
    }
    let slot = catalog::slot_of(role);
    let Some(ability) = slot.night.as_ref() else {
        return Err(reject(
            RejectionKind::ChoiceNotSupported,
            format!("{role} has no night action"),
        ));
    };
    check_actor(game, actor, slot, ability.actors)?;
    if !slot.acts_on(night) {
        return Err(reject(
            RejectionKind::RoleResting,
            format!("{} does not act on night {night}", slot.id),
        ));
    }
    if !slot.accepts(choice.kind()) {
        return Err(reject(
            RejectionKind::ChoiceNotSupported,
            format!("{} cannot {:?}", slot.id, choice.kind()),
        ));
    }
    if choice.kind() == ChoiceKind::ReleasePoison && game.poisoned.is_empty() {
        return Err(reject(RejectionKind::ChoiceNotSupported, "nobody is poisoned"));
    }
    if let Some(target) = choice.subject() {
        if !game.is_alive(target) {
            return Err(reject(
                RejectionKind::TargetNotAlive,
                format!("player {target} is not alive"),
            ));
        }
        if !allowed_targets(game, actor, slot).contains(&target) {
            return Err(reject(
                RejectionKind::TargetExcluded,
                format!("{} cannot choose player {target} tonight", slot.id),
            ));
        }
    }

    let replaced = cancel(game, actor)?;
    let seq = game.next_seq;
    game.next_seq += 1;
    game.pending.insert(
        actor,
        NightAction {
            actor,
            role,
            slot: slot.id,
            choice,
            night,
            seq,
        },
    );
    if let Some(target) = choice.subject() {
        game.tracking.record(Visit {
            night,
            actor,
            slot: slot.id,
            target,
        });
    }
    debug!(actor, night, seq, replaced, slot = %slot.id, "Night action accepted");
    Ok(Accepted {
        night,
        seq,
        replaced,
    })
}

fn check_actor(
    game: &GameCache,
    actor: PlayerId,
    slot: &Role,
    actors: Actors,
) -> Result<(), GameError> {
    let holders = game.assignment.holders(slot.id);
    match actors {
        Actors::Avengers => {
            if game.revenge_pending.contains(&actor) {
                Ok(())
            } else {
                Err(reject(
                    RejectionKind::ActorNotAlive,
                    format!("player {actor} has no revenge pending"),
                ))
            }
        }
        _ if !game.is_alive(actor) => Err(reject(
            RejectionKind::ActorNotAlive,
            format!("player {actor} is dead"),
        )),
        Actors::Boss if holders.first() == Some(&actor) => Ok(()),
        Actors::Everyone if holders.contains(&actor) => Ok(()),
        _ => Err(reject(
            RejectionKind::NotRoleHolder,
            format!("player {actor} does not act for {}", slot.id),
        )),
    }
}

/// Withdraw the actor's pending action for the current night and its ledger entries.
///
/// Only while the night is open; resolved nights keep their ledger.
pub fn cancel(game: &mut GameCache, actor: PlayerId) -> Result<bool, GameError> {
    require_phase(game, Phase::Night)?;
    let night = game.night;
    game.tracking.cancel(actor, night);
    Ok(game.pending.remove(&actor).is_some())
}

/// Living players `actor` may pick tonight for `slot`, in seating order.
///
/// A target last chosen on night `last` is excluded while
/// `night - last < cooldown + 1`.
pub fn allowed_targets(game: &GameCache, actor: PlayerId, slot: &Role) -> Vec<PlayerId> {
    let Some(ability) = slot.night.as_ref() else {
        return Vec::new();
    };
    let rules = ability.targeting;
    let own_slot = game.assignment.holders(slot.id);
    game.living()
        .into_iter()
        .filter(|target| {
            let is_self = *target == actor;
            if is_self && !rules.allow_self {
                return false;
            }
            if !is_self && rules.exclude_own_slot && own_slot.contains(target) {
                return false;
            }
            let cooldown = if is_self {
                rules.do_not_choose_self
            } else {
                rules.do_not_choose_others
            };
            match game.tracking.last_targeted(slot.id, *target, game.night) {
                Some(last) => game.night - last >= cooldown + 1,
                None => true,
            }
        })
        .collect()
}

/// Who gets a night prompt, paired with the slot they act for.
pub fn eligible_actors(game: &GameCache) -> Vec<(PlayerId, &'static Role)> {
    let mut out = Vec::new();
    for role in catalog::night_roles() {
        if !role.acts_on(game.night) {
            continue;
        }
        let Some(ability) = role.night.as_ref() else {
            continue;
        };
        match ability.actors {
            Actors::Boss => {
                if let Some(boss) = game.assignment.primary(role.id) {
                    out.push((boss, role));
                }
            }
            Actors::Everyone => {
                out.extend(game.assignment.holders(role.id).iter().map(|id| (*id, role)));
            }
            Actors::Avengers => {
                out.extend(
                    game.revenge_pending
                        .iter()
                        .filter(|id| game.player(**id).is_some_and(|p| p.role == role.id))
                        .map(|id| (*id, role)),
                );
            }
        }
    }
    out
}

/// Record a day ballot, overwriting the voter's earlier one.
pub fn cast_ballot(
    game: &mut GameCache,
    night: u32,
    voter: PlayerId,
    target: PlayerId,
) -> Result<bool, GameError> {
    if game.phase != Phase::Vote || night != game.night {
        debug!(voter, night, current = game.night, "Dropping stale ballot");
        return Err(GameError::StaleSubmission { night });
    }
    if game.player(voter).is_none() {
        return Err(GameError::PlayerNotFound { player_id: voter });
    }
    if !game.is_alive(voter) {
        return Err(reject(RejectionKind::ActorNotAlive, format!("voter {voter} is dead")));
    }
    if game.arrested.contains(&voter) {
        return Err(reject(
            RejectionKind::VoterArrested,
            format!("voter {voter} is under arrest"),
        ));
    }
    if !game.is_alive(target) {
        return Err(reject(
            RejectionKind::TargetNotAlive,
            format!("player {target} is not alive"),
        ));
    }
    if target == voter {
        return Err(reject(RejectionKind::TargetExcluded, "cannot vote for yourself"));
    }
    Ok(game.ballots.insert(voter, target).is_some())
}

/// Withdraw a ballot.
pub fn retract_ballot(game: &mut GameCache, voter: PlayerId) -> Result<bool, GameError> {
    require_phase(game, Phase::Vote)?;
    Ok(game.ballots.remove(&voter).is_some())
}
