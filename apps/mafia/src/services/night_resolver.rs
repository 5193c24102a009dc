//! Turns the night's pending actions into deaths, side effects and payouts.
//!
//! Order of resolution:
//! 1. each acting slot's processed choice becomes a `NightEffect`;
//! 2. kills are merged, then reduced by protection (void if any effect ignores it);
//! 3. sacrifices and retaliation add victims;
//! 4. forging is applied, then deaths, then disclosures and other side effects;
//! 5. payouts are credited and the win condition is checked.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info, warn};

use crate::domain::{
    Audience, Choice, DeathCause, GameCache, NightAction, NightEffect, NightResolution, Outbox,
    Outcome, PlayerId, RoleId, SideEffect,
};
use crate::error::GameError;
use crate::roles::fragments::ROLE_IS_KNOWN;
use crate::roles::{catalog, Actors, NightContext, PayoutContext, Role};
use crate::services::{casualties, win_condition};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NightReport {
    pub resolution: NightResolution,
    pub outbox: Outbox,
    pub outcome: Option<Outcome>,
}

/// A slot's choice after aggregation, with the player credited as acting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Processed {
    pub actor: PlayerId,
    pub choice: Choice,
}

/// Choice that counts for `role` tonight, if any.
///
/// Boss slots use the primary holder's action. Shared slots take the most
/// common choice, ties going to the choice submitted first.
pub fn processed_choice(game: &GameCache, role: &Role) -> Option<Processed> {
    let ability = role.night.as_ref()?;
    let actions = game
        .pending
        .values()
        .filter(|a| a.slot == role.id && a.night == game.night);
    match ability.actors {
        Actors::Boss => {
            let Some(boss) = game.assignment.primary(role.id) else {
                if game.pending.values().any(|a| a.slot == role.id) {
                    let err = GameError::MissingActorState { role: role.id };
                    warn!(chat_id = game.chat_id, code = %err.code(), error = %err, "Skipping slot");
                }
                return None;
            };
            actions
                .filter(|a| a.actor == boss)
                .map(|a| Processed {
                    actor: a.actor,
                    choice: a.choice,
                })
                .next()
        }
        Actors::Everyone => {
            let holders = game.assignment.holders(role.id);
            most_common(actions.filter(|a| holders.contains(&a.actor)))
        }
        Actors::Avengers => {
            most_common(actions.filter(|a| game.revenge_pending.contains(&a.actor)))
        }
    }
}

fn most_common<'a>(actions: impl Iterator<Item = &'a NightAction>) -> Option<Processed> {
    // choice -> (votes, earliest seq, earliest actor)
    let mut tally: BTreeMap<Choice, (usize, u64, PlayerId)> = BTreeMap::new();
    for action in actions {
        let entry = tally
            .entry(action.choice)
            .or_insert((0, action.seq, action.actor));
        entry.0 += 1;
        if action.seq < entry.1 {
            entry.1 = action.seq;
            entry.2 = action.actor;
        }
    }
    tally
        .into_iter()
        .max_by(|(_, a), (_, b)| a.0.cmp(&b.0).then(b.1.cmp(&a.1)))
        .map(|(choice, (_, _, actor))| Processed { actor, choice })
}

/// Who answers for a slot's kill: the avenger itself, otherwise the slot's boss.
fn attacker(game: &GameCache, role: &Role, actor: PlayerId) -> PlayerId {
    match role.night.as_ref().map(|a| a.actors) {
        Some(Actors::Avengers) => actor,
        _ => game.assignment.primary(role.id).unwrap_or(actor),
    }
}

fn recipients(game: &GameCache, audience: Audience) -> Vec<PlayerId> {
    match audience {
        Audience::Player(id) => vec![id],
        Audience::Slot(slot) => game.assignment.holders(slot).to_vec(),
        Audience::Faction(faction) => game.living_in(faction),
    }
}

pub fn resolve_night(game: &mut GameCache) -> NightReport {
    let night = game.night;
    let mut outbox = Outbox::default();
    let mut resolution = NightResolution {
        night,
        ..NightResolution::default()
    };
    let mut merged = NightEffect::default();
    let mut processed: BTreeMap<RoleId, Processed> = BTreeMap::new();
    let mut attackers: BTreeMap<RoleId, PlayerId> = BTreeMap::new();

    let acting: Vec<(&'static Role, Processed)> = catalog::night_roles()
        .filter(|role| role.acts_on(night))
        .filter_map(|role| processed_choice(&*game, role).map(|p| (role, p)))
        .collect();
    let chosen: BTreeMap<RoleId, PlayerId> = acting
        .iter()
        .filter_map(|(role, p)| p.choice.subject().map(|target| (role.id, target)))
        .collect();

    for (role, Processed { actor, choice }) in acting {
        let Some(ability) = role.night.as_ref() else {
            continue;
        };
        let effect = (ability.effect)(&NightContext {
            game: &*game,
            role,
            actor,
            choice,
            chosen: &chosen,
        });
        let notice = match choice {
            Choice::Inspect { .. } => Some(ROLE_IS_KNOWN),
            _ => ability.notice,
        };
        if let (Some(text), Some(target)) = (notice, choice.subject()) {
            outbox.private(target, text);
        }
        if !effect.kills.is_empty() {
            resolution.kill_sources.insert(role.id, effect.kills.clone());
            if role.can_kill_at_night {
                attackers.insert(role.id, attacker(game, role, actor));
            }
        }
        merged.kills.extend(effect.kills);
        merged.protects.extend(effect.protects);
        merged.sacrifices.extend(effect.sacrifices);
        merged.disclosures.extend(effect.disclosures);
        merged.side_effects.extend(effect.side_effects);
        merged.ignore_protection |= effect.ignore_protection;
        processed.insert(role.id, Processed { actor, choice });
    }

    resolution.chosen = chosen;
    resolution.ignore_protection = merged.ignore_protection;
    resolution.raw_kills = merged.kills.clone();
    if !merged.ignore_protection {
        resolution.protects = merged.protects.clone();
    }
    let mut victims: BTreeSet<PlayerId> = resolution
        .raw_kills
        .iter()
        .copied()
        .filter(|id| resolution.protection_count(*id) == 0)
        .collect();

    if !merged.ignore_protection {
        for (protector, protected) in &merged.sacrifices {
            if resolution.raw_kills.contains(protected) && resolution.protection_count(*protected) == 1 {
                victims.insert(*protector);
                resolution.sacrificed.insert(*protector);
            }
        }
    }

    retaliate(game, &merged, &attackers, &mut resolution, &mut outbox);
    victims.extend(resolution.punished.iter().copied());
    resolution.victims = victims.clone();

    for effect in &merged.side_effects {
        if let SideEffect::Forge { player, shown_as } = *effect {
            if let Some(p) = game.player_mut(player) {
                p.displayed_role = shown_as;
                resolution.forged.insert(player, shown_as);
            }
        }
    }

    for victim in &victims {
        if casualties::apply_death(game, *victim, DeathCause::Night, &mut outbox) {
            outbox.private(*victim, "You were killed tonight.");
        }
    }

    for disclosure in &merged.disclosures {
        let Some(subject) = game.player(disclosure.subject) else {
            continue;
        };
        let text = format!(
            "{} is {}.",
            game.mention(subject.id),
            catalog::resolve(subject.displayed_role).name
        );
        resolution.disclosed.insert(subject.id);
        for recipient in recipients(game, disclosure.audience) {
            outbox.private(recipient, text.clone());
        }
    }

    for effect in merged.side_effects {
        match effect {
            SideEffect::Forge { .. } => {}
            SideEffect::Poison { player } => {
                if game.is_alive(player) && !game.poisoned.contains(&player) {
                    game.poisoned.push(player);
                }
            }
            SideEffect::ClearPoison => game.poisoned.clear(),
            SideEffect::VoteShield { player } => {
                game.vote_shield.insert(player);
            }
            SideEffect::Arrest { player } => {
                game.arrested.insert(player);
            }
            SideEffect::Predict(prediction) => game.prediction = Some(prediction),
            SideEffect::Report { audience, text } => {
                for recipient in recipients(game, audience) {
                    outbox.private(recipient, text.clone());
                }
            }
        }
    }

    pay_out(game, &processed, &resolution);
    announce(game, &resolution, &mut outbox);

    game.pending.clear();
    game.revenge_pending.clear();

    let outcome = win_condition::evaluate(game);
    info!(
        chat_id = game.chat_id,
        night,
        victims = resolution.victims.len(),
        game_over = outcome.is_some(),
        "Night resolved"
    );
    NightReport {
        resolution,
        outbox,
        outcome,
    }
}

/// Holders of retaliating roles who were killed take their unprotected attackers with them.
///
/// An attacker saved only by a sacrificing protector sends the protector instead.
fn retaliate(
    game: &GameCache,
    merged: &NightEffect,
    attackers: &BTreeMap<RoleId, PlayerId>,
    resolution: &mut NightResolution,
    outbox: &mut Outbox,
) {
    for role in catalog::all().iter().filter(|r| r.retaliates) {
        let Some(holder) = game.assignment.primary(role.id) else {
            continue;
        };
        if !resolution.raw_kills.contains(&holder) || resolution.protection_count(holder) > 0 {
            continue;
        }
        for (slot, kills) in &resolution.kill_sources {
            if !kills.contains(&holder) {
                continue;
            }
            let Some(attacker) = attackers.get(slot).copied() else {
                continue;
            };
            match resolution.protection_count(attacker) {
                0 => {
                    resolution.punished.insert(attacker);
                }
                1 => {
                    let protector = merged
                        .sacrifices
                        .iter()
                        .find(|(_, protected)| *protected == attacker)
                        .map(|(protector, _)| *protector);
                    if let Some(protector) = protector {
                        resolution.punished.insert(protector);
                        resolution.sacrificed.insert(protector);
                    }
                }
                _ => {}
            }
        }
        debug!(player_id = holder, punished = resolution.punished.len(), "Retaliation applied");
        outbox.private(holder, "Everyone who disturbed your peace will be punished!");
    }
}

fn pay_out(
    game: &mut GameCache,
    processed: &BTreeMap<RoleId, Processed>,
    resolution: &NightResolution,
) {
    let mut awards = Vec::new();
    for role in catalog::all() {
        let Some(payout) = role.payout else {
            continue;
        };
        let acted = processed.get(&role.id);
        if role.night.is_some() && acted.is_none() {
            continue;
        }
        awards.extend(payout(&PayoutContext {
            game: &*game,
            role,
            actor: acted.map(|p| p.actor),
            choice: acted.map(|p| p.choice),
            resolution,
        }));
    }
    for mut award in awards {
        award.recipients.sort_unstable();
        award.recipients.dedup();
        game.credit(&award.recipients, award.amount, &award.message);
    }
}

fn announce(game: &GameCache, resolution: &NightResolution, outbox: &mut Outbox) {
    if resolution.victims.is_empty() {
        outbox.group(format!("Night {} passed quietly. Nobody died.", resolution.night));
        return;
    }
    let names: Vec<String> = resolution
        .victims
        .iter()
        .map(|id| crate::roles::fragments::describe(game, *id))
        .collect();
    outbox.group(format!(
        "Night {} is over. The town lost: {}.",
        resolution.night,
        names.join(", ")
    ));
}
