//! Reusable hook bodies. Role entries compose these instead of inheriting them.

use std::collections::BTreeMap;

use crate::domain::{Choice, Faction, GameCache, NightEffect, PlayerId, RoleId, Visit};
use crate::roles::{catalog, Award, DeathContext, DeathOutcome, NightContext, PayoutContext};

pub const ATTEMPT_TO_KILL: &str = "Someone came for your life tonight.";
pub const LOOKED_AFTER: &str = "Someone watched over you tonight.";
pub const ROLE_IS_KNOWN: &str = "Someone found out who you really are.";
pub const FOLLOWED: &str = "You had the feeling someone was following you tonight.";

/// Living holders of a slot: the allies that share its payouts.
pub fn allies(game: &crate::domain::GameCache, slot: RoleId) -> Vec<PlayerId> {
    game.assignment.holders(slot).to_vec()
}

/// Name a player together with the role others currently see.
pub fn describe(game: &crate::domain::GameCache, player: PlayerId) -> String {
    match game.player(player) {
        Some(p) => format!("@{} ({})", p.handle, catalog::resolve(p.displayed_role).name),
        None => format!("#{player}"),
    }
}

/// Tonight's visits that carried their slot's decision.
///
/// A shared-slot member outvoted by the rest of the slot went nowhere.
pub fn counted_visits<'a>(
    game: &'a GameCache,
    night: u32,
    chosen: &'a BTreeMap<RoleId, PlayerId>,
) -> impl Iterator<Item = &'a Visit> + 'a {
    game.tracking
        .on_night(night)
        .filter(move |v| chosen.get(&v.slot) == Some(&v.target))
}

pub fn kill_target(ctx: &NightContext<'_>) -> NightEffect {
    match ctx.choice {
        Choice::Target { player } => NightEffect::kill(player),
        _ => NightEffect::default(),
    }
}

pub fn protect_target(ctx: &NightContext<'_>) -> NightEffect {
    match ctx.choice {
        Choice::Target { player } => NightEffect::protect(player),
        _ => NightEffect::default(),
    }
}

/// Pays the slot for every victim it produced. Killing your own faction is logged at zero.
pub fn murder_payout(ctx: &PayoutContext<'_>) -> Vec<Award> {
    let slot = ctx.role.slot();
    ctx.resolution
        .victims_of(slot)
        .into_iter()
        .filter_map(|victim| {
            let player = ctx.game.player(victim)?;
            let victim_role = catalog::resolve(player.role);
            let amount = if ctx.role.faction != Faction::Other && player.faction == ctx.role.faction
            {
                0
            } else {
                victim_role.payment_for_murder
            };
            Some(Award {
                recipients: allies(ctx.game, slot),
                amount,
                message: format!("Murder of {}", describe(ctx.game, victim)),
            })
        })
        .collect()
}

/// Pays for a target that was attacked and survived because of this slot.
pub fn treatment_payout(ctx: &PayoutContext<'_>) -> Vec<Award> {
    let Some(Choice::Target { player }) = ctx.choice else {
        return Vec::new();
    };
    if !ctx.resolution.saved(player) {
        return Vec::new();
    }
    let Some(saved) = ctx.game.player(player) else {
        return Vec::new();
    };
    let amount = if saved.faction == Faction::Criminals && ctx.role.faction == Faction::Civilians {
        0
    } else {
        catalog::resolve(saved.role).payment_for_treatment
    };
    vec![Award {
        recipients: allies(ctx.game, ctx.role.slot()),
        amount,
        message: format!("Saved {}", describe(ctx.game, player)),
    }]
}

/// When the boss dies, the next holder in the slot becomes the new boss.
pub fn alias_succession(ctx: &DeathContext<'_>) -> DeathOutcome {
    if ctx.index != 0 {
        return DeathOutcome::default();
    }
    let Some(successor) = ctx.game.assignment.primary(ctx.slot) else {
        return DeathOutcome::default();
    };
    let boss = catalog::resolve(ctx.slot);
    let mut notices = vec![(
        successor,
        format!("The {} is dead. You are the new {}!", boss.name, boss.name),
    )];
    for ally in ctx.game.assignment.holders(ctx.slot).iter().skip(1) {
        notices.push((
            *ally,
            format!(
                "The {} is dead. {} takes over.",
                boss.name,
                ctx.game.mention(successor)
            ),
        ));
    }
    DeathOutcome {
        promoted: Some(successor),
        solo_win: false,
        notices,
    }
}
