use crate::domain::{Audience, Choice, ChoiceKind, Disclosure, Faction, NightEffect, RoleId, SideEffect};
use crate::roles::fragments::{self, ATTEMPT_TO_KILL, ROLE_IS_KNOWN};
use crate::roles::{Actors, Award, Cadence, NightAbility, NightContext, PayoutContext, Role, Targeting};

pub static DON: Role = Role {
    id: RoleId::Don,
    name: "Don",
    faction: Faction::Criminals,
    purpose: "Lead the family and decide who does not wake up tomorrow.",
    night: Some(NightAbility {
        prompt: "Whom will the family kill tonight?",
        actors: Actors::Everyone,
        cadence: Cadence::EveryNight,
        targeting: Targeting::ANYONE_ELSE,
        choices: &[ChoiceKind::Target],
        notice: Some(ATTEMPT_TO_KILL),
        effect: fragments::kill_target,
    }),
    can_kill_at_night: true,
    payment_for_murder: 30,
    payment_for_treatment: 0,
    payment_for_night_spent: 5,
    payout: Some(fragments::murder_payout),
    on_death: Some(fragments::alias_succession),
    ..Role::BASE
};

pub static MAFIA: Role = Role {
    id: RoleId::Mafia,
    name: "Mafia",
    faction: Faction::Criminals,
    alias_of: Some(RoleId::Don),
    purpose: "Vote with the family on tonight's victim. If the Don falls you may take over.",
    payment_for_murder: 20,
    payment_for_treatment: 0,
    payment_for_night_spent: 5,
    on_death: Some(fragments::alias_succession),
    ..Role::BASE
};

pub static TRAITOR: Role = Role {
    id: RoleId::Traitor,
    name: "Traitor",
    faction: Faction::Criminals,
    purpose: "Every second night learn a player's role for the family.",
    night: Some(NightAbility {
        prompt: "Whom will you check for the family?",
        actors: Actors::Boss,
        cadence: Cadence::EvenNights,
        targeting: Targeting::ANYONE_ELSE,
        choices: &[ChoiceKind::Target],
        notice: Some(ROLE_IS_KNOWN),
        effect: disclose_to_family,
    }),
    payment_for_murder: 15,
    payment_for_treatment: 0,
    payout: Some(check_payout),
    ..Role::BASE
};

pub static POISONER: Role = Role {
    id: RoleId::Poisoner,
    name: "Poisoner",
    faction: Faction::Criminals,
    purpose: "Poison players night after night, then release the poison to kill them all at once.",
    night: Some(NightAbility {
        prompt: "Whom will you poison? Or release the poison?",
        actors: Actors::Boss,
        cadence: Cadence::EveryNight,
        targeting: Targeting::ANYONE_ELSE,
        choices: &[ChoiceKind::Target, ChoiceKind::ReleasePoison],
        notice: None,
        effect: poison,
    }),
    can_kill_at_night: true,
    payment_for_murder: 20,
    payment_for_treatment: 0,
    payout: Some(fragments::murder_payout),
    ..Role::BASE
};

pub static FORGER: Role = Role {
    id: RoleId::Forger,
    name: "Forger",
    faction: Faction::Criminals,
    purpose: "Forge documents so that a player is seen as a different role.",
    night: Some(NightAbility {
        prompt: "Whose documents will you forge?",
        actors: Actors::Boss,
        cadence: Cadence::EveryNight,
        targeting: Targeting {
            allow_self: true,
            ..Targeting::ANYONE_ELSE
        },
        choices: &[ChoiceKind::Forge],
        notice: None,
        effect: forge,
    }),
    payment_for_murder: 18,
    payment_for_treatment: 0,
    payout: Some(deception_payout),
    ..Role::BASE
};

fn disclose_to_family(ctx: &NightContext<'_>) -> NightEffect {
    let Choice::Target { player } = ctx.choice else {
        return NightEffect::default();
    };
    NightEffect {
        disclosures: vec![Disclosure {
            subject: player,
            audience: Audience::Faction(Faction::Criminals),
        }],
        ..NightEffect::default()
    }
}

fn check_payout(ctx: &PayoutContext<'_>) -> Vec<Award> {
    let Some(Choice::Target { player }) = ctx.choice else {
        return Vec::new();
    };
    vec![Award {
        recipients: fragments::allies(ctx.game, ctx.role.slot()),
        amount: 16,
        message: format!("Check of {}", fragments::describe(ctx.game, player)),
    }]
}

fn poison(ctx: &NightContext<'_>) -> NightEffect {
    match ctx.choice {
        Choice::Target { player } => NightEffect::side(SideEffect::Poison { player }),
        Choice::ReleasePoison => NightEffect {
            kills: ctx
                .game
                .poisoned
                .iter()
                .copied()
                .filter(|id| ctx.game.is_alive(*id))
                .collect(),
            side_effects: vec![SideEffect::ClearPoison],
            ignore_protection: true,
            ..NightEffect::default()
        },
        _ => NightEffect::default(),
    }
}

fn forge(ctx: &NightContext<'_>) -> NightEffect {
    match ctx.choice {
        Choice::Forge { player, shown_as } => {
            NightEffect::side(SideEffect::Forge { player, shown_as })
        }
        _ => NightEffect::default(),
    }
}

/// Paid when a forged player was checked on the same night.
fn deception_payout(ctx: &PayoutContext<'_>) -> Vec<Award> {
    let Some(Choice::Forge { player, .. }) = ctx.choice else {
        return Vec::new();
    };
    if !ctx.resolution.disclosed.contains(&player) {
        return Vec::new();
    }
    vec![Award {
        recipients: fragments::allies(ctx.game, ctx.role.slot()),
        amount: 12,
        message: format!("Deceived a check of @{}", ctx.game.handle(player)),
    }]
}
