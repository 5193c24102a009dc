use crate::domain::{ChoiceKind, DeathCause, Faction, RoleId};
use crate::roles::fragments::{self, ATTEMPT_TO_KILL};
use crate::roles::{
    Actors, Cadence, DeathContext, DeathOutcome, NightAbility, Role, SettleContext, Targeting,
};

/// Table size the solo payment scales with.
const SOLO_TABLE: i64 = 4;

pub static MASOCHIST: Role = Role {
    id: RoleId::Masochist,
    name: "Masochist",
    faction: Faction::Other,
    purpose: "Get yourself lynched at the vote.",
    payment_for_night_spent: 0,
    on_death: Some(wins_when_lynched),
    settle: Some(early_death_payment),
    ..Role::BASE
};

pub static SUICIDE_BOMBER: Role = Role {
    id: RoleId::SuicideBomber,
    name: "Suicide Bomber",
    faction: Faction::Other,
    purpose: "Get yourself killed at night.",
    payment_for_night_spent: 0,
    on_death: Some(wins_when_killed_at_night),
    settle: Some(early_death_payment),
    ..Role::BASE
};

pub static KILLER: Role = Role {
    id: RoleId::Killer,
    name: "Killer",
    faction: Faction::Other,
    purpose: "Kill at night and be the last one standing.",
    night: Some(NightAbility {
        prompt: "Whom will you kill tonight?",
        actors: Actors::Boss,
        cadence: Cadence::EveryNight,
        targeting: Targeting::ANYONE_ELSE,
        choices: &[ChoiceKind::Target],
        notice: Some(ATTEMPT_TO_KILL),
        effect: fragments::kill_target,
    }),
    can_kill_at_night: true,
    payment_for_murder: 25,
    payment_for_treatment: 0,
    payment_for_night_spent: 6,
    payout: Some(fragments::murder_payout),
    settle: Some(last_one_standing),
    ..Role::BASE
};

fn wins_when_lynched(ctx: &DeathContext<'_>) -> DeathOutcome {
    if ctx.cause != DeathCause::Vote {
        return DeathOutcome::default();
    }
    DeathOutcome {
        promoted: None,
        solo_win: true,
        notices: vec![(
            ctx.dead,
            "Congratulations! You were lynched, just as you wanted!".to_string(),
        )],
    }
}

fn wins_when_killed_at_night(ctx: &DeathContext<'_>) -> DeathOutcome {
    if ctx.cause != DeathCause::Night {
        return DeathOutcome::default();
    }
    DeathOutcome {
        promoted: None,
        solo_win: true,
        notices: vec![(
            ctx.dead,
            "Congratulations! You took your killers by surprise!".to_string(),
        )],
    }
}

/// The earlier the goal is reached, the more it pays. Never less than 5.
fn early_death_payment(ctx: &SettleContext<'_>) -> Option<i64> {
    if !ctx.game.solo_winners.contains(&ctx.player.id) {
        return None;
    }
    let players = ctx.game.players.len() as i64;
    let payment = 30 * (players / SOLO_TABLE) - 5 * i64::from(ctx.nights_lived);
    Some(payment.max(5))
}

fn last_one_standing(ctx: &SettleContext<'_>) -> Option<i64> {
    if ctx.outcome.solo != Some(ctx.player.id) {
        return None;
    }
    Some(
        ctx.rules.victory_payment(Faction::Other, ctx.game.players.len())
            + ctx.role.payment_for_night_spent * i64::from(ctx.nights_lived),
    )
}
