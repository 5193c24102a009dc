use std::collections::BTreeMap;

use crate::domain::{
    Audience, Choice, ChoiceKind, Disclosure, Faction, GameCache, NightEffect, PlayerId,
    Prediction, RoleId, SideEffect,
};
use crate::roles::fragments::{self, ATTEMPT_TO_KILL, FOLLOWED, LOOKED_AFTER, ROLE_IS_KNOWN};
use crate::roles::{
    catalog, Actors, Award, Cadence, NightAbility, NightContext, PayoutContext, Role, Targeting,
    VoteConsequence, VoteContext,
};

const INVESTIGATION_RATE: i64 = 6;

pub static CIVILIAN: Role = Role {
    id: RoleId::Civilian,
    name: "Civilian",
    purpose: "Find the mafia at the vote.",
    payment_for_night_spent: 12,
    ..Role::BASE
};

pub static DOCTOR: Role = Role {
    id: RoleId::Doctor,
    name: "Doctor",
    purpose: "Heal one player each night. You may heal yourself, but not too often.",
    night: Some(NightAbility {
        prompt: "Whom will you heal tonight?",
        actors: Actors::Boss,
        cadence: Cadence::EveryNight,
        targeting: Targeting {
            allow_self: true,
            do_not_choose_others: 1,
            do_not_choose_self: 2,
            exclude_own_slot: false,
        },
        choices: &[ChoiceKind::Target],
        notice: Some(LOOKED_AFTER),
        effect: fragments::protect_target,
    }),
    payment_for_murder: 15,
    payment_for_treatment: 15,
    payout: Some(fragments::treatment_payout),
    on_death: Some(fragments::alias_succession),
    ..Role::BASE
};

pub static NURSE: Role = Role {
    id: RoleId::Nurse,
    name: "Nurse",
    alias_of: Some(RoleId::Doctor),
    purpose: "Assist the doctor and take over if the doctor dies.",
    payment_for_murder: 10,
    payment_for_treatment: 10,
    on_death: Some(fragments::alias_succession),
    ..Role::BASE
};

pub static POLICEMAN: Role = Role {
    id: RoleId::Policeman,
    name: "Policeman",
    purpose: "Each night either shoot a suspect or check their role.",
    night: Some(NightAbility {
        prompt: "Whom will you shoot or check tonight?",
        actors: Actors::Boss,
        cadence: Cadence::EveryNight,
        targeting: Targeting::ANYONE_ELSE,
        choices: &[ChoiceKind::Target, ChoiceKind::Inspect],
        notice: Some(ROLE_IS_KNOWN),
        effect: shoot_or_inspect,
    }),
    can_kill_at_night: true,
    payment_for_murder: 20,
    payment_for_treatment: 18,
    payout: Some(police_payout),
    on_death: Some(fragments::alias_succession),
    ..Role::BASE
};

pub static GENERAL: Role = Role {
    id: RoleId::General,
    name: "General",
    alias_of: Some(RoleId::Policeman),
    purpose: "Back up the police and take command if the policeman dies.",
    payment_for_murder: 11,
    payment_for_treatment: 14,
    on_death: Some(fragments::alias_succession),
    ..Role::BASE
};

pub static BODYGUARD: Role = Role {
    id: RoleId::Bodyguard,
    name: "Bodyguard",
    purpose: "Shield a player with your own body. If they are attacked, you die instead.",
    night: Some(NightAbility {
        prompt: "Whom will you guard tonight?",
        actors: Actors::Boss,
        cadence: Cadence::EveryNight,
        targeting: Targeting {
            do_not_choose_others: 1,
            ..Targeting::ANYONE_ELSE
        },
        choices: &[ChoiceKind::Target],
        notice: Some(LOOKED_AFTER),
        effect: guard,
    }),
    payment_for_murder: 12,
    payment_for_treatment: 12,
    payout: Some(fragments::treatment_payout),
    ..Role::BASE
};

pub static PUNISHER: Role = Role {
    id: RoleId::Punisher,
    name: "Punisher",
    purpose: "Provoke the killers. Whoever comes for you at night goes down with you.",
    retaliates: true,
    ..Role::BASE
};

pub static AGENT: Role = Role {
    id: RoleId::Agent,
    name: "Agent",
    purpose: "Follow a player and learn whom they visited at night.",
    night: Some(NightAbility {
        prompt: "Whom will you follow tonight?",
        actors: Actors::Boss,
        cadence: Cadence::EveryNight,
        targeting: Targeting::ANYONE_ELSE,
        choices: &[ChoiceKind::Target],
        notice: Some(FOLLOWED),
        effect: follow,
    }),
    payout: Some(follow_payout),
    ..Role::BASE
};

pub static JOURNALIST: Role = Role {
    id: RoleId::Journalist,
    name: "Journalist",
    purpose: "Interview a player and learn who came to see them at night.",
    night: Some(NightAbility {
        prompt: "Whom will you interview tonight?",
        actors: Actors::Boss,
        cadence: Cadence::EveryNight,
        targeting: Targeting::ANYONE_ELSE,
        choices: &[ChoiceKind::Target],
        notice: None,
        effect: interview,
    }),
    payout: Some(interview_payout),
    ..Role::BASE
};

pub static ANALYST: Role = Role {
    id: RoleId::Analyst,
    name: "Analyst",
    purpose: "Predict who will be lynched at the vote.",
    night: Some(NightAbility {
        prompt: "Who will be lynched today?",
        actors: Actors::Boss,
        cadence: Cadence::EveryNight,
        targeting: Targeting {
            allow_self: true,
            ..Targeting::ANYONE_ELSE
        },
        choices: &[ChoiceKind::Target, ChoiceKind::Nobody],
        notice: None,
        effect: predict,
    }),
    on_vote: Some(check_prediction),
    ..Role::BASE
};

pub static ANGEL_OF_DEATH: Role = Role {
    id: RoleId::AngelOfDeath,
    name: "Angel of Death",
    purpose: "If you are lynched, take someone with you on the next night.",
    night: Some(NightAbility {
        prompt: "The fools lynched you. Whom will you take with you?",
        actors: Actors::Avengers,
        cadence: Cadence::EveryNight,
        targeting: Targeting::ANYONE_ELSE,
        choices: &[ChoiceKind::Target],
        notice: Some(ATTEMPT_TO_KILL),
        effect: fragments::kill_target,
    }),
    can_kill_at_night: true,
    payment_for_night_spent: 5,
    payout: Some(revenge_payout),
    on_vote: Some(unlock_revenge),
    ..Role::BASE
};

pub static PRIME_MINISTER: Role = Role {
    id: RoleId::PrimeMinister,
    name: "Prime Minister",
    purpose: "Your vote counts twice.",
    vote_weight: 2,
    ..Role::BASE
};

pub static LAWYER: Role = Role {
    id: RoleId::Lawyer,
    name: "Lawyer",
    purpose: "Defend a player so they cannot be lynched at the next vote.",
    night: Some(NightAbility {
        prompt: "Whom will you defend tomorrow?",
        actors: Actors::Boss,
        cadence: Cadence::EveryNight,
        targeting: Targeting {
            do_not_choose_others: 1,
            ..Targeting::ANYONE_ELSE
        },
        choices: &[ChoiceKind::Target],
        notice: None,
        effect: shield,
    }),
    on_vote: Some(defence_payout),
    ..Role::BASE
};

pub static PROSECUTOR: Role = Role {
    id: RoleId::Prosecutor,
    name: "Prosecutor",
    purpose: "Arrest a player so they cannot vote the next day.",
    night: Some(NightAbility {
        prompt: "Whom will you arrest tonight?",
        actors: Actors::Boss,
        cadence: Cadence::EveryNight,
        targeting: Targeting {
            do_not_choose_others: 1,
            ..Targeting::ANYONE_ELSE
        },
        choices: &[ChoiceKind::Target],
        notice: Some("You were arrested and cannot vote today."),
        effect: arrest,
    }),
    ..Role::BASE
};

fn shoot_or_inspect(ctx: &NightContext<'_>) -> NightEffect {
    match ctx.choice {
        Choice::Target { player } => NightEffect::kill(player),
        Choice::Inspect { player } => NightEffect {
            disclosures: vec![Disclosure {
                subject: player,
                audience: Audience::Slot(RoleId::Policeman),
            }],
            ..NightEffect::default()
        },
        _ => NightEffect::default(),
    }
}

fn police_payout(ctx: &PayoutContext<'_>) -> Vec<Award> {
    match ctx.choice {
        Some(Choice::Target { .. }) => fragments::murder_payout(ctx),
        Some(Choice::Inspect { player }) => {
            let recipients = fragments::allies(ctx.game, ctx.role.slot());
            if ctx.resolution.forged.contains_key(&player) {
                vec![Award {
                    recipients,
                    amount: 0,
                    message: format!("Check of @{} (forged documents)", ctx.game.handle(player)),
                }]
            } else {
                vec![Award {
                    recipients,
                    amount: 9,
                    message: format!("Check of {}", fragments::describe(ctx.game, player)),
                }]
            }
        }
        _ => Vec::new(),
    }
}

fn guard(ctx: &NightContext<'_>) -> NightEffect {
    let Choice::Target { player } = ctx.choice else {
        return NightEffect::default();
    };
    NightEffect {
        protects: vec![player],
        sacrifices: vec![(ctx.actor, player)],
        ..NightEffect::default()
    }
}

fn follow(ctx: &NightContext<'_>) -> NightEffect {
    let Choice::Target { player } = ctx.choice else {
        return NightEffect::default();
    };
    let visited = visited_by(ctx.game, player, ctx.game.night, ctx.chosen);
    let text = if visited.is_empty() {
        format!("{} stayed home tonight.", ctx.game.mention(player))
    } else {
        let names: Vec<String> = visited.iter().map(|id| ctx.game.mention(*id)).collect();
        format!("{} visited {} tonight.", ctx.game.mention(player), names.join(", "))
    };
    NightEffect::side(SideEffect::Report {
        audience: Audience::Player(ctx.actor),
        text,
    })
}

fn follow_payout(ctx: &PayoutContext<'_>) -> Vec<Award> {
    let Some(Choice::Target { player }) = ctx.choice else {
        return Vec::new();
    };
    let visits =
        visited_by(ctx.game, player, ctx.resolution.night, &ctx.resolution.chosen).len() as i64;
    vec![Award {
        recipients: fragments::allies(ctx.game, ctx.role.slot()),
        amount: INVESTIGATION_RATE * visits,
        message: format!("Tailing @{}", ctx.game.handle(player)),
    }]
}

fn visited_by(
    game: &GameCache,
    actor: PlayerId,
    night: u32,
    chosen: &BTreeMap<RoleId, PlayerId>,
) -> Vec<PlayerId> {
    let mut out = Vec::new();
    for visit in fragments::counted_visits(game, night, chosen).filter(|v| v.actor == actor) {
        if !out.contains(&visit.target) {
            out.push(visit.target);
        }
    }
    out
}

fn visitors(
    game: &GameCache,
    target: PlayerId,
    night: u32,
    chosen: &BTreeMap<RoleId, PlayerId>,
    reporter: Option<PlayerId>,
) -> Vec<PlayerId> {
    let mut out = Vec::new();
    for visit in fragments::counted_visits(game, night, chosen)
        .filter(|v| v.target == target && Some(v.actor) != reporter)
    {
        if !out.contains(&visit.actor) {
            out.push(visit.actor);
        }
    }
    out
}

fn interview(ctx: &NightContext<'_>) -> NightEffect {
    let Choice::Target { player } = ctx.choice else {
        return NightEffect::default();
    };
    let seen = visitors(ctx.game, player, ctx.game.night, ctx.chosen, Some(ctx.actor));
    let text = if seen.is_empty() {
        format!("Nobody came to see {} tonight.", ctx.game.mention(player))
    } else {
        let names: Vec<String> = seen.iter().map(|id| ctx.game.mention(*id)).collect();
        format!("{} was visited by {}.", ctx.game.mention(player), names.join(", "))
    };
    NightEffect::side(SideEffect::Report {
        audience: Audience::Player(ctx.actor),
        text,
    })
}

fn interview_payout(ctx: &PayoutContext<'_>) -> Vec<Award> {
    let Some(Choice::Target { player }) = ctx.choice else {
        return Vec::new();
    };
    let seen = visitors(
        ctx.game,
        player,
        ctx.resolution.night,
        &ctx.resolution.chosen,
        ctx.actor,
    )
    .len() as i64;
    vec![Award {
        recipients: fragments::allies(ctx.game, ctx.role.slot()),
        amount: INVESTIGATION_RATE * seen,
        message: format!("Interview with @{}", ctx.game.handle(player)),
    }]
}

fn predict(ctx: &NightContext<'_>) -> NightEffect {
    let prediction = match ctx.choice {
        Choice::Target { player } => Prediction::Lynch { player },
        Choice::Nobody => Prediction::NoLynch,
        _ => return NightEffect::default(),
    };
    NightEffect::side(SideEffect::Predict(prediction))
}

fn check_prediction(ctx: &VoteContext<'_>) -> Vec<VoteConsequence> {
    let (Some(prediction), Some(analyst)) = (
        ctx.game.prediction,
        ctx.game.assignment.primary(RoleId::Analyst),
    ) else {
        return Vec::new();
    };
    let came_true = match (prediction, ctx.lynched) {
        (Prediction::Lynch { player }, Some(lynched)) => player == lynched,
        (Prediction::NoLynch, None) => true,
        _ => false,
    };
    if came_true {
        vec![
            VoteConsequence::Private {
                recipient: analyst,
                text: "Brilliant deduction!".to_string(),
            },
            VoteConsequence::Group(
                "Everyone who read the forecast was ready for today's events.".to_string(),
            ),
        ]
    } else {
        vec![
            VoteConsequence::Private {
                recipient: analyst,
                text: "Your intuition failed you today.".to_string(),
            },
            VoteConsequence::Group("The analysts' forecast did not come true.".to_string()),
        ]
    }
}

fn revenge_payout(ctx: &PayoutContext<'_>) -> Vec<Award> {
    let slot = ctx.role.slot();
    let mut recipients = fragments::allies(ctx.game, slot);
    recipients.extend(ctx.game.revenge_pending.iter().copied());
    ctx.resolution
        .victims_of(slot)
        .into_iter()
        .filter_map(|victim| {
            let player = ctx.game.player(victim)?;
            let amount = if player.faction == Faction::Civilians {
                0
            } else {
                catalog::resolve(player.role).payment_for_murder * 2
            };
            Some(Award {
                recipients: recipients.clone(),
                amount,
                message: format!("Avenged murder of {}", fragments::describe(ctx.game, victim)),
            })
        })
        .collect()
}

fn unlock_revenge(ctx: &VoteContext<'_>) -> Vec<VoteConsequence> {
    let Some(lynched) = ctx.lynched else {
        return Vec::new();
    };
    match ctx.game.player(lynched) {
        Some(p) if p.role == RoleId::AngelOfDeath => vec![
            VoteConsequence::UnlockRevenge(lynched),
            VoteConsequence::Private {
                recipient: lynched,
                text: "You were lynched. Do not forget to take revenge tonight!".to_string(),
            },
        ],
        _ => Vec::new(),
    }
}

fn shield(ctx: &NightContext<'_>) -> NightEffect {
    match ctx.choice {
        Choice::Target { player } => NightEffect::side(SideEffect::VoteShield { player }),
        _ => NightEffect::default(),
    }
}

fn defence_payout(ctx: &VoteContext<'_>) -> Vec<VoteConsequence> {
    let Some(saved) = ctx.shielded else {
        return Vec::new();
    };
    let Some(player) = ctx.game.player(saved) else {
        return Vec::new();
    };
    let amount = if player.faction == Faction::Criminals {
        0
    } else {
        catalog::resolve(player.role).payment_for_treatment
    };
    vec![
        VoteConsequence::Award(Award {
            recipients: fragments::allies(ctx.game, RoleId::Lawyer),
            amount,
            message: format!("Defended {} at the vote", fragments::describe(ctx.game, saved)),
        }),
        VoteConsequence::Group(format!(
            "{} was about to be lynched, but the lawyer won the case!",
            ctx.game.mention(saved)
        )),
    ]
}

fn arrest(ctx: &NightContext<'_>) -> NightEffect {
    match ctx.choice {
        Choice::Target { player } => NightEffect::side(SideEffect::Arrest { player }),
        _ => NightEffect::default(),
    }
}
