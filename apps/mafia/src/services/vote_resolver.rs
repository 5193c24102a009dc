//! Day vote: weighted tally, vote shields, bounties and role reactions.

use std::collections::BTreeMap;

use tracing::info;

use crate::domain::{DeathCause, Faction, GameCache, Outbox, Outcome, PlayerId};
use crate::roles::{catalog, fragments, VoteConsequence, VoteContext};
use crate::services::{casualties, win_condition};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteReport {
    pub tally: BTreeMap<PlayerId, u32>,
    pub lynched: Option<PlayerId>,
    /// Player who led the vote but was protected by a shield.
    pub shielded: Option<PlayerId>,
    pub outbox: Outbox,
    pub outcome: Option<Outcome>,
}

/// Weighted votes per target. Dead or arrested voters and dead targets do not count.
pub fn tally(game: &GameCache) -> BTreeMap<PlayerId, u32> {
    let mut counts = BTreeMap::new();
    for (voter, target) in &game.ballots {
        let Some(player) = game.player(*voter) else {
            continue;
        };
        if !player.alive || game.arrested.contains(voter) || !game.is_alive(*target) {
            continue;
        }
        *counts.entry(*target).or_insert(0) += catalog::resolve(player.role).vote_weight;
    }
    counts
}

/// The target with a strict maximum, or None on a tie or an empty tally.
pub fn leader(counts: &BTreeMap<PlayerId, u32>) -> Option<PlayerId> {
    let top = counts.values().copied().max()?;
    let mut leaders = counts.iter().filter(|(_, votes)| **votes == top);
    let (first, _) = leaders.next()?;
    match leaders.next() {
        Some(_) => None,
        None => Some(*first),
    }
}

/// Half the victim's murder value for each voter against them on the opposing side.
fn bounty(game: &mut GameCache, victim: PlayerId) {
    let Some(victim_player) = game.player(victim) else {
        return;
    };
    let victim_faction = victim_player.faction;
    let value = catalog::resolve(victim_player.role).payment_for_murder / 2;
    let label = format!("Vote against {}", fragments::describe(game, victim));
    let voters: Vec<(PlayerId, Faction)> = game
        .ballots
        .iter()
        .filter(|(voter, target)| **target == victim && **voter != victim)
        .filter(|(voter, _)| game.is_alive(**voter) && !game.arrested.contains(*voter))
        .filter_map(|(voter, _)| game.player(*voter).map(|p| (*voter, p.faction)))
        .collect();
    for (voter, faction) in voters {
        let amount = if faction == Faction::Other || faction == victim_faction {
            0
        } else {
            value
        };
        game.credit(&[voter], amount, &label);
    }
}

pub fn resolve_vote(game: &mut GameCache) -> VoteReport {
    let mut outbox = Outbox::default();
    let counts = tally(game);
    let (lynched, shielded) = match leader(&counts) {
        Some(top) if game.vote_shield.contains(&top) => (None, Some(top)),
        other => (other, None),
    };

    match lynched {
        Some(victim) => {
            bounty(game, victim);
            casualties::apply_death(game, victim, DeathCause::Vote, &mut outbox);
            outbox.group(format!(
                "The town has spoken. {} was lynched.",
                fragments::describe(game, victim)
            ));
        }
        None if shielded.is_none() => {
            outbox.group("The town could not agree. Nobody was lynched today.");
        }
        None => {}
    }

    for role in catalog::all() {
        let Some(hook) = role.on_vote else {
            continue;
        };
        let consequences = hook(&VoteContext {
            game: &*game,
            role,
            lynched,
            shielded,
        });
        for consequence in consequences {
            match consequence {
                VoteConsequence::UnlockRevenge(player) => {
                    game.revenge_pending.insert(player);
                }
                VoteConsequence::Private { recipient, text } => outbox.private(recipient, text),
                VoteConsequence::Group(text) => outbox.group(text),
                VoteConsequence::Award(award) => {
                    game.credit(&award.recipients, award.amount, &award.message)
                }
            }
        }
    }

    game.ballots.clear();
    game.vote_shield.clear();
    game.arrested.clear();
    game.prediction = None;

    let outcome = win_condition::evaluate(game);
    info!(
        chat_id = game.chat_id,
        night = game.night,
        lynched = ?lynched,
        game_over = outcome.is_some(),
        "Vote resolved"
    );
    VoteReport {
        tally: counts,
        lynched,
        shielded,
        outbox,
        outcome,
    }
}
