//! Prompt construction and inactivity bookkeeping.

use tracing::info;

use crate::domain::{Choice, ChoiceKind, DeathCause, GameCache, Outbox, PlayerId, RoleId};
use crate::messaging::{MessageOptions, PromptChoice};
use crate::roles::catalog;
use crate::services::{action_collector, casualties};

pub type Prompt = (PlayerId, String, MessageOptions);

/// Night prompts for every eligible actor, with their allowed choices.
pub fn night_prompts(game: &GameCache) -> Vec<Prompt> {
    let mut prompts = Vec::new();
    for (actor, role) in action_collector::eligible_actors(game) {
        let Some(ability) = role.night.as_ref() else {
            continue;
        };
        let targets = action_collector::allowed_targets(game, actor, role);
        let mut choices = Vec::new();
        for kind in ability.choices {
            match kind {
                ChoiceKind::Target => choices.extend(targets.iter().map(|t| PromptChoice {
                    label: game.mention(*t),
                    choice: Choice::Target { player: *t },
                })),
                ChoiceKind::Inspect => choices.extend(targets.iter().map(|t| PromptChoice {
                    label: format!("Check {}", game.mention(*t)),
                    choice: Choice::Inspect { player: *t },
                })),
                ChoiceKind::Forge => choices.extend(targets.iter().map(|t| PromptChoice {
                    label: format!("Forge {}", game.mention(*t)),
                    choice: Choice::Forge {
                        player: *t,
                        shown_as: RoleId::Civilian,
                    },
                })),
                ChoiceKind::ReleasePoison if !game.poisoned.is_empty() => choices.push(PromptChoice {
                    label: "Release the poison".to_string(),
                    choice: Choice::ReleasePoison,
                }),
                ChoiceKind::ReleasePoison => {}
                ChoiceKind::Nobody => choices.push(PromptChoice {
                    label: "Nobody".to_string(),
                    choice: Choice::Nobody,
                }),
            }
        }
        if choices.is_empty() {
            continue;
        }
        prompts.push((
            actor,
            ability.prompt.to_string(),
            MessageOptions::prompt(game.night, choices),
        ));
    }
    prompts
}

/// Ballot prompts for every living voter who is not under arrest.
pub fn vote_prompts(game: &GameCache) -> Vec<Prompt> {
    let living = game.living();
    living
        .iter()
        .copied()
        .filter(|voter| !game.arrested.contains(voter))
        .map(|voter| {
            let choices = living
                .iter()
                .copied()
                .filter(|t| *t != voter)
                .map(|t| PromptChoice {
                    label: game.mention(t),
                    choice: Choice::Target { player: t },
                })
                .collect();
            (
                voter,
                "Whom do you want to hang?".to_string(),
                MessageOptions::prompt(game.night, choices),
            )
        })
        .collect()
}

pub fn roll_call(game: &GameCache) -> String {
    let names: Vec<String> = game
        .living()
        .iter()
        .enumerate()
        .map(|(i, id)| format!("{}. {}", i + 1, game.mention(*id)))
        .collect();
    format!("Alive:\n{}", names.join("\n"))
}

/// Count unanswered prompts and drop players who reached `max_missed` in a row.
pub fn account_inactivity(
    game: &mut GameCache,
    responded: impl Fn(&GameCache, PlayerId) -> bool,
    max_missed: u32,
    outbox: &mut Outbox,
) -> Vec<PlayerId> {
    let awaiting: Vec<PlayerId> = std::mem::take(&mut game.awaiting).into_iter().collect();
    let mut dropped = Vec::new();
    for player in awaiting {
        if !game.is_alive(player) {
            continue;
        }
        if responded(game, player) {
            game.missed_windows.insert(player, 0);
            continue;
        }
        let missed = game.missed_windows.entry(player).or_insert(0);
        *missed += 1;
        if *missed >= max_missed {
            dropped.push(player);
        }
    }
    for player in &dropped {
        if casualties::apply_death(game, *player, DeathCause::Dropout, outbox) {
            let role = game
                .player(*player)
                .map(|p| catalog::resolve(p.role).name)
                .unwrap_or("?");
            info!(chat_id = game.chat_id, player_id = *player, "Player dropped for inactivity");
            outbox.group(format!(
                "{} ({role}) slept through the game and was dropped.",
                game.mention(*player)
            ));
            outbox.private(*player, "You were dropped from the game for inactivity.");
        }
    }
    dropped
}
