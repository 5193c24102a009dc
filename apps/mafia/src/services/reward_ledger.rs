//! End-of-game settlement. A pure function of the final state.

use serde::{Deserialize, Serialize};

use crate::config::RewardRules;
use crate::domain::{Achievement, ChatId, Faction, GameCache, Outcome, PlayerId, RoleId};
use crate::roles::{catalog, SettleContext};

/// Per-player result handed to the results repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalResult {
    pub player_id: PlayerId,
    pub chat_id: ChatId,
    pub role: RoleId,
    pub is_winner: bool,
    pub nights_lived: u32,
    pub total_nights: u32,
    /// Final amount; zero for losers and drop-outs.
    pub money: i64,
    pub achievements: Vec<Achievement>,
    pub summary: String,
}

/// Settle every seated player, in id order.
///
/// Drop-outs get nothing. Roles with their own settlement rule use it;
/// everyone else wins with their faction and is paid the faction victory
/// payment plus their nights lived. Losers forfeit what they earned.
pub fn settle(game: &GameCache, outcome: &Outcome, rules: &RewardRules) -> Vec<PersonalResult> {
    let total_nights = game.night;
    game.players
        .values()
        .map(|player| {
            let nights_lived = player.night_of_death.unwrap_or(total_nights);
            let role = catalog::resolve(player.role);
            let bonus = if player.dropped_out {
                None
            } else if let Some(rule) = role.settle {
                rule(&SettleContext {
                    game,
                    player,
                    role,
                    outcome,
                    nights_lived,
                    rules,
                })
            } else if player.faction != Faction::Other && player.faction == outcome.winner {
                Some(
                    rules.victory_payment(player.faction, game.players.len())
                        + role.payment_for_night_spent * i64::from(nights_lived),
                )
            } else {
                None
            };
            let initial = catalog::resolve(player.initial_role).name;
            let lived = format!("Nights lived: {nights_lived} of {total_nights}");
            let (is_winner, money, summary) = match bonus {
                Some(bonus) => (
                    true,
                    player.money + bonus,
                    format!("You won as {initial} (+{bonus}). {lived}."),
                ),
                None => (false, 0, format!("You lost as {initial}. {lived}.")),
            };
            PersonalResult {
                player_id: player.id,
                chat_id: game.chat_id,
                role: player.initial_role,
                is_winner,
                nights_lived,
                total_nights,
                money,
                achievements: player.achievements.clone(),
                summary,
            }
        })
        .collect()
}
