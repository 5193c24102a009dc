use time::OffsetDateTime;
use tracing::{info, warn};

use super::{GameSession, GameSummary};
use crate::domain::{Faction, Outbox, Outcome};
use crate::error::GameError;
use crate::roles::catalog;
use crate::services::reward_ledger;

impl GameSession {
    /// Settle rewards, persist results once per player, announce and tear down.
    pub async fn finish(&self, outcome: Outcome) -> Result<GameSummary, GameError> {
        let (results, nights, started_at, announcement) = {
            let cache = self.lock().await;
            let results = reward_ledger::settle(&cache, &outcome, &self.settings.rewards);
            let winners = match (outcome.winner, outcome.solo) {
                (_, Some(solo)) => format!("{} wins alone!", cache.mention(solo)),
                (Faction::Criminals, None) => "The mafia wins!".to_string(),
                (Faction::Civilians, None) => "The civilians win!".to_string(),
                (Faction::Other, None) => "Nobody wins.".to_string(),
            };
            let roles: Vec<String> = cache
                .seating
                .iter()
                .filter_map(|id| cache.player(*id))
                .map(|p| format!("@{} - {}", p.handle, catalog::resolve(p.initial_role).name))
                .collect();
            let announcement = format!(
                "Game over after {} nights. {winners}\n{}",
                cache.night,
                roles.join("\n")
            );
            (results, cache.night, cache.started_at, announcement)
        };

        for result in &results {
            if let Err(err) = self.deps.results.record_personal_result(result).await {
                warn!(chat_id = self.chat_id, player_id = result.player_id, code = %err.code(), error = %err, "Result not recorded");
            }
            if let Err(err) = self
                .deps
                .results
                .adjust_balance(result.player_id, result.money)
                .await
            {
                warn!(chat_id = self.chat_id, player_id = result.player_id, code = %err.code(), error = %err, "Balance not adjusted");
            }
        }

        let mut outbox = Outbox::default();
        outbox.group(announcement);
        for result in &results {
            outbox.private(result.player_id, result.summary.clone());
        }
        self.deliver(outbox).await;

        if let Err(err) = self.deps.store.remove(self.chat_id).await {
            warn!(chat_id = self.chat_id, error = %err, "Session cleanup failed");
        }
        info!(
            chat_id = self.chat_id,
            winner = outcome.winner.as_str(),
            nights,
            "Game finished"
        );
        Ok(GameSummary {
            chat_id: self.chat_id,
            outcome,
            nights,
            results,
            started_at,
            finished_at: OffsetDateTime::now_utc(),
        })
    }
}
