use std::collections::BTreeSet;
use std::ops::ControlFlow;

use tracing::info;

use super::{mailing, GameSession};
use crate::domain::{Outbox, Outcome, Phase, PromptRef};
use crate::error::GameError;
use crate::messaging::broadcast;
use crate::services::{vote_resolver, win_condition};

impl GameSession {
    /// Open the day vote and send ballots to every living, unarrested player.
    pub async fn begin_vote(&self) -> Result<u32, GameError> {
        let (night, prompts, arrested) = {
            let mut cache = self.lock().await;
            cache.advance(Phase::Vote)?;
            cache.ballots.clear();
            cache.prompts.clear();
            let prompts = mailing::vote_prompts(&cache);
            cache.awaiting = prompts.iter().map(|(id, _, _)| *id).collect::<BTreeSet<_>>();
            self.persist(&cache).await?;
            let arrested: Vec<String> = cache.arrested.iter().map(|id| cache.mention(*id)).collect();
            (cache.night, prompts, arrested)
        };
        info!(chat_id = self.chat_id, night, voters = prompts.len(), "Vote started");
        let mut text = format!("Day {night}. Time to decide who hangs!");
        if !arrested.is_empty() {
            text.push_str(&format!("\nUnder arrest and unable to vote: {}", arrested.join(", ")));
        }
        self.send_group(&text).await;

        let report = broadcast::broadcast_private(self.deps.messenger.as_ref(), prompts).await;
        let mut cache = self.lock().await;
        if cache.phase == Phase::Vote && cache.night == night {
            cache.prompts.extend(report.delivered.iter().map(|(recipient, message_id)| PromptRef {
                recipient: *recipient,
                message_id: *message_id,
            }));
            self.persist(&cache).await?;
        }
        Ok(night)
    }

    /// Close the vote window: drop idle voters, tally, lynch, check for a winner.
    pub async fn close_vote(&self) -> Result<ControlFlow<Outcome>, GameError> {
        let mut outbox = Outbox::default();
        let (outcome, prompts) = {
            let mut cache = self.lock().await;
            cache.advance(Phase::VoteTally)?;
            let prompts: Vec<(i64, i64)> = cache
                .prompts
                .drain(..)
                .map(|p| (p.recipient, p.message_id))
                .collect();
            mailing::account_inactivity(
                &mut cache,
                |game, player| game.ballots.contains_key(&player),
                self.settings.max_missed_windows,
                &mut outbox,
            );
            let outcome = match win_condition::evaluate(&cache) {
                Some(outcome) => Some(outcome),
                None => {
                    let report = vote_resolver::resolve_vote(&mut cache);
                    outbox.extend(report.outbox);
                    report.outcome
                }
            };
            if let Some(outcome) = outcome {
                cache.outcome = Some(outcome);
                cache.advance(Phase::GameOver)?;
            }
            self.persist(&cache).await?;
            (outcome, prompts)
        };
        broadcast::delete_all(self.deps.messenger.as_ref(), &prompts).await;
        self.deliver(outbox).await;
        Ok(match outcome {
            Some(outcome) => ControlFlow::Break(outcome),
            None => ControlFlow::Continue(()),
        })
    }
}
