use std::collections::BTreeSet;
use std::ops::ControlFlow;

use tracing::info;

use super::{mailing, GameSession};
use crate::domain::{Outbox, Outcome, Phase, PromptRef};
use crate::error::GameError;
use crate::messaging::broadcast;
use crate::services::{night_resolver, win_condition};

impl GameSession {
    /// Open the next night and send prompts to everyone who may act.
    pub async fn begin_night(&self) -> Result<u32, GameError> {
        let (night, prompts, roll_call) = {
            let mut cache = self.lock().await;
            cache.advance(Phase::Night)?;
            cache.night += 1;
            cache.pending.clear();
            cache.prompts.clear();
            let prompts = mailing::night_prompts(&cache);
            cache.awaiting = prompts.iter().map(|(id, _, _)| *id).collect::<BTreeSet<_>>();
            self.persist(&cache).await?;
            (cache.night, prompts, mailing::roll_call(&cache))
        };
        info!(chat_id = self.chat_id, night, prompts = prompts.len(), "Night started");
        self.send_group(&format!("Night {night} falls. The town goes to sleep.\n{roll_call}"))
            .await;

        let report = broadcast::broadcast_private(self.deps.messenger.as_ref(), prompts).await;
        let mut cache = self.lock().await;
        if cache.phase == Phase::Night && cache.night == night {
            cache.prompts.extend(report.delivered.iter().map(|(recipient, message_id)| PromptRef {
                recipient: *recipient,
                message_id: *message_id,
            }));
            self.persist(&cache).await?;
        }
        Ok(night)
    }

    /// Close the night window: drop idle players, resolve actions, check for a winner.
    pub async fn close_night(&self) -> Result<ControlFlow<Outcome>, GameError> {
        let mut outbox = Outbox::default();
        let (outcome, prompts) = {
            let mut cache = self.lock().await;
            cache.advance(Phase::NightTally)?;
            let prompts: Vec<(i64, i64)> = cache
                .prompts
                .drain(..)
                .map(|p| (p.recipient, p.message_id))
                .collect();
            mailing::account_inactivity(
                &mut cache,
                |game, player| game.pending.contains_key(&player),
                self.settings.max_missed_windows,
                &mut outbox,
            );
            let outcome = match win_condition::evaluate(&cache) {
                Some(outcome) => Some(outcome),
                None => {
                    let report = night_resolver::resolve_night(&mut cache);
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
