//! Per-chat game session: drives phases, owns the cache, talks to collaborators.
//!
//! Every mutation happens under the session lock and is saved to the
//! session store before any message goes out. Phase steps are public so
//! tests and tools can drive a game without timers; `run` composes them.

mod mailing;
mod night;
mod settlement;
mod vote;

use std::ops::ControlFlow;
use std::sync::Arc;

use serde::Serialize;
use time::OffsetDateTime;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{error, info, warn};

use crate::config::GameSettings;
use crate::domain::{ChatId, Choice, DeathCause, GameCache, Outbox, Outcome, Phase, PlayerId, RoleId};
use crate::error::GameError;
use crate::errors::{Rejection, RejectionKind};
use crate::messaging::{broadcast, MessageOptions};
use crate::scheduling::Window;
use crate::services::action_collector::{self, Accepted};
use crate::services::reward_ledger::PersonalResult;
use crate::services::{casualties, role_assignment};
use crate::state::collaborators::Collaborators;

pub use mailing::{night_prompts, vote_prompts};

/// Upper bound on phase steps in one `run`; a game that long is stuck.
const MAX_STEPS: usize = 1_000;

#[derive(Debug, Clone, Serialize)]
pub struct GameSummary {
    pub chat_id: ChatId,
    pub outcome: Outcome,
    pub nights: u32,
    pub results: Vec<PersonalResult>,
    pub started_at: Option<OffsetDateTime>,
    pub finished_at: OffsetDateTime,
}

pub struct GameSession {
    chat_id: ChatId,
    settings: GameSettings,
    deps: Collaborators,
    cache: Mutex<GameCache>,
}

impl GameSession {
    /// Deal roles to `roster` (player id, handle) and introduce everyone to their role.
    pub async fn open(
        chat_id: ChatId,
        settings: GameSettings,
        deps: Collaborators,
        roster: Vec<(PlayerId, String)>,
    ) -> Result<Arc<Self>, GameError> {
        settings.validate()?;
        if roster.len() < settings.min_players {
            return Err(GameError::InvalidRoster {
                detail: format!(
                    "{} players joined, at least {} are needed",
                    roster.len(),
                    settings.min_players
                ),
            });
        }
        let mut ids: Vec<PlayerId> = roster.iter().map(|(id, _)| *id).collect();
        ids.sort_unstable();
        ids.dedup();
        if ids.len() != roster.len() {
            return Err(GameError::InvalidRoster {
                detail: "duplicate player in roster".to_string(),
            });
        }

        let seed = settings.seed.unwrap_or_else(rand::random);
        let order = settings
            .role_order
            .clone()
            .unwrap_or_else(|| role_assignment::DEFAULT_ROLE_ORDER.to_vec());
        let mut cache = GameCache::new(chat_id);
        role_assignment::assign_roles(&mut cache, &roster, &order, seed)?;
        cache.started_at = Some(OffsetDateTime::now_utc());
        deps.store.save(&cache).await?;
        info!(chat_id, players = roster.len(), seed, "Game opened");

        let intro = role_assignment::familiarize(&cache);
        let session = Arc::new(Self {
            chat_id,
            settings,
            deps,
            cache: Mutex::new(cache),
        });
        session.deliver(intro).await;
        Ok(session)
    }

    /// Resume a saved session. An unresolved night or vote is rewound so it runs again.
    ///
    /// Returns `None` when nothing is saved or the saved game already ended.
    pub async fn restore(
        chat_id: ChatId,
        settings: GameSettings,
        deps: Collaborators,
    ) -> Result<Option<Arc<Self>>, GameError> {
        let Some(mut cache) = deps.store.load(chat_id).await? else {
            return Ok(None);
        };
        if cache.phase == Phase::GameOver {
            warn!(chat_id, "Saved session already finished; discarding");
            deps.store.remove(chat_id).await?;
            return Ok(None);
        }
        let stale_prompts: Vec<(ChatId, i64)> = cache
            .prompts
            .drain(..)
            .map(|p| (p.recipient, p.message_id))
            .collect();
        match cache.phase {
            Phase::Night => {
                let night = cache.night;
                cache.pending.clear();
                cache.tracking.rewind(night);
                cache.awaiting.clear();
                cache.night = night.saturating_sub(1);
                cache.phase = if cache.night == 0 {
                    Phase::Lobby
                } else {
                    Phase::VoteTally
                };
                info!(chat_id, night, "Unresolved night rewound");
            }
            Phase::Vote => {
                cache.ballots.clear();
                cache.awaiting.clear();
                cache.phase = Phase::NightTally;
                info!(chat_id, night = cache.night, "Unresolved vote rewound");
            }
            _ => {}
        }
        deps.store.save(&cache).await?;
        broadcast::delete_all(deps.messenger.as_ref(), &stale_prompts).await;
        Ok(Some(Arc::new(Self {
            chat_id,
            settings,
            deps,
            cache: Mutex::new(cache),
        })))
    }

    pub fn chat_id(&self) -> ChatId {
        self.chat_id
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub async fn snapshot(&self) -> GameCache {
        self.cache.lock().await.clone()
    }

    /// Drive the game to the end using the scheduler for window timing.
    pub async fn run(&self) -> Result<GameSummary, GameError> {
        for _ in 0..MAX_STEPS {
            let (phase, night, outcome) = {
                let cache = self.cache.lock().await;
                (cache.phase, cache.night, cache.outcome)
            };
            let step = match phase {
                Phase::Lobby | Phase::VoteTally => {
                    self.begin_night().await?;
                    ControlFlow::Continue(())
                }
                Phase::Night => {
                    self.deps
                        .scheduler
                        .wait(Window::Night { night }, self.settings.night_window())
                        .await;
                    self.close_night().await?
                }
                Phase::NightTally => {
                    self.begin_vote().await?;
                    ControlFlow::Continue(())
                }
                Phase::Vote => {
                    self.deps
                        .scheduler
                        .wait(Window::Vote { night }, self.settings.vote_window())
                        .await;
                    self.close_vote().await?
                }
                Phase::GameOver => match outcome {
                    Some(outcome) => ControlFlow::Break(outcome),
                    None => return Err(GameError::internal("game over without an outcome")),
                },
            };
            if let ControlFlow::Break(outcome) = step {
                return self.finish(outcome).await;
            }
        }
        error!(chat_id = self.chat_id, "Game did not finish");
        Err(GameError::internal(format!(
            "game {} exceeded {MAX_STEPS} phase steps",
            self.chat_id
        )))
    }

    /// Record a night action. Stale submissions come back as `StaleSubmission`.
    pub async fn submit_action(
        &self,
        actor: PlayerId,
        role: RoleId,
        choice: Choice,
        night: u32,
    ) -> Result<Accepted, GameError> {
        let (accepted, message_id, text) = {
            let mut cache = self.cache.lock().await;
            let accepted = action_collector::submit(&mut cache, night, actor, role, choice)?;
            self.persist(&cache).await?;
            let prompt = cache
                .prompts
                .iter()
                .find(|p| p.recipient == actor)
                .map(|p| p.message_id);
            let text = match choice.subject() {
                Some(target) => format!("You chose {}.", cache.mention(target)),
                None => "Your choice is recorded.".to_string(),
            };
            (accepted, prompt, text)
        };
        if let Some(message_id) = message_id {
            if let Err(err) = self.deps.messenger.edit_message(actor, message_id, &text).await {
                warn!(player_id = actor, error = %err, "Prompt update failed");
            }
        }
        Ok(accepted)
    }

    pub async fn cancel_action(&self, actor: PlayerId) -> Result<bool, GameError> {
        let mut cache = self.cache.lock().await;
        let removed = action_collector::cancel(&mut cache, actor)?;
        self.persist(&cache).await?;
        Ok(removed)
    }

    /// Record a ballot; returns true when it replaced an earlier one.
    pub async fn cast_ballot(&self, voter: PlayerId, target: PlayerId, night: u32) -> Result<bool, GameError> {
        let mut cache = self.cache.lock().await;
        let replaced = action_collector::cast_ballot(&mut cache, night, voter, target)?;
        self.persist(&cache).await?;
        Ok(replaced)
    }

    pub async fn retract_ballot(&self, voter: PlayerId) -> Result<bool, GameError> {
        let mut cache = self.cache.lock().await;
        let removed = action_collector::retract_ballot(&mut cache, voter)?;
        self.persist(&cache).await?;
        Ok(removed)
    }

    /// A player leaves voluntarily. Settles as a drop-out; the win check runs at the next tally.
    ///
    /// A finished game is left untouched.
    pub async fn drop_out(&self, player: PlayerId) -> Result<(), GameError> {
        let mut outbox = Outbox::default();
        {
            let mut cache = self.cache.lock().await;
            if cache.phase == Phase::GameOver {
                return Err(Rejection::new(RejectionKind::PhaseMismatch, "the game is over").into());
            }
            if cache.player(player).is_none() {
                return Err(GameError::PlayerNotFound { player_id: player });
            }
            if casualties::apply_death(&mut cache, player, DeathCause::Dropout, &mut outbox) {
                outbox.group(format!("{} left the game.", cache.mention(player)));
            }
            self.persist(&cache).await?;
        }
        self.deliver(outbox).await;
        Ok(())
    }

    async fn lock(&self) -> MutexGuard<'_, GameCache> {
        self.cache.lock().await
    }

    /// Save the cache. Only an unusable store stops the game.
    async fn persist(&self, cache: &GameCache) -> Result<(), GameError> {
        match self.deps.store.save(cache).await {
            Ok(()) => Ok(()),
            Err(err) if err.is_fatal() => {
                error!(chat_id = self.chat_id, code = %err.code(), error = %err, "Session state lost");
                Err(err)
            }
            Err(err) => {
                warn!(chat_id = self.chat_id, code = %err.code(), error = %err, "Session save failed");
                Ok(())
            }
        }
    }

    async fn deliver(&self, outbox: Outbox) -> broadcast::DeliveryReport {
        broadcast::deliver(
            self.deps.messenger.as_ref(),
            self.chat_id,
            outbox.into_notices(),
        )
        .await
    }

    async fn send_group(&self, text: &str) {
        if let Err(err) = self
            .deps
            .messenger
            .send_group(self.chat_id, text, &MessageOptions::default())
            .await
        {
            warn!(chat_id = self.chat_id, error = %err, "Group announcement failed");
        }
    }
}
