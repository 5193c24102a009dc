//! Runs one full session with bots answering prompts through the recording messenger.

use std::sync::Arc;

use mafia::adapters::{InMemoryResults, InMemorySessionStore};
use mafia::messaging::memory::{PromptEvent, RecordingMessenger};
use mafia::scheduling::TokioScheduler;
use mafia::{Collaborators, GameCache, GameError, GameSession, GameSettings, GameSummary, Phase};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, warn};

use crate::types::BotKind;

/// Finished game: the summary plus the final table for metrics.
pub struct GameResult {
    pub summary: GameSummary,
    pub table: GameCache,
}

pub struct Simulator {
    base: GameSettings,
    seed: u64,
    chat_id: i64,
    players: usize,
    bots: BotKind,
    time_scale: f64,
}

impl Simulator {
    pub fn new(
        base: GameSettings,
        seed: u64,
        game_num: u32,
        players: usize,
        bots: BotKind,
        time_scale: f64,
    ) -> Self {
        Self {
            base,
            seed,
            chat_id: -(i64::from(game_num)),
            players,
            bots,
            time_scale,
        }
    }

    pub async fn simulate_game(&self) -> Result<GameResult, GameError> {
        let (messenger, prompts) = RecordingMessenger::with_prompt_channel();
        let deps = Collaborators::new(
            Arc::new(messenger),
            Arc::new(InMemoryResults::new()),
            Arc::new(TokioScheduler::scaled(self.time_scale)),
            Arc::new(InMemorySessionStore::new()),
        );
        let settings = GameSettings {
            seed: Some(self.seed),
            ..self.base.clone()
        };
        let roster = (1..=self.players as i64)
            .map(|id| (id, format!("bot{id}")))
            .collect();

        let session = GameSession::open(self.chat_id, settings, deps, roster).await?;
        let bots = tokio::spawn(answer_prompts(
            session.clone(),
            prompts,
            self.bots,
            ChaCha8Rng::seed_from_u64(self.seed.rotate_left(17)),
        ));
        let outcome = session.run().await;
        bots.abort();
        let summary = outcome?;
        let table = session.snapshot().await;
        Ok(GameResult { summary, table })
    }
}

/// Answer prompts until the session is gone. Late or rejected answers are only logged.
async fn answer_prompts(
    session: Arc<GameSession>,
    mut prompts: UnboundedReceiver<PromptEvent>,
    kind: BotKind,
    mut rng: ChaCha8Rng,
) {
    while let Some(prompt) = prompts.recv().await {
        if prompt.options.choices.is_empty() || !rng.random_bool(kind.answer_rate()) {
            continue;
        }
        let night = prompt.options.night.unwrap_or_default();
        let pick = rng.random_range(0..prompt.options.choices.len());
        let choice = prompt.options.choices[pick].choice;

        let game = session.snapshot().await;
        let answer = match (game.phase, choice.subject()) {
            (Phase::Vote, Some(target)) => session
                .cast_ballot(prompt.recipient, target, night)
                .await
                .map(|_| ()),
            (Phase::Night, _) => {
                let Some(role) = game.player(prompt.recipient).map(|p| p.role) else {
                    continue;
                };
                session
                    .submit_action(prompt.recipient, role, choice, night)
                    .await
                    .map(|_| ())
            }
            _ => continue,
        };
        match answer {
            Ok(()) => debug!(player_id = prompt.recipient, ?choice, "Bot answered"),
            Err(err) if err.is_fatal() => {
                warn!(error = %err, "Bot stopped");
                return;
            }
            Err(err) => debug!(player_id = prompt.recipient, code = %err.code(), "Bot answer dropped"),
        }
    }
}
