//! Serializable per-game state. Everything a restore needs lives here.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::{
    ChatId, Faction, NightAction, Outcome, Phase, Player, PlayerId, Prediction, RoleId,
    TrackingLedger,
};

/// Ordered holders per primary role. Index 0 is the boss; aliases follow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleAssignment(BTreeMap<RoleId, Vec<PlayerId>>);

impl RoleAssignment {
    pub fn push(&mut self, slot: RoleId, player: PlayerId) {
        self.0.entry(slot).or_default().push(player);
    }

    pub fn holders(&self, slot: RoleId) -> &[PlayerId] {
        self.0.get(&slot).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn primary(&self, slot: RoleId) -> Option<PlayerId> {
        self.holders(slot).first().copied()
    }

    /// Slot and index the player held, if any.
    pub fn position(&self, player: PlayerId) -> Option<(RoleId, usize)> {
        self.0
            .iter()
            .find_map(|(slot, ids)| ids.iter().position(|p| *p == player).map(|i| (*slot, i)))
    }

    pub fn remove(&mut self, player: PlayerId) -> Option<(RoleId, usize)> {
        let (slot, index) = self.position(player)?;
        if let Some(ids) = self.0.get_mut(&slot) {
            ids.remove(index);
            if ids.is_empty() {
                self.0.remove(&slot);
            }
        }
        Some((slot, index))
    }

    pub fn slots(&self) -> impl Iterator<Item = (&RoleId, &Vec<PlayerId>)> {
        self.0.iter()
    }
}

/// Where a prompt was sent, so it can be deleted when its window closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptRef {
    pub recipient: PlayerId,
    pub message_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameCache {
    pub chat_id: ChatId,
    pub phase: Phase,
    /// Current night number; 0 before the first night.
    pub night: u32,
    pub players: BTreeMap<PlayerId, Player>,
    /// Join order; drives listing order in prompts and announcements.
    pub seating: Vec<PlayerId>,
    pub assignment: RoleAssignment,
    /// Live submissions for the current night, one per actor.
    pub pending: BTreeMap<PlayerId, NightAction>,
    pub next_seq: u64,
    pub tracking: TrackingLedger,
    /// voter -> target for the current vote.
    pub ballots: BTreeMap<PlayerId, PlayerId>,
    pub poisoned: Vec<PlayerId>,
    /// Lynched avengers who act on the next night.
    pub revenge_pending: BTreeSet<PlayerId>,
    pub vote_shield: BTreeSet<PlayerId>,
    pub arrested: BTreeSet<PlayerId>,
    pub prediction: Option<Prediction>,
    pub solo_winners: BTreeSet<PlayerId>,
    /// Players prompted in the currently open window.
    pub awaiting: BTreeSet<PlayerId>,
    pub missed_windows: BTreeMap<PlayerId, u32>,
    pub prompts: Vec<PromptRef>,
    pub outcome: Option<Outcome>,
    #[serde(default)]
    pub started_at: Option<OffsetDateTime>,
}

impl GameCache {
    pub fn new(chat_id: ChatId) -> Self {
        Self {
            chat_id,
            phase: Phase::Lobby,
            night: 0,
            players: BTreeMap::new(),
            seating: Vec::new(),
            assignment: RoleAssignment::default(),
            pending: BTreeMap::new(),
            next_seq: 0,
            tracking: TrackingLedger::default(),
            ballots: BTreeMap::new(),
            poisoned: Vec::new(),
            revenge_pending: BTreeSet::new(),
            vote_shield: BTreeSet::new(),
            arrested: BTreeSet::new(),
            prediction: None,
            solo_winners: BTreeSet::new(),
            awaiting: BTreeSet::new(),
            missed_windows: BTreeMap::new(),
            prompts: Vec::new(),
            outcome: None,
            started_at: None,
        }
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(&id)
    }

    pub fn is_alive(&self, id: PlayerId) -> bool {
        self.player(id).is_some_and(|p| p.alive)
    }

    /// Living players in seating order.
    pub fn living(&self) -> Vec<PlayerId> {
        self.seating
            .iter()
            .copied()
            .filter(|id| self.is_alive(*id))
            .collect()
    }

    pub fn living_in(&self, faction: Faction) -> Vec<PlayerId> {
        self.living()
            .into_iter()
            .filter(|id| self.player(*id).is_some_and(|p| p.faction == faction))
            .collect()
    }

    pub fn handle(&self, id: PlayerId) -> &str {
        self.player(id).map(|p| p.handle.as_str()).unwrap_or("?")
    }

    pub fn mention(&self, id: PlayerId) -> String {
        format!("@{}", self.handle(id))
    }

    /// Transition with the legality check applied.
    pub fn advance(&mut self, next: Phase) -> Result<(), crate::error::GameError> {
        if !self.phase.can_transition_to(next) {
            return Err(crate::error::GameError::InvalidTransition {
                from: self.phase,
                to: next,
            });
        }
        self.phase = next;
        Ok(())
    }

    /// Credit `amount` to each recipient and log it against the current night.
    pub fn credit(&mut self, recipients: &[PlayerId], amount: i64, message: &str) {
        let night = self.night;
        for id in recipients {
            if let Some(player) = self.player_mut(*id) {
                player.credit(amount, format!("Night {night}. {message}"));
            }
        }
    }
}
