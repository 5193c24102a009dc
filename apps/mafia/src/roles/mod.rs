//! Role descriptors.
//!
//! A role is a flat record of data plus optional `fn` hooks. Behaviour is
//! composed by picking hooks from [`fragments`] rather than by layering
//! types, so every capability a role has is visible in its table entry.
//!
//! How to add a role
//!
//! 1) Add a variant to [`RoleId`] with an explicit snake_case name.
//! 2) Define a `static` [`Role`] in the module for its faction.
//! 3) Register it in [`catalog`]; keep ordering stable, it is the processing order.

pub mod catalog;
pub mod civilians;
pub mod criminals;
pub mod fragments;
pub mod independents;

use std::collections::BTreeMap;

use crate::config::RewardRules;
use crate::domain::{
    Choice, ChoiceKind, DeathCause, Faction, GameCache, NightEffect, NightResolution, Outcome,
    Player, PlayerId, RoleId,
};

/// Which holders of a slot may act at night.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actors {
    /// Only index 0 of the slot.
    Boss,
    /// Every holder submits; the mode wins, ties go to the earliest submission.
    Everyone,
    /// Dead holders with a pending revenge right.
    Avengers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    EveryNight,
    EvenNights,
}

/// Eligibility rules. Cooldowns are in nights; 0 means no restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Targeting {
    pub allow_self: bool,
    pub do_not_choose_others: u32,
    pub do_not_choose_self: u32,
    /// Holders of the actor's own slot are never offered.
    pub exclude_own_slot: bool,
}

impl Targeting {
    pub const ANYONE_ELSE: Targeting = Targeting {
        allow_self: false,
        do_not_choose_others: 0,
        do_not_choose_self: 0,
        exclude_own_slot: true,
    };
}

pub struct NightContext<'a> {
    pub game: &'a GameCache,
    /// Slot role whose ability is being resolved.
    pub role: &'static Role,
    pub actor: PlayerId,
    pub choice: Choice,
    /// Player each acting slot settled on tonight, known before any effect runs.
    pub chosen: &'a BTreeMap<RoleId, PlayerId>,
}

pub struct PayoutContext<'a> {
    /// State after tonight's deaths were applied.
    pub game: &'a GameCache,
    pub role: &'static Role,
    pub actor: Option<PlayerId>,
    pub choice: Option<Choice>,
    pub resolution: &'a NightResolution,
}

/// Money credited to a set of players with a score-sheet line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Award {
    pub recipients: Vec<PlayerId>,
    pub amount: i64,
    pub message: String,
}

pub struct DeathContext<'a> {
    /// State after the player was marked dead and removed from the assignment.
    pub game: &'a GameCache,
    pub role: &'static Role,
    pub dead: PlayerId,
    pub slot: RoleId,
    pub index: usize,
    pub cause: DeathCause,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeathOutcome {
    /// Holder promoted to the slot's primary role.
    pub promoted: Option<PlayerId>,
    pub solo_win: bool,
    pub notices: Vec<(PlayerId, String)>,
}

pub struct VoteContext<'a> {
    /// State after the lynch (if any) was applied.
    pub game: &'a GameCache,
    pub role: &'static Role,
    pub lynched: Option<PlayerId>,
    /// Player saved from the gallows by a vote shield.
    pub shielded: Option<PlayerId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteConsequence {
    UnlockRevenge(PlayerId),
    Private { recipient: PlayerId, text: String },
    Group(String),
    Award(Award),
}

pub struct SettleContext<'a> {
    pub game: &'a GameCache,
    pub player: &'a Player,
    pub role: &'static Role,
    pub outcome: &'a Outcome,
    pub nights_lived: u32,
    pub rules: &'a RewardRules,
}

pub type EffectFn = fn(&NightContext<'_>) -> NightEffect;
pub type PayoutFn = fn(&PayoutContext<'_>) -> Vec<Award>;
pub type DeathFn = fn(&DeathContext<'_>) -> DeathOutcome;
pub type VoteFn = fn(&VoteContext<'_>) -> Vec<VoteConsequence>;
/// `Some(bonus)` marks the player a winner with that bonus on top of accumulated money.
pub type SettleFn = fn(&SettleContext<'_>) -> Option<i64>;

pub struct NightAbility {
    pub prompt: &'static str,
    pub actors: Actors,
    pub cadence: Cadence,
    pub targeting: Targeting,
    pub choices: &'static [ChoiceKind],
    /// Sent to the target when the choice names a player.
    pub notice: Option<&'static str>,
    pub effect: EffectFn,
}

pub struct Role {
    pub id: RoleId,
    pub name: &'static str,
    pub faction: Faction,
    /// Primary role this alias succeeds; aliases share the primary's slot.
    pub alias_of: Option<RoleId>,
    pub purpose: &'static str,
    pub night: Option<NightAbility>,
    pub can_kill_at_night: bool,
    /// Attackers of this role's holder die with it.
    pub retaliates: bool,
    pub vote_weight: u32,
    pub payment_for_murder: i64,
    pub payment_for_treatment: i64,
    pub payment_for_night_spent: i64,
    pub payout: Option<PayoutFn>,
    pub on_death: Option<DeathFn>,
    pub on_vote: Option<VoteFn>,
    pub settle: Option<SettleFn>,
}

impl Role {
    /// Defaults shared by every descriptor; entries override what they need.
    pub const BASE: Role = Role {
        id: RoleId::Civilian,
        name: "",
        faction: Faction::Civilians,
        alias_of: None,
        purpose: "",
        night: None,
        can_kill_at_night: false,
        retaliates: false,
        vote_weight: 1,
        payment_for_murder: 5,
        payment_for_treatment: 5,
        payment_for_night_spent: 4,
        payout: None,
        on_death: None,
        on_vote: None,
        settle: None,
    };

    /// Key of the assignment slot this role occupies.
    pub fn slot(&self) -> RoleId {
        self.alias_of.unwrap_or(self.id)
    }

    pub fn is_alias(&self) -> bool {
        self.alias_of.is_some()
    }

    pub fn acts_on(&self, night: u32) -> bool {
        match &self.night {
            Some(ability) => match ability.cadence {
                Cadence::EveryNight => true,
                Cadence::EvenNights => night % 2 == 0,
            },
            None => false,
        }
    }

    pub fn accepts(&self, kind: ChoiceKind) -> bool {
        self.night
            .as_ref()
            .is_some_and(|ability| ability.choices.contains(&kind))
    }
}

impl std::fmt::Debug for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Role")
            .field("id", &self.id)
            .field("faction", &self.faction)
            .field("alias_of", &self.alias_of)
            .finish_non_exhaustive()
    }
}
