use std::collections::{BTreeMap, BTreeSet};

use crate::domain::{Faction, PlayerId, Prediction, RoleId};

/// Who receives a disclosure or report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    Player(PlayerId),
    /// Every living holder of the slot.
    Slot(RoleId),
    /// Every living member of the faction.
    Faction(Faction),
}

/// A player's displayed role revealed to an audience after forging is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Disclosure {
    pub subject: PlayerId,
    pub audience: Audience,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SideEffect {
    Forge { player: PlayerId, shown_as: RoleId },
    Poison { player: PlayerId },
    ClearPoison,
    /// Target cannot be lynched at the next vote.
    VoteShield { player: PlayerId },
    /// Target cannot vote at the next vote.
    Arrest { player: PlayerId },
    Predict(Prediction),
    Report { audience: Audience, text: String },
}

/// What one role's processed choice does to the night. Pure data; merged by the resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NightEffect {
    pub kills: BTreeSet<PlayerId>,
    /// Protections; duplicates matter (a player protected twice is protected twice).
    pub protects: Vec<PlayerId>,
    /// (protector, protected): protector dies in place of the protected target.
    pub sacrifices: Vec<(PlayerId, PlayerId)>,
    pub disclosures: Vec<Disclosure>,
    pub side_effects: Vec<SideEffect>,
    /// Protection is void for the whole night when any effect sets this.
    pub ignore_protection: bool,
}

impl NightEffect {
    pub fn kill(player: PlayerId) -> Self {
        Self {
            kills: BTreeSet::from([player]),
            ..Self::default()
        }
    }

    pub fn protect(player: PlayerId) -> Self {
        Self {
            protects: vec![player],
            ..Self::default()
        }
    }

    pub fn side(effect: SideEffect) -> Self {
        Self {
            side_effects: vec![effect],
            ..Self::default()
        }
    }
}

/// Aggregate outcome of a night, handed to payout hooks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NightResolution {
    pub night: u32,
    pub raw_kills: BTreeSet<PlayerId>,
    /// Protections in effect (empty when protection was ignored).
    pub protects: Vec<PlayerId>,
    pub ignore_protection: bool,
    pub victims: BTreeSet<PlayerId>,
    /// Attackers killed by retaliation.
    pub punished: BTreeSet<PlayerId>,
    pub sacrificed: BTreeSet<PlayerId>,
    /// Players whose displayed role was forged tonight.
    pub forged: BTreeMap<PlayerId, RoleId>,
    /// Subjects whose role was revealed tonight.
    pub disclosed: BTreeSet<PlayerId>,
    /// Kills each slot contributed before protection.
    pub kill_sources: BTreeMap<RoleId, BTreeSet<PlayerId>>,
    /// Player each acting slot settled on tonight.
    pub chosen: BTreeMap<RoleId, PlayerId>,
}

impl NightResolution {
    pub fn protection_count(&self, player: PlayerId) -> usize {
        self.protects.iter().filter(|p| **p == player).count()
    }

    /// Victims that this slot's kills actually produced.
    pub fn victims_of(&self, slot: RoleId) -> Vec<PlayerId> {
        self.kill_sources
            .get(&slot)
            .map(|kills| kills.intersection(&self.victims).copied().collect())
            .unwrap_or_default()
    }

    /// Attacked but alive because of protection.
    pub fn saved(&self, player: PlayerId) -> bool {
        self.raw_kills.contains(&player) && !self.victims.contains(&player)
    }
}
