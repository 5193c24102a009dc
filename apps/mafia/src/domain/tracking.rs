//! Append-only record of who visited whom, keyed by night.
//!
//! Feeds cooldown eligibility and the investigative roles' reports.

use serde::{Deserialize, Serialize};

use crate::domain::{PlayerId, RoleId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visit {
    pub night: u32,
    pub actor: PlayerId,
    pub slot: RoleId,
    pub target: PlayerId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingLedger {
    visits: Vec<Visit>,
}

impl TrackingLedger {
    pub fn record(&mut self, visit: Visit) {
        self.visits.push(visit);
    }

    /// Remove the actor's entries for `night`; used when a submission is replaced or cancelled.
    pub fn cancel(&mut self, actor: PlayerId, night: u32) -> usize {
        let before = self.visits.len();
        self.visits.retain(|v| !(v.actor == actor && v.night == night));
        before - self.visits.len()
    }

    /// Drop everything recorded on or after `night`.
    pub fn rewind(&mut self, night: u32) {
        self.visits.retain(|v| v.night < night);
    }

    /// Last night strictly before `before` on which `slot` targeted `target`.
    pub fn last_targeted(&self, slot: RoleId, target: PlayerId, before: u32) -> Option<u32> {
        self.visits
            .iter()
            .filter(|v| v.slot == slot && v.target == target && v.night < before)
            .map(|v| v.night)
            .max()
    }

    /// Entries recorded for `night`, in submission order.
    pub fn on_night(&self, night: u32) -> impl Iterator<Item = &Visit> + '_ {
        self.visits.iter().filter(move |v| v.night == night)
    }

    pub fn len(&self) -> usize {
        self.visits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }
}
