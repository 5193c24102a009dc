//! Pure game model: no I/O, no async.

pub mod actions;
pub mod effects;
pub mod faction;
pub mod notices;
pub mod outcome;
pub mod phase;
pub mod player;
pub mod role_id;
pub mod state;
pub mod tracking;

#[cfg(test)]
pub mod test_state_helpers;

pub use actions::{Choice, ChoiceKind, NightAction, Prediction};
pub use effects::{Audience, Disclosure, NightEffect, NightResolution, SideEffect};
pub use faction::Faction;
pub use notices::{Notice, Outbox, Recipient};
pub use outcome::Outcome;
pub use phase::Phase;
pub use player::{Achievement, ChatId, DeathCause, Player, PlayerId};
pub use role_id::RoleId;
pub use state::{GameCache, PromptRef, RoleAssignment};
pub use tracking::{TrackingLedger, Visit};
