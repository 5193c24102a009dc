#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod messaging;
pub mod repos;
pub mod roles;
pub mod scheduling;
pub mod services;
pub mod state;
pub mod telemetry;

// Re-exports for public API
pub use config::{GameSettings, RewardRules};
pub use domain::{ChatId, Choice, Faction, GameCache, Outcome, Phase, PlayerId, RoleId};
pub use error::GameError;
pub use services::game_flow::{GameSession, GameSummary};
pub use state::collaborators::Collaborators;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    mafia_test_support::logging::init();
}
