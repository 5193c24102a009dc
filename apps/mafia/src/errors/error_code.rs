//! Error codes for the Mafia session engine.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that appear
//! in logs and in rejection replies sent back to players.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Submission validation
    /// Actor is dead or dropped out
    ActorNotAlive,
    /// Actor does not hold the role it acts for
    NotRoleHolder,
    /// Role has no ability for the submitted choice
    ChoiceNotSupported,
    /// Target excluded by a cooldown or self-targeting rule
    TargetExcluded,
    /// Target is not among the living players
    TargetNotAlive,
    /// Role sits out tonight
    RoleResting,
    /// Voter has been arrested for the day
    VoterArrested,
    /// Phase does not accept this submission
    PhaseMismatch,

    // Control
    /// Submission arrived after the window closed
    StaleSubmission,
    /// A role expected to have a live holder has none
    MissingActorState,
    /// Illegal phase transition
    InvalidTransition,
    /// Roster too small or malformed
    InvalidRoster,
    /// Unknown player id
    PlayerNotFound,

    // Collaborators
    /// Message delivery failed
    TransportFailure,
    /// Session-state store failed or holds corrupted data
    StoreCorrupted,
    /// Session-state store temporarily unavailable
    StoreUnavailable,
    /// Results repository failed
    PersistenceFailure,

    /// Configuration error
    ConfigError,
    /// Internal invariant violation
    Internal,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ActorNotAlive => "ACTOR_NOT_ALIVE",
            Self::NotRoleHolder => "NOT_ROLE_HOLDER",
            Self::ChoiceNotSupported => "CHOICE_NOT_SUPPORTED",
            Self::TargetExcluded => "TARGET_EXCLUDED",
            Self::TargetNotAlive => "TARGET_NOT_ALIVE",
            Self::RoleResting => "ROLE_RESTING",
            Self::VoterArrested => "VOTER_ARRESTED",
            Self::PhaseMismatch => "PHASE_MISMATCH",

            Self::StaleSubmission => "STALE_SUBMISSION",
            Self::MissingActorState => "MISSING_ACTOR_STATE",
            Self::InvalidTransition => "INVALID_TRANSITION",
            Self::InvalidRoster => "INVALID_ROSTER",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",

            Self::TransportFailure => "TRANSPORT_FAILURE",
            Self::StoreCorrupted => "STORE_CORRUPTED",
            Self::StoreUnavailable => "STORE_UNAVAILABLE",
            Self::PersistenceFailure => "PERSISTENCE_FAILURE",

            Self::ConfigError => "CONFIG_ERROR",
            Self::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
