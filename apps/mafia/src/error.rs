use thiserror::Error;

use crate::domain::phase::Phase;
use crate::domain::RoleId;
use crate::errors::{ErrorCode, Rejection};

#[derive(Error, Debug)]
pub enum GameError {
    #[error("{0}")]
    Rejected(Rejection),
    #[error("Stale submission for night {night}")]
    StaleSubmission { night: u32 },
    #[error("Role {role} has no live holder")]
    MissingActorState { role: RoleId },
    #[error("Invalid transition: {from:?} -> {to:?}")]
    InvalidTransition { from: Phase, to: Phase },
    #[error("Invalid roster: {detail}")]
    InvalidRoster { detail: String },
    #[error("Player not found: {player_id}")]
    PlayerNotFound { player_id: i64 },
    #[error("Session store error: {detail}")]
    Store {
        code: ErrorCode,
        detail: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
    #[error("Persistence error: {detail}")]
    Persistence { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
}

impl GameError {
    pub fn code(&self) -> ErrorCode {
        match self {
            GameError::Rejected(rejection) => rejection.code(),
            GameError::StaleSubmission { .. } => ErrorCode::StaleSubmission,
            GameError::MissingActorState { .. } => ErrorCode::MissingActorState,
            GameError::InvalidTransition { .. } => ErrorCode::InvalidTransition,
            GameError::InvalidRoster { .. } => ErrorCode::InvalidRoster,
            GameError::PlayerNotFound { .. } => ErrorCode::PlayerNotFound,
            GameError::Store { code, .. } => *code,
            GameError::Persistence { .. } => ErrorCode::PersistenceFailure,
            GameError::Config { .. } => ErrorCode::ConfigError,
            GameError::Internal { .. } => ErrorCode::Internal,
        }
    }

    /// Only a corrupted session-state store ends a session.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            GameError::Store {
                code: ErrorCode::StoreCorrupted,
                ..
            }
        )
    }

    pub fn store_corrupted(
        detail: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Store {
            code: ErrorCode::StoreCorrupted,
            detail: detail.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn store_unavailable(
        detail: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Store {
            code: ErrorCode::StoreUnavailable,
            detail: detail.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn persistence(detail: impl Into<String>) -> Self {
        Self::Persistence {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }
}

impl From<Rejection> for GameError {
    fn from(rejection: Rejection) -> Self {
        GameError::Rejected(rejection)
    }
}

impl From<std::env::VarError> for GameError {
    fn from(e: std::env::VarError) -> Self {
        GameError::config(format!("env var error: {e}"))
    }
}
