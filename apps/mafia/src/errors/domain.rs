//! Domain-level rejection type for illegal submissions.
//!
//! A rejection is surfaced back to the submitting player and never aborts a
//! phase. Services return `Result<T, crate::error::GameError>` and convert
//! from `Rejection` using the provided `From<Rejection> for GameError`.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::errors::ErrorCode;

/// Why a submission was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RejectionKind {
    ActorNotAlive,
    NotRoleHolder,
    ChoiceNotSupported,
    TargetExcluded,
    TargetNotAlive,
    RoleResting,
    VoterArrested,
    PhaseMismatch,
}

impl RejectionKind {
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::ActorNotAlive => ErrorCode::ActorNotAlive,
            Self::NotRoleHolder => ErrorCode::NotRoleHolder,
            Self::ChoiceNotSupported => ErrorCode::ChoiceNotSupported,
            Self::TargetExcluded => ErrorCode::TargetExcluded,
            Self::TargetNotAlive => ErrorCode::TargetNotAlive,
            Self::RoleResting => ErrorCode::RoleResting,
            Self::VoterArrested => ErrorCode::VoterArrested,
            Self::PhaseMismatch => ErrorCode::PhaseMismatch,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub kind: RejectionKind,
    pub detail: String,
}

impl Rejection {
    pub fn new(kind: RejectionKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }
}

impl Display for Rejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "rejected {}: {}", self.kind.code(), self.detail)
    }
}

impl Error for Rejection {}
