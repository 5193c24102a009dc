use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// Stable identifier of a role descriptor.
///
/// Identifiers are explicit values set once in the catalog table; they are
/// never derived from type or function names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleId {
    Don,
    Mafia,
    Traitor,
    Poisoner,
    Forger,
    Civilian,
    Doctor,
    Nurse,
    Policeman,
    General,
    Bodyguard,
    Punisher,
    Agent,
    Journalist,
    Analyst,
    AngelOfDeath,
    PrimeMinister,
    Lawyer,
    Prosecutor,
    Masochist,
    SuicideBomber,
    Killer,
}

impl RoleId {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Don => "don",
            Self::Mafia => "mafia",
            Self::Traitor => "traitor",
            Self::Poisoner => "poisoner",
            Self::Forger => "forger",
            Self::Civilian => "civilian",
            Self::Doctor => "doctor",
            Self::Nurse => "nurse",
            Self::Policeman => "policeman",
            Self::General => "general",
            Self::Bodyguard => "bodyguard",
            Self::Punisher => "punisher",
            Self::Agent => "agent",
            Self::Journalist => "journalist",
            Self::Analyst => "analyst",
            Self::AngelOfDeath => "angel_of_death",
            Self::PrimeMinister => "prime_minister",
            Self::Lawyer => "lawyer",
            Self::Prosecutor => "prosecutor",
            Self::Masochist => "masochist",
            Self::SuicideBomber => "suicide_bomber",
            Self::Killer => "killer",
        }
    }
}

impl Display for RoleId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}
