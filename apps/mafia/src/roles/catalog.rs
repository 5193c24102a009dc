//! Static role table. Order is stable and doubles as night processing order.

use crate::domain::RoleId;
use crate::roles::{civilians, criminals, independents, Role};

static ROLES: [&Role; 22] = [
    &criminals::DON,
    &criminals::MAFIA,
    &criminals::TRAITOR,
    &criminals::POISONER,
    &criminals::FORGER,
    &civilians::DOCTOR,
    &civilians::NURSE,
    &civilians::BODYGUARD,
    &civilians::LAWYER,
    &civilians::PROSECUTOR,
    &civilians::POLICEMAN,
    &civilians::GENERAL,
    &civilians::AGENT,
    &civilians::JOURNALIST,
    &civilians::ANALYST,
    &civilians::ANGEL_OF_DEATH,
    &civilians::PUNISHER,
    &civilians::PRIME_MINISTER,
    &civilians::CIVILIAN,
    &independents::KILLER,
    &independents::MASOCHIST,
    &independents::SUICIDE_BOMBER,
];

/// Every registered role, in processing order.
pub fn all() -> &'static [&'static Role] {
    &ROLES
}

pub fn resolve(id: RoleId) -> &'static Role {
    match id {
        RoleId::Don => &criminals::DON,
        RoleId::Mafia => &criminals::MAFIA,
        RoleId::Traitor => &criminals::TRAITOR,
        RoleId::Poisoner => &criminals::POISONER,
        RoleId::Forger => &criminals::FORGER,
        RoleId::Civilian => &civilians::CIVILIAN,
        RoleId::Doctor => &civilians::DOCTOR,
        RoleId::Nurse => &civilians::NURSE,
        RoleId::Policeman => &civilians::POLICEMAN,
        RoleId::General => &civilians::GENERAL,
        RoleId::Bodyguard => &civilians::BODYGUARD,
        RoleId::Punisher => &civilians::PUNISHER,
        RoleId::Agent => &civilians::AGENT,
        RoleId::Journalist => &civilians::JOURNALIST,
        RoleId::Analyst => &civilians::ANALYST,
        RoleId::AngelOfDeath => &civilians::ANGEL_OF_DEATH,
        RoleId::PrimeMinister => &civilians::PRIME_MINISTER,
        RoleId::Lawyer => &civilians::LAWYER,
        RoleId::Prosecutor => &civilians::PROSECUTOR,
        RoleId::Masochist => &independents::MASOCHIST,
        RoleId::SuicideBomber => &independents::SUICIDE_BOMBER,
        RoleId::Killer => &independents::KILLER,
    }
}

/// Descriptor of the slot a role occupies (the role itself unless it is an alias).
pub fn slot_of(id: RoleId) -> &'static Role {
    resolve(resolve(id).slot())
}

/// Roles with a night ability, in processing order.
pub fn night_roles() -> impl Iterator<Item = &'static Role> {
    all().iter().copied().filter(|role| role.night.is_some())
}
