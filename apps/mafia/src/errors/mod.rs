//! Error handling for the Mafia session engine.

pub mod domain;
pub mod error_code;

pub use domain::{Rejection, RejectionKind};
pub use error_code::ErrorCode;
