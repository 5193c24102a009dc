//! Test support for the mafia engine
//!
//! Unified logging initialization and helpers for unique test data.

pub mod logging;
pub mod unique_helpers;
