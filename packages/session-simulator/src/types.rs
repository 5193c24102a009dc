//! Shared types for the simulator.

use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Jsonl,
    Csv,
}

/// How simulated players answer prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BotKind {
    /// Always answers, with a uniformly random choice.
    Random,
    /// Answers about two prompts in three.
    Hesitant,
    /// Never answers; games end through inactivity.
    Idle,
}

impl BotKind {
    /// Chance of answering a prompt at all.
    pub fn answer_rate(self) -> f64 {
        match self {
            BotKind::Random => 1.0,
            BotKind::Hesitant => 0.66,
            BotKind::Idle => 0.0,
        }
    }
}
