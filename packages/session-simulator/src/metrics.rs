//! Metrics collection and output for simulated sessions.

use mafia::domain::DeathCause;
use mafia::roles::catalog;
use mafia::{Faction, RoleId};
use serde::Serialize;

use crate::simulator::GameResult;
use crate::types::BotKind;

/// Complete game metrics for output.
#[derive(Debug, Clone, Serialize)]
pub struct GameMetrics {
    pub game_id: u32,
    pub seed: u64,
    pub timestamp: String,
    pub config: GameConfig,
    pub result: GameResultMetrics,
    pub player_metrics: Vec<PlayerMetrics>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameConfig {
    pub players: usize,
    pub bots: BotKind,
    pub total_games: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameResultMetrics {
    pub winner: Faction,
    pub solo: Option<i64>,
    pub nights: u32,
    pub survivors: usize,
    pub dropped_out: usize,
    pub duration_ms: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerMetrics {
    pub player_id: i64,
    pub role: RoleId,
    pub faction: Faction,
    pub alive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub night_of_death: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub death_cause: Option<DeathCause>,
    pub is_winner: bool,
    pub money: i64,
    pub achievements: usize,
}

pub fn build_game_metrics(
    game_id: u32,
    seed: u64,
    config: GameConfig,
    result: &GameResult,
    duration_ms: f64,
) -> GameMetrics {
    let timestamp = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| String::from("unknown"));

    let player_metrics: Vec<PlayerMetrics> = result
        .summary
        .results
        .iter()
        .filter_map(|settled| {
            let player = result.table.player(settled.player_id)?;
            Some(PlayerMetrics {
                player_id: player.id,
                role: player.initial_role,
                faction: catalog::resolve(player.initial_role).faction,
                alive: player.alive,
                night_of_death: player.night_of_death,
                death_cause: player.death_cause,
                is_winner: settled.is_winner,
                money: settled.money,
                achievements: settled.achievements.len(),
            })
        })
        .collect();

    GameMetrics {
        game_id,
        seed,
        timestamp,
        config,
        result: GameResultMetrics {
            winner: result.summary.outcome.winner,
            solo: result.summary.outcome.solo,
            nights: result.summary.nights,
            survivors: player_metrics.iter().filter(|p| p.alive).count(),
            dropped_out: player_metrics
                .iter()
                .filter(|p| p.death_cause == Some(DeathCause::Dropout))
                .count(),
            duration_ms,
        },
        player_metrics,
    }
}

/// CSV summary row for quick analysis.
#[derive(Debug, Serialize)]
pub struct CsvSummaryRow {
    pub game_id: u32,
    pub seed: u64,
    pub players: usize,
    pub winner: &'static str,
    pub nights: u32,
    pub survivors: usize,
    pub dropped_out: usize,
    pub winners: usize,
    pub total_money: i64,
}

impl From<&GameMetrics> for CsvSummaryRow {
    fn from(metrics: &GameMetrics) -> Self {
        CsvSummaryRow {
            game_id: metrics.game_id,
            seed: metrics.seed,
            players: metrics.config.players,
            winner: metrics.result.winner.as_str(),
            nights: metrics.result.nights,
            survivors: metrics.result.survivors,
            dropped_out: metrics.result.dropped_out,
            winners: metrics.player_metrics.iter().filter(|p| p.is_winner).count(),
            total_money: metrics.player_metrics.iter().map(|p| p.money).sum(),
        }
    }
}
