//! Metrics collection and output rows for simulated episodes.

use bridge_play::domain::rules::PLAYERS;
use bridge_play::domain::Roles;
use bridge_play::{Card, Seat};
use serde::Serialize;

use crate::simulator::EpisodeResult;

/// Complete episode metrics for output.
#[derive(Debug, Clone, Serialize)]
pub struct EpisodeMetrics {
    pub episode_id: u32,
    pub seed: u64,
    pub timestamp: String,
    pub config: RunConfig,
    pub result: EpisodeResultMetrics,
    pub tricks: Vec<TrickMetrics>,
    pub seat_metrics: Vec<SeatMetrics>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunConfig {
    pub reward_mode: String,
    pub turn_mode: String,
    pub agent_types: [String; PLAYERS],
    pub illegal_rate: f64,
    pub total_episodes: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct EpisodeResultMetrics {
    pub declarer: Seat,
    pub contract: String,
    pub declarer_tricks: u8,
    pub defender_tricks: u8,
    pub made: bool,
    pub total_rewards: [i64; PLAYERS],
    pub steps: u32,
    pub duration_ms: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrickMetrics {
    pub trick_no: u8,
    pub leader: Seat,
    pub winner: Seat,
    /// Indexed by seat.
    pub cards: [Card; PLAYERS],
}

#[derive(Debug, Clone, Serialize)]
pub struct SeatMetrics {
    pub seat: Seat,
    pub role: &'static str,
    pub total_reward: i64,
    /// Proposals the engine had to replace with a legal card.
    pub substitutions: u32,
    pub tricks_won: u8,
}

pub struct RunInfo<'a> {
    pub reward_mode: &'a str,
    pub turn_mode: &'a str,
    pub agent_types: [String; PLAYERS],
    pub illegal_rate: f64,
    pub total_episodes: u32,
}

/// Build metrics from a finished episode.
pub fn build_episode_metrics(
    episode_id: u32,
    seed: u64,
    run: RunInfo<'_>,
    result: &EpisodeResult,
    duration_ms: f64,
) -> EpisodeMetrics {
    let timestamp = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| String::from("unknown"));

    let state = &result.final_state;
    let roles = state.roles;
    let declarer_tricks = state.declarer_tricks();

    let tricks = state
        .trick_history
        .iter()
        .enumerate()
        .map(|(i, t)| TrickMetrics {
            trick_no: i as u8 + 1,
            leader: t.leader,
            winner: t.winner,
            cards: t.cards,
        })
        .collect();

    let seat_metrics = Seat::ALL
        .iter()
        .map(|&seat| SeatMetrics {
            seat,
            role: role_name(seat, &roles),
            total_reward: result.total_rewards[seat.index()],
            substitutions: result.substitutions[seat.index()],
            tricks_won: state.tricks_won[seat.index()],
        })
        .collect();

    EpisodeMetrics {
        episode_id,
        seed,
        timestamp,
        config: RunConfig {
            reward_mode: run.reward_mode.to_string(),
            turn_mode: run.turn_mode.to_string(),
            agent_types: run.agent_types,
            illegal_rate: run.illegal_rate,
            total_episodes: run.total_episodes,
        },
        result: EpisodeResultMetrics {
            declarer: roles.declarer,
            contract: state.contract.to_string(),
            declarer_tricks,
            defender_tricks: state.tricks_won[roles.defender_1.index()],
            made: state.contract_made(),
            total_rewards: result.total_rewards,
            steps: result.steps,
            duration_ms,
        },
        tricks,
        seat_metrics,
    }
}

fn role_name(seat: Seat, roles: &Roles) -> &'static str {
    if seat == roles.declarer {
        "declarer"
    } else if roles.is_declaring_side(seat) {
        "dummy"
    } else {
        "defender"
    }
}

/// CSV summary row for quick analysis.
#[derive(Debug, Serialize)]
pub struct CsvSummaryRow {
    pub episode_id: u32,
    pub seed: u64,
    pub declarer: Seat,
    pub contract: String,
    pub declarer_tricks: u8,
    pub made: bool,
    pub n_reward: i64,
    pub e_reward: i64,
    pub s_reward: i64,
    pub w_reward: i64,
    pub substitutions: u32,
}

impl From<&EpisodeMetrics> for CsvSummaryRow {
    fn from(metrics: &EpisodeMetrics) -> Self {
        let rewards = metrics.result.total_rewards;
        CsvSummaryRow {
            episode_id: metrics.episode_id,
            seed: metrics.seed,
            declarer: metrics.result.declarer,
            contract: metrics.result.contract.clone(),
            declarer_tricks: metrics.result.declarer_tricks,
            made: metrics.result.made,
            n_reward: rewards[0],
            e_reward: rewards[1],
            s_reward: rewards[2],
            w_reward: rewards[3],
            substitutions: metrics.seat_metrics.iter().map(|s| s.substitutions).sum(),
        }
    }
}
