//! Scripted agents that drive seats during a simulated episode.

use std::sync::Mutex;

use bridge_play::domain::DECK_SIZE;
use bridge_play::{Card, Observation, Proposal};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("agent internal error: {0}")]
    Internal(String),
    #[error("no legal plays offered to the agent")]
    NoLegalPlays,
}

/// A seat controller.
///
/// The dummy never gets an agent of its own: the simulator asks the
/// declarer's agent, handing it the dummy's observation and legal cards.
pub trait Agent: Send + Sync {
    fn name(&self) -> &'static str;

    fn choose_play(&self, obs: &Observation, legal: &[Card]) -> Result<Proposal, AgentError>;
}

/// Passes when the observed seat is not on play. Otherwise picks uniformly
/// among the legal cards, and with probability `illegal_rate`
/// it proposes a uniformly drawn card id instead, which may well be illegal
/// and then exercises the engine's substitution path.
pub struct RandomAgent {
    rng: Mutex<ChaCha8Rng>,
    illegal_rate: f64,
}

impl RandomAgent {
    pub const NAME: &'static str = "random";

    pub fn new(seed: u64, illegal_rate: f64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
            illegal_rate: illegal_rate.clamp(0.0, 1.0),
        }
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn choose_play(&self, obs: &Observation, legal: &[Card]) -> Result<Proposal, AgentError> {
        if !obs.is_my_turn() {
            return Ok(Proposal::Pass);
        }
        if legal.is_empty() {
            return Err(AgentError::NoLegalPlays);
        }

        let mut rng = self
            .rng
            .lock()
            .map_err(|e| AgentError::Internal(format!("RNG lock poisoned: {e}")))?;

        if self.illegal_rate > 0.0 && rng.random_bool(self.illegal_rate) {
            let id = rng.random_range(0..DECK_SIZE as i64);
            return Ok(Proposal::from_id(id));
        }

        legal
            .choose(&mut *rng)
            .copied()
            .map(Proposal::Card)
            .ok_or(AgentError::NoLegalPlays)
    }
}
