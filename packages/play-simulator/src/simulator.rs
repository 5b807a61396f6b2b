//! In-memory episode simulator.
//!
//! Drives one episode through the engine with scripted agents, in either
//! turn mode, and tallies rewards and substitutions per seat.

use bridge_play::domain::rules::PLAYERS;
use bridge_play::domain::{observe, Observation};
use bridge_play::encoding::{
    decode_action, encode_proposal, ActionEncoding, ObservationEncoder, ObservationEncoding,
};
use bridge_play::{
    BridgeError, EngineSettings, EpisodeConfig, GameState, PlayEngine, Proposal, Rewards, Seat,
    StepInfo, TurnMode,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tracing::debug;

use crate::agents::{Agent, AgentError};

/// Errors that can occur during simulation.
#[derive(Debug, Error)]
pub enum SimulatorError {
    #[error("engine error: {0}")]
    Engine(#[from] BridgeError),

    #[error("agent error (seat {seat}): {source}")]
    Agent {
        seat: Seat,
        #[source]
        source: AgentError,
    },
}

/// Result of simulating one episode.
#[derive(Debug, Clone)]
pub struct EpisodeResult {
    pub final_state: GameState,
    /// Sum of per-step rewards, indexed by seat.
    pub total_rewards: [i64; PLAYERS],
    /// Substituted proposals, indexed by the seat whose card was replaced.
    pub substitutions: [u32; PLAYERS],
    pub steps: u32,
}

#[derive(Debug, Default)]
struct Tally {
    total_rewards: [i64; PLAYERS],
    substitutions: [u32; PLAYERS],
    steps: u32,
}

impl Tally {
    fn record(&mut self, rewards: &Rewards, info: &StepInfo) {
        for (seat, reward) in rewards.iter() {
            self.total_rewards[seat.index()] += i64::from(reward);
        }
        if !info.action_valid {
            self.substitutions[info.played_by.index()] += 1;
        }
        self.steps += 1;
    }
}

pub struct Simulator {
    engine: PlayEngine<ChaCha8Rng>,
    action_encoding: ActionEncoding,
    /// Set in verbose runs only.
    encoder: Option<Box<dyn ObservationEncoder>>,
    episode_no: u64,
}

impl Simulator {
    pub fn new(
        settings: EngineSettings,
        episode_seed: u64,
        episode_no: u64,
        action_encoding: ActionEncoding,
    ) -> Self {
        Self {
            engine: PlayEngine::new(settings, ChaCha8Rng::seed_from_u64(episode_seed)),
            action_encoding,
            encoder: None,
            episode_no,
        }
    }

    /// Encode every observation handed to an agent and log its size.
    pub fn with_observation_encoding(mut self, encoding: ObservationEncoding) -> Self {
        self.encoder = Some(encoding.encoder());
        self
    }

    /// Simulate a complete episode with the given agents (indexed by seat).
    pub fn simulate_episode(
        mut self,
        agents: &[Box<dyn Agent>; PLAYERS],
    ) -> Result<EpisodeResult, SimulatorError> {
        let (mut state, _) = self.engine.reset(&EpisodeConfig::default())?;
        let mut tally = Tally::default();

        match self.engine.settings().turn_mode {
            TurnMode::Sequential => self.play_sequential(&mut state, agents, &mut tally)?,
            TurnMode::Simultaneous => self.play_simultaneous(&mut state, agents, &mut tally)?,
        }

        debug!(
            episode = self.episode_no,
            steps = tally.steps,
            tricks_won = ?state.tricks_won,
            "episode simulated"
        );

        Ok(EpisodeResult {
            final_state: state,
            total_rewards: tally.total_rewards,
            substitutions: tally.substitutions,
            steps: tally.steps,
        })
    }

    fn play_sequential(
        &mut self,
        state: &mut GameState,
        agents: &[Box<dyn Agent>; PLAYERS],
        tally: &mut Tally,
    ) -> Result<(), SimulatorError> {
        while !state.is_done() {
            let seat = state.active_seat;
            let proposal = self.propose(state, seat, agents)?;
            let out = self.engine.step(state, seat, proposal)?;
            tally.record(&out.rewards, &out.info);
        }
        Ok(())
    }

    /// Every seat submits each round and agents pass when not on play.
    fn play_simultaneous(
        &mut self,
        state: &mut GameState,
        agents: &[Box<dyn Agent>; PLAYERS],
        tally: &mut Tally,
    ) -> Result<(), SimulatorError> {
        while !state.is_done() {
            let mut proposals = [Proposal::Pass; PLAYERS];
            for seat in Seat::ALL {
                proposals[seat.index()] = self.propose(state, seat, agents)?;
            }
            let out = self.engine.step_round(state, proposals)?;
            tally.record(&out.rewards, &out.info);
        }
        Ok(())
    }

    /// Ask the seat's controller for a card and route it through the action
    /// encoding, the same way an external agent's raw action would arrive.
    fn propose(
        &self,
        state: &GameState,
        seat: Seat,
        agents: &[Box<dyn Agent>; PLAYERS],
    ) -> Result<Proposal, SimulatorError> {
        let controller = controller_of(state, seat);
        let obs = observe(state, seat);
        self.log_encoded(&obs);

        let legal = self.engine.legal_actions(state, seat).to_vec();
        let proposal = agents[controller.index()]
            .choose_play(&obs, &legal)
            .map_err(|source| SimulatorError::Agent { seat, source })?;

        let raw = encode_proposal(self.action_encoding, proposal);
        Ok(decode_action(self.action_encoding, &raw))
    }

    fn log_encoded(&self, obs: &Observation) {
        if let Some(encoder) = &self.encoder {
            let encoded = encoder.encode(obs);
            debug!(
                seat = %obs.seat,
                encoding = %encoder.encoding(),
                features = encoded.len(),
                width = encoded.total_width(),
                "observation encoded"
            );
        }
    }
}

/// The dummy's cards are played by the declarer.
fn controller_of(state: &GameState, seat: Seat) -> Seat {
    if seat == state.roles.dummy {
        state.roles.declarer
    } else {
        seat
    }
}
