//! The play state machine: reset an episode, then accept one card per call.
//!
//! The engine owns the RNG and the reward policy; the caller owns the
//! [`GameState`] and passes it into every call. A proposal that is not a
//! legal card is never an error. The engine plays a uniformly drawn legal
//! card instead and the proposing seat is penalized through the rewards.

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::{EngineSettings, EpisodeConfig, TurnMode};
use crate::domain::contract::Contract;
use crate::domain::dealing::deal_hands;
use crate::domain::hand::CardSet;
use crate::domain::player_view::{observe, observe_all, Observation};
use crate::domain::rewards::{compute_rewards, RewardContext, RewardPolicy, Rewards};
use crate::domain::rules::{CONTRACT_VALUES, PLAYERS};
use crate::domain::seats::Seat;
use crate::domain::state::{GameState, Phase};
use crate::domain::tricks::{legal_moves, play_card};
use crate::domain::{Card, Trump};
use crate::errors::BridgeError;

/// What a seat asks to do on a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Proposal {
    Card(Card),
    /// Placeholder for a seat that is not on play (raw id `-1`).
    Pass,
    /// Anything that does not name a card, e.g. an out-of-range id.
    Invalid,
}

impl Proposal {
    pub fn from_id(id: i64) -> Self {
        if id == -1 {
            return Proposal::Pass;
        }
        Card::from_id(id).map_or(Proposal::Invalid, Proposal::Card)
    }

    pub fn card(self) -> Option<Card> {
        match self {
            Proposal::Card(c) => Some(c),
            _ => None,
        }
    }
}

impl From<Card> for Proposal {
    fn from(card: Card) -> Self {
        Proposal::Card(card)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepInfo {
    /// The card actually played (the proposal, or its substitute).
    pub played: Card,
    pub played_by: Seat,
    pub action_valid: bool,
    pub trick_winner: Option<Seat>,
    pub tricks_played: u8,
}

#[derive(Debug, Clone)]
pub struct StepOutcome {
    /// Observation for the seat now on play.
    pub observation: Observation,
    pub rewards: Rewards,
    pub done: bool,
    pub info: StepInfo,
}

#[derive(Debug, Clone)]
pub struct RoundOutcome {
    /// Indexed by seat.
    pub observations: [Observation; PLAYERS],
    pub rewards: Rewards,
    pub dones: [bool; PLAYERS],
    pub info: StepInfo,
}

pub struct PlayEngine<R: Rng> {
    settings: EngineSettings,
    policy: Box<dyn RewardPolicy>,
    rng: R,
}

impl<R: Rng> PlayEngine<R> {
    pub fn new(settings: EngineSettings, rng: R) -> Self {
        Self {
            settings,
            policy: settings.reward_mode.policy(),
            rng,
        }
    }

    pub fn settings(&self) -> EngineSettings {
        self.settings
    }

    /// Starts a new episode. Fields left out of `config` are drawn from the
    /// engine's RNG in this order: declarer, trump, contract value, deal.
    pub fn reset(
        &mut self,
        config: &EpisodeConfig,
    ) -> Result<(GameState, Observation), BridgeError> {
        let declarer = match config.declarer {
            Some(seat) => seat,
            None => Seat::from_index(self.rng.random_range(0..PLAYERS))?,
        };
        let trump = match config.trump {
            Some(trump) => trump,
            None => Trump::ALL[self.rng.random_range(0..Trump::ALL.len())],
        };
        let value = match config.contract_value {
            Some(value) => value,
            None => self.rng.random_range(CONTRACT_VALUES),
        };
        let contract = Contract::new(trump, value)?;
        let hands = match config.hand_sets()? {
            Some(hands) => hands,
            None => deal_hands(&mut self.rng),
        };

        let state = GameState::new(contract, declarer, hands)?;
        info!(
            declarer = %declarer,
            contract = %contract,
            opening_lead = %state.active_seat,
            "episode reset"
        );
        let observation = observe(&state, state.active_seat);
        Ok((state, observation))
    }

    pub fn legal_actions(&self, state: &GameState, seat: Seat) -> CardSet {
        legal_moves(state, seat)
    }

    /// Sequential mode: `seat` must be the active seat.
    pub fn step(
        &mut self,
        state: &mut GameState,
        seat: Seat,
        proposal: Proposal,
    ) -> Result<StepOutcome, BridgeError> {
        self.require_mode(TurnMode::Sequential)?;
        let info = self.play_turn(state, seat, proposal)?;

        let mut valid = [true; PLAYERS];
        valid[seat.index()] = info.action_valid;
        let rewards = self.rewards(state, seat, valid, info.trick_winner);

        Ok(StepOutcome {
            observation: observe(state, state.active_seat),
            rewards,
            done: state.is_done(),
            info,
        })
    }

    /// Simultaneous mode: every seat submits a proposal, only the active
    /// seat's card is played. Off-turn seats are expected to pass; any other
    /// proposal from them counts as invalid.
    pub fn step_round(
        &mut self,
        state: &mut GameState,
        proposals: [Proposal; PLAYERS],
    ) -> Result<RoundOutcome, BridgeError> {
        self.require_mode(TurnMode::Simultaneous)?;
        let Phase::AwaitingPlay(active) = state.phase() else {
            return Err(BridgeError::EpisodeFinished);
        };

        let mut valid = [true; PLAYERS];
        for seat in Seat::ALL {
            if seat != active && proposals[seat.index()] != Proposal::Pass {
                debug!(seat = %seat, active = %active, "off-turn proposal");
                valid[seat.index()] = false;
            }
        }

        let info = self.play_turn(state, active, proposals[active.index()])?;
        valid[active.index()] = info.action_valid;
        let rewards = self.rewards(state, active, valid, info.trick_winner);
        let done = state.is_done();

        Ok(RoundOutcome {
            observations: observe_all(state),
            rewards,
            dones: [done; PLAYERS],
            info,
        })
    }

    /// Read-only deep copy for renderers.
    pub fn render_snapshot(&self, state: &GameState) -> GameState {
        state.clone()
    }

    fn require_mode(&self, mode: TurnMode) -> Result<(), BridgeError> {
        if self.settings.turn_mode != mode {
            return Err(BridgeError::config(format!(
                "engine runs in {} mode, call requires {mode}",
                self.settings.turn_mode
            )));
        }
        Ok(())
    }

    fn rewards(
        &self,
        state: &GameState,
        actor: Seat,
        valid: [bool; PLAYERS],
        trick_winner: Option<Seat>,
    ) -> Rewards {
        let ctx = RewardContext {
            state,
            actor,
            valid,
            trick_winner,
        };
        compute_rewards(self.policy.as_ref(), &ctx)
    }

    /// Shared by both modes. Caller errors are raised before any mutation.
    fn play_turn(
        &mut self,
        state: &mut GameState,
        seat: Seat,
        proposal: Proposal,
    ) -> Result<StepInfo, BridgeError> {
        let Phase::AwaitingPlay(active) = state.phase() else {
            return Err(BridgeError::EpisodeFinished);
        };
        if seat != active {
            return Err(BridgeError::OutOfTurn {
                requested: seat,
                active,
            });
        }

        let legal = legal_moves(state, seat);
        let (card, action_valid) = match proposal {
            Proposal::Card(card) if legal.contains(card) => (card, true),
            _ => {
                let options = legal.to_vec();
                let card = *options
                    .choose(&mut self.rng)
                    .ok_or(BridgeError::EpisodeFinished)?;
                debug!(
                    seat = %seat,
                    proposal = ?proposal,
                    substitute = %card,
                    "illegal proposal substituted"
                );
                (card, false)
            }
        };

        let result = play_card(state, seat, card)?;
        debug!(seat = %seat, card = %card, valid = action_valid, "card played");

        if let Some(winner) = result.trick_winner {
            debug!(
                trick = result.tricks_played_after,
                winner = %winner,
                tricks_won = ?state.tricks_won,
                "trick complete"
            );
        }
        if result.episode_done {
            info!(
                contract = %state.contract,
                declarer = %state.roles.declarer,
                declarer_tricks = state.declarer_tricks(),
                made = state.contract_made(),
                "episode done"
            );
        }

        Ok(StepInfo {
            played: card,
            played_by: seat,
            action_valid,
            trick_winner: result.trick_winner,
            tricks_played: result.tricks_played_after,
        })
    }
}
