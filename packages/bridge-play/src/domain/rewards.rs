//! Per-seat reward policies.
//!
//! Every policy is a pure function of the post-play state, which seats acted
//! validly, and the winner of a trick resolved by this play. Rewards never
//! carry over between steps.

use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::domain::rules::{PLAYERS, TRICKS_PER_EPISODE};
use crate::domain::seats::Seat;
use crate::domain::state::GameState;
use crate::domain::{Card, Trump};
use crate::errors::BridgeError;

pub const INVALID_PENALTY: i32 = -2;
pub const WIN_POINTS_INVALID_PENALTY: i32 = -1000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardMode {
    Win,
    WinTricks,
    WinPoints,
    #[default]
    PlayCards,
}

impl RewardMode {
    pub const ALL: [RewardMode; 4] = [
        RewardMode::Win,
        RewardMode::WinTricks,
        RewardMode::WinPoints,
        RewardMode::PlayCards,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RewardMode::Win => "win",
            RewardMode::WinTricks => "win_tricks",
            RewardMode::WinPoints => "win_points",
            RewardMode::PlayCards => "play_cards",
        }
    }

    pub fn policy(self) -> Box<dyn RewardPolicy> {
        match self {
            RewardMode::PlayCards => Box::new(PlayCards),
            RewardMode::WinTricks => Box::new(WinTricks),
            RewardMode::Win => Box::new(WinContract {
                mode: RewardMode::Win,
                penalty: INVALID_PENALTY,
            }),
            RewardMode::WinPoints => Box::new(WinContract {
                mode: RewardMode::WinPoints,
                penalty: WIN_POINTS_INVALID_PENALTY,
            }),
        }
    }
}

impl fmt::Display for RewardMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RewardMode {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| BridgeError::config(format!("unknown reward mode {s:?}")))
    }
}

/// One reward per seat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rewards([i32; PLAYERS]);

impl Rewards {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn as_array(&self) -> [i32; PLAYERS] {
        self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = (Seat, i32)> + '_ {
        Seat::ALL.into_iter().map(|s| (s, self.0[s.index()]))
    }

    /// Sets both members of `seat`'s pair.
    fn set_pair(&mut self, seat: Seat, value: i32) {
        self[seat] = value;
        self[seat.partner()] = value;
    }
}

impl Index<Seat> for Rewards {
    type Output = i32;

    fn index(&self, seat: Seat) -> &i32 {
        &self.0[seat.index()]
    }
}

impl IndexMut<Seat> for Rewards {
    fn index_mut(&mut self, seat: Seat) -> &mut i32 {
        &mut self.0[seat.index()]
    }
}

impl Serialize for Rewards {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(PLAYERS))?;
        for (seat, reward) in self.iter() {
            map.serialize_entry(&seat, &reward)?;
        }
        map.end()
    }
}

/// Inputs shared by every policy.
#[derive(Debug, Clone, Copy)]
pub struct RewardContext<'a> {
    /// State after the play has been applied (and any trick resolved).
    pub state: &'a GameState,
    /// The seat whose card was played.
    pub actor: Seat,
    /// Per-seat validity of the proposals in this call.
    pub valid: [bool; PLAYERS],
    pub trick_winner: Option<Seat>,
}

pub trait RewardPolicy: fmt::Debug + Send + Sync {
    fn mode(&self) -> RewardMode;

    /// Rewards before invalid proposals are penalized.
    fn base_rewards(&self, ctx: &RewardContext<'_>) -> Rewards;

    fn invalid_penalty(&self) -> i32 {
        INVALID_PENALTY
    }
}

/// Base rewards, then every seat whose proposal was invalid gets the penalty
/// in place of whatever the policy computed for it.
pub fn compute_rewards(policy: &dyn RewardPolicy, ctx: &RewardContext<'_>) -> Rewards {
    let mut rewards = policy.base_rewards(ctx);
    for seat in Seat::ALL {
        if !ctx.valid[seat.index()] {
            rewards[seat] = policy.invalid_penalty();
        }
    }
    rewards
}

/// +1 to the acting seat for a valid play.
#[derive(Debug, Clone, Copy)]
pub struct PlayCards;

impl RewardPolicy for PlayCards {
    fn mode(&self) -> RewardMode {
        RewardMode::PlayCards
    }

    fn base_rewards(&self, ctx: &RewardContext<'_>) -> Rewards {
        let mut rewards = Rewards::zero();
        if ctx.valid[ctx.actor.index()] {
            rewards[ctx.actor] = 1;
        }
        rewards
    }
}

/// +1 to both members of the pair that took the trick.
///
/// When the 12th trick resolves every seat holds exactly one card, and the
/// pair predicted to take the last trick gets an extra +1 (see
/// [`last_trick_lookahead`]).
#[derive(Debug, Clone, Copy)]
pub struct WinTricks;

impl RewardPolicy for WinTricks {
    fn mode(&self) -> RewardMode {
        RewardMode::WinTricks
    }

    fn base_rewards(&self, ctx: &RewardContext<'_>) -> Rewards {
        let mut rewards = Rewards::zero();
        let Some(winner) = ctx.trick_winner else {
            return rewards;
        };
        rewards.set_pair(winner, 1);
        if ctx.state.tricks_played == TRICKS_PER_EPISODE - 1 {
            if let Some(next) = last_trick_lookahead(ctx.state, winner) {
                rewards[next] += 1;
                rewards[next.partner()] += 1;
            }
        }
        rewards
    }
}

/// Power used by the last-trick lookahead. The card id (not the rank) is the
/// base, trump adds 200 and otherwise a suit equal to `suit_key` adds 100.
fn lookahead_power(card: Card, suit_key: i64, trump: Trump) -> i64 {
    let base = card.id() as i64;
    if trump.suit() == Some(card.suit) {
        base + 200
    } else if card.suit.index() as i64 == suit_key {
        base + 100
    } else {
        base
    }
}

/// Predicts the winner of the 13th trick from the one card each seat still
/// holds, with the previous trick winner's remaining card id standing in for
/// the led suit. That key is a card id, not a suit index, so the led bonus
/// only applies when the winner's card is one of the four twos. Ties go to
/// the first seat in N, E, S, W order.
pub fn last_trick_lookahead(state: &GameState, trick_winner: Seat) -> Option<Seat> {
    let held = state.hands.map(|mut hand| hand.remove_last());
    let key = held[trick_winner.index()]?.id() as i64;
    let trump = state.contract.trump;
    let mut best: Option<(Seat, i64)> = None;
    for seat in Seat::ALL {
        let Some(card) = held[seat.index()] else {
            continue;
        };
        let power = lookahead_power(card, key, trump);
        match best {
            Some((_, p)) if power <= p => {}
            _ => best = Some((seat, power)),
        }
    }
    best.map(|(seat, _)| seat)
}

/// Contract outcome scored once, when the 13th trick resolves: 1 to the pair
/// that won (declaring side makes with `value + 6` tricks), 0 to the other.
#[derive(Debug, Clone, Copy)]
pub struct WinContract {
    pub mode: RewardMode,
    pub penalty: i32,
}

impl RewardPolicy for WinContract {
    fn mode(&self) -> RewardMode {
        self.mode
    }

    fn base_rewards(&self, ctx: &RewardContext<'_>) -> Rewards {
        let mut rewards = Rewards::zero();
        if ctx.trick_winner.is_none() || ctx.state.tricks_played != TRICKS_PER_EPISODE {
            return rewards;
        }
        let roles = ctx.state.roles;
        if ctx.state.contract_made() {
            rewards.set_pair(roles.declarer, 1);
        } else {
            rewards.set_pair(roles.defender_1, 1);
        }
        rewards
    }

    fn invalid_penalty(&self) -> i32 {
        self.penalty
    }
}
