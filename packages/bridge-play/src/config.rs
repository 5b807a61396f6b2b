//! Episode and engine configuration.
//!
//! [`EpisodeConfig`] pins parts of a deal for scenario tests; anything left
//! out is drawn from the engine's RNG at reset. [`EngineSettings`] picks the
//! reward policy and the turn-acceptance mode once, for the engine's lifetime.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::domain::hand::CardSet;
use crate::domain::rewards::RewardMode;
use crate::domain::rules::{HAND_SIZE, PLAYERS};
use crate::domain::{Card, Seat, Trump};
use crate::errors::BridgeError;

/// How many seats act per call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnMode {
    /// One seat, the active one, per `step`.
    #[default]
    Sequential,
    /// All four seats submit a proposal per `step_round`; only the active
    /// seat's card is played.
    Simultaneous,
}

impl TurnMode {
    pub fn as_str(self) -> &'static str {
        match self {
            TurnMode::Sequential => "sequential",
            TurnMode::Simultaneous => "simultaneous",
        }
    }
}

impl fmt::Display for TurnMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TurnMode {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sequential" => Ok(TurnMode::Sequential),
            "simultaneous" => Ok(TurnMode::Simultaneous),
            other => Err(BridgeError::config(format!("unknown turn mode {other:?}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub reward_mode: RewardMode,
    pub turn_mode: TurnMode,
}

impl EngineSettings {
    pub fn new(reward_mode: RewardMode, turn_mode: TurnMode) -> Self {
        Self {
            reward_mode,
            turn_mode,
        }
    }
}

/// Optional pins for a deal. All fields default to `None` (randomized).
///
/// `hands`, when present, lists the cards of N, E, S, W in that order; cards
/// may be written as tokens (`"AS"`) or ids (`51`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EpisodeConfig {
    pub declarer: Option<Seat>,
    pub trump: Option<Trump>,
    pub contract_value: Option<u8>,
    pub hands: Option<[Vec<Card>; PLAYERS]>,
}

impl EpisodeConfig {
    /// Parse from JSON. Unknown keys and unparseable values are
    /// configuration errors.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let json = serde_json::json!({"declarer": "S", "trump": "HEARTS", "contract_value": 4});
    /// let config = EpisodeConfig::from_json(&json)?;
    /// assert_eq!(config.declarer, Some(Seat::S));
    /// ```
    pub fn from_json(config: &JsonValue) -> Result<Self, BridgeError> {
        serde_json::from_value(config.clone()).map_err(|e| BridgeError::config(e.to_string()))
    }

    pub fn with_declarer(mut self, declarer: Seat) -> Self {
        self.declarer = Some(declarer);
        self
    }

    pub fn with_contract(mut self, trump: Trump, value: u8) -> Self {
        self.trump = Some(trump);
        self.contract_value = Some(value);
        self
    }

    pub fn with_hands(mut self, hands: [Vec<Card>; PLAYERS]) -> Self {
        self.hands = Some(hands);
        self
    }

    /// Validated pinned hands: 13 distinct cards per seat, no card held twice.
    pub fn hand_sets(&self) -> Result<Option<[CardSet; PLAYERS]>, BridgeError> {
        let Some(hands) = &self.hands else {
            return Ok(None);
        };
        let mut sets = [CardSet::empty(); PLAYERS];
        let mut seen = CardSet::empty();
        for ((seat, cards), set) in Seat::ALL.iter().zip(hands.iter()).zip(sets.iter_mut()) {
            if cards.len() != HAND_SIZE {
                return Err(BridgeError::malformed_hands(format!(
                    "{seat} lists {} cards, expected {HAND_SIZE}",
                    cards.len()
                )));
            }
            for &card in cards {
                if !seen.insert(card) {
                    return Err(BridgeError::malformed_hands(format!(
                        "{card} dealt twice (found again in {seat})"
                    )));
                }
                set.insert(card);
            }
        }
        Ok(Some(sets))
    }
}
