//! Action encodings: a card id (`integer`) or a 52-slot one-hot vector
//! (`multi_binary`).
//!
//! Decoding never fails. Raw actions that do not name exactly one card
//! become [`Proposal::Invalid`] and go through the engine's substitution.
//! The pass placeholder is `-1` in the integer encoding and the all-zero
//! vector in the one-hot encoding.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Feature;
use crate::domain::{Card, CardSet, Proposal, DECK_SIZE};
use crate::errors::BridgeError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionEncoding {
    #[default]
    Integer,
    MultiBinary,
}

impl ActionEncoding {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionEncoding::Integer => "integer",
            ActionEncoding::MultiBinary => "multi_binary",
        }
    }
}

impl fmt::Display for ActionEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionEncoding {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "integer" => Ok(ActionEncoding::Integer),
            "multi_binary" => Ok(ActionEncoding::MultiBinary),
            other => Err(BridgeError::InvalidEncoding(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAction {
    Id(i64),
    OneHot(Vec<u8>),
}

pub fn decode_action(encoding: ActionEncoding, raw: &RawAction) -> Proposal {
    match (encoding, raw) {
        (ActionEncoding::Integer, RawAction::Id(id)) => Proposal::from_id(*id),
        (ActionEncoding::MultiBinary, RawAction::OneHot(bits)) => decode_one_hot(bits),
        _ => Proposal::Invalid,
    }
}

fn decode_one_hot(bits: &[u8]) -> Proposal {
    if bits.len() != DECK_SIZE || bits.iter().any(|&b| b > 1) {
        return Proposal::Invalid;
    }
    let mut set = bits.iter().enumerate().filter(|&(_, &b)| b == 1);
    match (set.next(), set.next()) {
        (None, _) => Proposal::Pass,
        (Some((id, _)), None) => Proposal::from_id(id as i64),
        _ => Proposal::Invalid,
    }
}

pub fn encode_card(encoding: ActionEncoding, card: Card) -> RawAction {
    match encoding {
        ActionEncoding::Integer => RawAction::Id(card.id() as i64),
        ActionEncoding::MultiBinary => {
            let mut bits = vec![0u8; DECK_SIZE];
            bits[card.id() as usize] = 1;
            RawAction::OneHot(bits)
        }
    }
}

/// Raw form of any proposal. `Invalid` maps to a raw action that decodes
/// back to `Invalid` (an out-of-range id, or a vector with every bit set).
pub fn encode_proposal(encoding: ActionEncoding, proposal: Proposal) -> RawAction {
    match (encoding, proposal) {
        (_, Proposal::Card(card)) => encode_card(encoding, card),
        (ActionEncoding::Integer, Proposal::Pass) => RawAction::Id(-1),
        (ActionEncoding::Integer, Proposal::Invalid) => RawAction::Id(DECK_SIZE as i64),
        (ActionEncoding::MultiBinary, Proposal::Pass) => RawAction::OneHot(vec![0; DECK_SIZE]),
        (ActionEncoding::MultiBinary, Proposal::Invalid) => RawAction::OneHot(vec![1; DECK_SIZE]),
    }
}

/// Legal set as an id list (`integer`) or a 52-bit mask (`multi_binary`).
pub fn encode_legal_actions(encoding: ActionEncoding, legal: &CardSet) -> Feature {
    match encoding {
        ActionEncoding::Integer => Feature::Ints(legal.iter().map(|c| c.id() as i64).collect()),
        ActionEncoding::MultiBinary => Feature::Bits(legal.as_bitmask().to_vec()),
    }
}
