//! Observation encodings.
//!
//! | feature                      | integer        | multi_binary     | mixed          |
//! |------------------------------|----------------|------------------|----------------|
//! | positions (player/dummy/act) | seat index     | one-hot of 4     | seat index     |
//! | hands, table, played tricks  | card id lists  | 52-bit masks     | 52-bit masks   |
//! | current_suit                 | 0..=3 or -1    | one-hot of 4     | 0..=3 or -1    |
//! | trump                        | 0..=3, 4 = NT  | one-hot of 4     | 0..=3, 4 = NT  |
//! | contract_value               | 1..=7          | one-hot of 7     | 1..=7          |
//! | won_tricks                   | 0..=13         | one-hot of 14    | 0..=13         |
//!
//! Table and trick features are flattened into names such as `table.N` and
//! `played_tricks.4.W`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Feature;
use crate::domain::rules::{PLAYERS, TRICKS_PER_EPISODE};
use crate::domain::{Card, CardSet, Observation, Seat, Trump};
use crate::errors::BridgeError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObservationEncoding {
    Integer,
    #[default]
    MultiBinary,
    Mixed,
}

impl ObservationEncoding {
    pub fn as_str(self) -> &'static str {
        match self {
            ObservationEncoding::Integer => "integer",
            ObservationEncoding::MultiBinary => "multi_binary",
            ObservationEncoding::Mixed => "mixed",
        }
    }

    pub fn encoder(self) -> Box<dyn ObservationEncoder> {
        match self {
            ObservationEncoding::Integer => Box::new(IntegerEncoder),
            ObservationEncoding::MultiBinary => Box::new(MultiBinaryEncoder),
            ObservationEncoding::Mixed => Box::new(MixedEncoder),
        }
    }
}

impl fmt::Display for ObservationEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObservationEncoding {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "integer" => Ok(ObservationEncoding::Integer),
            "multi_binary" => Ok(ObservationEncoding::MultiBinary),
            "mixed" => Ok(ObservationEncoding::Mixed),
            other => Err(BridgeError::InvalidEncoding(other.to_string())),
        }
    }
}

/// Named features in a stable (sorted) order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EncodedObservation(BTreeMap<String, Feature>);

impl EncodedObservation {
    pub fn get(&self, name: &str) -> Option<&Feature> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all feature widths.
    pub fn total_width(&self) -> usize {
        self.0.values().map(Feature::width).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Feature)> + '_ {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn insert(&mut self, name: impl Into<String>, feature: Feature) {
        self.0.insert(name.into(), feature);
    }
}

pub trait ObservationEncoder: Send + Sync {
    fn encoding(&self) -> ObservationEncoding;
    fn encode(&self, obs: &Observation) -> EncodedObservation;
}

#[derive(Debug, Clone, Copy)]
pub struct IntegerEncoder;

#[derive(Debug, Clone, Copy)]
pub struct MultiBinaryEncoder;

#[derive(Debug, Clone, Copy)]
pub struct MixedEncoder;

impl ObservationEncoder for IntegerEncoder {
    fn encoding(&self) -> ObservationEncoding {
        ObservationEncoding::Integer
    }

    fn encode(&self, obs: &Observation) -> EncodedObservation {
        encode_with(obs, Scalars::Int, Cards::Ids)
    }
}

impl ObservationEncoder for MultiBinaryEncoder {
    fn encoding(&self) -> ObservationEncoding {
        ObservationEncoding::MultiBinary
    }

    fn encode(&self, obs: &Observation) -> EncodedObservation {
        encode_with(obs, Scalars::OneHot, Cards::Mask)
    }
}

impl ObservationEncoder for MixedEncoder {
    fn encoding(&self) -> ObservationEncoding {
        ObservationEncoding::Mixed
    }

    fn encode(&self, obs: &Observation) -> EncodedObservation {
        encode_with(obs, Scalars::Int, Cards::Mask)
    }
}

#[derive(Clone, Copy)]
enum Scalars {
    Int,
    OneHot,
}

#[derive(Clone, Copy)]
enum Cards {
    Ids,
    Mask,
}

fn one_hot(index: Option<usize>, width: usize) -> Feature {
    let mut bits = vec![0u8; width];
    if let Some(i) = index.filter(|&i| i < width) {
        bits[i] = 1;
    }
    Feature::Bits(bits)
}

fn scalar(repr: Scalars, value: Option<usize>, int_none: i64, width: usize) -> Feature {
    match repr {
        Scalars::Int => Feature::Int(value.map_or(int_none, |v| v as i64)),
        Scalars::OneHot => one_hot(value, width),
    }
}

fn cards<I: IntoIterator<Item = Card>>(repr: Cards, cards: I) -> Feature {
    match repr {
        Cards::Ids => Feature::Ints(cards.into_iter().map(|c| c.id() as i64).collect()),
        Cards::Mask => {
            let set: CardSet = cards.into_iter().collect();
            Feature::Bits(set.as_bitmask().to_vec())
        }
    }
}

fn trump_index(trump: Trump) -> Option<usize> {
    trump.suit().map(|s| s.index() as usize)
}

fn encode_with(obs: &Observation, scalars: Scalars, card_repr: Cards) -> EncodedObservation {
    let mut out = EncodedObservation::default();

    out.insert(
        "player_position",
        scalar(scalars, Some(obs.seat.index()), -1, PLAYERS),
    );
    out.insert(
        "dummy_position",
        scalar(scalars, Some(obs.dummy.index()), -1, PLAYERS),
    );
    out.insert(
        "active_player_position",
        scalar(scalars, Some(obs.active_seat.index()), -1, PLAYERS),
    );

    out.insert("player_hand", cards(card_repr, obs.hand.iter()));
    out.insert("dummy_hand", cards(card_repr, obs.dummy_hand.iter()));

    for seat in Seat::ALL {
        out.insert(
            format!("table.{seat}"),
            cards(card_repr, obs.table[seat.index()]),
        );
    }
    for trick_no in 0..TRICKS_PER_EPISODE as usize {
        let trick = obs.trick_history.get(trick_no).copied().flatten();
        for seat in Seat::ALL {
            out.insert(
                format!("played_tricks.{trick_no}.{seat}"),
                cards(card_repr, trick.map(|t| t[seat.index()])),
            );
        }
    }

    out.insert(
        "current_suit",
        scalar(scalars, obs.led_suit.map(|s| s.index() as usize), -1, 4),
    );
    let trump = match (scalars, trump_index(obs.trump)) {
        (Scalars::Int, None) => Feature::Int(4),
        (_, idx) => scalar(scalars, idx, -1, 4),
    };
    out.insert("trump", trump);
    out.insert(
        "contract_value",
        match scalars {
            Scalars::Int => Feature::Int(obs.contract_value as i64),
            Scalars::OneHot => one_hot((obs.contract_value as usize).checked_sub(1), 7),
        },
    );
    out.insert(
        "won_tricks",
        scalar(
            scalars,
            Some(obs.tricks_won as usize),
            -1,
            TRICKS_PER_EPISODE as usize + 1,
        ),
    );
    out
}
