//! Observation and action encodings layered on top of the domain values.
//!
//! Nothing here feeds back into game logic: encoders read an
//! [`Observation`](crate::domain::Observation) and the action decoder only
//! produces a [`Proposal`](crate::domain::Proposal), which the engine treats
//! like any other proposal.

pub mod action;
pub mod observation;

use serde::Serialize;

pub use action::{
    decode_action, encode_card, encode_legal_actions, encode_proposal, ActionEncoding, RawAction,
};
pub use observation::{EncodedObservation, ObservationEncoder, ObservationEncoding};

/// One named observation component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Feature {
    Int(i64),
    Ints(Vec<i64>),
    Bits(Vec<u8>),
}

impl Feature {
    /// Number of scalar slots the feature occupies.
    pub fn width(&self) -> usize {
        match self {
            Feature::Int(_) => 1,
            Feature::Ints(v) => v.len(),
            Feature::Bits(v) => v.len(),
        }
    }
}
