//! Error type shared by the card-play core and the encoding layer.
//!
//! Only configuration and caller errors live here. A proposed card that is
//! not legal is ordinary input: the engine substitutes a legal card and
//! reports the mistake through the reward channel instead of failing.

use thiserror::Error;

use crate::domain::{Card, Seat};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// Seat identifier outside N/E/S/W (or index outside 0..=3).
    #[error("invalid seat: {0}")]
    InvalidSeat(String),

    /// Suit index outside 0..=3.
    #[error("invalid suit index: {0} (expected 0..=3)")]
    InvalidSuit(i64),

    /// Card id outside 0..52.
    #[error("invalid card id: {0} (expected 0..52)")]
    InvalidCard(i64),

    #[error("cannot parse card token: {0:?}")]
    ParseCard(String),

    #[error("malformed hands: {0}")]
    MalformedHands(String),

    #[error("invalid contract: {0}")]
    InvalidContract(String),

    /// A specific card was asked to be removed from a set that does not hold it.
    #[error("card {0} not found")]
    CardNotFound(Card),

    /// Trick resolution requires exactly one card per seat.
    #[error("incomplete trick: {0} of 4 cards on the table")]
    IncompleteTrick(usize),

    #[error("seat {0} has already played to this trick")]
    SlotOccupied(Seat),

    /// Raised by the low-level `play_card` only; the engine substitutes
    /// before it gets there.
    #[error("{card} is not a legal play for {seat}")]
    IllegalPlay { seat: Seat, card: Card },

    #[error("out of turn: {requested} acted while {active} is on play")]
    OutOfTurn { requested: Seat, active: Seat },

    #[error("episode finished: all 13 tricks have been played")]
    EpisodeFinished,

    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl BridgeError {
    pub fn malformed_hands(detail: impl Into<String>) -> Self {
        Self::MalformedHands(detail.into())
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config(detail.into())
    }
}
