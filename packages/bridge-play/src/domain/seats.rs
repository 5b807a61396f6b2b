//! Seat / turn math and the contract roles derived from the declarer.
//!
//! Clockwise direction is positive (+1): N → E → S → W → N.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::BridgeError;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Seat {
    N,
    E,
    S,
    W,
}

impl Seat {
    pub const ALL: [Seat; 4] = [Seat::N, Seat::E, Seat::S, Seat::W];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Result<Self, BridgeError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or_else(|| BridgeError::InvalidSeat(index.to_string()))
    }

    /// Returns the seat `delta` steps from `self` (negative is counter-clockwise).
    #[inline]
    pub fn offset(self, delta: i8) -> Seat {
        let idx = (self.index() as i16 + delta as i16).rem_euclid(4) as usize;
        Self::ALL[idx]
    }

    #[inline]
    pub fn next(self) -> Seat {
        self.offset(1)
    }

    #[inline]
    pub fn prev(self) -> Seat {
        self.offset(-1)
    }

    /// The seat across the table.
    #[inline]
    pub fn partner(self) -> Seat {
        self.offset(2)
    }

    pub fn is_partner_of(self, other: Seat) -> bool {
        self.partner() == other
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Seat::N => "N",
            Seat::E => "E",
            Seat::S => "S",
            Seat::W => "W",
        };
        f.write_str(s)
    }
}

impl FromStr for Seat {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "N" => Ok(Seat::N),
            "E" => Ok(Seat::E),
            "S" => Ok(Seat::S),
            "W" => Ok(Seat::W),
            other => Err(BridgeError::InvalidSeat(other.to_string())),
        }
    }
}

/// Fixed for the whole episode once the declarer is known.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Roles {
    pub declarer: Seat,
    pub dummy: Seat,
    /// Left of the declarer; makes the opening lead.
    pub defender_1: Seat,
    pub defender_2: Seat,
}

impl Roles {
    pub fn from_declarer(declarer: Seat) -> Self {
        Self {
            declarer,
            dummy: declarer.partner(),
            defender_1: declarer.next(),
            defender_2: declarer.prev(),
        }
    }

    pub fn is_declaring_side(&self, seat: Seat) -> bool {
        seat == self.declarer || seat == self.dummy
    }
}
