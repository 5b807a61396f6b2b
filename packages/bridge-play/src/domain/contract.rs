use std::fmt;

use serde::{Deserialize, Serialize};

use super::rules::{tricks_needed, CONTRACT_VALUES};
use super::Trump;
use crate::errors::BridgeError;

/// Immutable for the episode.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub trump: Trump,
    pub value: u8,
}

impl Contract {
    pub fn new(trump: Trump, value: u8) -> Result<Self, BridgeError> {
        if !CONTRACT_VALUES.contains(&value) {
            return Err(BridgeError::InvalidContract(format!(
                "value {value} outside {}..={}",
                CONTRACT_VALUES.start(),
                CONTRACT_VALUES.end()
            )));
        }
        Ok(Self { trump, value })
    }

    pub fn tricks_needed(&self) -> u8 {
        tricks_needed(self.value)
    }

    pub fn is_made(&self, declaring_tricks: u8) -> bool {
        declaring_tricks >= self.tricks_needed()
    }
}

impl fmt::Display for Trump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.suit() {
            Some(suit) => write!(f, "{}", suit.glyph()),
            None => f.write_str("NT"),
        }
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.trump)
    }
}
