use std::ops::RangeInclusive;

pub const PLAYERS: usize = 4;
pub const HAND_SIZE: usize = 13;
pub const TRICKS_PER_EPISODE: u8 = 13;

/// Tricks the declaring side must take before the contract value counts.
pub const BOOK: u8 = 6;

pub const CONTRACT_VALUES: RangeInclusive<u8> = 1..=7;

/// Tricks the declaring side needs to make a contract of `value`.
pub fn tricks_needed(value: u8) -> u8 {
    value + BOOK
}
