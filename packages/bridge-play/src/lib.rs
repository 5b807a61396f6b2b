#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod encoding;
pub mod errors;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use config::{EngineSettings, EpisodeConfig, TurnMode};
pub use domain::{
    Card, CardSet, Contract, GameState, Observation, PlayEngine, Proposal, RewardMode, Rewards,
    Seat, StepInfo, Suit, Trump,
};
pub use errors::BridgeError;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
