//! Domain layer: pure card-play logic types and helpers.

pub mod cards_logic;
pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod contract;
pub mod dealing;
pub mod engine;
pub mod hand;
pub mod player_view;
pub mod rewards;
pub mod rules;
pub mod seats;
pub mod seed_derivation;
pub mod state;
pub mod tricks;

#[cfg(test)]
mod domain_prop_helpers;
#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_props_episode;
#[cfg(test)]
mod tests_props_legality;
#[cfg(test)]
mod tests_rewards;

// Re-exports for ergonomics
pub use cards_logic::{card_beats, card_power};
pub use cards_parsing::try_parse_cards;
pub use cards_types::{Card, Rank, Suit, Trump, DECK_SIZE};
pub use contract::Contract;
pub use dealing::{deal, deal_hands, new_deck, shuffle};
pub use engine::{PlayEngine, Proposal, RoundOutcome, StepInfo, StepOutcome};
pub use hand::CardSet;
pub use player_view::{observe, observe_all, Observation};
pub use rewards::{RewardMode, RewardPolicy, Rewards};
pub use seats::{Roles, Seat};
pub use seed_derivation::{derive_agent_seed, derive_episode_seed};
pub use state::{GameState, Phase, TrickHistory};
pub use tricks::{legal_moves, trick_winner, CompletedTrick, Trick};
