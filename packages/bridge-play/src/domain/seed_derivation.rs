//! RNG seed derivation utilities for reproducible episode batches.
//!
//! Provides functions to derive unique-but-deterministic seeds for different
//! contexts (engine randomness, per-seat agents) from a base batch seed.

/// Derive a seed for one episode of a batch.
///
/// Same base + episode number = same deal, same substitutions, so any single
/// episode of a batch can be replayed in isolation.
pub fn derive_episode_seed(base_seed: u64, episode_no: u64) -> u64 {
    base_seed
        .wrapping_add(episode_no.wrapping_mul(1_000_000))
        .wrapping_add(2) // Offset to distinguish from agent seeds
}

/// Derive a seed for the agent sitting at `seat_index` (0..=3) in an episode.
pub fn derive_agent_seed(base_seed: u64, episode_no: u64, seat_index: usize) -> u64 {
    // Different multipliers from the episode seed to keep the streams apart
    base_seed
        .wrapping_add(episode_no.wrapping_mul(10_000))
        .wrapping_add((seat_index as u64).wrapping_mul(100))
        .wrapping_add(1)
}
