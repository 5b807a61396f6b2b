//! Shared types for the simulator.

use clap::ValueEnum;

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// One JSON object per episode, streamed.
    Jsonl,
    /// A single JSON array written when the batch finishes.
    Json,
}
