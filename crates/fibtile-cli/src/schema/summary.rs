use chrono::{DateTime, Utc};
use fibtile_engine::Board;
use serde::Serialize;

use crate::statistics::BlockSummary;

/// Result of a `play` run, written by `--summary`.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Timestamp when the run finished (ISO 8601 format)
    pub recorded_at: DateTime<Utc>,
    pub player: AgentInfo,
    pub environment: AgentInfo,
    pub episodes: usize,
    pub best: Option<BestEpisode>,
    pub blocks: Vec<BlockSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentInfo {
    pub name: String,
    pub role: String,
}

/// Highest-scoring episode of the run.
#[derive(Debug, Clone, Serialize)]
pub struct BestEpisode {
    /// One-based episode number
    pub episode: usize,
    pub score: u64,
    pub max_tile: u32,
    pub player_moves: usize,
    pub final_board: Board,
}
