//! Per-block episode statistics.
//!
//! Every block reports the average and maximum score plus, for every tile value
//! that was the largest tile of some episode, the share of episodes whose largest
//! tile reached at least that value and the share that stopped exactly there.

use std::collections::BTreeMap;

use fibtile_engine::Episode;
use serde::Serialize;

/// Share of a block's episodes that reached a tile value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileShare {
    pub tile: u32,
    /// Episodes whose largest tile is at least `tile`, in percent.
    pub reached: f64,
    /// Episodes whose largest tile is exactly `tile`, in percent.
    pub exact: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockSummary {
    /// One-based number of the last episode in the block.
    pub last_episode: usize,
    pub episodes: usize,
    pub average_score: f64,
    pub max_score: u64,
    pub tiles: Vec<TileShare>,
}

impl BlockSummary {
    pub fn log(&self) {
        log::info!(
            "{}\tavg = {:.0}, max = {}",
            self.last_episode,
            self.average_score,
            self.max_score
        );
        for share in &self.tiles {
            log::info!(
                "\t{}\t{:.1}%\t({:.1}%)",
                share.tile,
                share.reached,
                share.exact
            );
        }
    }
}

/// Accumulates finished episodes and closes a block every `block_size` of them.
#[derive(Debug, Clone)]
pub struct BlockStatistics {
    block_size: usize,
    finished: usize,
    scores: Vec<u64>,
    max_tiles: Vec<u32>,
}

impl BlockStatistics {
    pub fn new(block_size: usize) -> Self {
        assert!(block_size > 0, "block size must be positive");
        Self {
            block_size,
            finished: 0,
            scores: Vec::with_capacity(block_size),
            max_tiles: Vec::with_capacity(block_size),
        }
    }

    /// Records a finished episode; returns the block summary when it completes one.
    pub fn record(&mut self, episode: &Episode) -> Option<BlockSummary> {
        self.finished += 1;
        self.scores.push(episode.score());
        self.max_tiles.push(episode.max_tile());
        if self.scores.len() == self.block_size {
            self.close_block()
        } else {
            None
        }
    }

    /// Closes the current partial block, if any episodes are pending.
    pub fn finish(&mut self) -> Option<BlockSummary> {
        self.close_block()
    }

    #[expect(clippy::cast_precision_loss)]
    fn close_block(&mut self) -> Option<BlockSummary> {
        if self.scores.is_empty() {
            return None;
        }
        let episodes = self.scores.len();
        let total: u64 = self.scores.iter().sum();
        let max_score = self.scores.iter().copied().max().unwrap_or(0);

        let mut counts = BTreeMap::<u32, usize>::new();
        for &tile in &self.max_tiles {
            *counts.entry(tile).or_default() += 1;
        }
        let percent = |count: usize| count as f64 * 100.0 / episodes as f64;
        let mut reached = episodes;
        let mut tiles = Vec::with_capacity(counts.len());
        for (tile, count) in counts {
            tiles.push(TileShare {
                tile,
                reached: percent(reached),
                exact: percent(count),
            });
            reached -= count;
        }

        self.scores.clear();
        self.max_tiles.clear();
        Some(BlockSummary {
            last_episode: self.finished,
            episodes,
            average_score: total as f64 / episodes as f64,
            max_score,
            tiles,
        })
    }
}
