//! Observed neighbour co-occurrence counts for fringe tiles

use crate::spatial::grid::{Direction, TileGrid};
use crate::spatial::tiles::TileId;
use std::collections::HashMap;

/// How often each tile was seen next to each other tile, per direction
///
/// Two tiles are compatible in a direction when the pair was observed at
/// least `threshold` times. Unobserved pairs count as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NeighborFrequencyTable {
    counts: HashMap<(TileId, Direction), HashMap<TileId, u32>>,
}

impl NeighborFrequencyTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` observations of `neighbor` lying `direction` of `tile`
    pub fn record(&mut self, tile: TileId, direction: Direction, neighbor: TileId, count: u32) {
        let entry = self
            .counts
            .entry((tile, direction))
            .or_default()
            .entry(neighbor)
            .or_insert(0);
        *entry = entry.saturating_add(count);
    }

    /// Number of times the pair was observed
    pub fn count(&self, tile: TileId, direction: Direction, neighbor: TileId) -> u32 {
        self.counts
            .get(&(tile, direction))
            .and_then(|neighbors| neighbors.get(&neighbor))
            .copied()
            .unwrap_or(0)
    }

    /// Check whether `neighbor` may sit `direction` of `tile`
    pub fn is_compatible(
        &self,
        tile: TileId,
        direction: Direction,
        neighbor: TileId,
        threshold: u32,
    ) -> bool {
        self.count(tile, direction, neighbor) >= threshold
    }

    /// Tiles observed `direction` of `tile` at least `threshold` times, ascending
    pub fn compatible_neighbors(
        &self,
        tile: TileId,
        direction: Direction,
        threshold: u32,
    ) -> Vec<TileId> {
        let mut neighbors: Vec<TileId> = self
            .counts
            .get(&(tile, direction))
            .map(|entries| {
                entries
                    .iter()
                    .filter(|&(_, &count)| count >= threshold)
                    .map(|(&neighbor, _)| neighbor)
                    .collect()
            })
            .unwrap_or_default();
        neighbors.sort_unstable();
        neighbors
    }

    /// Count every 4-neighbour pair in a grid, both ways round
    pub fn observe(&mut self, grid: &TileGrid) {
        for cell in grid.cells() {
            let Some(tile) = grid.get(cell) else {
                continue;
            };
            for direction in Direction::ALL {
                if let Some(neighbor) = grid.neighbor(cell, direction).and_then(|n| grid.get(n)) {
                    self.record(tile, direction, neighbor, 1);
                }
            }
        }
    }

    /// Number of distinct `(tile, direction)` keys
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True when nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
