//! Rule-based rough fill around fringe markers
//!
//! No propagation: each reachable placeholder looks at its four neighbours
//! once and picks an edge or base rough tile by checkerboard parity.

use crate::spatial::grid::{Assignment, Cell, Direction, TileGrid};
use crate::spatial::tiles::{
    BASE_ROUGH, EDGE_ROUGH_DOWN, EDGE_ROUGH_LEFT, EDGE_ROUGH_RIGHT, EDGE_ROUGH_UP, FRINGE_DOWN,
    FRINGE_LEFT, FRINGE_RIGHT, FRINGE_UP, PLACEHOLDER_TILE, TileId,
};
use std::collections::{BTreeSet, VecDeque};

// Checked in order; the first neighbour carrying its marker wins
const EDGE_RULES: [(Direction, TileId, [TileId; 2]); 4] = [
    (Direction::Right, FRINGE_LEFT, EDGE_ROUGH_LEFT),
    (Direction::Down, FRINGE_UP, EDGE_ROUGH_UP),
    (Direction::Left, FRINGE_RIGHT, EDGE_ROUGH_RIGHT),
    (Direction::Up, FRINGE_DOWN, EDGE_ROUGH_DOWN),
];

/// Fills the placeholder area connected to the grid origin with rough
#[derive(Debug, Clone, Copy, Default)]
pub struct RoughFill;

impl RoughFill {
    /// Placeholders reachable from `(0, 0)` through placeholders only
    pub fn reachable(grid: &TileGrid) -> BTreeSet<Cell> {
        let origin = Cell::new(0, 0);
        let mut reached = BTreeSet::new();
        if grid.get(origin) != Some(PLACEHOLDER_TILE) {
            return reached;
        }

        let mut queue = VecDeque::from([origin]);
        reached.insert(origin);
        while let Some(cell) = queue.pop_front() {
            for direction in Direction::ALL {
                let Some(next) = grid.neighbor(cell, direction) else {
                    continue;
                };
                if grid.get(next) == Some(PLACEHOLDER_TILE) && reached.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        reached
    }

    /// Rough tile for one cell given its current neighbours
    pub fn tile_for(grid: &TileGrid, cell: Cell) -> TileId {
        let parity = (cell.row + cell.col) % 2;
        let pair = EDGE_RULES
            .iter()
            .find(|&&(direction, marker, _)| {
                grid.neighbor(cell, direction)
                    .and_then(|next| grid.get(next))
                    == Some(marker)
            })
            .map_or(BASE_ROUGH, |&(_, _, pair)| pair);
        pair.get(parity).copied().unwrap_or(BASE_ROUGH[0])
    }

    /// Rough tiles for every placeholder reachable from the origin
    ///
    /// Never fails; a grid whose origin is not a placeholder yields an
    /// empty assignment.
    pub fn fill(&self, grid: &TileGrid) -> Assignment {
        let assignment: Assignment = Self::reachable(grid)
            .into_iter()
            .map(|cell| (cell, Self::tile_for(grid, cell)))
            .collect();
        tracing::debug!(cells = assignment.len(), "rough fill complete");
        assignment
    }
}
