//! Flood-fill discovery of forest fill regions

use crate::spatial::grid::{Cell, Direction, TileGrid};
use crate::spatial::tiles::{PLACEHOLDER_TILE, TileId, is_forest_tile};
use ndarray::Array2;
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Contiguous set of cells to be filled together
///
/// Holds placeholder cells plus any forest tiles already touching them.
/// The forest tiles act as fixed constraints and are never overwritten.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FillRegion {
    cells: BTreeSet<Cell>,
}

impl FillRegion {
    /// Region from an explicit cell set
    pub const fn new(cells: BTreeSet<Cell>) -> Self {
        Self { cells }
    }

    /// All member cells, row-major
    pub const fn cells(&self) -> &BTreeSet<Cell> {
        &self.cells
    }

    /// Check membership
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Number of member cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True for a region without cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Split members into placeholders to fill and forest tiles to keep
    pub fn partition(&self, grid: &TileGrid) -> (BTreeSet<Cell>, BTreeMap<Cell, TileId>) {
        let mut to_fill = BTreeSet::new();
        let mut pre_assigned = BTreeMap::new();
        for &cell in &self.cells {
            match grid.get(cell) {
                Some(tile) if is_forest_tile(tile) => {
                    pre_assigned.insert(cell, tile);
                }
                _ => {
                    to_fill.insert(cell);
                }
            }
        }
        (to_fill, pre_assigned)
    }
}

const fn joins_region(tile: TileId) -> bool {
    tile == PLACEHOLDER_TILE || is_forest_tile(tile)
}

/// Find every region seeded by at least one placeholder
///
/// Seeds are visited row-major, so regions come out ordered by their first
/// placeholder. Traversal moves through placeholders and forest tiles only.
pub fn detect_regions(grid: &TileGrid) -> Vec<FillRegion> {
    let mut visited = Array2::from_elem((grid.rows(), grid.cols()), false);
    let mut regions = Vec::new();

    for seed in grid.cells() {
        if grid.get(seed) != Some(PLACEHOLDER_TILE) {
            continue;
        }
        if visited.get([seed.row, seed.col]).copied().unwrap_or(true) {
            continue;
        }

        let mut cells = BTreeSet::new();
        let mut queue = VecDeque::from([seed]);
        if let Some(flag) = visited.get_mut([seed.row, seed.col]) {
            *flag = true;
        }

        while let Some(cell) = queue.pop_front() {
            cells.insert(cell);
            for direction in Direction::ALL {
                let Some(next) = grid.neighbor(cell, direction) else {
                    continue;
                };
                let Some(flag) = visited.get_mut([next.row, next.col]) else {
                    continue;
                };
                if *flag {
                    continue;
                }
                if grid.get(next).is_some_and(joins_region) {
                    *flag = true;
                    queue.push_back(next);
                }
            }
        }

        regions.push(FillRegion::new(cells));
    }

    regions
}
