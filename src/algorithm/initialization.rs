//! Initial candidate sets for grid cells and path positions

use crate::algorithm::bitset::TileBitset;
use crate::algorithm::constraint::{CellConstraint, ConstraintNetwork};
use crate::analysis::classification::ShapeClassificationIndex;
use crate::io::error::{Result, WithContext};
use crate::spatial::grid::{Cell, Direction, TileGrid};
use crate::spatial::path::ClosedPath;
use crate::spatial::tiles::{TileFamily, TileId, exertion, is_forest_tile};
use std::collections::{BTreeMap, BTreeSet};

/// What lies across one edge of a cell being solved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    /// Edge of the grid
    Boundary,
    /// Another cell being solved in the same pass
    Internal,
    /// Cell already demoted to the fallback tile
    Fallback,
    /// Forest tile inside the region that must be kept
    PreAssigned(TileId),
    /// Tile outside the region
    External(TileId),
}

/// Fixed inputs for solving one region under one orientation
#[derive(Debug, Clone, Copy)]
pub struct RegionProblem<'g> {
    /// Grid being filled
    pub grid: &'g TileGrid,
    /// Forest tiles inside the region, kept as they are
    pub pre_assigned: &'g BTreeMap<Cell, TileId>,
    /// Family at the origin
    pub orientation: TileFamily,
}

impl RegionProblem<'_> {
    /// Family a cell must draw from
    pub const fn family_at(&self, cell: Cell) -> TileFamily {
        TileFamily::at(cell.row, cell.col, self.orientation)
    }

    /// Classify the edge from `cell` toward `direction`
    pub fn classify_edge(
        &self,
        cell: Cell,
        direction: Direction,
        active: &BTreeSet<Cell>,
        fallback: &BTreeSet<Cell>,
    ) -> EdgeKind {
        let Some(next) = self.grid.neighbor(cell, direction) else {
            return EdgeKind::Boundary;
        };
        if active.contains(&next) {
            EdgeKind::Internal
        } else if fallback.contains(&next) {
            EdgeKind::Fallback
        } else if let Some(&tile) = self.pre_assigned.get(&next) {
            EdgeKind::PreAssigned(tile)
        } else {
            self.grid
                .get(next)
                .map_or(EdgeKind::Boundary, EdgeKind::External)
        }
    }

    /// Build the constraint network for the cells still being solved
    ///
    /// Every edge is narrowed according to its [`EdgeKind`] and each cell's
    /// achievable sets are then re-derived from its remaining variants.
    pub fn initialize(
        &self,
        active: &BTreeSet<Cell>,
        fallback: &BTreeSet<Cell>,
    ) -> ConstraintNetwork {
        let entries = active
            .iter()
            .map(|&cell| {
                let mut constraint = CellConstraint::new(self.family_at(cell));
                for direction in Direction::ALL {
                    let facing = direction.opposite();
                    match self.classify_edge(cell, direction, active, fallback) {
                        EdgeKind::Boundary | EdgeKind::Internal => {}
                        EdgeKind::Fallback => {
                            constraint.constrain_to_zero(direction);
                        }
                        EdgeKind::PreAssigned(tile) => {
                            if let Some(mirrored) = exertion(tile, facing) {
                                constraint.constrain_to(direction, mirrored);
                            }
                        }
                        EdgeKind::External(tile) => {
                            let required = if is_forest_tile(tile) {
                                exertion(tile, facing)
                            } else {
                                None
                            };
                            let zero = constraint.family().zero(direction);
                            constraint.constrain_to(direction, required.unwrap_or(zero));
                        }
                    }
                }
                constraint.settle();
                (cell, constraint)
            })
            .collect();

        ConstraintNetwork::new((self.grid.rows(), self.grid.cols()), entries)
    }
}

/// Candidate tiles for every path position from the classification index
///
/// # Errors
///
/// Returns `UnknownShape` naming the first position whose signature has no
/// entry in the index
pub fn path_candidates(
    path: &ClosedPath,
    shapes: &ShapeClassificationIndex,
) -> Result<Vec<TileBitset>> {
    path.signatures()?
        .into_iter()
        .zip(path.positions())
        .enumerate()
        .map(|(index, (signature, &position))| {
            shapes
                .candidates(&signature)
                .map(|tiles| tiles.iter().copied().collect())
                .at_position(index, position)
        })
        .collect()
}
