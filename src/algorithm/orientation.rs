//! Choosing the family layout for a region
//!
//! Each of the four orientations is solved independently and audited after
//! the fact. The lowest `(failures, fallbacks, -fills)` wins; the earlier
//! orientation keeps a tie.

use crate::algorithm::conflict::{RegionSolution, solve_region};
use crate::algorithm::initialization::RegionProblem;
use crate::io::error::Result;
use crate::spatial::grid::{Assignment, Cell, Direction, TileGrid};
use crate::spatial::regions::FillRegion;
use crate::spatial::tiles::{Exertion, TileFamily, TileId, exertion, is_fill_tile, is_forest_tile};
use std::cmp::{Ordering, Reverse};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Quality of one orientation's fill, smaller is better
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrientationScore {
    /// Family mismatches of kept tiles plus audited edge mismatches
    pub failures: usize,
    /// Cells given the fallback tile
    pub fallbacks: usize,
    /// Canonical fill tiles in the region, kept tiles included
    pub fills: usize,
}

impl OrientationScore {
    const fn key(&self) -> (usize, usize, Reverse<usize>) {
        (self.failures, self.fallbacks, Reverse(self.fills))
    }

    /// Strict improvement over `other`
    pub fn is_better_than(&self, other: &Self) -> bool {
        self < other
    }
}

impl PartialOrd for OrientationScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrientationScore {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl fmt::Display for OrientationScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failures={} fallbacks={} fills={}",
            self.failures, self.fallbacks, self.fills
        )
    }
}

/// Finished fill of one region under its chosen orientation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionFill {
    /// Tile per region cell, kept forest tiles included
    pub assignment: Assignment,
    /// Family at the origin that produced this fill
    pub orientation: TileFamily,
    /// Audit result
    pub score: OrientationScore,
    /// Cells that received the fallback tile
    pub fallback: BTreeSet<Cell>,
}

/// Kept forest tiles whose family differs from the one their cell expects
pub fn family_mismatches(
    pre_assigned: &BTreeMap<Cell, TileId>,
    orientation: TileFamily,
) -> usize {
    pre_assigned
        .iter()
        .filter(|&(cell, &tile)| {
            TileFamily::of_tile(tile) != Some(TileFamily::at(cell.row, cell.col, orientation))
        })
        .count()
}

#[derive(Debug, Clone, Copy)]
enum Face {
    Exact(Exertion),
    AnyZero,
}

impl Face {
    const fn matches(self, other: Self) -> bool {
        match (self, other) {
            (Self::Exact(a), Self::Exact(b)) => a.code() == b.code(),
            (Self::AnyZero, Self::Exact(edge)) | (Self::Exact(edge), Self::AnyZero) => {
                edge.is_zero()
            }
            (Self::AnyZero, Self::AnyZero) => true,
        }
    }
}

/// Edges of filled cells whose two sides disagree
///
/// Internal edges are counted once. Boundary edges always pass. A fallback
/// side passes against any all-zero value.
pub fn audit_edges(
    grid: &TileGrid,
    solution: &RegionSolution,
    pre_assigned: &BTreeMap<Cell, TileId>,
    orientation: TileFamily,
) -> usize {
    let face = |cell: Cell, direction: Direction| -> Option<Face> {
        if solution.fallback.contains(&cell) {
            return Some(Face::AnyZero);
        }
        solution
            .assignment
            .get(&cell)
            .or_else(|| pre_assigned.get(&cell))
            .and_then(|&tile| exertion(tile, direction))
            .map(Face::Exact)
    };

    let mut mismatches = 0;
    for &cell in solution.assignment.keys() {
        for direction in Direction::ALL {
            let Some(next) = grid.neighbor(cell, direction) else {
                continue;
            };
            let opposite = direction.opposite();
            let theirs = if solution.assignment.contains_key(&next) {
                if next < cell {
                    continue;
                }
                face(next, opposite)
            } else if pre_assigned.contains_key(&next) {
                face(next, opposite)
            } else {
                match grid.get(next) {
                    Some(tile) if is_forest_tile(tile) => exertion(tile, opposite).map(Face::Exact),
                    _ => Some(Face::Exact(
                        TileFamily::at(cell.row, cell.col, orientation).zero(direction),
                    )),
                }
            };

            let fits = match (face(cell, direction), theirs) {
                (Some(mine), Some(other)) => mine.matches(other),
                _ => false,
            };
            if !fits {
                mismatches += 1;
            }
        }
    }
    mismatches
}

/// Solve and audit a region under one orientation
///
/// # Errors
///
/// Returns `PropagationLimit` if propagation fails to settle
pub fn evaluate(
    grid: &TileGrid,
    region: &FillRegion,
    orientation: TileFamily,
) -> Result<RegionFill> {
    let (to_fill, pre_assigned) = region.partition(grid);
    let problem = RegionProblem {
        grid,
        pre_assigned: &pre_assigned,
        orientation,
    };
    let solution = solve_region(&problem, &to_fill)?;

    let failures = family_mismatches(&pre_assigned, orientation)
        + audit_edges(grid, &solution, &pre_assigned, orientation);

    let mut assignment = solution.assignment;
    assignment.extend(pre_assigned);
    let fills = assignment.values().filter(|&&tile| is_fill_tile(tile)).count();

    let score = OrientationScore {
        failures,
        fallbacks: solution.fallback.len(),
        fills,
    };
    tracing::debug!(%orientation, %score, passes = solution.passes, "orientation evaluated");

    Ok(RegionFill {
        assignment,
        orientation,
        score,
        fallback: solution.fallback,
    })
}

/// Try all four orientations in order and keep the best
///
/// # Errors
///
/// Returns `PropagationLimit` if propagation fails to settle
pub fn search(grid: &TileGrid, region: &FillRegion) -> Result<RegionFill> {
    let [first, rest @ ..] = TileFamily::ALL;
    let mut best = evaluate(grid, region, first)?;
    for orientation in rest {
        let candidate = evaluate(grid, region, orientation)?;
        if candidate.score.is_better_than(&best.score) {
            best = candidate;
        }
    }
    Ok(best)
}
