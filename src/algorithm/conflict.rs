//! Fallback demotion for cells no family variant can satisfy
//!
//! A conflicted cell is given the universal fallback tile and removed from
//! the solve. Its neighbours then see an all-zero edge, and the region is
//! initialised and propagated again from scratch. Every pass removes at least
//! one cell, so a region of `n` cells settles within `n + 1` passes.

use crate::algorithm::initialization::RegionProblem;
use crate::algorithm::propagation::propagate;
use crate::algorithm::selection::{GridSelection, select_tiles};
use crate::io::error::Result;
use crate::spatial::grid::{Assignment, Cell};
use crate::spatial::tiles::FALLBACK_TILE;
use std::collections::BTreeSet;

/// Tiles for every cell that needed filling in one region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSolution {
    /// Chosen tile per cell, fallback cells included
    pub assignment: Assignment,
    /// Cells that received the fallback tile
    pub fallback: BTreeSet<Cell>,
    /// Initialise/propagate/select passes used
    pub passes: usize,
}

/// Fill `to_fill`, demoting conflicted cells until the rest is consistent
///
/// # Errors
///
/// Returns `PropagationLimit` if any propagation run fails to settle
pub fn solve_region(
    problem: &RegionProblem<'_>,
    to_fill: &BTreeSet<Cell>,
) -> Result<RegionSolution> {
    let mut active = to_fill.clone();
    let mut fallback = BTreeSet::new();
    let max_passes = to_fill.len() + 1;

    for pass in 1..=max_passes {
        let mut network = problem.initialize(&active, &fallback);
        let seeds = network.internal_arcs();
        let stats = propagate(&mut network, seeds)?;
        tracing::trace!(pass, iterations = stats.iterations, "initial propagation");

        let mut conflicts = network.conflicted_cells();
        if conflicts.is_empty() {
            match select_tiles(&mut network)? {
                GridSelection::Complete(mut assignment) => {
                    assignment.extend(fallback.iter().map(|&cell| (cell, FALLBACK_TILE)));
                    return Ok(RegionSolution {
                        assignment,
                        fallback,
                        passes: pass,
                    });
                }
                GridSelection::Conflicts(cells) => conflicts = cells,
            }
        }

        tracing::debug!(
            pass,
            orientation = %problem.orientation,
            demoted = conflicts.len(),
            "demoting conflicted cells to fallback"
        );
        for cell in conflicts {
            active.remove(&cell);
            fallback.insert(cell);
        }
    }

    // Only reachable if a pass demoted nothing, which conflicts never allow
    Ok(RegionSolution {
        assignment: to_fill.iter().map(|&cell| (cell, FALLBACK_TILE)).collect(),
        fallback: to_fill.clone(),
        passes: max_passes,
    })
}
