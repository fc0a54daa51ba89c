use crate::algorithm::bitset::TileBitset;
use crate::algorithm::constraint::{CellConstraint, ConstraintNetwork};
use crate::algorithm::propagation::propagate;
use crate::analysis::frequency::NeighborFrequencyTable;
use crate::io::configuration::DEFAULT_SEED;
use crate::io::error::{AlgorithmError, Result, WithContext};
use crate::spatial::grid::{Assignment, Cell, Direction};
use crate::spatial::tiles::{TileId, total_ones};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::cmp::Reverse;

/// Valid variant with the most set exertion bits
///
/// Ties go to the earlier variant in family order, so the fill tile wins
/// whenever it is still valid.
pub fn best_variant(constraint: &mut CellConstraint) -> Option<TileId> {
    constraint
        .valid_tiles()
        .into_iter()
        .min_by_key(|&tile| Reverse(total_ones(tile)))
}

/// Result of committing tiles across a constraint network
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridSelection {
    /// Every cell received a tile
    Complete(Assignment),
    /// Committing left these cells without a valid variant
    Conflicts(Vec<Cell>),
}

/// Commit one tile per cell in row-major order
///
/// Each commit is propagated before the next pick, so every later choice
/// already honours the tiles placed before it.
///
/// # Errors
///
/// Returns `PropagationLimit` if a commit fails to settle
pub fn select_tiles(network: &mut ConstraintNetwork) -> Result<GridSelection> {
    let mut assignment = Assignment::new();

    for slot in 0..network.len() {
        let (Some(cell), Some(constraint)) = (network.cell(slot), network.constraint_mut(slot))
        else {
            continue;
        };
        let Some(tile) = best_variant(constraint) else {
            return Ok(GridSelection::Conflicts(network.conflicted_cells()));
        };

        if constraint.commit(tile) {
            let seeds = network.arcs_into(slot);
            propagate(network, seeds)?;
            let conflicts = network.conflicted_cells();
            if !conflicts.is_empty() {
                tracing::debug!(%cell, tile, conflicts = conflicts.len(), "commit emptied cells");
                return Ok(GridSelection::Conflicts(conflicts));
            }
        }
        assignment.insert(cell, tile);
    }

    Ok(GridSelection::Complete(assignment))
}

/// Seeded random selector for reproducible stochastic choices
#[derive(Debug, Clone)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform pick from a slice
    pub fn choose<T: Copy>(&mut self, options: &[T]) -> Option<T> {
        if options.is_empty() {
            return None;
        }
        options.get(self.rng.random_range(0..options.len())).copied()
    }
}

impl Default for RandomSelector {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

/// A last tile that does not fit the first across the closure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClosureGap {
    /// Tile at the last position
    pub last: TileId,
    /// Tile at position 0
    pub first: TileId,
    /// Travel direction from the last position back to position 0
    pub direction: Direction,
}

/// Tiles picked along a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSelection {
    /// One tile per position
    pub tiles: Vec<TileId>,
    /// Set when the last tile does not fit the first
    pub closure_gap: Option<ClosureGap>,
}

impl PathSelection {
    /// Whether the last tile fits the first across the closure
    pub const fn closure_consistent(&self) -> bool {
        self.closure_gap.is_none()
    }
}

/// Random pick among `options` seen `direction` of `previous` often enough
///
/// Positional context is attached by the caller.
fn next_compatible(
    options: &TileBitset,
    previous: TileId,
    direction: Direction,
    frequencies: &NeighborFrequencyTable,
    threshold: u32,
    selector: &mut RandomSelector,
) -> Result<TileId> {
    let compatible: Vec<TileId> = frequencies
        .compatible_neighbors(previous, direction, threshold)
        .into_iter()
        .filter(|&tile| options.contains(tile))
        .collect();
    selector
        .choose(&compatible)
        .ok_or(AlgorithmError::NoCompatibleChoice {
            index: 0,
            position: Cell::default(),
            previous,
        })
}

/// Greedy random walk along the path
///
/// Position 0 is drawn from all its candidates, each later position from the
/// candidates compatible with the previous pick in the travel direction.
/// `travel[i]` is the step from position `i` to the next one.
///
/// # Errors
///
/// Returns an error if:
/// - `positions` or `travel` differ in length from `candidates`
/// - Position 0 has no candidates (`UnsatisfiablePath`)
/// - A later position has no candidate compatible with its predecessor
///   (`NoCompatibleChoice`)
pub fn assign_path(
    candidates: &[TileBitset],
    positions: &[Cell],
    travel: &[Direction],
    frequencies: &NeighborFrequencyTable,
    threshold: u32,
    selector: &mut RandomSelector,
) -> Result<PathSelection> {
    for (parameter, len) in [("positions", positions.len()), ("travel", travel.len())] {
        if len != candidates.len() {
            return Err(AlgorithmError::InvalidParameter {
                parameter,
                value: len.to_string(),
                reason: format!("expected one entry per candidate set ({})", candidates.len()),
            });
        }
    }

    let mut steps = candidates.iter().zip(positions).enumerate();
    let mut tiles: Vec<TileId> = Vec::with_capacity(candidates.len());
    let Some((_, (options, &position))) = steps.next() else {
        return Ok(PathSelection {
            tiles,
            closure_gap: None,
        });
    };

    let first = selector
        .choose(&options.to_vec())
        .ok_or(AlgorithmError::UnsatisfiablePath { index: 0, position })?;
    tiles.push(first);

    let mut previous = first;
    for ((index, (options, &position)), &direction) in steps.zip(travel) {
        previous = next_compatible(options, previous, direction, frequencies, threshold, selector)
            .at_position(index, position)?;
        tiles.push(previous);
    }

    let closure_gap = travel.last().and_then(|&direction| {
        (!frequencies.is_compatible(previous, direction, first, threshold)).then_some(ClosureGap {
            last: previous,
            first,
            direction,
        })
    });

    Ok(PathSelection { tiles, closure_gap })
}
