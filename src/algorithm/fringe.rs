//! Fringe tile generation along a closed path around a green
//!
//! Candidates come from the shape index, are narrowed by neighbour
//! compatibility around the whole loop, then picked by a seeded random walk.

use crate::algorithm::initialization::path_candidates;
use crate::algorithm::propagation::{PathNetwork, propagate};
use crate::algorithm::selection::{ClosureGap, RandomSelector, assign_path};
use crate::analysis::classification::ShapeClassificationIndex;
use crate::analysis::frequency::NeighborFrequencyTable;
use crate::io::configuration::DEFAULT_FREQUENCY_THRESHOLD;
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::spatial::grid::{Assignment, Cell, Direction};
use crate::spatial::path::ClosedPath;
use crate::spatial::tiles::TileId;

/// Runtime options for fringe generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FringeConfig {
    /// Minimum co-occurrence count for two tiles to be neighbours
    pub frequency_threshold: u32,
    /// Fail when the last tile does not fit the first
    pub enforce_closure: bool,
}

impl Default for FringeConfig {
    fn default() -> Self {
        Self {
            frequency_threshold: DEFAULT_FREQUENCY_THRESHOLD,
            enforce_closure: false,
        }
    }
}

/// Generated fringe: one tile per path position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathFill {
    positions: Vec<Cell>,
    tiles: Vec<TileId>,
    closure_consistent: bool,
}

impl PathFill {
    /// Tiles in path order
    pub fn tiles(&self) -> &[TileId] {
        &self.tiles
    }

    /// Positions in path order
    pub fn positions(&self) -> &[Cell] {
        &self.positions
    }

    /// Whether the last tile fits the first across the closure
    pub const fn closure_consistent(&self) -> bool {
        self.closure_consistent
    }

    /// `(position, tile)` pairs in path order
    pub fn pairs(&self) -> impl Iterator<Item = (Cell, TileId)> + '_ {
        self.positions.iter().copied().zip(self.tiles.iter().copied())
    }

    /// The fringe as a grid assignment
    pub fn to_assignment(&self) -> Assignment {
        self.pairs().collect()
    }
}

/// Fringe generator over shared reference tables
#[derive(Debug, Clone, Copy)]
pub struct FringeGenerator<'t> {
    frequencies: &'t NeighborFrequencyTable,
    shapes: &'t ShapeClassificationIndex,
    config: FringeConfig,
}

impl<'t> FringeGenerator<'t> {
    /// Generator with default options
    pub fn new(
        frequencies: &'t NeighborFrequencyTable,
        shapes: &'t ShapeClassificationIndex,
    ) -> Self {
        Self {
            frequencies,
            shapes,
            config: FringeConfig::default(),
        }
    }

    /// Generator with explicit options
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for a zero frequency threshold, which would
    /// accept pairs that were never observed
    pub fn with_config(
        frequencies: &'t NeighborFrequencyTable,
        shapes: &'t ShapeClassificationIndex,
        config: FringeConfig,
    ) -> Result<Self> {
        if config.frequency_threshold == 0 {
            return Err(invalid_parameter(
                "frequency_threshold",
                &config.frequency_threshold,
                &"must be at least 1",
            ));
        }
        Ok(Self {
            frequencies,
            shapes,
            config,
        })
    }

    /// Options in use
    pub const fn config(&self) -> FringeConfig {
        self.config
    }

    /// Generate fringe tiles for a path
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A position's shape is missing from the classification index
    /// - Propagation leaves a position without candidates
    /// - The random walk reaches a position with no compatible candidate
    /// - Closure is enforced and the last tile does not fit the first
    pub fn generate(&self, path: &ClosedPath, selector: &mut RandomSelector) -> Result<PathFill> {
        let candidates = path_candidates(path, self.shapes)?;
        let travel = (0..path.len())
            .map(|index| path.travel(index))
            .collect::<Result<Vec<Direction>>>()?;

        let threshold = self.config.frequency_threshold;
        let mut network =
            PathNetwork::new(candidates, travel.clone(), self.frequencies, threshold);
        let seeds = 0..path.len();
        let stats = propagate(&mut network, seeds)?;
        tracing::debug!(
            positions = path.len(),
            iterations = stats.iterations,
            "fringe candidates settled"
        );

        let empty = network
            .candidates()
            .iter()
            .zip(path.positions())
            .enumerate()
            .find(|(_, (options, _))| options.is_empty());
        if let Some((index, (_, &position))) = empty {
            return Err(AlgorithmError::UnsatisfiablePath { index, position });
        }

        let selection = assign_path(
            network.candidates(),
            path.positions(),
            &travel,
            self.frequencies,
            threshold,
            selector,
        )?;

        if let Some(ClosureGap {
            last,
            first,
            direction,
        }) = selection.closure_gap
        {
            if self.config.enforce_closure {
                return Err(AlgorithmError::ClosureMismatch {
                    last,
                    first,
                    direction,
                });
            }
            tracing::warn!(
                last = format_args!("${last:02X}"),
                first = format_args!("${first:02X}"),
                %direction,
                "fringe closure mismatch"
            );
        }

        Ok(PathFill {
            positions: path.positions().to_vec(),
            closure_consistent: selection.closure_consistent(),
            tiles: selection.tiles,
        })
    }
}
