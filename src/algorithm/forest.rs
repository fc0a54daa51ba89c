//! Forest fill entry point
//!
//! Finds every placeholder region in a grid and fills it with forest tiles
//! whose edges agree with each other and with the surroundings.

use crate::algorithm::orientation::{RegionFill, evaluate, search};
use crate::io::error::Result;
use crate::spatial::grid::{Assignment, TileGrid};
use crate::spatial::regions::{FillRegion, detect_regions};
use crate::spatial::tiles::TileFamily;

/// Runtime options for the forest filler
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ForestConfig {
    /// Fixed family at the origin; `None` searches all four
    pub orientation: Option<TileFamily>,
}

/// Constraint-propagation forest filler
///
/// Holds no state between calls; every region is solved from scratch.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForestFiller {
    config: ForestConfig,
}

impl ForestFiller {
    /// Filler with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Filler with explicit options
    pub const fn with_config(config: ForestConfig) -> Self {
        Self { config }
    }

    /// Options in use
    pub const fn config(&self) -> ForestConfig {
        self.config
    }

    /// Placeholder regions of a grid in row-major seed order
    pub fn detect_regions(&self, grid: &TileGrid) -> Vec<FillRegion> {
        detect_regions(grid)
    }

    /// Fill one region
    ///
    /// # Errors
    ///
    /// Returns `PropagationLimit` if propagation fails to settle, which
    /// indicates a defect rather than a bad grid
    pub fn fill_region(&self, grid: &TileGrid, region: &FillRegion) -> Result<RegionFill> {
        match self.config.orientation {
            Some(orientation) => evaluate(grid, region, orientation),
            None => search(grid, region),
        }
    }

    /// Fill every region of a grid and merge the results
    ///
    /// # Errors
    ///
    /// Returns `PropagationLimit` if propagation fails to settle
    pub fn fill_grid(&self, grid: &TileGrid) -> Result<Assignment> {
        let regions = self.detect_regions(grid);
        self.fill_regions(grid, &regions, |_, _| {})
    }

    /// Fill the given regions, reporting each finished one to `observer`
    ///
    /// # Errors
    ///
    /// Returns `PropagationLimit` if propagation fails to settle
    pub fn fill_regions(
        &self,
        grid: &TileGrid,
        regions: &[FillRegion],
        mut observer: impl FnMut(usize, &RegionFill),
    ) -> Result<Assignment> {
        let mut merged = Assignment::new();
        for (index, region) in regions.iter().enumerate() {
            let fill = self.fill_region(grid, region)?;
            tracing::debug!(
                region = index,
                cells = region.len(),
                orientation = %fill.orientation,
                score = %fill.score,
                "region filled"
            );
            observer(index, &fill);
            merged.extend(fill.assignment);
        }
        Ok(merged)
    }
}
