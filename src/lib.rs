//! Constraint-propagation tile fills for retro golf course editing
//!
//! Three independent fills are provided. The forest filler solves placeholder
//! regions with arc consistency over per-edge bit exertions, demoting
//! unsatisfiable cells to a universal fallback tile. The fringe generator
//! picks tiles along a closed path around a green from observed shape and
//! neighbour tables. The rough fill applies fixed local rules around fringe
//! markers.

#![forbid(unsafe_code)]

/// Constraint networks, propagation, selection and the three fills
pub mod algorithm;
/// Reference tables for fringe generation
pub mod analysis;
/// Input/output operations, configuration and error handling
pub mod io;
/// Integer geometry on grid coordinates
pub mod math;
/// Grid, tile, region and path data structures
pub mod spatial;

pub use algorithm::forest::{ForestConfig, ForestFiller};
pub use algorithm::fringe::{FringeConfig, FringeGenerator, PathFill};
pub use algorithm::orientation::{OrientationScore, RegionFill};
pub use algorithm::rough::RoughFill;
pub use algorithm::selection::RandomSelector;
pub use analysis::classification::ShapeClassificationIndex;
pub use analysis::frequency::NeighborFrequencyTable;
pub use io::error::{AlgorithmError, Result};
pub use spatial::path::{ClosedPath, ShapeSignature};
pub use spatial::{Assignment, Cell, Direction, TileGrid};
