//! Spatial data structures
//!
//! This module contains the grid-side model of a fill:
//! - Cell coordinates, directions and the tile grid
//! - Forest tile families and their edge exertions
//! - Fill region discovery
//! - Closed fringe paths and their shape signatures

/// Cell coordinates, compass directions and the tile grid
pub mod grid;
/// Closed path validation, winding and shape signatures
pub mod path;
/// Flood-fill discovery of forest fill regions
pub mod regions;
/// Tile ids, exertion vectors and forest families
pub mod tiles;

pub use grid::{Assignment, Cell, Direction, TileGrid};
