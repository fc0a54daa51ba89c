//! Mathematical utilities for the algorithm

/// Shoelace area and direction cross products on grid coordinates
pub mod geometry;
