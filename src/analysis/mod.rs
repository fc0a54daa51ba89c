//! Reference tables consulted by the fringe generator
//!
//! Both tables are read-only while a fringe is generated and may be shared
//! across threads by reference.

/// Shape signature to candidate tile index
pub mod classification;
/// Neighbour co-occurrence counts and the compatibility threshold test
pub mod frequency;
