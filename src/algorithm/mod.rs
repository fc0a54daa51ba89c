/// Fixed-size and growable bitsets for candidate tracking
pub mod bitset;
/// Fallback demotion loop for unsatisfiable cells
pub mod conflict;
/// Per-cell exertion constraints and the cell arena
pub mod constraint;
/// Forest fill entry point and its options
pub mod forest;
/// Fringe generation along closed paths
pub mod fringe;
/// Initial candidate sets for cells and path positions
pub mod initialization;
/// Orientation scoring, auditing and search
pub mod orientation;
/// Worklist arc-consistency propagation
pub mod propagation;
/// Rule-based rough fill
pub mod rough;
/// Tile commitment and seeded random selection
pub mod selection;
