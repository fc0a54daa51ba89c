//! Closed fringe paths traced around a green
//!
//! A path is a cyclic list of cells where each consecutive pair (including
//! last → first) is one orthogonal step apart. Winding and the interior side
//! at each position are derived on demand from the cell list.

use crate::io::configuration::MIN_PATH_LENGTH;
use crate::io::error::{AlgorithmError, Result};
use crate::math::geometry::{cross, twice_signed_area};
use crate::spatial::grid::{Cell, Direction};
use std::collections::HashMap;
use std::fmt;

/// Rotational sense of a closed path on screen
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Winding {
    /// Interior lies to the right of travel
    Clockwise,
    /// Interior lies to the left of travel
    CounterClockwise,
}

impl Winding {
    /// Winding of a cyclic cell sequence from its shoelace sum
    ///
    /// A negative sum in the `(row, col)` frame is clockwise on screen; a
    /// degenerate zero-area path counts as counter-clockwise.
    pub fn of(points: &[Cell]) -> Self {
        if twice_signed_area(points) < 0 {
            Self::Clockwise
        } else {
            Self::CounterClockwise
        }
    }
}

fn sorted_pair(a: Direction, b: Direction) -> [Direction; 2] {
    if a.name() <= b.name() { [a, b] } else { [b, a] }
}

/// Which side of a path position faces the putting surface
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InteriorSide {
    /// Straight segment, interior perpendicular to travel
    Straight(Direction),
    /// Corner, interior spans a quadrant of two directions (name-sorted)
    Corner([Direction; 2]),
}

impl InteriorSide {
    /// Corner interior from two directions in any order
    pub fn corner(a: Direction, b: Direction) -> Self {
        Self::Corner(sorted_pair(a, b))
    }

    /// Directions making up the interior side
    pub fn directions(&self) -> Vec<Direction> {
        match *self {
            Self::Straight(direction) => vec![direction],
            Self::Corner(pair) => pair.to_vec(),
        }
    }
}

impl fmt::Display for InteriorSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Straight(direction) => write!(f, "{direction}"),
            Self::Corner([a, b]) => write!(f, "({a},{b})"),
        }
    }
}

/// Lookup key describing the local path shape at one position
///
/// Combines the two edges leading to the path neighbours with the interior
/// side. Displays in the `path=(down,right) interior=(down,right)` format
/// used by the greens analysis tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ShapeSignature {
    path_edges: [Direction; 2],
    interior: InteriorSide,
}

impl ShapeSignature {
    /// Signature from the edges toward both path neighbours and the interior side
    pub fn new(toward_previous: Direction, toward_next: Direction, interior: InteriorSide) -> Self {
        Self {
            path_edges: sorted_pair(toward_previous, toward_next),
            interior,
        }
    }

    /// Name-sorted edges toward the path neighbours
    pub const fn path_edges(&self) -> [Direction; 2] {
        self.path_edges
    }

    /// Interior side descriptor
    pub const fn interior(&self) -> InteriorSide {
        self.interior
    }
}

impl fmt::Display for ShapeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b] = self.path_edges;
        write!(f, "path=({a},{b}) interior={}", self.interior)
    }
}

fn cyclic(points: &[Cell], index: isize) -> Option<Cell> {
    let n = points.len() as isize;
    if n == 0 {
        return None;
    }
    points.get(index.rem_euclid(n) as usize).copied()
}

/// Direction of the step leaving `index` toward `index + 1`
///
/// # Errors
///
/// Returns `NonOrthogonalStep` when the two cells are not one step apart
pub fn step_direction(points: &[Cell], index: usize) -> Result<Direction> {
    let from = cyclic(points, index as isize);
    let to = cyclic(points, index as isize + 1);
    match (from, to) {
        (Some(from), Some(to)) => {
            Direction::between(from, to).ok_or(AlgorithmError::NonOrthogonalStep {
                index,
                from,
                to,
            })
        }
        _ => Err(AlgorithmError::PathTooShort {
            length: points.len(),
            minimum: MIN_PATH_LENGTH,
        }),
    }
}

/// Interior side at one position of a cyclic cell sequence
///
/// Only the steps into and out of `index` have to be orthogonal, the rest of
/// the sequence is used for the winding alone.
///
/// # Errors
///
/// Returns `NonOrthogonalStep` for a non-unit step around `index` and
/// `DuplicatePosition` when the path doubles back on itself there
pub fn interior_side(points: &[Cell], index: usize, winding: Winding) -> Result<InteriorSide> {
    let n = points.len();
    let incoming = step_direction(points, (index + n.saturating_sub(1)) % n.max(1))?;
    let outgoing = step_direction(points, index)?;

    if incoming == outgoing {
        let side = match winding {
            Winding::Clockwise => outgoing.rotate_cw(),
            Winding::CounterClockwise => outgoing.rotate_ccw(),
        };
        return Ok(InteriorSide::Straight(side));
    }

    if incoming == outgoing.opposite() {
        let revisited = (index + 1) % n.max(1);
        return Err(AlgorithmError::DuplicatePosition {
            index: revisited,
            position: cyclic(points, revisited as isize).unwrap_or_default(),
        });
    }

    let turn = cross(incoming, outgoing);
    let travel_quadrant = match winding {
        Winding::Clockwise => turn > 0,
        Winding::CounterClockwise => turn < 0,
    };

    if travel_quadrant {
        Ok(InteriorSide::corner(incoming, outgoing))
    } else {
        Ok(InteriorSide::corner(incoming.opposite(), outgoing.opposite()))
    }
}

/// Validated closed path of grid positions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosedPath {
    positions: Vec<Cell>,
}

impl ClosedPath {
    /// Validate and wrap a traced path
    ///
    /// The first cell does not need to be repeated at the end; indices wrap.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Fewer than four positions are given
    /// - Any cyclic step is not a single orthogonal move
    /// - A position appears twice
    pub fn new(positions: Vec<Cell>) -> Result<Self> {
        if positions.len() < MIN_PATH_LENGTH {
            return Err(AlgorithmError::PathTooShort {
                length: positions.len(),
                minimum: MIN_PATH_LENGTH,
            });
        }

        for index in 0..positions.len() {
            step_direction(&positions, index)?;
        }

        let mut seen = HashMap::with_capacity(positions.len());
        for (index, &position) in positions.iter().enumerate() {
            if seen.insert(position, index).is_some() {
                return Err(AlgorithmError::DuplicatePosition { index, position });
            }
        }

        Ok(Self { positions })
    }

    /// Number of positions
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Always false for a validated path
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Positions in trace order
    pub fn positions(&self) -> &[Cell] {
        &self.positions
    }

    /// Position at a cyclic index
    pub fn position(&self, index: usize) -> Option<Cell> {
        cyclic(&self.positions, index as isize)
    }

    /// Rotational sense of the whole path
    pub fn winding(&self) -> Winding {
        Winding::of(&self.positions)
    }

    /// Travel direction from `index` to the next position
    ///
    /// # Errors
    ///
    /// Propagates step validation errors (cannot occur on a validated path)
    pub fn travel(&self, index: usize) -> Result<Direction> {
        step_direction(&self.positions, index % self.len().max(1))
    }

    /// Interior side at a position
    ///
    /// # Errors
    ///
    /// Propagates step validation errors (cannot occur on a validated path)
    pub fn interior_side(&self, index: usize) -> Result<InteriorSide> {
        interior_side(&self.positions, index % self.len().max(1), self.winding())
    }

    /// Shape signature at a position
    ///
    /// # Errors
    ///
    /// Propagates step validation errors (cannot occur on a validated path)
    pub fn signature(&self, index: usize) -> Result<ShapeSignature> {
        self.signature_with(index, self.winding())
    }

    /// Shape signatures of every position, computing the winding once
    ///
    /// # Errors
    ///
    /// Propagates step validation errors (cannot occur on a validated path)
    pub fn signatures(&self) -> Result<Vec<ShapeSignature>> {
        let winding = self.winding();
        (0..self.len())
            .map(|index| self.signature_with(index, winding))
            .collect()
    }

    fn signature_with(&self, index: usize, winding: Winding) -> Result<ShapeSignature> {
        let n = self.len().max(1);
        let index = index % n;
        let incoming = self.travel((index + n - 1) % n)?;
        let outgoing = self.travel(index)?;
        let interior = interior_side(&self.positions, index, winding)?;
        Ok(ShapeSignature::new(incoming.opposite(), outgoing, interior))
    }
}
