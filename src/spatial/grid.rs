//! Tile grid storage, cell coordinates and compass directions
//!
//! The grid is owned by the caller. Solvers only read it and hand back an
//! [`Assignment`], which the caller may write back with [`TileGrid::apply`].

use crate::io::error::{AlgorithmError, Result};
use crate::spatial::tiles::{PLACEHOLDER_TILE, TileId};
use ndarray::Array2;
use std::collections::BTreeMap;
use std::fmt;

/// Grid coordinate, row-major ordered
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    /// Row index (grows downward)
    pub row: usize,
    /// Column index (grows rightward)
    pub col: usize,
}

impl Cell {
    /// Create a cell coordinate
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Neighbouring coordinate one step away, `None` when it would be negative
    pub fn step(self, direction: Direction) -> Option<Self> {
        let [dr, dc] = direction.delta();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        Some(Self { row, col })
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Compass direction on the grid, in clockwise order starting at up
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Toward row - 1
    Up,
    /// Toward col + 1
    Right,
    /// Toward row + 1
    Down,
    /// Toward col - 1
    Left,
}

impl Direction {
    /// All directions in exertion-vector order
    pub const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Position in exertion vectors and per-direction arrays
    pub const fn index(self) -> usize {
        match self {
            Self::Up => 0,
            Self::Right => 1,
            Self::Down => 2,
            Self::Left => 3,
        }
    }

    /// Direction from its index (taken modulo 4)
    pub const fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Self::Up,
            1 => Self::Right,
            2 => Self::Down,
            _ => Self::Left,
        }
    }

    /// Mirrored direction across a shared edge
    pub const fn opposite(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    /// Quarter turn clockwise (screen coordinates)
    pub const fn rotate_cw(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Quarter turn counter-clockwise (screen coordinates)
    pub const fn rotate_ccw(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// Step as `[delta_row, delta_col]`
    pub const fn delta(self) -> [isize; 2] {
        match self {
            Self::Up => [-1, 0],
            Self::Right => [0, 1],
            Self::Down => [1, 0],
            Self::Left => [0, -1],
        }
    }

    /// Direction of a single orthogonal step, `None` for any other displacement
    pub fn between(from: Cell, to: Cell) -> Option<Self> {
        Self::ALL.into_iter().find(|&d| from.step(d) == Some(to))
    }

    /// Lowercase name, also the sort key used by shape signatures
    pub const fn name(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Right => "right",
            Self::Down => "down",
            Self::Left => "left",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Final tile per coordinate produced by a fill
pub type Assignment = BTreeMap<Cell, TileId>;

/// Rectangular array of tile ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    tiles: Array2<TileId>,
}

impl TileGrid {
    /// Grid of the given size with every cell set to `tile`
    pub fn filled(rows: usize, cols: usize, tile: TileId) -> Self {
        Self {
            tiles: Array2::from_elem((rows, cols), tile),
        }
    }

    /// Grid made entirely of placeholders
    pub fn placeholders(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, PLACEHOLDER_TILE)
    }

    /// Wrap an existing array
    pub const fn from_array(tiles: Array2<TileId>) -> Self {
        Self { tiles }
    }

    /// Build a grid from row vectors
    ///
    /// # Errors
    ///
    /// Returns an error if the rows have differing lengths
    pub fn from_rows(rows: &[Vec<TileId>]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if let Some((line, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(AlgorithmError::InvalidGridData {
                line: line + 1,
                reason: format!("expected {width} tiles, found {}", row.len()),
            });
        }

        let flat: Vec<TileId> = rows.iter().flatten().copied().collect();
        let tiles = Array2::from_shape_vec((height, width), flat).map_err(|error| {
            AlgorithmError::InvalidGridData {
                line: 0,
                reason: error.to_string(),
            }
        })?;
        Ok(Self { tiles })
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.tiles.nrows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.tiles.ncols()
    }

    /// Check whether a coordinate lies on the grid
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows() && cell.col < self.cols()
    }

    /// Tile at a coordinate
    pub fn get(&self, cell: Cell) -> Option<TileId> {
        self.tiles.get([cell.row, cell.col]).copied()
    }

    /// Overwrite one tile, ignoring coordinates off the grid
    pub fn set(&mut self, cell: Cell, tile: TileId) {
        if let Some(slot) = self.tiles.get_mut([cell.row, cell.col]) {
            *slot = tile;
        }
    }

    /// On-grid neighbour in a direction
    pub fn neighbor(&self, cell: Cell, direction: Direction) -> Option<Cell> {
        cell.step(direction).filter(|&next| self.contains(next))
    }

    /// Every coordinate in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows()).flat_map(move |row| (0..self.cols()).map(move |col| Cell::new(row, col)))
    }

    /// Write an assignment into the grid
    pub fn apply(&mut self, assignment: &Assignment) {
        for (&cell, &tile) in assignment {
            self.set(cell, tile);
        }
    }

    /// Borrow the underlying array
    pub const fn as_array(&self) -> &Array2<TileId> {
        &self.tiles
    }
}
