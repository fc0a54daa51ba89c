//! Tile identifiers, exertion vectors and the forest family model
//!
//! Forest tiles `$A0-$BB` form four families of seven variants. Every tile
//! exerts a 1- or 2-bit value on each of its four edges; two neighbours fit
//! together only when the values on their shared edge are bit-identical.

use crate::spatial::grid::Direction;
use std::fmt;

/// Raw tile identifier as stored in terrain and greens grids
pub type TileId = u16;

/// Meta value marking a cell that should be filled (outside the 8-bit tile range)
pub const PLACEHOLDER_TILE: TileId = 0x100;

/// Universal fallback tile, exerts zero on every edge and fits any family position
pub const FALLBACK_TILE: TileId = 0x3F;

/// First forest tile id (canonical fill of the first family)
pub const FOREST_FIRST: TileId = 0xA0;

/// Last forest tile id
pub const FOREST_LAST: TileId = 0xBB;

/// Fringe marker: rough lies to the left of this tile
pub const FRINGE_LEFT: TileId = 0x66;
/// Fringe marker: rough lies above this tile
pub const FRINGE_UP: TileId = 0x64;
/// Fringe marker: rough lies to the right of this tile
pub const FRINGE_RIGHT: TileId = 0x67;
/// Fringe marker: rough lies below this tile
pub const FRINGE_DOWN: TileId = 0x65;

/// Edge rough placed left of [`FRINGE_LEFT`] (even, odd parity)
pub const EDGE_ROUGH_LEFT: [TileId; 2] = [0x70, 0x84];
/// Edge rough placed above [`FRINGE_UP`] (even, odd parity)
pub const EDGE_ROUGH_UP: [TileId; 2] = [0x71, 0x85];
/// Edge rough placed right of [`FRINGE_RIGHT`] (even, odd parity)
pub const EDGE_ROUGH_RIGHT: [TileId; 2] = [0x73, 0x87];
/// Edge rough placed below [`FRINGE_DOWN`] (even, odd parity)
pub const EDGE_ROUGH_DOWN: [TileId; 2] = [0x72, 0x86];
/// Checkerboard base rough (even, odd parity)
pub const BASE_ROUGH: [TileId; 2] = [0x29, 0x2C];

/// Every tile the rough filler can emit
pub const ROUGH_TILES: [TileId; 10] = [
    0x29, 0x2C, 0x70, 0x71, 0x72, 0x73, 0x84, 0x85, 0x86, 0x87,
];

/// Check whether a tile belongs to any forest family
pub const fn is_forest_tile(tile: TileId) -> bool {
    tile >= FOREST_FIRST && tile <= FOREST_LAST
}

/// Number of distinct exertion values (two 1-bit, four 2-bit)
pub const EXERTION_CODES: usize = 6;

/// Bits exerted by a tile across one of its edges
///
/// The width is part of the identity: a 1-bit zero and a 2-bit zero are
/// different values and never match each other exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Exertion {
    bits: u8,
    width: u8,
}

impl Exertion {
    /// Single-bit exertion
    pub const fn one(bit: u8) -> Self {
        Self {
            bits: bit & 1,
            width: 1,
        }
    }

    /// Two-bit exertion, most significant bit first
    pub const fn two(first: u8, second: u8) -> Self {
        Self {
            bits: ((first & 1) << 1) | (second & 1),
            width: 2,
        }
    }

    /// All-zero exertion of the given width (1 or 2)
    pub const fn zero(width: u8) -> Self {
        Self { bits: 0, width }
    }

    /// Bit width of this edge
    pub const fn width(self) -> u8 {
        self.width
    }

    /// True when no bit is set, regardless of width
    pub const fn is_zero(self) -> bool {
        self.bits == 0
    }

    /// Number of set bits
    pub const fn ones(self) -> u32 {
        self.bits.count_ones()
    }

    /// Dense index in `0..EXERTION_CODES`
    pub const fn code(self) -> usize {
        if self.width == 1 {
            self.bits as usize
        } else {
            2 + self.bits as usize
        }
    }

    /// Inverse of [`Exertion::code`]
    pub const fn from_code(code: usize) -> Option<Self> {
        match code {
            0 | 1 => Some(Self::one(code as u8)),
            2..=5 => {
                let bits = (code - 2) as u8;
                Some(Self::two(bits >> 1, bits))
            }
            _ => None,
        }
    }
}

impl fmt::Display for Exertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.width == 1 {
            write!(f, "{}", self.bits)
        } else {
            write!(f, "{:02b}", self.bits)
        }
    }
}

/// Exertions of a tile in direction order (up, right, down, left)
pub type ExertionVector = [Exertion; 4];

const fn e1(bit: u8) -> Exertion {
    Exertion::one(bit)
}

const fn e2(first: u8, second: u8) -> Exertion {
    Exertion::two(first, second)
}

/// Variants per family, canonical fill tile first
pub const FAMILY_SIZE: usize = 7;

// Indexed by family; fill tile first so ties in selection prefer it.
const FAMILY_VARIANTS: [[TileId; FAMILY_SIZE]; 4] = [
    [0xA0, 0xA4, 0xA5, 0xA6, 0xA7, 0xA8, 0xA9],
    [0xA1, 0xAA, 0xAB, 0xAC, 0xAD, 0xAE, 0xAF],
    [0xA2, 0xB0, 0xB1, 0xB2, 0xB3, 0xB4, 0xB5],
    [0xA3, 0xB6, 0xB7, 0xB8, 0xB9, 0xBA, 0xBB],
];

// Indexed by `tile - FOREST_FIRST`.
const FOREST_EXERTIONS: [ExertionVector; 28] = [
    // $A0-$A3 fills
    [e1(1), e1(1), e2(1, 1), e1(1)],
    [e2(1, 1), e1(1), e1(1), e1(1)],
    [e2(1, 1), e1(1), e1(1), e1(1)],
    [e1(1), e1(1), e2(1, 1), e1(1)],
    // $A4-$A9 first family borders
    [e1(1), e1(1), e2(0, 1), e1(0)],
    [e1(1), e1(0), e2(0, 0), e1(0)],
    [e1(1), e1(0), e2(1, 0), e1(1)],
    [e1(0), e1(0), e2(1, 0), e1(1)],
    [e1(0), e1(1), e2(1, 1), e1(1)],
    [e1(0), e1(1), e2(0, 1), e1(0)],
    // $AA-$AF second family borders
    [e2(1, 1), e1(1), e1(0), e1(0)],
    [e2(1, 0), e1(0), e1(0), e1(0)],
    [e2(1, 0), e1(0), e1(1), e1(1)],
    [e2(0, 0), e1(0), e1(1), e1(1)],
    [e2(0, 1), e1(1), e1(1), e1(1)],
    [e2(0, 1), e1(1), e1(0), e1(0)],
    // $B0-$B5 third family borders
    [e2(0, 1), e1(1), e1(1), e1(0)],
    [e2(0, 0), e1(0), e1(1), e1(0)],
    [e2(1, 0), e1(0), e1(1), e1(1)],
    [e2(1, 0), e1(0), e1(0), e1(1)],
    [e2(1, 1), e1(1), e1(0), e1(1)],
    [e2(0, 1), e1(1), e1(0), e1(0)],
    // $B6-$BB fourth family borders
    [e1(0), e1(1), e2(1, 1), e1(0)],
    [e1(0), e1(0), e2(1, 0), e1(0)],
    [e1(1), e1(0), e2(1, 0), e1(1)],
    [e1(1), e1(0), e2(0, 0), e1(1)],
    [e1(1), e1(1), e2(0, 1), e1(1)],
    [e1(0), e1(1), e2(0, 1), e1(0)],
];

/// Exertion vector of a forest tile, `None` for any other tile
pub fn exertions(tile: TileId) -> Option<&'static ExertionVector> {
    if is_forest_tile(tile) {
        FOREST_EXERTIONS.get(usize::from(tile - FOREST_FIRST))
    } else {
        None
    }
}

/// Exertion of a forest tile across one edge
pub fn exertion(tile: TileId, direction: Direction) -> Option<Exertion> {
    exertions(tile).and_then(|vector| vector.get(direction.index()).copied())
}

/// Total set bits over all four edges, higher means more fill-like
pub fn total_ones(tile: TileId) -> u32 {
    exertions(tile).map_or(0, |vector| vector.iter().map(|e| e.ones()).sum())
}

/// One of the four forest tile families
///
/// Families tile the plane with a period of four columns and two rows, so
/// the family at any cell is fixed once the family at the origin (the
/// orientation) is chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileFamily(u8);

impl TileFamily {
    /// All families in search order
    pub const ALL: [Self; 4] = [Self(0), Self(1), Self(2), Self(3)];

    /// Family from its index (taken modulo 4)
    pub const fn from_index(index: usize) -> Self {
        Self((index % 4) as u8)
    }

    /// Family index in `0..4`
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Family owning a forest tile
    pub fn of_tile(tile: TileId) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|family| family.variants().contains(&tile))
    }

    /// Family of a cell under the given origin orientation
    pub const fn at(row: usize, col: usize, orientation: Self) -> Self {
        let offset = (col + 2 * (row % 2)) % 4;
        Self::from_index(orientation.index() + offset)
    }

    /// Canonical fill tile of this family
    pub const fn fill_tile(self) -> TileId {
        FOREST_FIRST + self.0 as TileId
    }

    /// The seven variants, fill tile first
    pub fn variants(self) -> &'static [TileId; FAMILY_SIZE] {
        FAMILY_VARIANTS.get(self.index()).unwrap_or(&FAMILY_VARIANTS[0])
    }

    /// Bit width this family uses on an edge
    pub fn width(self, direction: Direction) -> u8 {
        exertion(self.fill_tile(), direction).map_or(1, Exertion::width)
    }

    /// All-zero exertion at this family's width on an edge
    pub fn zero(self, direction: Direction) -> Exertion {
        Exertion::zero(self.width(direction))
    }
}

/// Check whether a tile is one of the four canonical fill tiles
pub fn is_fill_tile(tile: TileId) -> bool {
    TileFamily::ALL
        .into_iter()
        .any(|family| family.fill_tile() == tile)
}

impl fmt::Display for TileFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:02X}", self.fill_tile())
    }
}
