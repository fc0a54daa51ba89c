use crate::spatial::tiles::TileId;
use bitvec::prelude::*;
use std::fmt;

/// Growable bitset over tile ids for fringe candidate sets
///
/// Indexed directly by tile id. Iteration is always in ascending id order,
/// which keeps seeded random picks reproducible.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TileBitset {
    bits: BitVec,
}

impl TileBitset {
    /// Create a bitset with no tiles present, sized for ids below `capacity`
    pub fn new(capacity: usize) -> Self {
        Self {
            bits: bitvec![0; capacity],
        }
    }

    /// Insert a tile id, growing the set when needed
    pub fn insert(&mut self, tile: TileId) {
        let index = usize::from(tile);
        if index >= self.bits.len() {
            self.bits.resize(index + 1, false);
        }
        self.bits.set(index, true);
    }

    /// Remove a tile id
    pub fn remove(&mut self, tile: TileId) {
        let index = usize::from(tile);
        if index < self.bits.len() {
            self.bits.set(index, false);
        }
    }

    /// Test tile membership
    pub fn contains(&self, tile: TileId) -> bool {
        self.bits.get(usize::from(tile)).as_deref() == Some(&true)
    }

    /// Keep only tiles accepted by the predicate, returning true if any were dropped
    pub fn retain(&mut self, mut keep: impl FnMut(TileId) -> bool) -> bool {
        let dropped: Vec<TileId> = self.iter().filter(|&tile| !keep(tile)).collect();
        for &tile in &dropped {
            self.remove(tile);
        }
        !dropped.is_empty()
    }

    /// Test if no tiles are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count tiles in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Iterate tile ids in ascending order
    pub fn iter(&self) -> impl Iterator<Item = TileId> + '_ {
        self.bits
            .iter_ones()
            .filter_map(|index| TileId::try_from(index).ok())
    }

    /// Extract all tile ids as a vector
    pub fn to_vec(&self) -> Vec<TileId> {
        self.iter().collect()
    }
}

impl FromIterator<TileId> for TileBitset {
    fn from_iter<I: IntoIterator<Item = TileId>>(iter: I) -> Self {
        let mut bitset = Self::new(0);
        for tile in iter {
            bitset.insert(tile);
        }
        bitset
    }
}

impl fmt::Display for TileBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TileBitset({} tiles: {:?})", self.count(), self.to_vec())
    }
}

/// Fixed-size set over at most eight small slots
///
/// Used per cell for exertion codes and family variant slots, so constraint
/// state stays inline without heap allocation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SlotSet {
    bits: BitArray<[u8; 1], Lsb0>,
}

impl SlotSet {
    /// Largest slot count a set can hold
    pub const CAPACITY: usize = 8;

    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set containing the slots `0..count`
    pub fn full(count: usize) -> Self {
        let mut set = Self::new();
        for slot in 0..count.min(Self::CAPACITY) {
            set.insert(slot);
        }
        set
    }

    /// Set holding exactly one slot
    pub fn single(slot: usize) -> Self {
        let mut set = Self::new();
        set.insert(slot);
        set
    }

    /// Insert a slot; slots past capacity are ignored
    pub fn insert(&mut self, slot: usize) {
        if slot < Self::CAPACITY {
            self.bits.set(slot, true);
        }
    }

    /// Test slot membership
    pub fn contains(&self, slot: usize) -> bool {
        self.bits.get(slot).as_deref() == Some(&true)
    }

    /// Create a new set containing the intersection
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let [mine] = self.bits.into_inner();
        let [theirs] = other.bits.into_inner();
        Self {
            bits: BitArray::new([mine & theirs]),
        }
    }

    /// Test if no slots are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count slots in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Iterate slots in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }
}

impl FromIterator<usize> for SlotSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut set = Self::new();
        for slot in iter {
            set.insert(slot);
        }
        set
    }
}
