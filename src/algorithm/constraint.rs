use crate::algorithm::bitset::SlotSet;
use crate::spatial::grid::{Cell, Direction};
use crate::spatial::tiles::{Exertion, TileFamily, TileId, exertions};
use ndarray::Array2;

/// Achievable exertions of one cell, per direction
///
/// Each direction keeps the subset of exertion codes that some still-valid
/// family variant could present on that edge. The set of valid variants is
/// derived from all four directions and cached until the next narrowing.
#[derive(Clone, Debug)]
pub struct CellConstraint {
    family: TileFamily,
    achievable: [SlotSet; 4],
    valid: Option<SlotSet>,
}

impl CellConstraint {
    /// Unconstrained cell: every exertion any family variant can present
    pub fn new(family: TileFamily) -> Self {
        let mut achievable = [SlotSet::new(); 4];
        for &tile in family.variants() {
            let Some(vector) = exertions(tile) else {
                continue;
            };
            for (set, exertion) in achievable.iter_mut().zip(vector) {
                set.insert(exertion.code());
            }
        }

        Self {
            family,
            achievable,
            valid: None,
        }
    }

    /// Family assigned to this cell
    pub const fn family(&self) -> TileFamily {
        self.family
    }

    /// Achievable exertion codes toward a direction
    pub fn achievable(&self, direction: Direction) -> SlotSet {
        self.achievable
            .get(direction.index())
            .copied()
            .unwrap_or_default()
    }

    /// Achievable exertions toward a direction, decoded
    pub fn achievable_exertions(&self, direction: Direction) -> Vec<Exertion> {
        self.achievable(direction)
            .iter()
            .filter_map(Exertion::from_code)
            .collect()
    }

    /// Intersect one direction with `allowed`, returning true on change
    pub fn constrain(&mut self, direction: Direction, allowed: SlotSet) -> bool {
        let Some(current) = self.achievable.get_mut(direction.index()) else {
            return false;
        };
        let narrowed = current.intersection(&allowed);
        if narrowed == *current {
            return false;
        }
        *current = narrowed;
        self.valid = None;
        true
    }

    /// Require exactly one exertion toward a direction
    pub fn constrain_to(&mut self, direction: Direction, exertion: Exertion) -> bool {
        self.constrain(direction, SlotSet::single(exertion.code()))
    }

    /// Require an all-zero exertion of any width toward a direction
    ///
    /// Falls back to the family's own zero when no zero value is achievable,
    /// which empties the cell.
    pub fn constrain_to_zero(&mut self, direction: Direction) -> bool {
        let zeros: SlotSet = self
            .achievable_exertions(direction)
            .into_iter()
            .filter(|exertion| exertion.is_zero())
            .map(Exertion::code)
            .collect();

        if zeros.is_empty() {
            self.constrain_to(direction, self.family.zero(direction))
        } else {
            self.constrain(direction, zeros)
        }
    }

    /// Remove every option toward a direction, marking the cell as conflicted
    pub fn mark_conflict(&mut self, direction: Direction) {
        self.constrain(direction, SlotSet::new());
    }

    /// Variant slots whose exertions fit all four current directions
    pub fn valid_variants(&mut self) -> SlotSet {
        if let Some(valid) = self.valid {
            return valid;
        }

        let achievable = self.achievable;
        let valid: SlotSet = self
            .family
            .variants()
            .iter()
            .enumerate()
            .filter(|&(_, &tile)| {
                exertions(tile).is_some_and(|vector| {
                    vector
                        .iter()
                        .zip(&achievable)
                        .all(|(exertion, set)| set.contains(exertion.code()))
                })
            })
            .map(|(slot, _)| slot)
            .collect();

        self.valid = Some(valid);
        valid
    }

    /// Valid tiles in family order (fill tile first)
    pub fn valid_tiles(&mut self) -> Vec<TileId> {
        let variants = self.family.variants();
        self.valid_variants()
            .iter()
            .filter_map(|slot| variants.get(slot).copied())
            .collect()
    }

    /// True once no variant fits
    pub fn is_conflicted(&mut self) -> bool {
        self.valid_variants().is_empty()
    }

    /// Re-derive achievable sets from the valid variants
    ///
    /// Returns the directions that narrowed. A conflicted cell is left alone.
    pub fn settle(&mut self) -> Vec<Direction> {
        let valid = self.valid_tiles();
        if valid.is_empty() {
            return Vec::new();
        }

        let mut changed = Vec::new();
        for direction in Direction::ALL {
            let derived: SlotSet = valid
                .iter()
                .filter_map(|&tile| exertions(tile))
                .filter_map(|vector| vector.get(direction.index()))
                .map(|exertion| exertion.code())
                .collect();
            if let Some(current) = self.achievable.get_mut(direction.index()) {
                if derived != *current {
                    *current = derived;
                    changed.push(direction);
                }
            }
        }
        if !changed.is_empty() {
            self.valid = None;
        }
        changed
    }

    /// Narrow the cell to a single tile, returning true on change
    pub fn commit(&mut self, tile: TileId) -> bool {
        let Some(vector) = exertions(tile) else {
            return false;
        };
        let mut changed = false;
        for (direction, &exertion) in Direction::ALL.into_iter().zip(vector) {
            changed |= self.constrain_to(direction, exertion);
        }
        changed
    }
}

/// Arena of cell constraints for the cells being solved in one pass
///
/// Cells are stored row-major in a vector; a grid-sized index maps
/// coordinates back to slots, and `links` records which neighbours are
/// themselves being solved (the internal edges).
#[derive(Clone, Debug)]
pub struct ConstraintNetwork {
    cells: Vec<Cell>,
    slots: Array2<Option<usize>>,
    constraints: Vec<CellConstraint>,
    links: Vec<[Option<usize>; 4]>,
}

impl ConstraintNetwork {
    /// Build the arena for row-major sorted cells with their constraints
    ///
    /// `shape` is the `(rows, cols)` of the grid; cells outside it are not
    /// linked to anything.
    pub fn new(shape: (usize, usize), entries: Vec<(Cell, CellConstraint)>) -> Self {
        let mut slots = Array2::from_elem(shape, None);
        let mut cells = Vec::with_capacity(entries.len());
        let mut constraints = Vec::with_capacity(entries.len());

        for (slot, (cell, constraint)) in entries.into_iter().enumerate() {
            if let Some(entry) = slots.get_mut([cell.row, cell.col]) {
                *entry = Some(slot);
            }
            cells.push(cell);
            constraints.push(constraint);
        }

        let links = cells
            .iter()
            .map(|&cell| {
                Direction::ALL.map(|direction| {
                    cell.step(direction)
                        .and_then(|next| slots.get([next.row, next.col]).copied().flatten())
                })
            })
            .collect();

        Self {
            cells,
            slots,
            constraints,
            links,
        }
    }

    /// Number of cells in the network
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when the network has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Coordinate stored in a slot
    pub fn cell(&self, slot: usize) -> Option<Cell> {
        self.cells.get(slot).copied()
    }

    /// Slot holding a coordinate
    pub fn slot_of(&self, cell: Cell) -> Option<usize> {
        self.slots.get([cell.row, cell.col]).copied().flatten()
    }

    /// Constraint in a slot
    pub fn constraint(&self, slot: usize) -> Option<&CellConstraint> {
        self.constraints.get(slot)
    }

    /// Mutable constraint in a slot
    pub fn constraint_mut(&mut self, slot: usize) -> Option<&mut CellConstraint> {
        self.constraints.get_mut(slot)
    }

    /// Slot of the internal neighbour in a direction
    pub fn link(&self, slot: usize, direction: Direction) -> Option<usize> {
        self.links
            .get(slot)
            .and_then(|links| links.get(direction.index()).copied().flatten())
    }

    /// Dense identifier of the arc from `slot` toward `direction`
    pub const fn arc(slot: usize, direction: Direction) -> usize {
        slot * 4 + direction.index()
    }

    /// Inverse of [`ConstraintNetwork::arc`]
    pub const fn arc_parts(arc: usize) -> (usize, Direction) {
        (arc / 4, Direction::from_index(arc % 4))
    }

    /// Every arc that crosses an internal edge
    pub fn internal_arcs(&self) -> Vec<usize> {
        (0..self.len())
            .flat_map(|slot| {
                Direction::ALL
                    .into_iter()
                    .filter(move |&direction| self.link(slot, direction).is_some())
                    .map(move |direction| Self::arc(slot, direction))
            })
            .collect()
    }

    /// Arcs from each internal neighbour back toward `slot`
    pub fn arcs_into(&self, slot: usize) -> Vec<usize> {
        Direction::ALL
            .into_iter()
            .filter_map(|direction| {
                self.link(slot, direction)
                    .map(|neighbor| Self::arc(neighbor, direction.opposite()))
            })
            .collect()
    }

    /// Re-derive achievable sets of every cell from its valid variants
    pub fn settle_all(&mut self) {
        for constraint in &mut self.constraints {
            constraint.settle();
        }
    }

    /// Coordinates of cells with no valid variant left
    pub fn conflicted_cells(&mut self) -> Vec<Cell> {
        self.constraints
            .iter_mut()
            .zip(&self.cells)
            .filter_map(|(constraint, &cell)| constraint.is_conflicted().then_some(cell))
            .collect()
    }
}
