//! Worklist arc-consistency propagation
//!
//! Both fill algorithms narrow candidate sets the same way: pop an arc,
//! intersect the two sides, and push every arc whose support may have
//! changed. The [`ArcNetwork`] trait captures the part that differs.

use crate::algorithm::bitset::{SlotSet, TileBitset};
use crate::algorithm::constraint::ConstraintNetwork;
use crate::analysis::frequency::NeighborFrequencyTable;
use crate::io::configuration::propagation_limit;
use crate::io::error::{AlgorithmError, Result};
use crate::spatial::grid::Direction;
use bitvec::prelude::*;
use std::collections::VecDeque;

/// Constraint network that can be revised one arc at a time
pub trait ArcNetwork {
    /// Name used in diagnostics and limit errors
    const NAME: &'static str;

    /// Number of dense arc identifiers
    fn arc_count(&self) -> usize;

    /// Cells or positions the iteration cap scales with
    fn units(&self) -> usize;

    /// Make one arc consistent, pushing arcs that need another look
    fn revise(&mut self, arc: usize, requeue: &mut Vec<usize>);
}

/// FIFO queue of arcs with set semantics
///
/// An arc already waiting is not queued twice.
#[derive(Debug, Clone)]
pub struct Worklist {
    queue: VecDeque<usize>,
    queued: BitVec,
}

impl Worklist {
    /// Empty worklist for arcs below `capacity`
    pub fn new(capacity: usize) -> Self {
        Self {
            queue: VecDeque::with_capacity(capacity),
            queued: bitvec![0; capacity],
        }
    }

    /// Queue an arc, returning false if it was already waiting or out of range
    pub fn push(&mut self, arc: usize) -> bool {
        if self.queued.get(arc).as_deref() != Some(&false) {
            return false;
        }
        self.queued.set(arc, true);
        self.queue.push_back(arc);
        true
    }

    /// Take the oldest waiting arc
    pub fn pop(&mut self) -> Option<usize> {
        let arc = self.queue.pop_front()?;
        if arc < self.queued.len() {
            self.queued.set(arc, false);
        }
        Some(arc)
    }

    /// Number of waiting arcs
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// True when nothing is waiting
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Outcome of a completed propagation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropagationStats {
    /// Arcs revised
    pub iterations: usize,
    /// Cap the run was held to
    pub limit: usize,
}

/// Run arc consistency to a fixed point starting from `seeds`
///
/// # Errors
///
/// Returns `PropagationLimit` if the worklist is still non-empty after
/// `50 * units + 500` revisions
pub fn propagate<N: ArcNetwork>(
    network: &mut N,
    seeds: impl IntoIterator<Item = usize>,
) -> Result<PropagationStats> {
    let limit = propagation_limit(network.units());
    let mut worklist = Worklist::new(network.arc_count());
    for arc in seeds {
        worklist.push(arc);
    }

    let mut iterations = 0;
    let mut requeue = Vec::new();
    while let Some(arc) = worklist.pop() {
        if iterations >= limit {
            tracing::warn!(
                network = N::NAME,
                iterations,
                pending = worklist.len() + 1,
                "propagation cap reached"
            );
            return Err(AlgorithmError::PropagationLimit {
                network: N::NAME,
                iterations,
                limit,
            });
        }
        iterations += 1;

        network.revise(arc, &mut requeue);
        for next in requeue.drain(..) {
            worklist.push(next);
        }
    }

    tracing::trace!(network = N::NAME, iterations, limit, "propagation settled");
    Ok(PropagationStats { iterations, limit })
}

impl ConstraintNetwork {
    fn facing(&self, slot: usize, direction: Direction) -> Option<SlotSet> {
        self.constraint(slot)
            .map(|constraint| constraint.achievable(direction))
    }

    fn conflicted(&mut self, slot: usize) -> bool {
        self.constraint_mut(slot)
            .is_none_or(|constraint| constraint.is_conflicted())
    }

    fn narrow(
        &mut self,
        slot: usize,
        direction: Direction,
        allowed: SlotSet,
        requeue: &mut Vec<usize>,
    ) {
        let Some(constraint) = self.constraint_mut(slot) else {
            return;
        };
        if !constraint.constrain(direction, allowed) {
            return;
        }
        // A narrowed edge can invalidate variants and so shrink the other edges
        for changed in constraint.settle() {
            if let Some(neighbor) = self.link(slot, changed) {
                requeue.push(Self::arc(neighbor, changed.opposite()));
            }
        }
    }
}

impl ArcNetwork for ConstraintNetwork {
    const NAME: &'static str = "forest grid";

    fn arc_count(&self) -> usize {
        self.len() * 4
    }

    fn units(&self) -> usize {
        self.len()
    }

    fn revise(&mut self, arc: usize, requeue: &mut Vec<usize>) {
        let (slot, direction) = Self::arc_parts(arc);
        let Some(neighbor) = self.link(slot, direction) else {
            return;
        };
        if self.conflicted(slot) || self.conflicted(neighbor) {
            return;
        }

        let opposite = direction.opposite();
        let (Some(mine), Some(theirs)) = (
            self.facing(slot, direction),
            self.facing(neighbor, opposite),
        ) else {
            return;
        };

        let common = mine.intersection(&theirs);
        if common.is_empty() {
            tracing::debug!(slot, %direction, "edge has no shared exertion");
            if let Some(constraint) = self.constraint_mut(slot) {
                constraint.mark_conflict(direction);
            }
            return;
        }

        self.narrow(slot, direction, common, requeue);
        self.narrow(neighbor, opposite, common, requeue);
    }
}

/// Candidate sets along a closed fringe path
///
/// Arc `i` joins position `i` to position `i + 1` (cyclically) and is
/// checked against the frequency table in the travel direction.
#[derive(Debug, Clone)]
pub struct PathNetwork<'t> {
    candidates: Vec<TileBitset>,
    travel: Vec<Direction>,
    frequencies: &'t NeighborFrequencyTable,
    threshold: u32,
}

impl<'t> PathNetwork<'t> {
    /// Network over per-position candidates and travel directions
    pub const fn new(
        candidates: Vec<TileBitset>,
        travel: Vec<Direction>,
        frequencies: &'t NeighborFrequencyTable,
        threshold: u32,
    ) -> Self {
        Self {
            candidates,
            travel,
            frequencies,
            threshold,
        }
    }

    /// Current candidates per position
    pub fn candidates(&self) -> &[TileBitset] {
        &self.candidates
    }
}

impl ArcNetwork for PathNetwork<'_> {
    const NAME: &'static str = "fringe path";

    fn arc_count(&self) -> usize {
        self.candidates.len()
    }

    fn units(&self) -> usize {
        self.candidates.len()
    }

    fn revise(&mut self, arc: usize, requeue: &mut Vec<usize>) {
        let n = self.candidates.len();
        if n == 0 {
            return;
        }
        let i = arc % n;
        let j = (i + 1) % n;
        let Some(&direction) = self.travel.get(i) else {
            return;
        };
        let (Some(left), Some(right)) = (self.candidates.get(i), self.candidates.get(j)) else {
            return;
        };
        // An emptied side is reported by the caller; spreading it helps nobody
        if left.is_empty() || right.is_empty() {
            return;
        }

        let table = self.frequencies;
        let threshold = self.threshold;
        let fits = |a, b| table.is_compatible(a, direction, b, threshold);

        let right_snapshot = right.clone();
        let left_shrunk = self.candidates.get_mut(i).is_some_and(|set| {
            set.retain(|a| right_snapshot.iter().any(|b| fits(a, b)))
        });
        let left_snapshot = self.candidates.get(i).cloned().unwrap_or_default();
        if left_snapshot.is_empty() {
            return;
        }
        let right_shrunk = self.candidates.get_mut(j).is_some_and(|set| {
            set.retain(|b| left_snapshot.iter().any(|a| fits(a, b)))
        });

        if left_shrunk {
            requeue.push((i + n - 1) % n);
        }
        if right_shrunk {
            requeue.push(j);
        }
    }
}
