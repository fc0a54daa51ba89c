//! Fringe tile candidates keyed by local path shape

use crate::io::error::{AlgorithmError, Result};
use crate::spatial::grid::Cell;
use crate::spatial::path::{ClosedPath, ShapeSignature};
use crate::spatial::tiles::TileId;
use std::collections::{BTreeSet, HashMap};

/// Tiles known to appear at each fringe shape
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShapeClassificationIndex {
    shapes: HashMap<ShapeSignature, BTreeSet<TileId>>,
}

impl ShapeClassificationIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Add candidate tiles for a signature
    pub fn insert(&mut self, signature: ShapeSignature, tiles: impl IntoIterator<Item = TileId>) {
        self.shapes.entry(signature).or_default().extend(tiles);
    }

    /// Candidates for a signature, ascending
    pub fn get(&self, signature: &ShapeSignature) -> Option<&BTreeSet<TileId>> {
        self.shapes.get(signature)
    }

    /// Candidates for a signature, failing when none were ever recorded
    ///
    /// # Errors
    ///
    /// Returns `UnknownShape` for an unseen signature; the path position is
    /// left for the caller to attach
    pub fn candidates(&self, signature: &ShapeSignature) -> Result<&BTreeSet<TileId>> {
        self.get(signature).ok_or(AlgorithmError::UnknownShape {
            index: 0,
            position: Cell::default(),
            signature: *signature,
        })
    }

    /// Record the tiles a finished fringe used at each of its shapes
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `tiles` and the path differ in length
    pub fn observe(&mut self, path: &ClosedPath, tiles: &[TileId]) -> Result<()> {
        if tiles.len() != path.len() {
            return Err(AlgorithmError::InvalidParameter {
                parameter: "tiles",
                value: tiles.len().to_string(),
                reason: format!("expected one tile per path position ({})", path.len()),
            });
        }

        for (signature, &tile) in path.signatures()?.into_iter().zip(tiles) {
            self.shapes.entry(signature).or_default().insert(tile);
        }
        Ok(())
    }

    /// Number of known signatures
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// True when no signature is known
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
