//! Error types and context management for fill operations

use crate::spatial::grid::{Cell, Direction};
use crate::spatial::path::ShapeSignature;
use crate::spatial::tiles::TileId;
use std::fmt;
use std::path::PathBuf;

/// Main error type for all fill operations
#[derive(Debug)]
pub enum AlgorithmError {
    /// Closed path has too few positions to enclose anything
    PathTooShort {
        /// Number of positions supplied
        length: usize,
        /// Minimum accepted length
        minimum: usize,
    },

    /// Two consecutive path positions are not one orthogonal step apart
    NonOrthogonalStep {
        /// Index of the step's starting position
        index: usize,
        /// Starting position
        from: Cell,
        /// Following position (cyclic)
        to: Cell,
    },

    /// A position occurs more than once in a closed path
    DuplicatePosition {
        /// Index of the repeated occurrence
        index: usize,
        /// The repeated position
        position: Cell,
    },

    /// The classification index has no entry for a path shape
    ///
    /// This is a configuration problem with the reference tables and is
    /// never recovered internally.
    UnknownShape {
        /// Path index of the position
        index: usize,
        /// Grid position
        position: Cell,
        /// Signature that was looked up
        signature: ShapeSignature,
    },

    /// Arc consistency removed every candidate at a path position
    UnsatisfiablePath {
        /// Path index of the emptied position
        index: usize,
        /// Grid position
        position: Cell,
    },

    /// Greedy assignment found no candidate compatible with the previous pick
    NoCompatibleChoice {
        /// Path index being assigned
        index: usize,
        /// Grid position
        position: Cell,
        /// Tile chosen for the previous position
        previous: TileId,
    },

    /// Last tile does not fit the first one across the path closure
    ///
    /// Only raised when closure enforcement is enabled.
    ClosureMismatch {
        /// Tile at the last position
        last: TileId,
        /// Tile at the first position
        first: TileId,
        /// Travel direction from last to first
        direction: Direction,
    },

    /// Propagation did not reach a fixed point within its iteration cap
    ///
    /// Indicates an internal defect rather than an unsatisfiable input.
    PropagationLimit {
        /// Which network was being propagated
        network: &'static str,
        /// Iterations performed
        iterations: usize,
        /// The cap that was hit
        limit: usize,
    },

    /// Algorithm parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Text grid input could not be parsed
    InvalidGridData {
        /// One-based line number (0 when not line specific)
        line: usize,
        /// Description of the problem
        reason: String,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PathTooShort { length, minimum } => {
                write!(
                    f,
                    "Path too short: {length} positions (minimum {minimum} required)"
                )
            }
            Self::NonOrthogonalStep { index, from, to } => {
                write!(f, "Non-orthogonal move at index {index}: {from} -> {to}")
            }
            Self::DuplicatePosition { index, position } => {
                write!(f, "Path revisits {position} at index {index}")
            }
            Self::UnknownShape {
                index,
                position,
                signature,
            } => {
                write!(
                    f,
                    "Unknown shape '{signature}' at position {index} {position}"
                )
            }
            Self::UnsatisfiablePath { index, position } => {
                write!(
                    f,
                    "No valid candidates remaining for position {index} {position} after arc consistency filtering"
                )
            }
            Self::NoCompatibleChoice {
                index,
                position,
                previous,
            } => {
                write!(
                    f,
                    "No compatible tile for position {index} {position} following tile ${previous:02X}"
                )
            }
            Self::ClosureMismatch {
                last,
                first,
                direction,
            } => {
                write!(
                    f,
                    "Path closure failed: tile ${last:02X} at end not compatible with tile ${first:02X} at start in direction {direction}"
                )
            }
            Self::PropagationLimit {
                network,
                iterations,
                limit,
            } => {
                write!(
                    f,
                    "Propagation over {network} stopped after {iterations} iterations (limit {limit})"
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidGridData { line, reason } => {
                if *line == 0 {
                    write!(f, "Invalid grid data: {reason}")
                } else {
                    write!(f, "Invalid grid data on line {line}: {reason}")
                }
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for AlgorithmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for fill results
pub type Result<T> = std::result::Result<T, AlgorithmError>;

/// Additional context to enrich error messages
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Path index being processed
    pub index: Option<usize>,
    /// Grid position being processed
    pub position: Option<Cell>,
}

/// Enriches error messages with fill state information
pub trait WithContext<T> {
    /// Add error context to a Result
    ///
    /// # Errors
    ///
    /// Propagates the original error with additional context applied
    fn with_context(self, context: ErrorContext) -> Result<T>;

    /// Add just the path position context
    ///
    /// # Errors
    ///
    /// Propagates the original error with the position context applied
    fn at_position(self, index: usize, position: Cell) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<AlgorithmError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Only per-position errors carry positional context
            match &mut error {
                AlgorithmError::UnknownShape {
                    index, position, ..
                }
                | AlgorithmError::UnsatisfiablePath { index, position }
                | AlgorithmError::NoCompatibleChoice {
                    index, position, ..
                } => {
                    if let Some(i) = context.index {
                        *index = i;
                    }
                    if let Some(p) = context.position {
                        *position = p;
                    }
                }
                _ => {}
            }
            error
        })
    }

    fn at_position(self, index: usize, position: Cell) -> Result<T> {
        self.with_context(ErrorContext {
            index: Some(index),
            position: Some(position),
        })
    }
}

impl From<std::io::Error> for AlgorithmError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AlgorithmError {
    AlgorithmError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a file system error for a known path
pub fn file_system_error(
    path: impl Into<PathBuf>,
    operation: &'static str,
    source: std::io::Error,
) -> AlgorithmError {
    AlgorithmError::FileSystem {
        path: path.into(),
        operation,
        source,
    }
}
