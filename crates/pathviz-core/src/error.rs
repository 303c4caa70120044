//! Grid invariant violations.

use std::fmt;

use crate::geom::Pos;

/// A malformed grid or an invalid grid construction request.
///
/// These are programmer errors: correct usage of the editing API can never
/// produce them, so they are reported at construction time or before a search
/// starts rather than tolerated mid-algorithm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Rows or columns are not positive.
    EmptyDimensions { rows: i32, cols: i32 },
    /// `rows * cols` does not fit the cell index type.
    TooLarge { rows: i32, cols: i32 },
    /// An anchor lies outside the grid.
    OutOfBounds(Pos),
    /// Start and End were given the same position.
    AnchorsOverlap(Pos),
    /// No cell of the named kind exists.
    MissingAnchor(&'static str),
    /// More than one cell of the named kind exists.
    DuplicateAnchor(&'static str),
    /// An anchor cell is marked as a wall.
    AnchorOnWall(Pos),
    /// The arena length does not match `rows * cols`, or a cell sits at the
    /// wrong position.
    DimensionMismatch { expected: usize, found: usize },
    /// An ASCII map contained an unknown character or ragged lines.
    InvalidMap { ch: char, pos: Pos },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDimensions { rows, cols } => {
                write!(f, "grid: dimensions must be positive, got {rows}x{cols}")
            }
            Self::TooLarge { rows, cols } => {
                write!(f, "grid: {rows}x{cols} has too many cells")
            }
            Self::OutOfBounds(p) => write!(f, "grid: anchor {p} is out of bounds"),
            Self::AnchorsOverlap(p) => write!(f, "grid: start and end both at {p}"),
            Self::MissingAnchor(kind) => write!(f, "grid: missing {kind} anchor"),
            Self::DuplicateAnchor(kind) => write!(f, "grid: more than one {kind} anchor"),
            Self::AnchorOnWall(p) => write!(f, "grid: anchor at {p} is a wall"),
            Self::DimensionMismatch { expected, found } => {
                write!(f, "grid: expected {expected} cells, found {found}")
            }
            Self::InvalidMap { ch, pos } => {
                write!(f, "grid: invalid map character {ch:?} at {pos}")
            }
        }
    }
}

impl std::error::Error for GridError {}
