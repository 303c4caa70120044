//! The [`Cell`] record stored in the grid arena.

use crate::geom::Pos;

/// Sentinel distance meaning "not reached yet".
pub const UNREACHABLE: i32 = i32::MAX;

/// What occupies a cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    Start,
    End,
    Wall,
    #[default]
    Empty,
}

impl CellKind {
    /// Start or End.
    #[inline]
    pub const fn is_anchor(self) -> bool {
        matches!(self, Self::Start | Self::End)
    }

    #[inline]
    pub const fn is_wall(self) -> bool {
        matches!(self, Self::Wall)
    }
}

/// A single grid cell.
///
/// `distance`, `heuristic`, `total_cost` and `predecessor` only carry meaning
/// inside a search snapshot; the live grid keeps them at their reset values
/// except for the display flags written back during playback.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub pos: Pos,
    pub kind: CellKind,
    pub visited: bool,
    pub on_path: bool,
    pub distance: i32,
    pub heuristic: i32,
    pub total_cost: i32,
    /// Arena index of the cell this one was reached from.
    pub predecessor: Option<usize>,
}

impl Cell {
    /// A fresh empty cell at `pos`.
    pub const fn new(pos: Pos) -> Self {
        Self {
            pos,
            kind: CellKind::Empty,
            visited: false,
            on_path: false,
            distance: UNREACHABLE,
            heuristic: UNREACHABLE,
            total_cost: UNREACHABLE,
            predecessor: None,
        }
    }

    /// Set the kind (builder).
    #[inline]
    pub const fn with_kind(mut self, kind: CellKind) -> Self {
        self.kind = kind;
        self
    }

    #[inline]
    pub const fn is_wall(&self) -> bool {
        self.kind.is_wall()
    }

    /// Clear every per-run field, keeping position and kind.
    pub fn reset(&mut self) {
        *self = Self::new(self.pos).with_kind(self.kind);
    }
}
