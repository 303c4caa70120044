//! Read-only render projection of a [`Grid`].
//!
//! Drawing is an external concern. The core only hands out [`CellView`]s, one
//! per cell, and [`Frame`]s holding the views that changed between two
//! projections.

use crate::cell::{Cell, CellKind};
use crate::geom::Pos;
use crate::grid::Grid;

/// What a renderer needs to know about one cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellView {
    pub pos: Pos,
    pub kind: CellKind,
    pub visited: bool,
    pub on_path: bool,
}

/// The single visual state of a cell once display precedence is applied.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Shade {
    Start,
    End,
    Wall,
    Path,
    Visited,
    Unvisited,
}

impl CellView {
    /// Precedence: Start > End > Wall > Path > Visited > Unvisited.
    pub fn shade(&self) -> Shade {
        match self.kind {
            CellKind::Start => Shade::Start,
            CellKind::End => Shade::End,
            CellKind::Wall => Shade::Wall,
            CellKind::Empty if self.on_path => Shade::Path,
            CellKind::Empty if self.visited => Shade::Visited,
            CellKind::Empty => Shade::Unvisited,
        }
    }
}

impl From<&Cell> for CellView {
    fn from(c: &Cell) -> Self {
        Self {
            pos: c.pos,
            kind: c.kind,
            visited: c.visited,
            on_path: c.on_path,
        }
    }
}

impl Grid {
    /// One view per cell, row-major.
    pub fn views(&self) -> Vec<CellView> {
        self.cells().iter().map(CellView::from).collect()
    }
}

/// A set of cell changes between two projections.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    pub cells: Vec<CellView>,
    pub rows: i32,
    pub cols: i32,
}

impl Frame {
    /// A frame containing every cell of `grid`.
    pub fn full(grid: &Grid) -> Self {
        Self {
            cells: grid.views(),
            rows: grid.rows(),
            cols: grid.cols(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Compute the difference between a previous projection and `curr`.
///
/// If `prev` does not have one view per cell of `curr` (first draw, or the
/// grid was replaced with one of a different size) the full projection is
/// returned.
pub fn compute_frame(prev: &[CellView], curr: &Grid) -> Frame {
    if prev.len() != curr.len() {
        return Frame::full(curr);
    }
    let cells = curr
        .cells()
        .iter()
        .zip(prev)
        .map(|(c, p)| (CellView::from(c), p))
        .filter(|(c, p)| c != *p)
        .map(|(c, _)| c)
        .collect();
    Frame {
        cells,
        rows: curr.rows(),
        cols: curr.cols(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shade_precedence() {
        let mut v = CellView {
            pos: Pos::ZERO,
            kind: CellKind::Empty,
            visited: false,
            on_path: false,
        };
        assert_eq!(v.shade(), Shade::Unvisited);
        v.visited = true;
        assert_eq!(v.shade(), Shade::Visited);
        v.on_path = true;
        assert_eq!(v.shade(), Shade::Path);
        v.kind = CellKind::Start;
        assert_eq!(v.shade(), Shade::Start);
        v.kind = CellKind::End;
        assert_eq!(v.shade(), Shade::End);
    }

    #[test]
    fn compute_frame_diff() {
        let mut g = Grid::new(3, 4, Pos::new(0, 0), Pos::new(2, 3)).unwrap();
        let before = g.views();
        assert_eq!(compute_frame(&before, &g).cells.len(), 0);

        g.toggle_wall(Pos::new(1, 1));
        g.mark_visited(Pos::new(0, 1));
        let frame = compute_frame(&before, &g);
        assert_eq!(frame.cells.len(), 2);
        assert_eq!(frame.cells[0].pos, Pos::new(0, 1));
        assert!(frame.cells[0].visited);
        assert_eq!(frame.cells[1].kind, CellKind::Wall);
    }

    #[test]
    fn compute_frame_size_change_is_full() {
        let g = Grid::new(2, 2, Pos::new(0, 0), Pos::new(1, 1)).unwrap();
        let frame = compute_frame(&[], &g);
        assert_eq!(frame, Frame::full(&g));
        assert_eq!(frame.cells.len(), 4);
    }
}
