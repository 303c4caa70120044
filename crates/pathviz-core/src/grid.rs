//! The [`Grid`] type: a fixed-size arena of [`Cell`]s with exactly one Start
//! and one End anchor.
//!
//! Unlike a shared-buffer view, a `Grid` owns its cells outright. Cloning (or
//! calling [`snapshot`](Grid::snapshot)) yields an independent arena, which is
//! what a search runs against while the live grid stays editable.
//!
//! Editing operations never fail: an invalid request (painting over an
//! anchor, dropping an anchor onto a wall, editing while locked) is a silent
//! no-op and the method returns `false`.

use crate::cell::{Cell, CellKind};
use crate::error::GridError;
use crate::geom::Pos;

/// Default number of rows.
pub const DEFAULT_ROWS: i32 = 20;
/// Default number of columns.
pub const DEFAULT_COLS: i32 = 30;

/// A rectangular, row-major arena of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
    rows: i32,
    cols: i32,
    start: Pos,
    end: Pos,
    locked: bool,
}

#[derive(Clone, Copy)]
enum Anchor {
    Start,
    End,
}

impl Grid {
    /// Create a grid with the given anchors and every other cell Empty.
    pub fn new(rows: i32, cols: i32, start: Pos, end: Pos) -> Result<Self, GridError> {
        if rows <= 0 || cols <= 0 {
            return Err(GridError::EmptyDimensions { rows, cols });
        }
        let len = rows
            .checked_mul(cols)
            .ok_or(GridError::TooLarge { rows, cols })?;
        let mut grid = Self {
            cells: Vec::with_capacity(len as usize),
            rows,
            cols,
            start,
            end,
            locked: false,
        };
        for p in [start, end] {
            if !grid.contains(p) {
                return Err(GridError::OutOfBounds(p));
            }
        }
        if start == end {
            return Err(GridError::AnchorsOverlap(start));
        }
        for row in 0..rows {
            for col in 0..cols {
                grid.cells.push(Cell::new(Pos::new(row, col)));
            }
        }
        let (si, ei) = (grid.index(start), grid.index(end));
        grid.cells[si].kind = CellKind::Start;
        grid.cells[ei].kind = CellKind::End;
        log::trace!("grid: created {rows}x{cols}, start {start}, end {end}");
        Ok(grid)
    }

    /// Parse an ASCII map: `S` start, `E` end, `#` wall, `.` empty.
    ///
    /// Leading/trailing whitespace of the whole string is trimmed; every line
    /// must have the same width.
    pub fn from_ascii(s: &str) -> Result<Self, GridError> {
        let lines: Vec<&str> = s.trim().lines().map(str::trim).collect();
        let rows = lines.len() as i32;
        let cols = lines.first().map_or(0, |l| l.chars().count()) as i32;
        let mut start = None;
        let mut end = None;
        let mut walls = Vec::new();
        for (row, line) in lines.iter().enumerate() {
            if line.chars().count() as i32 != cols {
                return Err(GridError::DimensionMismatch {
                    expected: cols as usize,
                    found: line.chars().count(),
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let p = Pos::new(row as i32, col as i32);
                match ch {
                    'S' if start.is_none() => start = Some(p),
                    'S' => return Err(GridError::DuplicateAnchor("start")),
                    'E' if end.is_none() => end = Some(p),
                    'E' => return Err(GridError::DuplicateAnchor("end")),
                    '#' => walls.push(p),
                    '.' => {}
                    _ => return Err(GridError::InvalidMap { ch, pos: p }),
                }
            }
        }
        let start = start.ok_or(GridError::MissingAnchor("start"))?;
        let end = end.ok_or(GridError::MissingAnchor("end"))?;
        let mut grid = Self::new(rows, cols, start, end)?;
        for p in walls {
            grid.toggle_wall(p);
        }
        Ok(grid)
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Position of the Start anchor.
    #[inline]
    pub fn start(&self) -> Pos {
        self.start
    }

    /// Position of the End anchor.
    #[inline]
    pub fn end(&self) -> Pos {
        self.end
    }

    /// Whether `p` is inside the grid.
    #[inline]
    pub fn contains(&self, p: Pos) -> bool {
        p.row >= 0 && p.col >= 0 && p.row < self.rows && p.col < self.cols
    }

    /// Convert a position to an arena index. Returns `None` if out of bounds.
    #[inline]
    pub fn idx(&self, p: Pos) -> Option<usize> {
        self.contains(p).then(|| self.index(p))
    }

    /// Convert an arena index back to a position.
    #[inline]
    pub fn pos_of(&self, idx: usize) -> Pos {
        let cols = self.cols.max(1) as usize;
        Pos::new((idx / cols) as i32, (idx % cols) as i32)
    }

    #[inline]
    fn index(&self, p: Pos) -> usize {
        (p.row * self.cols + p.col) as usize
    }

    /// The cell at `p`, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, p: Pos) -> Option<&Cell> {
        self.idx(p).map(|i| &self.cells[i])
    }

    /// The cell at arena index `idx`.
    #[inline]
    pub fn cell(&self, idx: usize) -> Option<&Cell> {
        self.cells.get(idx)
    }

    /// Mutable access to a cell by arena index.
    ///
    /// Meant for search snapshots, which write distances, flags and
    /// predecessors. Changing `kind` through this bypasses the editing rules;
    /// [`validate`](Self::validate) reports any invariant broken that way.
    #[inline]
    pub fn cell_mut(&mut self, idx: usize) -> Option<&mut Cell> {
        self.cells.get_mut(idx)
    }

    /// All cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Positions of every wall, in scan order.
    pub fn walls(&self) -> impl Iterator<Item = Pos> + '_ {
        self.cells.iter().filter(|c| c.is_wall()).map(|c| c.pos)
    }

    pub fn wall_count(&self) -> usize {
        self.walls().count()
    }

    /// Append the in-bounds, non-wall orthogonal neighbours of `p` to `buf`,
    /// in the order up, down, left, right.
    pub fn neighbors(&self, p: Pos, buf: &mut Vec<Pos>) {
        for n in p.neighbors_4() {
            if let Some(c) = self.at(n) {
                if !c.is_wall() {
                    buf.push(n);
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Locking
    // -----------------------------------------------------------------------

    /// Reject every editing operation until [`unlock`](Self::unlock).
    pub fn lock(&mut self) {
        self.locked = true;
    }

    pub fn unlock(&mut self) {
        self.locked = false;
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    // -----------------------------------------------------------------------
    // Editing
    // -----------------------------------------------------------------------

    /// Flip Wall ↔ Empty at `p`. Anchors are never painted over.
    pub fn toggle_wall(&mut self, p: Pos) -> bool {
        if self.locked {
            return false;
        }
        let Some(i) = self.idx(p) else {
            return false;
        };
        let cell = &mut self.cells[i];
        cell.kind = match cell.kind {
            CellKind::Start | CellKind::End => return false,
            CellKind::Wall => CellKind::Empty,
            CellKind::Empty => CellKind::Wall,
        };
        log::trace!("grid: toggled {p} to {:?}", cell.kind);
        true
    }

    /// Relocate the Start anchor to `p`.
    ///
    /// No-op if `p` is a wall, the End anchor, the current Start, or out of
    /// bounds.
    pub fn move_start(&mut self, p: Pos) -> bool {
        self.move_anchor(Anchor::Start, p)
    }

    /// Relocate the End anchor to `p`. Same rules as
    /// [`move_start`](Self::move_start).
    pub fn move_end(&mut self, p: Pos) -> bool {
        self.move_anchor(Anchor::End, p)
    }

    fn move_anchor(&mut self, anchor: Anchor, p: Pos) -> bool {
        if self.locked {
            return false;
        }
        let Some(to) = self.idx(p) else {
            return false;
        };
        if self.cells[to].kind != CellKind::Empty {
            return false;
        }
        let (from, kind) = match anchor {
            Anchor::Start => (self.start, CellKind::Start),
            Anchor::End => (self.end, CellKind::End),
        };
        let from_idx = self.index(from);
        self.cells[from_idx].kind = CellKind::Empty;
        self.cells[to].kind = kind;
        match anchor {
            Anchor::Start => self.start = p,
            Anchor::End => self.end = p,
        }
        log::trace!("grid: moved {kind:?} from {from} to {p}");
        true
    }

    /// Clear every per-run field, keeping walls and anchors.
    pub fn reset_preserving_walls(&mut self) -> bool {
        if self.locked {
            return false;
        }
        self.cells.iter_mut().for_each(Cell::reset);
        true
    }

    /// Clear every per-run field and turn all walls back into empty cells.
    pub fn clear_walls(&mut self) -> bool {
        if !self.reset_preserving_walls() {
            return false;
        }
        for c in self.cells.iter_mut().filter(|c| c.is_wall()) {
            c.kind = CellKind::Empty;
        }
        true
    }

    // -----------------------------------------------------------------------
    // Display flags (written by playback, allowed while locked)
    // -----------------------------------------------------------------------

    /// Mark `p` as visited. Returns `false` if out of bounds.
    pub fn mark_visited(&mut self, p: Pos) -> bool {
        match self.idx(p) {
            Some(i) => {
                self.cells[i].visited = true;
                true
            }
            None => false,
        }
    }

    /// Mark `p` as lying on the reconstructed path.
    pub fn mark_on_path(&mut self, p: Pos) -> bool {
        match self.idx(p) {
            Some(i) => {
                self.cells[i].on_path = true;
                true
            }
            None => false,
        }
    }

    // -----------------------------------------------------------------------
    // Snapshot / validation
    // -----------------------------------------------------------------------

    /// Independent deep copy of this grid, unlocked.
    pub fn snapshot(&self) -> Grid {
        Grid {
            cells: self.cells.clone(),
            locked: false,
            ..*self
        }
    }

    /// Check every structural invariant.
    pub fn validate(&self) -> Result<(), GridError> {
        if self.rows <= 0 || self.cols <= 0 {
            return Err(GridError::EmptyDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }
        let expected = self
            .rows
            .checked_mul(self.cols)
            .ok_or(GridError::TooLarge {
                rows: self.rows,
                cols: self.cols,
            })? as usize;
        if self.cells.len() != expected {
            return Err(GridError::DimensionMismatch {
                expected,
                found: self.cells.len(),
            });
        }
        if self.start == self.end {
            return Err(GridError::AnchorsOverlap(self.start));
        }
        for (label, p, kind) in [
            ("start", self.start, CellKind::Start),
            ("end", self.end, CellKind::End),
        ] {
            if self.cells.iter().filter(|c| c.kind == kind).count() > 1 {
                return Err(GridError::DuplicateAnchor(label));
            }
            match self.at(p) {
                None => return Err(GridError::OutOfBounds(p)),
                Some(c) if c.is_wall() => return Err(GridError::AnchorOnWall(p)),
                Some(c) if c.kind != kind => return Err(GridError::MissingAnchor(label)),
                Some(_) => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::new(5, 6, Pos::new(2, 1), Pos::new(2, 4)).unwrap()
    }

    #[test]
    fn new_places_anchors() {
        let g = grid();
        assert_eq!(g.len(), 30);
        assert_eq!(g.at(Pos::new(2, 1)).unwrap().kind, CellKind::Start);
        assert_eq!(g.at(Pos::new(2, 4)).unwrap().kind, CellKind::End);
        assert_eq!(g.wall_count(), 0);
        assert!(g.validate().is_ok());
        for (i, c) in g.cells().iter().enumerate() {
            assert_eq!(g.pos_of(i), c.pos);
            assert_eq!(g.idx(c.pos), Some(i));
        }
    }

    #[test]
    fn new_rejects_bad_input() {
        let p = Pos::new(0, 0);
        assert_eq!(
            Grid::new(0, 3, p, Pos::new(0, 1)),
            Err(GridError::EmptyDimensions { rows: 0, cols: 3 })
        );
        assert_eq!(
            Grid::new(3, 3, p, Pos::new(3, 0)),
            Err(GridError::OutOfBounds(Pos::new(3, 0)))
        );
        assert_eq!(Grid::new(3, 3, p, p), Err(GridError::AnchorsOverlap(p)));
    }

    #[test]
    fn new_rejects_overflowing_dimensions() {
        let (s, e) = (Pos::new(0, 0), Pos::new(0, 1));
        assert_eq!(
            Grid::new(50_000, 50_000, s, e),
            Err(GridError::TooLarge {
                rows: 50_000,
                cols: 50_000
            })
        );
        assert_eq!(
            Grid::new(i32::MAX, 2, s, e),
            Err(GridError::TooLarge { rows: i32::MAX, cols: 2 })
        );
        assert!(Grid::new(1, 2, s, e).is_ok());
    }

    #[test]
    fn toggle_wall_flips_and_spares_anchors() {
        let mut g = grid();
        let p = Pos::new(0, 0);
        assert!(g.toggle_wall(p));
        assert!(g.at(p).unwrap().is_wall());
        assert!(g.toggle_wall(p));
        assert_eq!(g.at(p).unwrap().kind, CellKind::Empty);

        assert!(!g.toggle_wall(g.start()));
        assert!(!g.toggle_wall(g.end()));
        assert!(!g.toggle_wall(Pos::new(-1, 0)));
        assert_eq!(g.at(g.start()).unwrap().kind, CellKind::Start);
    }

    #[test]
    fn move_anchor_rules() {
        let mut g = grid();
        let wall = Pos::new(0, 3);
        g.toggle_wall(wall);

        assert!(!g.move_start(wall));
        assert!(!g.move_start(g.end()));
        assert!(!g.move_end(g.start()));
        assert!(!g.move_start(Pos::new(9, 9)));
        assert_eq!(g.start(), Pos::new(2, 1));

        assert!(g.move_start(Pos::new(4, 0)));
        assert_eq!(g.start(), Pos::new(4, 0));
        assert_eq!(g.at(Pos::new(2, 1)).unwrap().kind, CellKind::Empty);
        assert_eq!(g.at(Pos::new(4, 0)).unwrap().kind, CellKind::Start);

        assert!(g.move_end(Pos::new(0, 5)));
        assert_eq!(g.at(Pos::new(2, 4)).unwrap().kind, CellKind::Empty);
        assert!(g.validate().is_ok());
    }

    #[test]
    fn anchors_never_become_walls() {
        let mut g = grid();
        // Paint every cell, drag anchors across walls, paint again.
        for i in 0..g.len() {
            let p = g.pos_of(i);
            g.toggle_wall(p);
            g.move_start(p);
            g.move_end(p);
        }
        for i in 0..g.len() {
            g.toggle_wall(g.pos_of(i));
        }
        assert!(!g.at(g.start()).unwrap().is_wall());
        assert!(!g.at(g.end()).unwrap().is_wall());
        assert!(g.validate().is_ok());
    }

    #[test]
    fn locked_grid_rejects_edits_but_accepts_flags() {
        let mut g = grid();
        g.toggle_wall(Pos::new(1, 1));
        g.lock();
        let before = g.clone();
        assert!(!g.toggle_wall(Pos::new(0, 0)));
        assert!(!g.move_start(Pos::new(0, 0)));
        assert!(!g.move_end(Pos::new(0, 0)));
        assert!(!g.clear_walls());
        assert!(!g.reset_preserving_walls());
        assert_eq!(g, before);

        assert!(g.mark_visited(Pos::new(0, 0)));
        assert!(g.mark_on_path(Pos::new(0, 0)));
        assert!(g.at(Pos::new(0, 0)).unwrap().visited);

        g.unlock();
        assert!(g.toggle_wall(Pos::new(0, 1)));
    }

    #[test]
    fn reset_and_clear() {
        let mut g = grid();
        g.toggle_wall(Pos::new(0, 0));
        g.mark_visited(Pos::new(1, 1));
        g.mark_on_path(Pos::new(1, 2));
        if let Some(c) = g.cell_mut(7) {
            c.distance = 3;
            c.predecessor = Some(1);
        }

        assert!(g.reset_preserving_walls());
        assert!(g.cells().iter().all(|c| !c.visited && !c.on_path));
        assert!(g.cells().iter().all(|c| c.predecessor.is_none()));
        assert_eq!(g.wall_count(), 1);

        assert!(g.clear_walls());
        assert_eq!(g.wall_count(), 0);
        assert_eq!(g.start(), Pos::new(2, 1));
        assert_eq!(g.end(), Pos::new(2, 4));
    }

    #[test]
    fn snapshot_is_independent() {
        let mut g = grid();
        g.lock();
        let mut snap = g.snapshot();
        assert!(!snap.is_locked());
        snap.toggle_wall(Pos::new(0, 0));
        snap.mark_visited(Pos::new(1, 1));
        assert_eq!(g.wall_count(), 0);
        assert!(!g.at(Pos::new(1, 1)).unwrap().visited);
    }

    #[test]
    fn neighbors_skip_walls_and_edges() {
        let mut g = grid();
        g.toggle_wall(Pos::new(1, 0));
        let mut buf = Vec::new();
        g.neighbors(Pos::new(0, 0), &mut buf);
        assert_eq!(buf, vec![Pos::new(0, 1)]);

        buf.clear();
        g.neighbors(Pos::new(2, 2), &mut buf);
        assert_eq!(
            buf,
            vec![Pos::new(1, 2), Pos::new(3, 2), Pos::new(2, 1), Pos::new(2, 3)]
        );
    }

    #[test]
    fn validate_catches_malformed_snapshots() {
        let mut g = grid();
        let s = g.idx(g.start()).unwrap();
        g.cell_mut(s).unwrap().kind = CellKind::Wall;
        assert_eq!(g.validate(), Err(GridError::AnchorOnWall(Pos::new(2, 1))));

        let mut g = grid();
        g.cell_mut(0).unwrap().kind = CellKind::End;
        assert_eq!(g.validate(), Err(GridError::DuplicateAnchor("end")));

        let mut g = grid();
        let e = g.idx(g.end()).unwrap();
        g.cell_mut(e).unwrap().kind = CellKind::Empty;
        assert_eq!(g.validate(), Err(GridError::MissingAnchor("end")));
    }

    #[test]
    fn from_ascii() {
        let g = Grid::from_ascii(
            "
            S.#
            .##
            ..E",
        )
        .unwrap();
        assert_eq!((g.rows(), g.cols()), (3, 3));
        assert_eq!(g.start(), Pos::new(0, 0));
        assert_eq!(g.end(), Pos::new(2, 2));
        assert_eq!(
            g.walls().collect::<Vec<_>>(),
            vec![Pos::new(0, 2), Pos::new(1, 1), Pos::new(1, 2)]
        );

        assert_eq!(
            Grid::from_ascii("S.x.E"),
            Err(GridError::InvalidMap {
                ch: 'x',
                pos: Pos::new(0, 2)
            })
        );
        assert_eq!(
            Grid::from_ascii("S..\n.E"),
            Err(GridError::DimensionMismatch {
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            Grid::from_ascii("S..\n..."),
            Err(GridError::MissingAnchor("end"))
        );
    }
}
