//! Pointer-driven grid editing.
//!
//! Pressing on an anchor starts dragging it; pressing anywhere else toggles a
//! wall and starts painting. While a session is active, every newly entered
//! cell gets the same operation. Releasing the button or leaving the grid
//! ends the session.

use pathviz_core::{CellKind, Grid, MouseAction, Pos};

/// A pointer event in grid coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Pointer {
    Down(Pos),
    Enter(Pos),
    Up,
    Leave,
}

impl Pointer {
    /// Translate a raw mouse action at `pos` into a pointer event for `grid`.
    ///
    /// Presses outside the grid are dropped; moves outside it become
    /// [`Pointer::Leave`].
    pub fn from_mouse(action: MouseAction, pos: Pos, grid: &Grid) -> Option<Self> {
        let inside = grid.contains(pos);
        match action {
            MouseAction::Main if inside => Some(Self::Down(pos)),
            MouseAction::Main | MouseAction::Secondary => None,
            MouseAction::Move if inside => Some(Self::Enter(pos)),
            MouseAction::Move => Some(Self::Leave),
            MouseAction::Release => Some(Self::Up),
        }
    }
}

/// What an active session does to each cell it touches.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Drag {
    MoveStart,
    MoveEnd,
    Paint,
}

#[derive(Debug, Clone, Default)]
pub struct Controller {
    drag: Option<Drag>,
    // last cell the pointer was seen in, so repeated moves within one cell
    // do not re-apply the operation
    last: Option<Pos>,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn drag(&self) -> Option<Drag> {
        self.drag
    }

    /// Forget any active session.
    pub fn cancel(&mut self) {
        self.drag = None;
        self.last = None;
    }

    /// Apply `ev` to `grid`. Returns whether the grid changed.
    ///
    /// When `enabled` is false (a run is in progress) the event is ignored
    /// and any session is dropped.
    pub fn handle(&mut self, grid: &mut Grid, ev: Pointer, enabled: bool) -> bool {
        if !enabled {
            self.cancel();
            return false;
        }
        match ev {
            Pointer::Down(p) => {
                let Some(cell) = grid.at(p) else {
                    return false;
                };
                self.last = Some(p);
                match cell.kind {
                    CellKind::Start => {
                        self.drag = Some(Drag::MoveStart);
                        false
                    }
                    CellKind::End => {
                        self.drag = Some(Drag::MoveEnd);
                        false
                    }
                    CellKind::Wall | CellKind::Empty => {
                        self.drag = Some(Drag::Paint);
                        grid.toggle_wall(p)
                    }
                }
            }
            Pointer::Enter(p) => {
                let Some(drag) = self.drag else {
                    return false;
                };
                if self.last == Some(p) {
                    return false;
                }
                self.last = Some(p);
                match drag {
                    Drag::MoveStart => grid.move_start(p),
                    Drag::MoveEnd => grid.move_end(p),
                    Drag::Paint => grid.toggle_wall(p),
                }
            }
            Pointer::Up | Pointer::Leave => {
                self.cancel();
                false
            }
        }
    }
}
