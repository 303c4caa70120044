//! Grid model and plumbing for the pathfinding visualizer.
//!
//! This crate provides the foundational types used across the *pathviz*
//! workspace: grid coordinates, the cell arena with its editing rules, the
//! read-only render projection, input messages, and the application loop.

pub mod app;
pub mod cell;
pub mod error;
pub mod geom;
pub mod grid;
pub mod messages;
pub mod view;

pub use app::{App, AppConfig, Context, Driver, Effect, Model};
pub use cell::{Cell, CellKind, UNREACHABLE};
pub use error::GridError;
pub use geom::Pos;
pub use grid::{DEFAULT_COLS, DEFAULT_ROWS, Grid};
pub use messages::*;
pub use view::{CellView, Frame, Shade, compute_frame};
