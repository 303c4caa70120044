//! Interaction and glue for the pathfinding visualizer.
//!
//! [`Visualizer`] owns the grid, the pointer [`Controller`], the playback
//! [`Scheduler`](pathviz_anim::Scheduler) and the user's settings, and
//! implements [`Model`](pathviz_core::Model) so any
//! [`Driver`](pathviz_core::Driver) can run it.

mod config;
mod controller;
mod keys;
mod visualizer;

pub use config::{ConfigError, VisualizerConfig};
pub use controller::{Controller, Drag, Pointer};
pub use keys::{Action, VisualizerKeys};
pub use visualizer::{Visualizer, WELCOME};
