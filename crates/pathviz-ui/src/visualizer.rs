//! The pathfinding visualizer as an application [`Model`].

use std::time::Instant;

use pathviz_anim::{Finish, Playback, Scheduler, Speed, State, Tick};
use pathviz_core::{CellView, Context, Effect, Frame, Grid, Key, Model, Msg, Pos, compute_frame};
use pathviz_search::{Algorithm, search};

use crate::config::{ConfigError, VisualizerConfig};
use crate::controller::{Controller, Pointer};
use crate::keys::{Action, VisualizerKeys};

pub const WELCOME: &str =
    "Click and drag to create walls. Select an algorithm and click Visualize.";

/// Grid, editing, search and playback bundled behind one interface.
///
/// Every editing operation is rejected (returns `false`) while a run is being
/// played back; the grid is locked for the run's whole duration.
pub struct Visualizer {
    config: VisualizerConfig,
    grid: Grid,
    controller: Controller,
    scheduler: Scheduler,
    algorithm: Algorithm,
    speed: Speed,
    keys: VisualizerKeys,
    message: String,
}

impl Visualizer {
    pub fn new(config: VisualizerConfig) -> Result<Self, ConfigError> {
        let grid = config.grid()?;
        Ok(Self {
            algorithm: config.algorithm,
            speed: config.speed,
            config,
            grid,
            controller: Controller::new(),
            scheduler: Scheduler::new(),
            keys: VisualizerKeys::default(),
            message: WELCOME.to_string(),
        })
    }

    /// Toggle walls at `walls` on the starting grid. Anchors and out of bounds
    /// positions are skipped.
    pub fn with_walls(mut self, walls: impl IntoIterator<Item = Pos>) -> Self {
        for p in walls {
            self.grid.toggle_wall(p);
        }
        self
    }

    /// Replace the key bindings.
    pub fn with_keys(mut self, keys: VisualizerKeys) -> Self {
        self.keys = keys;
        self
    }

    // -------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    #[inline]
    pub fn speed(&self) -> Speed {
        self.speed
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        !self.scheduler.is_idle()
    }

    pub fn state(&self) -> State {
        self.scheduler.state()
    }

    /// When the next playback tick comes due.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    /// Cancellation token of the current run. Cancelling it stops playback
    /// at the next [`tick`](Self::tick).
    pub fn cancel_token(&self) -> Context {
        self.scheduler.context()
    }

    /// One view per cell, row-major.
    pub fn views(&self) -> Vec<CellView> {
        self.grid.views()
    }

    /// The cells that changed since `prev` was taken.
    pub fn frame_since(&self, prev: &[CellView]) -> Frame {
        compute_frame(prev, &self.grid)
    }

    // -------------------------------------------------------------------
    // Playback
    // -------------------------------------------------------------------

    /// Search the current grid and start playing the result back.
    pub fn run(&mut self, now: Instant) -> bool {
        if self.is_running() {
            return false;
        }
        self.controller.cancel();
        self.grid.reset_preserving_walls();
        let result = match search(self.algorithm, &self.grid) {
            Ok(r) => r,
            Err(e) => {
                log::warn!("visualizer: cannot run {}: {e}", self.algorithm);
                self.message = format!("Cannot run: {e}.");
                return false;
            }
        };
        log::debug!(
            "visualizer: running {} on {}x{} at {}",
            self.algorithm,
            self.grid.rows(),
            self.grid.cols(),
            self.speed
        );
        self.grid.lock();
        if !self.scheduler.start(Playback::from(&result), self.speed, now) {
            self.grid.unlock();
            return false;
        }
        self.message = format!("Visualizing {}...", self.algorithm.name());
        true
    }

    /// Stop playback, keeping whatever has been revealed so far.
    pub fn stop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.scheduler.stop();
        self.grid.unlock();
        self.message = "Visualization stopped.".to_string();
        true
    }

    /// Apply every playback tick due at `now`. Returns how many were applied.
    pub fn tick(&mut self, now: Instant) -> usize {
        let ticks = self.scheduler.poll(now);
        for &tick in &ticks {
            match tick {
                Tick::Visit(p) => {
                    self.grid.mark_visited(p);
                }
                Tick::PathStep(p) => {
                    self.grid.mark_on_path(p);
                }
                Tick::Finished(finish) => {
                    self.grid.unlock();
                    self.message = match finish {
                        Finish::Found { steps } => {
                            format!("Path found! Shortest path is {steps} steps.")
                        }
                        Finish::Unreachable => {
                            "No path found! The end node is unreachable.".to_string()
                        }
                    };
                }
            }
        }
        // Cancelled through a shared token rather than `stop`.
        if self.grid.is_locked() && self.scheduler.is_idle() {
            self.grid.unlock();
            self.message = "Visualization stopped.".to_string();
        }
        ticks.len()
    }

    // -------------------------------------------------------------------
    // Editing
    // -------------------------------------------------------------------

    /// Feed a pointer event to the interaction controller.
    pub fn pointer(&mut self, ev: Pointer) -> bool {
        let enabled = !self.is_running();
        self.controller.handle(&mut self.grid, ev, enabled)
    }

    pub fn clear_path(&mut self) -> bool {
        if !self.grid.reset_preserving_walls() {
            return false;
        }
        self.message = "Path has been cleared.".to_string();
        true
    }

    pub fn reset(&mut self) -> bool {
        if !self.grid.reset_preserving_walls() {
            return false;
        }
        self.message = "Grid has been reset. Walls are preserved.".to_string();
        true
    }

    pub fn clear_walls(&mut self) -> bool {
        if !self.grid.clear_walls() {
            return false;
        }
        self.message = "All walls have been cleared.".to_string();
        true
    }

    /// Replace the grid with a fresh one at the configured anchors.
    pub fn new_grid(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        match self.config.grid() {
            Ok(g) => {
                self.grid = g;
                self.controller.cancel();
                self.message = WELCOME.to_string();
                true
            }
            Err(e) => {
                log::warn!("visualizer: cannot build grid: {e}");
                false
            }
        }
    }

    // -------------------------------------------------------------------
    // Settings
    // -------------------------------------------------------------------

    pub fn set_algorithm(&mut self, algorithm: Algorithm) -> bool {
        if self.is_running() {
            return false;
        }
        self.algorithm = algorithm;
        true
    }

    pub fn cycle_algorithm(&mut self) -> bool {
        self.set_algorithm(self.algorithm.next())
    }

    pub fn set_speed(&mut self, speed: Speed) -> bool {
        if self.is_running() {
            return false;
        }
        self.speed = speed;
        true
    }

    pub fn faster(&mut self) -> bool {
        self.set_speed(self.speed.faster())
    }

    pub fn slower(&mut self) -> bool {
        self.set_speed(self.speed.slower())
    }

    // -------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------

    fn handle_key(&mut self, key: Key, now: Instant) -> Option<Effect> {
        let action = self.keys.action(&key)?;
        match action {
            Action::Quit => {
                self.scheduler.stop();
                return Some(Effect::End);
            }
            Action::Run => {
                self.run(now);
            }
            Action::Stop => {
                self.stop();
            }
            Action::CycleAlgorithm => {
                self.cycle_algorithm();
            }
            Action::Faster => {
                self.faster();
            }
            Action::Slower => {
                self.slower();
            }
            Action::ClearPath => {
                self.clear_path();
            }
            Action::Reset => {
                self.reset();
            }
            Action::ClearWalls => {
                self.clear_walls();
            }
            Action::NewGrid => {
                self.new_grid();
            }
        }
        None
    }
}

impl Model for Visualizer {
    fn update(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::Tick(now) => {
                self.tick(now);
                None
            }
            Msg::KeyDown { key, time } => self.handle_key(key, time),
            Msg::Mouse { action, pos, .. } => {
                if let Some(ev) = Pointer::from_mouse(action, pos, &self.grid) {
                    self.pointer(ev);
                }
                None
            }
            Msg::Quit => {
                self.scheduler.stop();
                Some(Effect::End)
            }
            Msg::Init | Msg::Screen { .. } => None,
        }
    }

    fn grid(&self) -> &Grid {
        &self.grid
    }

    fn status(&self) -> Vec<String> {
        let (done, total) = self.scheduler.progress();
        let mut info = format!(
            "{} | Speed: {} | Walls: {}",
            self.algorithm.name(),
            self.speed,
            self.grid.wall_count()
        );
        if self.is_running() {
            info.push_str(&format!(" | {done}/{total}"));
        }
        vec![self.message.clone(), info, VisualizerKeys::HELP.to_string()]
    }
}
