use std::fmt;

use pathviz_anim::{InvalidSpeed, Speed};
use pathviz_core::{DEFAULT_COLS, DEFAULT_ROWS, Grid, GridError, Pos};
use pathviz_search::Algorithm;

/// Startup settings for a [`Visualizer`](crate::Visualizer).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VisualizerConfig {
    pub rows: i32,
    pub cols: i32,
    /// Where Start sits on a fresh grid.
    pub start: Pos,
    /// Where End sits on a fresh grid.
    pub end: Pos,
    pub algorithm: Algorithm,
    pub speed: Speed,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            start: Pos::new(10, 5),
            end: Pos::new(10, 25),
            algorithm: Algorithm::default(),
            speed: Speed::default(),
        }
    }
}

impl VisualizerConfig {
    /// Set the speed from a raw level.
    pub fn with_speed_level(mut self, level: u8) -> Result<Self, ConfigError> {
        self.speed = Speed::try_from(level)?;
        Ok(self)
    }

    /// Check that a grid can be built from these settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid().map(|_| ())
    }

    /// A fresh grid with no walls and the configured anchors.
    pub fn grid(&self) -> Result<Grid, ConfigError> {
        Ok(Grid::new(self.rows, self.cols, self.start, self.end)?)
    }
}

/// Errors from [`VisualizerConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The grid dimensions or anchors are unusable.
    Grid(GridError),
    Speed(InvalidSpeed),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(e) => write!(f, "invalid grid settings: {e}"),
            Self::Speed(e) => write!(f, "invalid speed: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            Self::Speed(e) => Some(e),
        }
    }
}

impl From<GridError> for ConfigError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<InvalidSpeed> for ConfigError {
    fn from(e: InvalidSpeed) -> Self {
        Self::Speed(e)
    }
}
