//! Command line and startup for the terminal visualizer.
//!
//! Turns [`Cli`] options into a [`VisualizerConfig`] and, optionally, a
//! scattering of random walls so there is something to route around.

use clap::Parser;
use pathviz_anim::Speed;
use pathviz_core::Pos;
use pathviz_search::Algorithm;
use pathviz_ui::{ConfigError, Visualizer, VisualizerConfig};
use rand::{RngExt, SeedableRng};

/// Largest accepted row or column count.
pub const MAX_SIDE: i32 = 1000;

#[derive(Parser, Debug)]
#[command(name = "pathviz")]
#[command(version, about = "Watch Dijkstra, A*, BFS and DFS explore a grid")]
#[command(long_about = "Watch Dijkstra, A*, BFS and DFS explore a grid.\n\n\
    Click and drag to draw walls, drag S or E to move them.\n\n\
    Keys:\n  \
    enter/space  run          s  stop\n  \
    a            algorithm    +/-  speed\n  \
    c            clear path   r  reset\n  \
    w            clear walls  n  new grid\n  \
    q/esc        quit")]
pub struct Cli {
    /// Search algorithm (dijkstra, astar, bfs, dfs)
    #[arg(short, long, default_value = "dijkstra")]
    pub algorithm: Algorithm,

    /// Playback speed, 1 (slow) to 5 (very fast)
    #[arg(short, long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub speed: u8,

    /// Grid rows
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(i32).range(1..=MAX_SIDE as i64))]
    pub rows: i32,

    /// Grid columns
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(i32).range(1..=MAX_SIDE as i64))]
    pub cols: i32,

    /// Start cell as ROW,COL
    #[arg(long, default_value = "10,5", value_parser = parse_pos)]
    pub start: Pos,

    /// End cell as ROW,COL
    #[arg(long, default_value = "10,25", value_parser = parse_pos)]
    pub end: Pos,

    /// Percentage of cells to turn into walls at startup
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=90))]
    pub walls: Option<u8>,

    /// Seed for the random walls
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Do not capture the mouse
    #[arg(long)]
    pub no_mouse: bool,
}

/// Parse `ROW,COL`.
pub fn parse_pos(s: &str) -> Result<Pos, String> {
    let (r, c) = s
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got {s:?}"))?;
    let row = r.trim().parse::<i32>().map_err(|e| format!("bad row: {e}"))?;
    let col = c.trim().parse::<i32>().map_err(|e| format!("bad column: {e}"))?;
    Ok(Pos::new(row, col))
}

impl Cli {
    pub fn config(&self) -> Result<VisualizerConfig, ConfigError> {
        let config = VisualizerConfig {
            rows: self.rows,
            cols: self.cols,
            start: self.start,
            end: self.end,
            algorithm: self.algorithm,
            speed: Speed::default(),
        }
        .with_speed_level(self.speed)?;
        config.validate()?;
        Ok(config)
    }
}

/// Walls covering roughly `percent` of a `rows`×`cols` grid.
pub fn random_walls(rows: i32, cols: i32, percent: u8, seed: u64) -> Vec<Pos> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let mut walls = Vec::new();
    for row in 0..rows {
        for col in 0..cols {
            if rng.random_range(0..100u8) < percent {
                walls.push(Pos::new(row, col));
            }
        }
    }
    walls
}

/// Build the visualizer described by `cli`.
pub fn visualizer(cli: &Cli) -> Result<Visualizer, ConfigError> {
    let config = cli.config()?;
    let walls = match cli.walls {
        Some(percent) => random_walls(config.rows, config.cols, percent, cli.seed),
        None => Vec::new(),
    };
    log::debug!(
        "demo: {}x{} grid, {} walls, {} at speed {}",
        config.rows,
        config.cols,
        walls.len(),
        config.algorithm,
        config.speed
    );
    Ok(Visualizer::new(config)?.with_walls(walls))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("pathviz").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_match_config_defaults() {
        let cli = parse(&[]);
        assert_eq!(cli.config().unwrap(), VisualizerConfig::default());
    }

    #[test]
    fn options_are_applied() {
        let cli = parse(&["-a", "bfs", "-s", "5", "--rows", "8", "--cols", "9", "--start", "0,0", "--end", "7, 8"]);
        let c = cli.config().unwrap();
        assert_eq!(c.algorithm, Algorithm::Bfs);
        assert_eq!(c.speed, Speed::MAX);
        assert_eq!((c.rows, c.cols), (8, 9));
        assert_eq!(c.end, Pos::new(7, 8));
    }

    #[test]
    fn bad_options_are_rejected() {
        let bad = |args: &[&str]| {
            Cli::try_parse_from(std::iter::once("pathviz").chain(args.iter().copied())).is_err()
        };
        assert!(bad(&["-s", "0"]));
        assert!(bad(&["-a", "greedy"]));
        assert!(bad(&["--start", "3"]));
        assert!(bad(&["--rows", "0"]));
        assert!(bad(&["--cols", "50000"]));
        assert!(bad(&["--rows", "-4"]));
        // Parses, but the anchors do not fit the grid.
        assert!(parse(&["--rows", "5"]).config().is_err());
    }

    #[test]
    fn random_walls_are_seeded() {
        let a = random_walls(20, 30, 30, 7);
        let b = random_walls(20, 30, 30, 7);
        assert_eq!(a, b);
        assert!(!a.is_empty() && a.len() < 600);
        assert!(random_walls(20, 30, 0, 7).is_empty());
    }

    #[test]
    fn visualizer_keeps_anchors_clear() {
        let cli = parse(&["--walls", "90", "--seed", "3"]);
        let v = visualizer(&cli).unwrap();
        assert!(v.grid().validate().is_ok());
        assert!(v.grid().wall_count() > 0);
    }
}
