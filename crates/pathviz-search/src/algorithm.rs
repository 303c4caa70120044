use std::fmt;
use std::str::FromStr;

use pathviz_core::{Grid, GridError};

use crate::engine::Search;
use crate::result::{Outcome, SearchResult};

/// The four interchangeable search variants.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Algorithm {
    #[default]
    Dijkstra,
    AStar,
    Bfs,
    Dfs,
}

/// Asymptotic cost of an algorithm, for display.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Complexity {
    pub time: &'static str,
    pub space: &'static str,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [Self::Dijkstra, Self::AStar, Self::Bfs, Self::Dfs];

    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dijkstra => "Dijkstra's Algorithm",
            Self::AStar => "A* Search",
            Self::Bfs => "Breadth-First Search",
            Self::Dfs => "Depth-First Search",
        }
    }

    /// Short identifier accepted by [`FromStr`].
    pub const fn key(self) -> &'static str {
        match self {
            Self::Dijkstra => "dijkstra",
            Self::AStar => "astar",
            Self::Bfs => "bfs",
            Self::Dfs => "dfs",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Dijkstra => {
                "Finds the shortest path between nodes in a graph by expanding the \
                 least-cost node first. Guarantees the shortest path."
            }
            Self::AStar => {
                "Uses heuristics to guide the search towards the goal, making it more \
                 efficient than Dijkstra's algorithm. Guarantees the shortest path."
            }
            Self::Bfs => {
                "Explores all nodes at the present depth before moving on to nodes at \
                 the next depth level. Guarantees the shortest path in unweighted graphs."
            }
            Self::Dfs => {
                "Explores as far as possible along each branch before backtracking. \
                 Does not guarantee the shortest path."
            }
        }
    }

    pub const fn complexity(self) -> Complexity {
        match self {
            Self::Dijkstra | Self::AStar => Complexity {
                time: "O((V+E) log V)",
                space: "O(V)",
            },
            Self::Bfs | Self::Dfs => Complexity {
                time: "O(V+E)",
                space: "O(V)",
            },
        }
    }

    /// Whether a found path is guaranteed to have the minimum edge count.
    pub const fn is_optimal(self) -> bool {
        !matches!(self, Self::Dfs)
    }

    /// The next variant, wrapping around.
    pub const fn next(self) -> Self {
        match self {
            Self::Dijkstra => Self::AStar,
            Self::AStar => Self::Bfs,
            Self::Bfs => Self::Dfs,
            Self::Dfs => Self::Dijkstra,
        }
    }

    /// Shorthand for [`search`].
    pub fn run(self, grid: &Grid) -> Result<SearchResult, GridError> {
        search(self, grid)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An algorithm name that [`Algorithm::from_str`] did not recognise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAlgorithm(pub String);

impl fmt::Display for UnknownAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown algorithm {:?} (expected dijkstra, astar, bfs or dfs)",
            self.0
        )
    }
}

impl std::error::Error for UnknownAlgorithm {}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dijkstra" => Ok(Self::Dijkstra),
            "astar" | "a*" => Ok(Self::AStar),
            "bfs" | "breadth-first" => Ok(Self::Bfs),
            "dfs" | "depth-first" => Ok(Self::Dfs),
            _ => Err(UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Run `algorithm` on an independent snapshot of `grid`.
///
/// The live grid is never touched: the snapshot is taken first, its per-run
/// fields are cleared, and the search runs to completion on it. A malformed
/// grid is rejected up front.
pub fn search(algorithm: Algorithm, grid: &Grid) -> Result<SearchResult, GridError> {
    if let Err(e) = grid.validate() {
        log::warn!("search: refusing to run {algorithm} on invalid grid: {e}");
        return Err(e);
    }
    let mut snapshot = grid.snapshot();
    snapshot.reset_preserving_walls();

    let mut run = Search::new(snapshot)?;
    let outcome = match algorithm {
        Algorithm::Dijkstra => run.dijkstra(),
        Algorithm::AStar => run.astar(),
        Algorithm::Bfs => run.bfs(),
        Algorithm::Dfs => run.dfs(),
    };
    log::debug!(
        "search: {algorithm} on {}x{} visited {} cells, {outcome:?}",
        grid.rows(),
        grid.cols(),
        run.visited.len()
    );
    Ok(run.finish(algorithm, outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathviz_core::{CellKind, Pos};
    use rand::{Rng, RngExt, SeedableRng};

    /// Reference shortest distances by repeated relaxation, independent of
    /// every search under test.
    fn reference_distance(grid: &Grid) -> Option<usize> {
        let mut dist = vec![usize::MAX; grid.len()];
        dist[grid.idx(grid.start()).unwrap()] = 0;
        let mut nbuf = Vec::new();
        let mut changed = true;
        while changed {
            changed = false;
            for i in 0..grid.len() {
                if dist[i] == usize::MAX {
                    continue;
                }
                nbuf.clear();
                grid.neighbors(grid.pos_of(i), &mut nbuf);
                for &n in &nbuf {
                    let ni = grid.idx(n).unwrap();
                    if dist[i] + 1 < dist[ni] {
                        dist[ni] = dist[i] + 1;
                        changed = true;
                    }
                }
            }
        }
        let d = dist[grid.idx(grid.end()).unwrap()];
        (d != usize::MAX).then_some(d)
    }

    fn random_grid(rng: &mut rand::rngs::StdRng) -> Grid {
        let rows = rng.random_range(1..9i32);
        let cols = rng.random_range(2..11i32);
        let start = Pos::new(rng.random_range(0..rows), rng.random_range(0..cols));
        let mut end = start;
        while end == start {
            end = Pos::new(rng.random_range(0..rows), rng.random_range(0..cols));
        }
        let mut grid = Grid::new(rows, cols, start, end).unwrap();
        for i in 0..grid.len() {
            if rng.random_range(0..100u32) < 30 {
                grid.toggle_wall(grid.pos_of(i));
            }
        }
        grid
    }

    fn assert_valid_path(grid: &Grid, path: &[Pos]) {
        assert_eq!(path.first(), Some(&grid.start()));
        assert_eq!(path.last(), Some(&grid.end()));
        for w in path.windows(2) {
            assert!(w[0].is_adjacent(w[1]), "{} -> {}", w[0], w[1]);
        }
        for p in path {
            assert!(!grid.at(*p).unwrap().is_wall(), "path crosses wall at {p}");
        }
    }

    #[test]
    fn random_grids_agree_with_reference() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        for _ in 0..300 {
            let grid = random_grid(&mut rng);
            let expected = reference_distance(&grid);
            for algo in Algorithm::ALL {
                let res = search(algo, &grid).unwrap();
                assert_eq!(res.is_found(), expected.is_some(), "{algo} on\n{grid:?}");
                assert_eq!(res.visited[0], grid.start());
                if !res.is_found() {
                    assert!(res.path().is_empty());
                    continue;
                }
                let path = res.path();
                assert_valid_path(&grid, &path);
                assert_eq!(*res.visited.last().unwrap(), grid.end());
                if algo.is_optimal() {
                    assert_eq!(res.cost(), expected, "{algo} not optimal");
                } else {
                    assert!(res.cost() >= expected);
                }
            }
        }
    }

    #[test]
    fn visited_order_is_deterministic() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let grid = random_grid(&mut rng);
            for algo in Algorithm::ALL {
                let a = search(algo, &grid).unwrap();
                let b = search(algo, &grid).unwrap();
                assert_eq!(a.visited, b.visited);
                assert_eq!(a.outcome, b.outcome);
            }
        }
    }

    #[test]
    fn visited_cells_are_unique_and_never_walls() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(99);
        for _ in 0..50 {
            let grid = random_grid(&mut rng);
            for algo in Algorithm::ALL {
                let res = search(algo, &grid).unwrap();
                let mut seen = res.visited.clone();
                seen.sort();
                seen.dedup();
                assert_eq!(seen.len(), res.visited.len());
                assert!(res.visited.iter().all(|p| !grid.at(*p).unwrap().is_wall()));
            }
        }
    }

    #[test]
    fn enclosed_start_is_unreachable_for_all() {
        let grid = Grid::from_ascii(
            "
            .#....
            #S#...
            .#...E",
        )
        .unwrap();
        for algo in Algorithm::ALL {
            let res = search(algo, &grid).unwrap();
            assert_eq!(res.outcome, Outcome::Unreachable, "{algo}");
            assert_eq!(res.visited, vec![Pos::new(1, 1)]);
            assert!(res.path().is_empty());
        }
    }

    #[test]
    fn enclosed_end_is_unreachable_for_all() {
        let grid = Grid::from_ascii(
            "
            S....#.
            ....#E#
            .....#.",
        )
        .unwrap();
        for algo in Algorithm::ALL {
            assert_eq!(search(algo, &grid).unwrap().outcome, Outcome::Unreachable);
        }
    }

    #[test]
    fn astar_visits_no_more_than_dijkstra_on_open_grid() {
        let grid = Grid::new(20, 30, Pos::new(10, 5), Pos::new(10, 15)).unwrap();
        let astar = search(Algorithm::AStar, &grid).unwrap();
        let dijkstra = search(Algorithm::Dijkstra, &grid).unwrap();
        assert_eq!(astar.cost(), Some(10));
        assert_eq!(dijkstra.cost(), Some(10));
        assert!(astar.visited.len() <= dijkstra.visited.len());
    }

    #[test]
    fn live_grid_is_untouched() {
        let mut grid = Grid::from_ascii("S..#..E").unwrap();
        grid.toggle_wall(Pos::new(0, 3));
        grid.mark_visited(Pos::new(0, 4));
        let before = grid.clone();
        let res = search(Algorithm::Bfs, &grid).unwrap();
        assert_eq!(grid, before);
        // Stale display flags on the live grid do not leak into the run.
        assert_eq!(res.visited.len(), 7);
        assert!(res.grid.at(Pos::new(0, 6)).unwrap().visited);
    }

    #[test]
    fn malformed_grid_is_rejected() {
        let mut grid = Grid::from_ascii("S..E").unwrap();
        let i = grid.idx(grid.end()).unwrap();
        grid.cell_mut(i).unwrap().kind = CellKind::Wall;
        assert_eq!(
            search(Algorithm::Bfs, &grid).unwrap_err(),
            GridError::AnchorOnWall(Pos::new(0, 3))
        );
    }

    #[test]
    fn names_and_parsing() {
        for algo in Algorithm::ALL {
            assert_eq!(algo.key().parse::<Algorithm>(), Ok(algo));
            assert!(!algo.description().is_empty());
        }
        assert_eq!("A*".parse::<Algorithm>(), Ok(Algorithm::AStar));
        let err = "greedy".parse::<Algorithm>().unwrap_err();
        assert!(err.to_string().starts_with("unknown algorithm \"greedy\""));
        assert_eq!(Algorithm::default(), Algorithm::Dijkstra);
        assert_eq!(Algorithm::Dfs.next(), Algorithm::Dijkstra);
        assert_eq!(Algorithm::Bfs.complexity().time, "O(V+E)");
        assert_eq!(Algorithm::AStar.to_string(), "A* Search");
        assert!(!Algorithm::Dfs.is_optimal());
    }
}
