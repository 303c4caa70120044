//! Search algorithms for the pathfinding visualizer.
//!
//! Every run works on a private snapshot of a [`Grid`](pathviz_core::Grid)
//! and produces a [`SearchResult`]: the order in which cells were finalised,
//! whether End was reached, and the snapshot carrying distances and the
//! predecessor graph.
//!
//! - **Dijkstra** uniform-cost expansion ([`Algorithm::Dijkstra`])
//! - **A\*** guided by Manhattan distance ([`Algorithm::AStar`])
//! - **BFS** layer-by-layer expansion ([`Algorithm::Bfs`])
//! - **DFS** explicit-stack depth-first ([`Algorithm::Dfs`])
//!
//! Neighbours are always considered in the order up, down, left, right, and
//! ties in the priority queues resolve by discovery order, so a given grid
//! always yields the same visited sequence.
//!
//! ```
//! use pathviz_core::Grid;
//! use pathviz_search::{Algorithm, search};
//!
//! let grid = Grid::from_ascii("S.#\n..E").unwrap();
//! let res = search(Algorithm::Bfs, &grid).unwrap();
//! assert_eq!(res.cost(), Some(3));
//! ```

mod algorithm;
mod astar;
mod bfs;
mod dfs;
mod dijkstra;
mod distance;
mod engine;
mod path;
mod result;

pub use algorithm::{Algorithm, Complexity, UnknownAlgorithm, search};
pub use distance::manhattan;
pub use path::{path_cost, reconstruct};
pub use result::{Outcome, SearchResult};
