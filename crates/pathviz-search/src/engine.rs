use pathviz_core::{Grid, GridError, Pos, UNREACHABLE};

use crate::algorithm::Algorithm;
use crate::result::{Outcome, SearchResult};

// ---------------------------------------------------------------------------
// Per-cell search state
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) g: i32,
    pub(crate) h: Option<i32>,
    pub(crate) parent: Option<usize>,
    /// Order in which the cell first entered the frontier.
    pub(crate) seq: u64,
    pub(crate) discovered: bool,
    pub(crate) closed: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: UNREACHABLE,
            h: None,
            parent: None,
            seq: u64::MAX,
            discovered: false,
            closed: false,
        }
    }
}

impl Node {
    /// Priority used by the best-first searches.
    #[inline]
    pub(crate) fn f(&self) -> i32 {
        self.g.saturating_add(self.h.unwrap_or(0))
    }
}

/// Reference into the node array, ordered by `(f, seq)` for use in
/// `BinaryHeap`.
#[derive(Clone, Copy, Eq, PartialEq)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) f: i32,
    pub(crate) seq: u64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest f first, and among
        // equal f the earliest discovered.
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// One run over a private grid snapshot.
///
/// The algorithm variants live in their own modules as `impl Search` blocks;
/// each returns an [`Outcome`] and leaves its trace in `visited` and `nodes`.
pub(crate) struct Search {
    pub(crate) grid: Grid,
    pub(crate) nodes: Vec<Node>,
    pub(crate) visited: Vec<Pos>,
    pub(crate) start: usize,
    pub(crate) end: usize,
    next_seq: u64,
    // shared scratch buffer for neighbor queries
    pub(crate) nbuf: Vec<Pos>,
}

impl Search {
    /// Take ownership of a snapshot. The snapshot must already be valid.
    pub(crate) fn new(grid: Grid) -> Result<Self, GridError> {
        let start = grid
            .idx(grid.start())
            .ok_or(GridError::OutOfBounds(grid.start()))?;
        let end = grid
            .idx(grid.end())
            .ok_or(GridError::OutOfBounds(grid.end()))?;
        Ok(Self {
            nodes: vec![Node::default(); grid.len()],
            visited: Vec::new(),
            start,
            end,
            next_seq: 0,
            nbuf: Vec::with_capacity(4),
            grid,
        })
    }

    #[inline]
    pub(crate) fn pos(&self, idx: usize) -> Pos {
        self.grid.pos_of(idx)
    }

    #[inline]
    pub(crate) fn end_pos(&self) -> Pos {
        self.grid.end()
    }

    /// Walls are never handed out as neighbours; this guards the frontier
    /// against malformed snapshots anyway.
    #[inline]
    pub(crate) fn is_wall(&self, idx: usize) -> bool {
        self.grid.cell(idx).is_none_or(|c| c.is_wall())
    }

    /// Record a (possibly improved) tentative distance for `idx`.
    ///
    /// The discovery sequence number is assigned only the first time, so a
    /// re-prioritised cell keeps its place among equal priorities.
    pub(crate) fn discover(&mut self, idx: usize, g: i32, parent: Option<usize>) {
        let seq = self.next_seq;
        let n = &mut self.nodes[idx];
        if !n.discovered {
            n.discovered = true;
            n.seq = seq;
            self.next_seq += 1;
        }
        n.g = g;
        n.parent = parent;
    }

    /// Finalise `idx` and append it to the visited order.
    pub(crate) fn close(&mut self, idx: usize) {
        self.nodes[idx].closed = true;
        let p = self.pos(idx);
        self.visited.push(p);
    }

    /// Heap entry for `idx` at its current priority.
    #[inline]
    pub(crate) fn node_ref(&self, idx: usize) -> NodeRef {
        let n = &self.nodes[idx];
        NodeRef {
            idx,
            f: n.f(),
            seq: n.seq,
        }
    }

    /// Write the run's state back into the snapshot's cells and package the
    /// result.
    pub(crate) fn finish(mut self, algorithm: Algorithm, outcome: Outcome) -> SearchResult {
        for (i, n) in self.nodes.iter().enumerate() {
            let Some(c) = self.grid.cell_mut(i) else {
                continue;
            };
            c.visited = n.closed;
            c.distance = n.g;
            c.heuristic = n.h.unwrap_or(UNREACHABLE);
            c.total_cost = match n.h {
                Some(h) if n.g != UNREACHABLE => n.g + h,
                _ => UNREACHABLE,
            };
            c.predecessor = n.parent;
        }
        SearchResult {
            algorithm,
            outcome,
            visited: self.visited,
            grid: self.grid,
        }
    }
}
