use std::collections::BinaryHeap;

use crate::distance::manhattan;
use crate::engine::Search;
use crate::result::Outcome;

impl Search {
    /// A* with the Manhattan heuristic.
    ///
    /// Same relaxation as Dijkstra, but cells are selected by
    /// `distance + manhattan(cell, End)`. A cell still in the frontier can
    /// have its distance improved and be re-prioritised; the old heap entry
    /// is then skipped as stale. Because the heuristic is consistent, a
    /// finalised cell is never reopened.
    pub(crate) fn astar(&mut self) -> Outcome {
        let goal = self.end_pos();
        let mut open: BinaryHeap<_> = BinaryHeap::new();

        self.discover(self.start, 0, None);
        self.nodes[self.start].h = Some(manhattan(self.pos(self.start), goal));
        open.push(self.node_ref(self.start));

        let mut nbuf = std::mem::take(&mut self.nbuf);

        let outcome = 'search: loop {
            let Some(current) = open.pop() else {
                break 'search Outcome::Unreachable;
            };
            let ci = current.idx;

            // Skip stale entries.
            if self.nodes[ci].closed || current.f != self.nodes[ci].f() {
                continue;
            }
            if self.is_wall(ci) {
                continue;
            }

            self.close(ci);
            if ci == self.end {
                break 'search Outcome::Found;
            }

            let current_g = self.nodes[ci].g;
            nbuf.clear();
            self.grid.neighbors(self.pos(ci), &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.grid.idx(np) else {
                    continue;
                };
                let n = &self.nodes[ni];
                let tentative_g = current_g + 1;
                if n.closed || (n.discovered && tentative_g >= n.g) {
                    continue;
                }
                self.discover(ni, tentative_g, Some(ci));
                self.nodes[ni].h = Some(manhattan(np, goal));
                open.push(self.node_ref(ni));
            }
        };

        self.nbuf = nbuf;
        outcome
    }
}
