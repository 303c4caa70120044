use std::collections::BinaryHeap;

use crate::engine::Search;
use crate::result::Outcome;

impl Search {
    /// Dijkstra's algorithm with unit edge costs.
    ///
    /// Repeatedly finalises the open cell with the smallest distance (ties go
    /// to the cell discovered first) and relaxes its neighbours. Stops as soon
    /// as End is finalised; if the frontier runs dry first, End is
    /// unreachable.
    pub(crate) fn dijkstra(&mut self) -> Outcome {
        let mut open: BinaryHeap<_> = BinaryHeap::new();
        self.discover(self.start, 0, None);
        open.push(self.node_ref(self.start));

        let mut nbuf = std::mem::take(&mut self.nbuf);

        let outcome = loop {
            let Some(current) = open.pop() else {
                break Outcome::Unreachable;
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
                break Outcome::Found;
            }

            let current_g = self.nodes[ci].g;
            nbuf.clear();
            self.grid.neighbors(self.pos(ci), &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.grid.idx(np) else {
                    continue;
                };
                let n = &self.nodes[ni];
                let tentative = current_g + 1;
                if n.closed || (n.discovered && tentative >= n.g) {
                    continue;
                }
                self.discover(ni, tentative, Some(ci));
                open.push(self.node_ref(ni));
            }
        };

        self.nbuf = nbuf;
        outcome
    }
}
