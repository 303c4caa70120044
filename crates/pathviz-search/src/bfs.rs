use std::collections::VecDeque;

use crate::engine::Search;
use crate::result::Outcome;

impl Search {
    /// Breadth-first search.
    ///
    /// A cell is finalised and recorded when it is dequeued. Each neighbour
    /// enters the queue at most once, so with unit edges the first time End
    /// is dequeued it carries a minimum edge-count path.
    pub(crate) fn bfs(&mut self) -> Outcome {
        let mut queue: VecDeque<usize> = VecDeque::new();
        self.discover(self.start, 0, None);
        queue.push_back(self.start);

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut outcome = Outcome::Unreachable;

        while let Some(ci) = queue.pop_front() {
            if self.nodes[ci].closed || self.is_wall(ci) {
                continue;
            }
            self.close(ci);
            if ci == self.end {
                outcome = Outcome::Found;
                break;
            }

            let current_dist = self.nodes[ci].g;
            nbuf.clear();
            self.grid.neighbors(self.pos(ci), &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.grid.idx(np) else {
                    continue;
                };
                if self.nodes[ni].closed || self.nodes[ni].discovered {
                    continue;
                }
                self.discover(ni, current_dist + 1, Some(ci));
                queue.push_back(ni);
            }
        }

        self.nbuf = nbuf;
        outcome
    }
}
