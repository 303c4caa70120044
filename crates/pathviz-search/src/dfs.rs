use crate::engine::Search;
use crate::result::Outcome;

impl Search {
    /// Depth-first search.
    ///
    /// Uses an explicit stack. Neighbours are pushed in the order up, down,
    /// left, right (so the last one pushed is explored first), each cell is
    /// pushed at most once, and cells are finalised when popped. Returns the
    /// first route it stumbles on, which is generally not the shortest.
    pub(crate) fn dfs(&mut self) -> Outcome {
        let mut stack: Vec<usize> = Vec::new();
        self.discover(self.start, 0, None);
        stack.push(self.start);

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut outcome = Outcome::Unreachable;

        while let Some(ci) = stack.pop() {
            if self.nodes[ci].closed || self.is_wall(ci) {
                continue;
            }
            self.close(ci);
            if ci == self.end {
                outcome = Outcome::Found;
                break;
            }

            let depth = self.nodes[ci].g;
            nbuf.clear();
            self.grid.neighbors(self.pos(ci), &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.grid.idx(np) else {
                    continue;
                };
                if self.nodes[ni].closed || self.nodes[ni].discovered {
                    continue;
                }
                self.discover(ni, depth + 1, Some(ci));
                stack.push(ni);
            }
        }

        self.nbuf = nbuf;
        outcome
    }
}
