use pathviz_core::{Grid, Pos};

use crate::algorithm::Algorithm;
use crate::path::{path_cost, reconstruct};

/// How a search ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// End was finalised; its predecessor chain leads back to Start.
    Found,
    /// The frontier emptied before End was reached. A normal result, not a
    /// fault.
    Unreachable,
}

/// Everything a single run produced.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub algorithm: Algorithm,
    pub outcome: Outcome,
    /// Cells in the order the algorithm finalised them.
    pub visited: Vec<Pos>,
    /// The searched snapshot. Its cells hold distances, flags and the
    /// predecessor graph; the live grid is untouched.
    pub grid: Grid,
}

impl SearchResult {
    #[inline]
    pub fn is_found(&self) -> bool {
        self.outcome == Outcome::Found
    }

    /// The Start→End route, or an empty sequence when End was not reached.
    pub fn path(&self) -> Vec<Pos> {
        match self.outcome {
            Outcome::Found => reconstruct(&self.grid, self.grid.end()),
            Outcome::Unreachable => Vec::new(),
        }
    }

    /// Edge count of the route, `None` when End was not reached.
    pub fn cost(&self) -> Option<usize> {
        self.is_found().then(|| path_cost(&self.path()))
    }
}
