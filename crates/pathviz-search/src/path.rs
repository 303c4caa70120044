use pathviz_core::{Grid, Pos};

/// Follow predecessor links back from `end` and return the route in
/// Start→End order.
///
/// Returns an empty sequence if `end` is out of bounds or carries no
/// predecessor (the search never reached it). A malformed predecessor graph
/// that loops back on itself also yields an empty sequence instead of
/// spinning.
pub fn reconstruct(grid: &Grid, end: Pos) -> Vec<Pos> {
    let Some(mut ci) = grid.idx(end) else {
        return Vec::new();
    };
    if grid.cell(ci).and_then(|c| c.predecessor).is_none() {
        return Vec::new();
    }

    let mut path = vec![end];
    while let Some(pi) = grid.cell(ci).and_then(|c| c.predecessor) {
        if path.len() > grid.len() {
            log::warn!("path: predecessor cycle through {}", grid.pos_of(pi));
            return Vec::new();
        }
        path.push(grid.pos_of(pi));
        ci = pi;
    }
    path.reverse();
    path
}

/// Number of edges in a path (`len − 1`), zero for an empty path.
#[inline]
pub fn path_cost(path: &[Pos]) -> usize {
    path.len().saturating_sub(1)
}
