use pathviz_core::Pos;

/// Manhattan (L1) distance between two positions.
///
/// On a unit-cost 4-connected grid this never overestimates the remaining
/// cost and never drops by more than one per step, so it is both admissible
/// and consistent as an A* heuristic.
#[inline]
pub fn manhattan(a: Pos, b: Pos) -> i32 {
    (a.row - b.row).abs() + (a.col - b.col).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_distance() {
        assert_eq!(manhattan(Pos::new(10, 5), Pos::new(10, 25)), 20);
        assert_eq!(manhattan(Pos::new(0, 0), Pos::new(3, -4)), 7);
        assert_eq!(manhattan(Pos::new(2, 2), Pos::new(2, 2)), 0);
    }
}
