//! Monotonic trail counting on height maps.
//!
//! Cells are digit heights `0`..`9`; anything else is impassable. A trail
//! climbs by exactly one height level per step. Two aggregates are derived:
//! the score of a trailhead counts the distinct summits it can reach, and
//! its rating counts the distinct trails to any summit.

use super::*;

use bitvec::prelude::*;
use std::collections::VecDeque;

/// Symbol marking a trailhead.
pub const TRAILHEAD: u8 = b'0';

const SUMMIT: u8 = 9;

fn height(cell: u8) -> Option<u8> {
    cell.is_ascii_digit().then(|| cell - b'0')
}

/// Number of distinct summit positions reachable from `start` by climbing
/// one height level per step.
///
/// Breadth-first over the monotonic neighbor relation. Visited positions are
/// tracked in a bitset so a summit reachable along several trails is counted
/// once. Returns 0 when `start` is not a digit cell.
pub fn count_reachable_goals(grid: &Grid, start: Position) -> Count {
    let start_height = match height(grid.cell(start)) {
        Some(h) => h,
        None => return 0,
    };
    let width = grid.width();
    let mut visited = bitvec![0; grid.width() * grid.height()];
    let mut queue = VecDeque::new();
    visited.set(start.0 * width + start.1, true);
    queue.push_back((start, start_height));

    let mut goals: Count = 0;
    while let Some((position, h)) = queue.pop_front() {
        if h == SUMMIT {
            goals += 1;
        }
        for facing in Orientation::ALL {
            if let Some(next) = grid.offset(position, facing.displacement()) {
                let index = next.0 * width + next.1;
                if height(grid.cell(next)) == Some(h + 1) && !visited[index] {
                    visited.set(index, true);
                    queue.push_back((next, h + 1));
                }
            }
        }
    }
    goals
}

/// Number of distinct trails from `start` to any summit.
///
/// Exhaustive depth-first enumeration without memoization; the recursion
/// depth is bounded by the number of height levels, and puzzle inputs are
/// small enough that revisiting shared suffixes is acceptable.
pub fn count_distinct_paths(grid: &Grid, start: Position) -> Count {
    match height(grid.cell(start)) {
        Some(h) => paths_from(grid, start, h),
        None => 0,
    }
}

fn paths_from(grid: &Grid, position: Position, h: u8) -> Count {
    if h == SUMMIT {
        return 1;
    }
    let mut total: Count = 0;
    for facing in Orientation::ALL {
        if let Some(next) = grid.offset(position, facing.displacement()) {
            if height(grid.cell(next)) == Some(h + 1) {
                total += paths_from(grid, next, h + 1);
            }
        }
    }
    total
}

/// Sum of [`count_reachable_goals`] over every trailhead.
pub fn trailhead_scores(grid: &Grid) -> Count {
    grid.positions_of(TRAILHEAD)
        .iter()
        .map(|&start| count_reachable_goals(grid, start))
        .sum()
}

/// Sum of [`count_distinct_paths`] over every trailhead.
pub fn trailhead_ratings(grid: &Grid) -> Count {
    grid.positions_of(TRAILHEAD)
        .iter()
        .map(|&start| count_distinct_paths(grid, start))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Ridge with summits at both ends; only one trailhead.
    const FORKED_RIDGE: &str = "\
...0...
...1...
...2...
6543456
7.....7
8.....8
9.....9
";

    // Four reachable summits, but thirteen distinct trails to them.
    const BRANCHING_SLOPE: &str = "\
..90..9
...1.98
...2..7
6543456
765.987
876....
987....
";

    const TWO_TRAILHEADS: &str = "\
10..9..
2...8..
3...7..
4567654
...8..3
...9..2
.....01
";

    const DENSE_SLOPE: &str = "\
012345
123456
234567
345678
4.6789
56789.
";

    #[test]
    fn test_single_summit_loop() {
        let grid = Grid::load("0123\n1234\n8765\n9876\n").unwrap();
        assert_eq!(count_reachable_goals(&grid, Position(0, 0)), 1);
        assert_eq!(trailhead_scores(&grid), 1);
    }

    #[test]
    fn test_three_distinct_trails() {
        let grid = Grid::load(
            ".....0.\n\
             ..4321.\n\
             ..5..2.\n\
             ..6543.\n\
             ..7..4.\n\
             ..8765.\n\
             ..9....\n",
        )
        .unwrap();
        assert_eq!(count_distinct_paths(&grid, Position(0, 5)), 3);
        assert_eq!(trailhead_ratings(&grid), 3);
    }

    #[test]
    fn test_forked_ridge_reaches_both_summits() {
        let grid = Grid::load(FORKED_RIDGE).unwrap();
        assert_eq!(count_reachable_goals(&grid, Position(0, 3)), 2);
        assert_eq!(trailhead_scores(&grid), 2);
    }

    #[test]
    fn test_rating_exceeds_score() {
        let grid = Grid::load(BRANCHING_SLOPE).unwrap();
        assert_eq!(trailhead_scores(&grid), 4);
        assert_eq!(trailhead_ratings(&grid), 13);
    }

    #[test]
    fn test_scores_sum_over_trailheads() {
        let grid = Grid::load(TWO_TRAILHEADS).unwrap();
        assert_eq!(count_reachable_goals(&grid, Position(0, 1)), 1);
        assert_eq!(count_reachable_goals(&grid, Position(6, 5)), 2);
        assert_eq!(trailhead_scores(&grid), 3);
    }

    #[test]
    fn test_dense_slope_ratings() {
        let grid = Grid::load(DENSE_SLOPE).unwrap();
        assert_eq!(count_distinct_paths(&grid, Position(0, 0)), 227);
        assert_eq!(trailhead_ratings(&grid), 227);
    }

    #[test]
    fn test_start_on_summit() {
        let grid = Grid::load("9\n").unwrap();
        assert_eq!(count_reachable_goals(&grid, Position(0, 0)), 1);
        assert_eq!(count_distinct_paths(&grid, Position(0, 0)), 1);
    }

    #[test]
    fn test_impassable_start() {
        let grid = Grid::load(".9\n").unwrap();
        assert_eq!(count_reachable_goals(&grid, Position(0, 0)), 0);
        assert_eq!(count_distinct_paths(&grid, Position(0, 0)), 0);
    }

    #[test]
    fn test_no_trailheads() {
        let grid = Grid::load("987\n876\n").unwrap();
        assert_eq!(trailhead_scores(&grid), 0);
        assert_eq!(trailhead_ratings(&grid), 0);
    }
}
