//! Shortcut counting under a bounded rule relaxation.
//!
//! A cheat suspends the wall rule for a limited number of steps. Counting
//! worthwhile cheats needs three ingredients: legal step distances from the
//! start to every cell, legal step distances from every cell to the end, and
//! for each cheat start the cells reachable through walls within the budget.
//! A cheat is worthwhile when start distance + cheat length + end distance
//! undercuts the legal route cost by at least the requested saving.

use super::*;

use ndarray::Array2;
use std::collections::VecDeque;

/// Minimum legal step count from `from` to every cell, ignoring turn costs.
///
/// Breadth-first over open cells. Unreached cells (walls included) hold
/// [`StepCount::MAX`].
pub fn distance_field(grid: &Grid, from: Position) -> Array2<StepCount> {
    let mut field = Array2::from_elem((grid.height(), grid.width()), StepCount::MAX);
    let mut queue = VecDeque::new();
    field[[from.0, from.1]] = 0;
    queue.push_back(from);
    while let Some(position) = queue.pop_front() {
        let steps = field[[position.0, position.1]];
        for facing in Orientation::ALL {
            if let Some(next) = grid.offset(position, facing.displacement()) {
                if !grid.is_blocked(next) && field[[next.0, next.1]] == StepCount::MAX {
                    field[[next.0, next.1]] = steps + 1;
                    queue.push_back(next);
                }
            }
        }
    }
    field
}

/// Open cells reachable from `start` within `max_steps` moves when walls are
/// ignored, with the minimum number of steps to each.
///
/// The search itself moves through every in-bounds cell; only the results
/// are filtered back down to cells that are open in the real grid. Includes
/// `start` itself at 0 steps when it is open.
pub fn reachable_within_budget(
    grid: &Grid,
    start: Position,
    max_steps: StepCount,
) -> Vec<(Position, StepCount)> {
    let mut steps_to = Array2::from_elem((grid.height(), grid.width()), StepCount::MAX);
    let mut queue = VecDeque::new();
    steps_to[[start.0, start.1]] = 0;
    queue.push_back(BudgetedState {
        position: start,
        remaining: max_steps,
    });
    while let Some(BudgetedState {
        position,
        remaining,
    }) = queue.pop_front()
    {
        if remaining == 0 {
            continue;
        }
        let steps = max_steps - remaining;
        for facing in Orientation::ALL {
            if let Some(next) = grid.offset(position, facing.displacement()) {
                if steps_to[[next.0, next.1]] == StepCount::MAX {
                    steps_to[[next.0, next.1]] = steps + 1;
                    queue.push_back(BudgetedState {
                        position: next,
                        remaining: remaining - 1,
                    });
                }
            }
        }
    }

    steps_to
        .indexed_iter()
        .filter(|&((r, c), &steps)| steps != StepCount::MAX && !grid.is_blocked(Position(r, c)))
        .map(|((r, c), &steps)| (Position(r, c), steps))
        .collect()
}

/// Number of cheats that save at least `min_saving` steps over the legal
/// route from `S` to `E`.
///
/// Every ordered pair of open cells (cheat start, cheat end) is counted at
/// most once; the recorded cheat length between a pair is the minimum. Cheat
/// starts are restricted to cells reachable from the start legally, cheat
/// ends to cells that reach the end legally.
///
/// Returns 0 when no legal route exists, since there is nothing to improve.
pub fn count_cheats(
    grid: &Grid,
    max_steps: StepCount,
    min_saving: StepCount,
) -> Result<Count, SolveFailure> {
    let start = grid
        .find(START)
        .map_err(|e| SolveFailure::BadInput(e.to_string()))?;
    let end = grid
        .find(END)
        .map_err(|e| SolveFailure::BadInput(e.to_string()))?;

    let from_start = distance_field(grid, start);
    let to_end = distance_field(grid, end);
    let base = from_start[[end.0, end.1]];
    if base == StepCount::MAX {
        return Ok(0);
    }
    let budget = match base.checked_sub(min_saving) {
        Some(budget) => budget,
        None => return Ok(0),
    };

    let mut cheats: Count = 0;
    for (r, c) in itertools::iproduct!(0..grid.height(), 0..grid.width()) {
        let cheat_start = Position(r, c);
        let before = from_start[[r, c]];
        if grid.is_blocked(cheat_start) || before == StepCount::MAX {
            continue;
        }
        for (cheat_end, steps) in reachable_within_budget(grid, cheat_start, max_steps) {
            let after = to_end[[cheat_end.0, cheat_end.1]];
            if after != StepCount::MAX && before + steps + after <= budget {
                cheats += 1;
            }
        }
    }
    Ok(cheats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_field_goes_around_walls() {
        let grid = Grid::load("S#E\n...\n").unwrap();
        let field = distance_field(&grid, Position(0, 0));
        assert_eq!(field[[0, 0]], 0);
        assert_eq!(field[[0, 1]], StepCount::MAX);
        assert_eq!(field[[0, 2]], 4);
        assert_eq!(field[[1, 1]], 2);
    }

    #[test]
    fn test_reachable_within_budget_crosses_walls() {
        let grid = Grid::load("S#E\n").unwrap();
        let reached = reachable_within_budget(&grid, Position(0, 0), 2);
        // The wall cell is traversed but filtered from the results.
        assert_eq!(reached, vec![(Position(0, 0), 0), (Position(0, 2), 2)]);
    }

    #[test]
    fn test_reachable_within_zero_budget() {
        let grid = Grid::load("S#E\n").unwrap();
        let reached = reachable_within_budget(&grid, Position(0, 0), 0);
        assert_eq!(reached, vec![(Position(0, 0), 0)]);
    }

    #[test]
    fn test_count_cheats_thresholds() {
        // Legal route: down, around, up; 4 steps. Cutting straight through
        // the wall saves 2, and no other cheat improves on the legal route.
        let grid = Grid::load("S#E\n...\n").unwrap();
        assert_eq!(count_cheats(&grid, 2, 1).unwrap(), 1);
        assert_eq!(count_cheats(&grid, 2, 2).unwrap(), 1);
        assert_eq!(count_cheats(&grid, 2, 3).unwrap(), 0);
    }

    #[test]
    fn test_count_cheats_without_legal_route() {
        let grid = Grid::load("S#E\n###\n").unwrap();
        assert_eq!(count_cheats(&grid, 2, 1).unwrap(), 0);
    }
}
