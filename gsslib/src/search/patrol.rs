//! Guard patrol simulation and obstruction counting.
//!
//! The guard starts at the `^` marker facing north, walks forward until the
//! cell ahead is blocked, turns clockwise in place, and leaves the grid
//! eventually unless the walls trap it in a cycle. A cycle is detected when
//! a (position, orientation) state repeats.

use super::*;

use bitvec::prelude::*;

/// How a patrol ends.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug)]
#[serde(tag = "kind")]
pub enum PatrolOutcome {
    /// The guard left the grid after touching this many distinct positions.
    Exited { visited: Count },
    /// A (position, orientation) state repeated.
    Looped,
}

/// Runs the patrol from the `^` marker and reports how it ends.
pub fn patrol(grid: &Grid) -> Result<PatrolOutcome, SolveFailure> {
    let start = grid
        .find(GUARD)
        .map_err(|e| SolveFailure::BadInput(e.to_string()))?;
    let (visited, looped) = traced_patrol(grid, start);
    Ok(if looped {
        PatrolOutcome::Looped
    } else {
        PatrolOutcome::Exited {
            visited: visited.len() as Count,
        }
    })
}

/// True iff adding a single obstruction at `candidate` makes the patrol
/// loop. Placing the obstruction on the guard's start cell is not allowed
/// and returns false.
pub fn simulate_with_obstruction(grid: &Grid, candidate: Position) -> Result<bool, SolveFailure> {
    let start = grid
        .find(GUARD)
        .map_err(|e| SolveFailure::BadInput(e.to_string()))?;
    Ok(candidate != start && obstructed_walk_loops(grid, start, candidate))
}

/// Number of single-obstruction placements that trap the guard in a loop.
///
/// Only positions the unobstructed patrol actually visits can ever be hit,
/// so those are the candidates, minus the start cell. The candidates are
/// simulated independently on a pool of worker threads fed over a channel;
/// `threads == 0` uses the available parallelism.
pub fn count_looping_obstructions(grid: &Grid, threads: usize) -> Result<Count, SolveFailure> {
    let start = grid
        .find(GUARD)
        .map_err(|e| SolveFailure::BadInput(e.to_string()))?;
    let (visited, _) = traced_patrol(grid, start);
    let candidates: Vec<Position> = visited.into_iter().filter(|&p| p != start).collect();

    let workers = if threads == 0 {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    } else {
        threads
    };

    let (candidate_tx, candidate_rx) = crossbeam_channel::unbounded::<Position>();
    let (result_tx, result_rx) = crossbeam_channel::unbounded::<bool>();
    for &candidate in &candidates {
        let _ = candidate_tx.send(candidate);
    }
    drop(candidate_tx);

    let mut loops: Count = 0;
    std::thread::scope(|scope| {
        for _ in 0..workers {
            let candidate_rx = candidate_rx.clone();
            let result_tx = result_tx.clone();
            scope.spawn(move || {
                for candidate in candidate_rx.iter() {
                    let _ = result_tx.send(obstructed_walk_loops(grid, start, candidate));
                }
            });
        }
        drop(result_tx);
        loops = result_rx.iter().filter(|&looped| looped).count() as Count;
    });
    Ok(loops)
}

/// Walks the unobstructed patrol, collecting distinct visited positions in
/// first-visit order. The second element is true iff the patrol loops.
fn traced_patrol(grid: &Grid, start: Position) -> (Vec<Position>, bool) {
    let width = grid.width();
    let mut seen_states = bitvec![0; 4 * grid.width() * grid.height()];
    let mut seen_positions = bitvec![0; grid.width() * grid.height()];
    let mut visited = Vec::new();

    let mut position = start;
    let mut facing = Orientation::North;
    loop {
        let state_index = (position.0 * width + position.1) * 4 + facing as usize;
        if seen_states[state_index] {
            return (visited, true);
        }
        seen_states.set(state_index, true);

        let position_index = position.0 * width + position.1;
        if !seen_positions[position_index] {
            seen_positions.set(position_index, true);
            visited.push(position);
        }

        match grid.offset(position, facing.displacement()) {
            Some(ahead) if grid.is_blocked(ahead) => facing = facing.clockwise(),
            Some(ahead) => position = ahead,
            None => return (visited, false),
        }
    }
}

/// Walks the patrol with one extra obstruction; true iff it loops.
fn obstructed_walk_loops(grid: &Grid, start: Position, obstruction: Position) -> bool {
    let width = grid.width();
    let mut seen_states = bitvec![0; 4 * grid.width() * grid.height()];

    let mut position = start;
    let mut facing = Orientation::North;
    loop {
        let state_index = (position.0 * width + position.1) * 4 + facing as usize;
        if seen_states[state_index] {
            return true;
        }
        seen_states.set(state_index, true);

        match grid.offset(position, facing.displacement()) {
            Some(ahead) if grid.is_blocked(ahead) || ahead == obstruction => {
                facing = facing.clockwise();
            }
            Some(ahead) => position = ahead,
            None => return false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The guard climbs to (1, 1), bounces east along the top, then south
    // down the right side and out the bottom.
    const BOUNCING_GUARD: &str = "\
.#...
....#
.....
#^...
.....
";

    #[test]
    fn test_patrol_exits() {
        let grid = Grid::load(BOUNCING_GUARD).unwrap();
        assert_eq!(patrol(&grid).unwrap(), PatrolOutcome::Exited { visited: 8 });
    }

    #[test]
    fn test_patrol_loops_when_enclosed() {
        let grid = Grid::load(".#.\n#^#\n.#.\n").unwrap();
        assert_eq!(patrol(&grid).unwrap(), PatrolOutcome::Looped);
    }

    #[test]
    fn test_patrol_requires_guard_marker() {
        let grid = Grid::load("...\n...\n").unwrap();
        assert!(matches!(patrol(&grid), Err(SolveFailure::BadInput(_))));
    }

    #[test]
    fn test_obstruction_closes_the_rectangle() {
        let grid = Grid::load(BOUNCING_GUARD).unwrap();
        assert!(simulate_with_obstruction(&grid, Position(4, 3)).unwrap());
        assert!(!simulate_with_obstruction(&grid, Position(2, 1)).unwrap());
        // The start cell is never a legal placement.
        assert!(!simulate_with_obstruction(&grid, Position(3, 1)).unwrap());
    }

    #[test]
    fn test_count_looping_obstructions() {
        let grid = Grid::load(BOUNCING_GUARD).unwrap();
        assert_eq!(count_looping_obstructions(&grid, 1).unwrap(), 1);
        assert_eq!(count_looping_obstructions(&grid, 4).unwrap(), 1);
    }
}
