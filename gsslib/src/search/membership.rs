//! Optimal-path membership analysis.
//!
//! Combines a forward distance table rooted at the start with a backward
//! distance table rooted at the goal. A state lies on at least one optimal
//! path iff its two distances sum to the global minimum cost; membership is
//! reported at position granularity with the orientation projected out.

use super::*;

/// Optimal cost and the positions on at least one optimal path.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct OptimalPaths {
    pub best_cost: Cost,
    /// Sorted in row-major order, without duplicates.
    pub positions: Vec<Position>,
}

/// Positions on at least one optimal path, given the completed forward and
/// backward distance tables and the optimal cost.
///
/// Pure over its inputs: the tables are not modified and repeated calls give
/// the same answer. A position qualifies if any orientation at it satisfies
/// `forward + backward == best`.
pub fn optimal_path_positions(
    forward: &DistanceTable<OrientedState>,
    backward: &DistanceTable<OrientedState>,
    best: Cost,
) -> Vec<Position> {
    let mut positions: Vec<Position> = forward
        .iter()
        .filter(|&(state, &cost)| {
            backward
                .get(state)
                .map(|&back| cost + back == best)
                .unwrap_or(false)
        })
        .map(|(state, _)| state.position)
        .collect();
    positions.sort_unstable();
    positions.dedup();
    positions
}

/// Finds the optimal cost from `S` to `E` under turn-cost movement, together
/// with every position that lies on at least one optimal path.
///
/// The solver runs twice: forward from the start facing east, and backward
/// from the goal over the reversed transition relation. The backward search
/// is seeded with all four orientations at cost 0, since the orientation in
/// which the goal is reached is unconstrained.
///
/// Returns `Ok(None)` when the end position is unreachable.
pub fn optimal_paths(
    grid: &Grid,
    costs: CostModel,
    config: &SolverConfig,
) -> Result<Option<OptimalPaths>, SolveFailure> {
    let start = grid
        .find(START)
        .map_err(|e| SolveFailure::BadInput(e.to_string()))?;
    let goal = grid
        .find(END)
        .map_err(|e| SolveFailure::BadInput(e.to_string()))?;

    let forward_graph = OrientedGraph::new(grid, goal, costs);
    let forward = explore(
        &forward_graph,
        [(OrientedState::new(start, Orientation::East), 0)],
        config,
    )?;
    let best = match goal_cost(&forward_graph, &forward) {
        Some(best) => best,
        None => return Ok(None),
    };

    let backward_graph = ReversedOrientedGraph::new(grid, goal, costs);
    let sources = Orientation::ALL.map(|facing| (OrientedState::new(goal, facing), 0));
    let backward = explore(&backward_graph, sources, config)?;

    let positions = optimal_path_positions(&forward.distances, &backward.distances, best);
    Ok(Some(OptimalPaths {
        best_cost: best,
        positions,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corridor_is_fully_on_path() {
        let grid = Grid::load("S.E\n").unwrap();
        let paths = optimal_paths(&grid, CostModel::default(), &SolverConfig::default())
            .unwrap()
            .unwrap();
        assert_eq!(paths.best_cost, 2);
        assert_eq!(
            paths.positions,
            vec![Position(0, 0), Position(0, 1), Position(0, 2)]
        );
    }

    #[test]
    fn test_turn_cost_excludes_detour() {
        // Going east first needs one turn; going south first needs two.
        let grid = Grid::load("S.\n.E\n").unwrap();
        let paths = optimal_paths(&grid, CostModel::default(), &SolverConfig::default())
            .unwrap()
            .unwrap();
        assert_eq!(paths.best_cost, 1002);
        assert_eq!(
            paths.positions,
            vec![Position(0, 0), Position(0, 1), Position(1, 1)]
        );
    }

    #[test]
    fn test_free_turns_admit_both_routes() {
        let grid = Grid::load("S.\n.E\n").unwrap();
        let costs = CostModel {
            move_cost: 1,
            turn_cost: 0,
        };
        let paths = optimal_paths(&grid, costs, &SolverConfig::default())
            .unwrap()
            .unwrap();
        assert_eq!(paths.best_cost, 2);
        assert_eq!(
            paths.positions,
            vec![
                Position(0, 0),
                Position(0, 1),
                Position(1, 0),
                Position(1, 1)
            ]
        );
    }

    #[test]
    fn test_start_equals_goal() {
        let grid = Grid::load("..\n..\n").unwrap();
        let costs = CostModel::default();
        let goal = Position(0, 0);
        let config = SolverConfig::default();

        let forward_graph = OrientedGraph::new(&grid, goal, costs);
        let forward = explore(
            &forward_graph,
            [(OrientedState::new(goal, Orientation::East), 0)],
            &config,
        )
        .unwrap();
        let best = goal_cost(&forward_graph, &forward).unwrap();
        assert_eq!(best, 0);

        let backward_graph = ReversedOrientedGraph::new(&grid, goal, costs);
        let sources = Orientation::ALL.map(|facing| (OrientedState::new(goal, facing), 0));
        let backward = explore(&backward_graph, sources, &config).unwrap();
        let positions = optimal_path_positions(&forward.distances, &backward.distances, best);
        assert_eq!(positions, vec![goal]);
    }

    #[test]
    fn test_unreachable_goal() {
        let grid = Grid::load("S#E\n").unwrap();
        let paths = optimal_paths(&grid, CostModel::default(), &SolverConfig::default()).unwrap();
        assert_eq!(paths, None);
    }

    #[test]
    fn test_membership_is_idempotent() {
        let grid = Grid::load("S..\n.#.\n..E\n").unwrap();
        let costs = CostModel::default();
        let goal = grid.find(END).unwrap();
        let start = grid.find(START).unwrap();
        let config = SolverConfig::default();

        let forward_graph = OrientedGraph::new(&grid, goal, costs);
        let forward = explore(
            &forward_graph,
            [(OrientedState::new(start, Orientation::East), 0)],
            &config,
        )
        .unwrap();
        let best = goal_cost(&forward_graph, &forward).unwrap();
        let backward_graph = ReversedOrientedGraph::new(&grid, goal, costs);
        let sources = Orientation::ALL.map(|facing| (OrientedState::new(goal, facing), 0));
        let backward = explore(&backward_graph, sources, &config).unwrap();

        let first = optimal_path_positions(&forward.distances, &backward.distances, best);
        let second = optimal_path_positions(&forward.distances, &backward.distances, best);
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }
}
