//! Lowest-cost exploration of augmented state spaces.
//!
//! This is a generalized Dijkstra search: states and transitions come from a
//! [`SearchGraph`] implementation, so the same loop serves every movement
//! rule. The search exhausts the reachable state space instead of stopping
//! at the first goal state, since later queries (optimal-path membership,
//! reverse distances) need the full distance table.

use super::*;

use crate::ALLOCATOR;

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Lowest known cost for each reached state.
pub type DistanceTable<S> = HashMap<S, Cost>;

/// Output of [`explore`].
#[derive(Clone, Debug)]
pub struct SearchResult<S> {
    /// Lowest cost for every state reachable from the sources.
    pub distances: DistanceTable<S>,
    /// Number of expanded states. Stale frontier entries are not counted.
    pub expanded: usize,
    /// Maximum memory usage in bytes, sampled during exploration.
    pub max_memory: usize,
}

/// An entry of the frontier priority queue.
///
/// The ordering is flipped so that [`BinaryHeap`], a max-heap, pops the
/// cheapest entry first. Ties are broken on the state so that the expansion
/// order does not depend on insertion order.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
struct FrontierEntry<S> {
    cost: Cost,
    state: S,
}

impl<S: Eq + Ord> Ord for FrontierEntry<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.state.cmp(&self.state))
    }
}

impl<S: Eq + Ord> PartialOrd for FrontierEntry<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Explores the state space of the given graph from the given source states,
/// computing the lowest cost to reach every reachable state.
///
/// Superseded frontier entries are dropped lazily: each state may be pushed
/// multiple times, and pops that no longer match the distance table are
/// skipped without expansion.
///
/// Returns [`SolveFailure::OutOfMemory`] if a memory usage sample during
/// exploration exceeds the limit in `config`.
pub fn explore<G: SearchGraph>(
    graph: &G,
    sources: impl IntoIterator<Item = (G::State, Cost)>,
    config: &SolverConfig,
) -> Result<SearchResult<G::State>, SolveFailure> {
    const MEMORY_SAMPLE_PERIOD: usize = 2_usize.pow(15);
    let mut max_memory: usize = 0;

    let mut distances: DistanceTable<G::State> = DistanceTable::default();
    let mut frontier: BinaryHeap<FrontierEntry<G::State>> = BinaryHeap::new();
    for (state, cost) in sources {
        match distances.get(&state) {
            Some(&known) if known <= cost => {}
            _ => {
                distances.insert(state, cost);
                frontier.push(FrontierEntry { cost, state });
            }
        }
    }

    let mut expanded: usize = 0;
    while let Some(FrontierEntry { cost, state }) = frontier.pop() {
        match distances.get(&state) {
            // A cheaper path to this state was expanded earlier.
            Some(&known) if known < cost => continue,
            _ => {}
        }

        expanded += 1;
        if expanded % MEMORY_SAMPLE_PERIOD == 0 {
            let allocated = ALLOCATOR.allocated();
            max_memory = std::cmp::max(max_memory, allocated);
            if allocated > config.max_memory {
                return Err(SolveFailure::OutOfMemory {
                    used: max_memory,
                    limit: config.max_memory,
                });
            }
        }

        for (successor, step) in graph.successors(state) {
            let successor_cost = cost + step;
            match distances.get(&successor) {
                Some(&known) if known <= successor_cost => {}
                _ => {
                    distances.insert(successor, successor_cost);
                    frontier.push(FrontierEntry {
                        cost: successor_cost,
                        state: successor,
                    });
                }
            }
        }
    }

    let allocated = ALLOCATOR.allocated();
    max_memory = std::cmp::max(max_memory, allocated);

    Ok(SearchResult {
        distances,
        expanded,
        max_memory,
    })
}

/// Lowest cost over all goal states in the distance table, or `None` if no
/// goal state was reached.
///
/// The whole table is scanned since the goal condition ignores orientation;
/// the cheapest goal state is not necessarily the first one expanded.
pub fn goal_cost<G: SearchGraph>(graph: &G, result: &SearchResult<G::State>) -> Option<Cost> {
    result
        .distances
        .iter()
        .filter(|(&state, _)| graph.is_goal(state))
        .map(|(_, &cost)| cost)
        .min()
}

/// Lowest cost from the start marker to the end marker under turn-cost
/// movement. The initial state faces [`Orientation::East`].
///
/// Returns `Ok(None)` when the end position is unreachable.
pub fn shortest_cost(
    grid: &Grid,
    costs: CostModel,
    config: &SolverConfig,
) -> Result<Option<Cost>, SolveFailure> {
    let start = grid
        .find(START)
        .map_err(|e| SolveFailure::BadInput(e.to_string()))?;
    let goal = grid
        .find(END)
        .map_err(|e| SolveFailure::BadInput(e.to_string()))?;
    let graph = OrientedGraph::new(grid, goal, costs);
    let source = OrientedState::new(start, Orientation::East);
    let result = explore(&graph, [(source, 0)], config)?;
    Ok(goal_cost(&graph, &result))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explore_corridor() {
        let grid = Grid::load("...\n").unwrap();
        let graph = OrientedGraph::new(&grid, Position(0, 2), CostModel::default());
        let source = OrientedState::new(Position(0, 0), Orientation::East);
        let result = explore(&graph, [(source, 0)], &SolverConfig::default()).unwrap();

        assert_eq!(
            result.distances[&OrientedState::new(Position(0, 2), Orientation::East)],
            2
        );
        // Facing back the way we came costs two extra turns.
        assert_eq!(
            result.distances[&OrientedState::new(Position(0, 2), Orientation::West)],
            2002
        );
        assert_eq!(goal_cost(&graph, &result), Some(2));
    }

    #[test]
    fn test_explore_is_deterministic() {
        let grid = Grid::load("....\n.#..\n..#.\n....\n").unwrap();
        let graph = OrientedGraph::new(&grid, Position(3, 3), CostModel::default());
        let source = OrientedState::new(Position(0, 0), Orientation::East);
        let config = SolverConfig::default();

        let first = explore(&graph, [(source, 0)], &config).unwrap();
        let second = explore(&graph, [(source, 0)], &config).unwrap();
        assert_eq!(first.expanded, second.expanded);
        assert_eq!(first.distances, second.distances);
    }

    #[test]
    fn test_shortest_cost_prefers_fewer_turns() {
        // The only route is down, then right: one turn at the start and one
        // at the corner, plus four moves.
        let grid = Grid::load("S.#\n.##\n..E\n").unwrap();
        let cost = shortest_cost(&grid, CostModel::default(), &SolverConfig::default()).unwrap();
        assert_eq!(cost, Some(2004));
    }

    #[test]
    fn test_shortest_cost_unreachable() {
        let grid = Grid::load("S#E\n###\n").unwrap();
        let cost = shortest_cost(&grid, CostModel::default(), &SolverConfig::default()).unwrap();
        assert_eq!(cost, None);
    }

    #[test]
    fn test_shortest_cost_missing_marker() {
        let grid = Grid::load("S..\n...\n").unwrap();
        let result = shortest_cost(&grid, CostModel::default(), &SolverConfig::default());
        assert!(matches!(result, Err(SolveFailure::BadInput(_))));
    }

    #[test]
    fn test_explore_memory_limit() {
        // Large enough that the exploration reaches a memory sample.
        let row = format!("{}\n", ".".repeat(128));
        let grid = Grid::load(&row.repeat(128)).unwrap();
        let graph = OrientedGraph::new(&grid, Position(127, 127), CostModel::default());
        let source = OrientedState::new(Position(0, 0), Orientation::East);
        let config = SolverConfig { max_memory: 1 };

        let result = explore(&graph, [(source, 0)], &config);
        assert!(matches!(
            result,
            Err(SolveFailure::OutOfMemory { limit: 1, .. })
        ));
    }
}
