//! Transition relations consumed by the shortest-path solver.

use super::*;

/// Cost parameters for turn-cost movement. These are puzzle parameters, not
/// universal constants; problem files override the defaults.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug)]
pub struct CostModel {
    /// Cost of a single step forward.
    #[serde(default = "default_move_cost", rename = "moveCost")]
    pub move_cost: Cost,
    /// Cost of a quarter turn in place.
    #[serde(default = "default_turn_cost", rename = "turnCost")]
    pub turn_cost: Cost,
}

fn default_move_cost() -> Cost {
    1
}

fn default_turn_cost() -> Cost {
    1000
}

impl Default for CostModel {
    fn default() -> Self {
        CostModel {
            move_cost: default_move_cost(),
            turn_cost: default_turn_cost(),
        }
    }
}

/// Generic trait for the transition relation explored by the solver.
///
/// Implementations define which successor states follow from a state and at
/// what incremental cost, plus the goal test. Keeping this separate from the
/// solver lets one solver serve every movement rule; only the transition
/// rule and the cost model vary.
pub trait SearchGraph {
    type State: Copy + Eq + Ord + std::hash::Hash;

    /// Successor states with their incremental costs.
    fn successors(&self, state: Self::State) -> Vec<(Self::State, Cost)>;

    /// True iff the state satisfies the goal condition. Only the position
    /// takes part in the test; orientation is a free variable.
    fn is_goal(&self, state: Self::State) -> bool;
}

/// Forward transition relation for turn-cost movement on a grid.
///
/// Each state has up to three successors: one step forward (valid only when
/// the destination is in bounds and not blocked) and two quarter turns in
/// place, which are always valid since turning does not change position.
pub struct OrientedGraph<'a> {
    grid: &'a Grid,
    goal: Position,
    costs: CostModel,
}

impl<'a> OrientedGraph<'a> {
    pub fn new(grid: &'a Grid, goal: Position, costs: CostModel) -> OrientedGraph<'a> {
        OrientedGraph { grid, goal, costs }
    }
}

impl SearchGraph for OrientedGraph<'_> {
    type State = OrientedState;

    fn successors(&self, state: OrientedState) -> Vec<(OrientedState, Cost)> {
        let OrientedState { position, facing } = state;
        let mut out = Vec::with_capacity(3);
        if let Some(next) = self.grid.offset(position, facing.displacement()) {
            if !self.grid.is_blocked(next) {
                out.push((OrientedState::new(next, facing), self.costs.move_cost));
            }
        }
        out.push((
            OrientedState::new(position, facing.clockwise()),
            self.costs.turn_cost,
        ));
        out.push((
            OrientedState::new(position, facing.counterclockwise()),
            self.costs.turn_cost,
        ));
        out
    }

    fn is_goal(&self, state: OrientedState) -> bool {
        state.position == self.goal
    }
}

/// Reversed transition relation over the same state space.
///
/// For every forward transition `A -> B` with cost `c` this graph has
/// `B -> A` with cost `c`: the forward step is undone by moving against the
/// facing, and turns are self-inverse in cost. Distances computed from the
/// goal over this graph equal forward distances to the goal.
pub struct ReversedOrientedGraph<'a> {
    grid: &'a Grid,
    goal: Position,
    costs: CostModel,
}

impl<'a> ReversedOrientedGraph<'a> {
    pub fn new(grid: &'a Grid, goal: Position, costs: CostModel) -> ReversedOrientedGraph<'a> {
        ReversedOrientedGraph { grid, goal, costs }
    }
}

impl SearchGraph for ReversedOrientedGraph<'_> {
    type State = OrientedState;

    fn successors(&self, state: OrientedState) -> Vec<(OrientedState, Cost)> {
        let OrientedState { position, facing } = state;
        let mut out = Vec::with_capacity(3);
        let back = facing.opposite().displacement();
        if let Some(prev) = self.grid.offset(position, back) {
            if !self.grid.is_blocked(prev) {
                out.push((OrientedState::new(prev, facing), self.costs.move_cost));
            }
        }
        out.push((
            OrientedState::new(position, facing.clockwise()),
            self.costs.turn_cost,
        ));
        out.push((
            OrientedState::new(position, facing.counterclockwise()),
            self.costs.turn_cost,
        ));
        out
    }

    fn is_goal(&self, state: OrientedState) -> bool {
        state.position == self.goal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_3x3() -> Grid {
        Grid::load("...\n...\n...\n").unwrap()
    }

    #[test]
    fn test_forward_successors() {
        let grid = open_3x3();
        let graph = OrientedGraph::new(&grid, Position(0, 0), CostModel::default());
        let state = OrientedState::new(Position(1, 1), Orientation::East);
        let succ = graph.successors(state);
        assert_eq!(
            succ,
            vec![
                (OrientedState::new(Position(1, 2), Orientation::East), 1),
                (OrientedState::new(Position(1, 1), Orientation::South), 1000),
                (OrientedState::new(Position(1, 1), Orientation::North), 1000),
            ]
        );
    }

    #[test]
    fn test_forward_blocked_by_wall() {
        let grid = Grid::load("...\n.#.\n...\n").unwrap();
        let graph = OrientedGraph::new(&grid, Position(0, 0), CostModel::default());
        let state = OrientedState::new(Position(1, 0), Orientation::East);
        let succ = graph.successors(state);
        // Only the two turns; the step east runs into the wall.
        assert_eq!(succ.len(), 2);
        assert!(succ.iter().all(|(s, c)| s.position == Position(1, 0) && *c == 1000));
    }

    #[test]
    fn test_forward_blocked_by_edge() {
        let grid = open_3x3();
        let graph = OrientedGraph::new(&grid, Position(0, 0), CostModel::default());
        let state = OrientedState::new(Position(0, 1), Orientation::North);
        assert_eq!(graph.successors(state).len(), 2);
    }

    #[test]
    fn test_reverse_inverts_moves() {
        let grid = open_3x3();
        let costs = CostModel::default();
        let forward = OrientedGraph::new(&grid, Position(0, 0), costs);
        let reverse = ReversedOrientedGraph::new(&grid, Position(0, 0), costs);

        let a = OrientedState::new(Position(1, 1), Orientation::East);
        for (b, cost) in forward.successors(a) {
            assert!(reverse.successors(b).contains(&(a, cost)));
        }
    }
}
