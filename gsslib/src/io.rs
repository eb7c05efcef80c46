//! Input output module.
//!
//! Contains the problem description format, query dispatch, and result
//! reports. Problem files are JSON or YAML documents naming a grid and one
//! query with its parameters.

use crate::grid::*;
use crate::search::*;
use crate::types::*;
use crate::{SolveFailure, ALLOCATOR};

use serde::{Deserialize, Serialize};

pub mod fs;


fn default_move_cost() -> Cost {
    CostModel::default().move_cost
}

fn default_turn_cost() -> Cost {
    CostModel::default().turn_cost
}

/// A query to run against a grid.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind")]
pub enum Query {
    /// Minimum cost from the start marker to the end marker under turn-cost
    /// movement.
    #[serde(rename_all = "camelCase")]
    ShortestPath {
        #[serde(default = "default_move_cost")]
        move_cost: Cost,
        #[serde(default = "default_turn_cost")]
        turn_cost: Cost,
    },
    /// Number of positions on at least one optimal path.
    #[serde(rename_all = "camelCase")]
    BestSeats {
        #[serde(default = "default_move_cost")]
        move_cost: Cost,
        #[serde(default = "default_turn_cost")]
        turn_cost: Cost,
    },
    /// Number of wall-ignoring shortcuts that save at least `minSaving`
    /// steps.
    #[serde(rename_all = "camelCase")]
    CheatCount {
        max_steps: StepCount,
        min_saving: StepCount,
    },
    /// Sum of reachable-summit counts over all trailheads.
    TrailScores,
    /// Sum of distinct-trail counts over all trailheads.
    TrailRatings,
    /// Patrol simulation from the guard marker.
    PatrolCoverage,
    /// Number of obstruction placements that trap the guard in a loop.
    PatrolObstructions {
        /// Worker thread count; 0 uses the available parallelism.
        #[serde(default)]
        threads: usize,
    },
}

impl Query {
    /// Short name of the query kind, as used in problem files.
    pub fn kind(&self) -> &'static str {
        match self {
            Query::ShortestPath { .. } => "ShortestPath",
            Query::BestSeats { .. } => "BestSeats",
            Query::CheatCount { .. } => "CheatCount",
            Query::TrailScores => "TrailScores",
            Query::TrailRatings => "TrailRatings",
            Query::PatrolCoverage => "PatrolCoverage",
            Query::PatrolObstructions { .. } => "PatrolObstructions",
        }
    }
}

/// Represents a grid search problem.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GridProblem {
    pub name: Option<String>,
    /// Grid text. In problem files this may instead be a path to a grid
    /// file, resolved by [`GridProblem::read_from_file`].
    pub grid: String,
    pub query: Query,
    /// Solver limits.
    #[serde(default)]
    pub config: SolverConfig,
}

impl GridProblem {
    /// Prepare this problem before solving: parse the grid text and validate
    /// the query parameters.
    pub fn prepare(self) -> Result<(Grid, Query, SolverConfig), SolveFailure> {
        let GridProblem {
            name: _,
            grid,
            query,
            config,
        } = self;
        let grid = Grid::load(&grid).map_err(|e| SolveFailure::BadInput(e.to_string()))?;
        if let Query::CheatCount { min_saving: 0, .. } = query {
            return Err(SolveFailure::BadInput(String::from(
                "minSaving must be at least 1",
            )));
        }
        Ok((grid, query, config))
    }

    /// Solves the query in this problem and returns a [`SolveReport`] on
    /// success.
    pub fn solve(self) -> Result<SolveReport, SolveFailure> {
        let name = self.name.clone();
        let start_time = std::time::Instant::now();
        let (grid, query, config) = self.prepare()?;
        let (result, max_memory) = dispatch(&grid, &query, &config)?;
        let total_time = start_time.elapsed().as_secs_f64();
        Ok(SolveReport {
            name,
            total_time,
            max_memory,
            result,
        })
    }
}

/// Runs a query against a prepared grid. Returns the outcome together with
/// the maximum memory usage in bytes.
fn dispatch(
    grid: &Grid,
    query: &Query,
    config: &SolverConfig,
) -> Result<(QueryOutcome, usize), SolveFailure> {
    match *query {
        Query::ShortestPath {
            move_cost,
            turn_cost,
        } => {
            let costs = CostModel {
                move_cost,
                turn_cost,
            };
            let (start, goal) = endpoint_markers(grid)?;
            let graph = OrientedGraph::new(grid, goal, costs);
            let source = OrientedState::new(start, Orientation::East);
            let result = explore(&graph, [(source, 0)], config)?;
            let cost = goal_cost(&graph, &result);
            Ok((QueryOutcome::ShortestPath { cost }, result.max_memory))
        }
        Query::BestSeats {
            move_cost,
            turn_cost,
        } => {
            let costs = CostModel {
                move_cost,
                turn_cost,
            };
            let (start, goal) = endpoint_markers(grid)?;
            let forward_graph = OrientedGraph::new(grid, goal, costs);
            let source = OrientedState::new(start, Orientation::East);
            let forward = explore(&forward_graph, [(source, 0)], config)?;
            let best = match goal_cost(&forward_graph, &forward) {
                Some(best) => best,
                None => {
                    let outcome = QueryOutcome::BestSeats {
                        best_cost: None,
                        seats: 0,
                    };
                    return Ok((outcome, forward.max_memory));
                }
            };

            let backward_graph = ReversedOrientedGraph::new(grid, goal, costs);
            let sources = Orientation::ALL.map(|facing| (OrientedState::new(goal, facing), 0));
            let backward = explore(&backward_graph, sources, config)?;

            let positions = optimal_path_positions(&forward.distances, &backward.distances, best);
            let outcome = QueryOutcome::BestSeats {
                best_cost: Some(best),
                seats: positions.len() as Count,
            };
            Ok((outcome, forward.max_memory.max(backward.max_memory)))
        }
        Query::CheatCount {
            max_steps,
            min_saving,
        } => {
            let cheats = count_cheats(grid, max_steps, min_saving)?;
            Ok((QueryOutcome::CheatCount { cheats }, ALLOCATOR.allocated()))
        }
        Query::TrailScores => {
            let total = trailhead_scores(grid);
            Ok((QueryOutcome::TrailScores { total }, ALLOCATOR.allocated()))
        }
        Query::TrailRatings => {
            let total = trailhead_ratings(grid);
            Ok((QueryOutcome::TrailRatings { total }, ALLOCATOR.allocated()))
        }
        Query::PatrolCoverage => {
            let outcome = patrol(grid)?;
            Ok((
                QueryOutcome::PatrolCoverage { outcome },
                ALLOCATOR.allocated(),
            ))
        }
        Query::PatrolObstructions { threads } => {
            let loops = count_looping_obstructions(grid, threads)?;
            Ok((
                QueryOutcome::PatrolObstructions { loops },
                ALLOCATOR.allocated(),
            ))
        }
    }
}

fn endpoint_markers(grid: &Grid) -> Result<(Position, Position), SolveFailure> {
    let start = grid
        .find(START)
        .map_err(|e| SolveFailure::BadInput(e.to_string()))?;
    let goal = grid
        .find(END)
        .map_err(|e| SolveFailure::BadInput(e.to_string()))?;
    Ok((start, goal))
}

/// Result value of a query, tagged with the query kind.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind")]
pub enum QueryOutcome {
    /// `cost` is `null` when the end marker is unreachable.
    #[serde(rename_all = "camelCase")]
    ShortestPath { cost: Option<Cost> },
    /// `bestCost` is `null` and `seats` 0 when the end marker is
    /// unreachable.
    #[serde(rename_all = "camelCase")]
    BestSeats {
        best_cost: Option<Cost>,
        seats: Count,
    },
    CheatCount { cheats: Count },
    TrailScores { total: Count },
    TrailRatings { total: Count },
    PatrolCoverage { outcome: PatrolOutcome },
    PatrolObstructions { loops: Count },
}

/// The response to a query against a grid.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SolveReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Total time to solve the query in seconds.
    pub total_time: f64,
    /// Maximum memory usage in bytes.
    pub max_memory: usize,
    pub result: QueryOutcome,
}
