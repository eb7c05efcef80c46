//! Search engines over grid state spaces.
//!
//! Each submodule answers one family of queries:
//! - [`dijkstra`]: lowest-cost exploration of an augmented state space.
//! - [`membership`]: which positions lie on at least one optimal path.
//! - [`trails`]: reachable-summit and distinct-path counts on height maps.
//! - [`cheats`]: shortcut counting under a relaxed movement budget.
//! - [`patrol`]: guard walk simulation and obstruction counting.
//!
//! The solvers are written against the [`SearchGraph`] trait, so movement
//! rules and cost models can change without touching the exploration code.

use crate::grid::*;
use crate::types::*;
use crate::SolveFailure;

use serde::{Deserialize, Serialize};

#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

mod cheats;
mod dijkstra;
mod graph;
mod membership;
mod patrol;
mod state;
mod trails;

pub use cheats::*;
pub use dijkstra::*;
pub use graph::*;
pub use membership::*;
pub use patrol::*;
pub use state::*;
pub use trails::*;

/// Runtime limits for solvers.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SolverConfig {
    /// Maximum memory usage in bytes. Exploration is aborted with
    /// [`SolveFailure::OutOfMemory`] when a sample exceeds this.
    #[serde(default = "default_max_memory")]
    pub max_memory: usize,
}

fn default_max_memory() -> usize {
    usize::MAX
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            max_memory: default_max_memory(),
        }
    }
}
