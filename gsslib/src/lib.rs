//! # Grid State-Space Search Library
//!
//! Common functionality for the grid search engine and its command line interface.

use serde::{Deserialize, Serialize};

pub mod grid;
pub mod io;
pub mod search;
pub mod types;

#[global_allocator]
static ALLOCATOR: cap::Cap<std::alloc::System> = cap::Cap::new(std::alloc::System, usize::MAX);

/// Represents the reasons why a solve attempt might fail.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(tag = "type", content = "content")] // content will be used for BadInput(String)
pub enum SolveFailure {
    BadInput(String),
    OutOfMemory { used: usize, limit: usize },
}

impl std::error::Error for SolveFailure {}

impl std::fmt::Display for SolveFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            SolveFailure::BadInput(reason) => write!(f, "Bad input: {}", reason),
            SolveFailure::OutOfMemory { used, limit } => {
                write!(f, "Out of memory! Used {} of {}.", used, limit)
            }
        }
    }
}
