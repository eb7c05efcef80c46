//! Primitive data types.

/// Data type for grid coordinates (row and column indices).
pub type Coord = usize;
/// Data type for accumulated path costs.
pub type Cost = u64;
/// Data type for step counts in uniform-cost searches.
pub type StepCount = u32;
/// Data type for counting results (positions, paths, cheat pairs).
pub type Count = u64;
