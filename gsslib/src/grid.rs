//! Grid model.
//!
//! Wraps a rectangular ASCII grid and answers the queries every solver needs:
//! bounds checks, cell classification, and marker lookup. Marker positions
//! are collected once at load time so repeated lookups cost nothing.

use crate::types::*;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

/// Cell symbol for an impassable wall.
pub const WALL: u8 = b'#';
/// Cell symbol for an open cell.
pub const OPEN: u8 = b'.';
/// Cell symbol marking the start position.
pub const START: u8 = b'S';
/// Cell symbol marking the end position.
pub const END: u8 = b'E';
/// Cell symbol marking the patrol guard, facing north.
pub const GUARD: u8 = b'^';

/// Zero-indexed (row, column) pair, counted from the top-left corner.
/// Serialized to JSON as an array of length 2.
#[derive(Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
pub struct Position(pub Coord, pub Coord);

/// Represents the ways loading a grid or looking up a marker can fail.
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum GridError {
    /// A row's length differs from the first row's length.
    Malformed {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// No cell carries the requested marker symbol.
    MarkerNotFound { symbol: char },
    /// A marker that must be unique appears on more than one cell.
    AmbiguousMarker { symbol: char, count: usize },
}

impl std::error::Error for GridError {}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            GridError::Malformed {
                row,
                expected,
                found,
            } => {
                write!(
                    f,
                    "Row {} has {} cells, expected {}.",
                    row, found, expected
                )
            }
            GridError::MarkerNotFound { symbol } => {
                write!(f, "Marker '{}' not found in grid.", symbol)
            }
            GridError::AmbiguousMarker { symbol, count } => {
                write!(f, "Marker '{}' found on {} cells, expected 1.", symbol, count)
            }
        }
    }
}

/// An immutable rectangular character grid.
///
/// Built once from input text and never mutated afterwards; obstruction
/// trials and similar what-if queries pass their modification alongside the
/// grid instead of copying it.
pub struct Grid {
    cells: Array2<u8>,
    markers: HashMap<u8, Vec<Position>>,
}

impl Grid {
    /// Parses rectangular text into a grid.
    ///
    /// Blank lines are ignored, which tolerates leading and trailing
    /// newlines in fixture strings. Returns [`GridError::Malformed`] if the
    /// remaining rows have unequal lengths.
    pub fn load(text: &str) -> Result<Grid, GridError> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .collect();
        let height = rows.len();
        let width = rows.first().map(|row| row.len()).unwrap_or(0);

        for (r, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(GridError::Malformed {
                    row: r,
                    expected: width,
                    found: row.len(),
                });
            }
        }

        let mut cells = Array2::from_elem((height, width), OPEN);
        let mut markers: HashMap<u8, Vec<Position>> = HashMap::new();
        for (r, row) in rows.iter().enumerate() {
            for (c, symbol) in row.bytes().enumerate() {
                cells[(r, c)] = symbol;
                markers.entry(symbol).or_default().push(Position(r, c));
            }
        }

        Ok(Grid { cells, markers })
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Symbol at the given position. Panics if out of bounds.
    pub fn cell(&self, pos: Position) -> u8 {
        self.cells[(pos.0, pos.1)]
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.0 < self.height() && pos.1 < self.width()
    }

    /// True iff the cell at the given position is a wall.
    pub fn is_blocked(&self, pos: Position) -> bool {
        self.cell(pos) == WALL
    }

    /// Returns the unique position of a marker symbol.
    pub fn find(&self, symbol: u8) -> Result<Position, GridError> {
        match self.positions_of(symbol) {
            [] => Err(GridError::MarkerNotFound {
                symbol: symbol as char,
            }),
            [position] => Ok(*position),
            found => Err(GridError::AmbiguousMarker {
                symbol: symbol as char,
                count: found.len(),
            }),
        }
    }

    /// All positions carrying the given symbol, in row-major order.
    /// Empty for symbols that do not occur.
    pub fn positions_of(&self, symbol: u8) -> &[Position] {
        self.markers
            .get(&symbol)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Applies a (row, column) displacement with bounds checking.
    pub fn offset(&self, pos: Position, delta: (isize, isize)) -> Option<Position> {
        let row = pos.0.checked_add_signed(delta.0)?;
        let col = pos.1.checked_add_signed(delta.1)?;
        let next = Position(row, col);
        if self.in_bounds(next) {
            Some(next)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for row in self.cells.rows() {
            for &symbol in row.iter() {
                write!(f, "{}", symbol as char)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
