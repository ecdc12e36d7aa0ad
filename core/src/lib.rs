use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::ops::Index;

pub use cell::*;
pub use error::*;
pub use generator::*;
pub use session::*;
pub use snapshot::*;
pub use types::*;

mod cell;
mod error;
mod generator;
mod session;
mod snapshot;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub rows: Coord,
    pub cols: Coord,
}

impl GridConfig {
    pub const fn new_unchecked(rows: Coord, cols: Coord) -> Self {
        Self { rows, cols }
    }

    pub fn new(rows: Coord, cols: Coord) -> Self {
        Self::new_unchecked(rows.clamp(1, Coord::MAX), cols.clamp(1, Coord::MAX))
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }
}

impl Default for GridConfig {
    /// The reference board size (4 rows by 5 columns).
    fn default() -> Self {
        Self::new_unchecked(4, 5)
    }
}

/// One round's immutable puzzle: the dense value grid, the hidden target sum,
/// and how many cells the player must select. Values never change after
/// construction; per-cell player state lives in the session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Puzzle {
    values: Array2<Value>,
    target_sum: SumValue,
    required_count: u8,
}

impl Puzzle {
    /// Builds a puzzle from row-major values.
    pub fn from_values(
        size: Coord2,
        values: Vec<Value>,
        target_sum: SumValue,
        required_count: u8,
    ) -> Result<Self> {
        if values.len() != mult(size.0, size.1) as usize {
            return Err(GameError::InvalidBoardShape);
        }
        let values = Array2::from_shape_vec(size.to_nd_index(), values)
            .map_err(|_| GameError::InvalidBoardShape)?;
        Self::from_value_grid(values, target_sum, required_count)
    }

    pub fn from_value_grid(
        values: Array2<Value>,
        target_sum: SumValue,
        required_count: u8,
    ) -> Result<Self> {
        let puzzle = Self {
            values,
            target_sum,
            required_count,
        };
        puzzle.validate()?;
        Ok(puzzle)
    }

    fn validate(&self) -> Result<()> {
        let (rows, cols) = self.values.dim();
        if rows == 0 || cols == 0 || rows > Coord::MAX as usize || cols > Coord::MAX as usize {
            return Err(GameError::InvalidBoardShape);
        }
        if self.target_sum == 0 {
            return Err(GameError::InvalidBoardShape);
        }
        if self.required_count == 0 || self.required_count as CellCount > self.total_cells() {
            return Err(GameError::GridTooSmall);
        }
        Ok(())
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.values.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn total_cells(&self) -> CellCount {
        self.values.len().try_into().unwrap()
    }

    pub const fn target_sum(&self) -> SumValue {
        self.target_sum
    }

    pub const fn required_count(&self) -> u8 {
        self.required_count
    }
}

impl Index<Coord2> for Puzzle {
    type Output = Value;

    fn index(&self, (row, col): Coord2) -> &Self::Output {
        &self.values[(row as usize, col as usize)]
    }
}

/// Outcome of a tap-driven selection change.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TapOutcome {
    NoChange,
    Selected,
    Deselected,
    LimitReached,
}

impl TapOutcome {
    /// Whether this outcome could have caused an update to the session.
    pub const fn has_update(self) -> bool {
        use TapOutcome::*;
        match self {
            NoChange => false,
            Selected => true,
            Deselected => true,
            LimitReached => true,
        }
    }
}

/// Outcome of checking the current selection against the target.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ValidateOutcome {
    Matched,
    Rejected,
}

impl ValidateOutcome {
    pub const fn is_match(self) -> bool {
        matches!(self, Self::Matched)
    }
}
