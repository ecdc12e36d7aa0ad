use crate::*;
pub use random::*;

mod random;

/// Inclusive range cell values are drawn from.
pub const VALUE_MIN: Value = 1;
pub const VALUE_MAX: Value = 15;

/// Inclusive range the per-round required selection count is drawn from.
pub const REQUIRED_MIN: u8 = 3;
pub const REQUIRED_MAX: u8 = 6;

pub trait PuzzleGenerator {
    fn generate(&mut self, config: GridConfig) -> Result<Puzzle>;
}
