use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;

/// Seed-driven generation strategy: draws one solution of the chosen size,
/// embeds those exact values in the grid, fills the rest uniformly, and
/// shuffles so the solution positions are indistinguishable from filler.
#[derive(Clone, Debug)]
pub struct RandomPuzzleGenerator {
    rng: SmallRng,
}

impl RandomPuzzleGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl PuzzleGenerator for RandomPuzzleGenerator {
    fn generate(&mut self, config: GridConfig) -> Result<Puzzle> {
        let total = config.total_cells();

        // Checked against the top of the draw range, so a given config either
        // always generates or never does.
        if total < REQUIRED_MAX as CellCount {
            log::warn!(
                "Grid {}x{} cannot fit {} selections",
                config.rows,
                config.cols,
                REQUIRED_MAX
            );
            return Err(GameError::GridTooSmall);
        }

        let required_count = self.rng.random_range(REQUIRED_MIN..=REQUIRED_MAX);

        // The embedded solution: these exact values land in the final grid,
        // so at least one subset of `required_count` cells sums to the target.
        let mut values: Vec<Value> = (0..required_count)
            .map(|_| self.rng.random_range(VALUE_MIN..=VALUE_MAX))
            .collect();
        let target_sum: SumValue = values.iter().map(|&v| v as SumValue).sum();

        // Filler draws may well create extra solutions; that is fine.
        while values.len() < total as usize {
            values.push(self.rng.random_range(VALUE_MIN..=VALUE_MAX));
        }
        values.shuffle(&mut self.rng);

        log::debug!(
            "Generated {}x{} puzzle, {} cells summing to {}",
            config.rows,
            config.cols,
            required_count,
            target_sum
        );

        Puzzle::from_values(config.size(), values, target_sum, required_count)
    }
}
