use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use web_time::{Duration, Instant};

use crate::*;

/// How long the error flash stays up before auto-reverting.
pub const ERROR_REVERT_DELAY: Duration = Duration::from_millis(500);

/// How long the match celebration stays up before auto-reverting.
pub const MATCH_REVERT_DELAY: Duration = Duration::from_millis(5000);

/// Valid transitions:
/// - Idle -> Error (rejected tap or failed validation)
/// - Idle -> Matched (successful validation)
/// - Error/Matched -> Idle (deadline tick, or any definitive transition)
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SessionStatus {
    Idle,
    Error,
    Matched,
}

impl SessionStatus {
    pub const fn is_transient(self) -> bool {
        matches!(self, Self::Error | Self::Matched)
    }
}

impl Default for SessionStatus {
    fn default() -> Self {
        Self::Idle
    }
}

/// Drives one player's rounds from puzzle generation to match or skip: owns
/// the current puzzle, the tap-driven selection, and the transient status
/// flash with its reversion deadline. One sequential event stream per
/// session; sessions are fully independent of each other.
#[derive(Clone, Debug)]
pub struct GridSession<G = RandomPuzzleGenerator> {
    config: GridConfig,
    generator: G,
    puzzle: Puzzle,
    marks: Array2<CellMark>,
    selected: SmallVec<[Coord2; REQUIRED_MAX as usize]>,
    current_sum: SumValue,
    status: SessionStatus,
    revert_at: Option<Instant>,
    move_count: u32,
    round: u32,
    round_started_at: Instant,
}

impl GridSession<RandomPuzzleGenerator> {
    /// Session backed by the shipped random generator.
    pub fn from_seed(config: GridConfig, seed: u64) -> Result<Self> {
        Self::new(config, RandomPuzzleGenerator::new(seed))
    }
}

impl<G: PuzzleGenerator> GridSession<G> {
    pub fn new(config: GridConfig, mut generator: G) -> Result<Self> {
        let puzzle = generator.generate(config)?;
        let marks = Array2::default(puzzle.size().to_nd_index());
        Ok(Self {
            config,
            generator,
            puzzle,
            marks,
            selected: SmallVec::new(),
            current_sum: 0,
            status: SessionStatus::Idle,
            revert_at: None,
            move_count: 0,
            round: 1,
            round_started_at: Instant::now(),
        })
    }

    /// Selects the cell at `coords`, or deselects it if it is already part of
    /// the selection. Tapping past the required count leaves the selection
    /// untouched and flashes the error status.
    pub fn select_cell(&mut self, coords: Coord2) -> Result<TapOutcome> {
        let coords = self.puzzle.validate_coords(coords)?;

        if self.marks[coords.to_nd_index()].is_selected() {
            return self.deselect_cell(coords);
        }

        if self.marks[coords.to_nd_index()].is_locked() {
            return Ok(TapOutcome::NoChange);
        }

        if self.selected.len() >= self.puzzle.required_count() as usize {
            log::debug!(
                "Selection limit {} reached, rejecting {:?}",
                self.puzzle.required_count(),
                coords
            );
            self.flash(SessionStatus::Error, ERROR_REVERT_DELAY);
            return Ok(TapOutcome::LimitReached);
        }

        self.selected.push(coords);
        self.marks[coords.to_nd_index()] = CellMark::Selected;
        self.recompute_sum();
        self.move_count = self.move_count.saturating_add(1);
        log::trace!(
            "Selected {:?} = {}, sum now {}",
            coords,
            self.puzzle[coords],
            self.current_sum
        );
        Ok(TapOutcome::Selected)
    }

    /// Removes `coords` from the selection; not an error when absent.
    pub fn deselect_cell(&mut self, coords: Coord2) -> Result<TapOutcome> {
        let coords = self.puzzle.validate_coords(coords)?;

        let Some(index) = self.selected.iter().position(|&pos| pos == coords) else {
            return Ok(TapOutcome::NoChange);
        };

        self.selected.remove(index);
        self.marks[coords.to_nd_index()] = CellMark::Clear;
        self.recompute_sum();
        self.move_count = self.move_count.saturating_add(1);
        log::trace!("Deselected {:?}, sum now {}", coords, self.current_sum);
        Ok(TapOutcome::Deselected)
    }

    /// Checks the selection against the target. Both outcomes leave the
    /// selection in place: after a miss the player adjusts, after a match the
    /// caller decides when to advance the round.
    pub fn validate_and_lock(&mut self) -> ValidateOutcome {
        let complete = self.selected.len() == self.puzzle.required_count() as usize;

        if complete && self.current_sum == self.puzzle.target_sum() {
            log::debug!(
                "Match: {} cells summing to {}",
                self.selected.len(),
                self.current_sum
            );
            self.flash(SessionStatus::Matched, MATCH_REVERT_DELAY);
            ValidateOutcome::Matched
        } else {
            log::debug!(
                "No match: {} cells summing to {}, target {}",
                self.selected.len(),
                self.current_sum,
                self.puzzle.target_sum()
            );
            self.flash(SessionStatus::Error, ERROR_REVERT_DELAY);
            ValidateOutcome::Rejected
        }
    }

    /// Clears the selection without touching the puzzle or the status flash.
    pub fn reset_selection(&mut self) {
        for &coords in &self.selected {
            self.marks[coords.to_nd_index()] = CellMark::Clear;
        }
        self.selected.clear();
        self.current_sum = 0;
        log::debug!("Selection cleared");
    }

    /// Discards the current puzzle and starts a fresh round from the stored
    /// dimensions: new grid, new target, empty selection, idle status.
    pub fn reset_grid(&mut self) -> Result<()> {
        self.puzzle = self.generator.generate(self.config)?;
        self.marks = Array2::default(self.puzzle.size().to_nd_index());
        self.selected.clear();
        self.current_sum = 0;
        self.status = SessionStatus::Idle;
        self.revert_at = None;
        self.move_count = 0;
        self.round = self.round.saturating_add(1);
        self.round_started_at = Instant::now();
        log::debug!(
            "Round {}: new target {} over {} cells",
            self.round,
            self.puzzle.target_sum(),
            self.puzzle.required_count()
        );
        Ok(())
    }

    /// Same state change as [`reset_grid`](Self::reset_grid); callers attach
    /// different feedback to a skip than to a reset.
    pub fn skip_puzzle(&mut self) -> Result<()> {
        log::debug!("Puzzle skipped");
        self.reset_grid()
    }

    /// Reverts an expired transient status. The embedding UI calls this from
    /// its timer or frame loop.
    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> bool {
        match self.revert_at {
            Some(at) if now >= at => {
                self.status = SessionStatus::Idle;
                self.revert_at = None;
                log::trace!("Transient status reverted");
                true
            }
            _ => false,
        }
    }

    /// Single deadline slot: scheduling a reversion supersedes any pending
    /// one, so a stale revert can never stomp newer state.
    fn flash(&mut self, status: SessionStatus, delay: Duration) {
        self.status = status;
        self.revert_at = Some(Instant::now() + delay);
    }

    /// The sum is always rederived from the selection, never adjusted
    /// incrementally.
    fn recompute_sum(&mut self) {
        self.current_sum = self
            .selected
            .iter()
            .map(|&coords| self.puzzle[coords] as SumValue)
            .sum();
    }
}

impl<G> GridSession<G> {
    pub fn config(&self) -> GridConfig {
        self.config
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn size(&self) -> Coord2 {
        self.puzzle.size()
    }

    pub fn target_sum(&self) -> SumValue {
        self.puzzle.target_sum()
    }

    pub fn required_count(&self) -> u8 {
        self.puzzle.required_count()
    }

    pub fn value_at(&self, coords: Coord2) -> Value {
        self.puzzle[coords]
    }

    pub fn mark_at(&self, coords: Coord2) -> CellMark {
        self.marks[coords.to_nd_index()]
    }

    /// Selected coordinates in tap order.
    pub fn selected(&self) -> &[Coord2] {
        &self.selected
    }

    pub fn current_sum(&self) -> SumValue {
        self.current_sum
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub const fn match_found(&self) -> bool {
        matches!(self.status, SessionStatus::Matched)
    }

    pub const fn error_state(&self) -> bool {
        matches!(self.status, SessionStatus::Error)
    }

    /// Deadline of the pending transient reversion, if one is scheduled.
    pub fn revert_at(&self) -> Option<Instant> {
        self.revert_at
    }

    /// Successful selection changes in the current round.
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// 1-based counter of puzzles handed out, bumped by reset and skip.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Time since the current round started.
    pub fn elapsed(&self) -> Duration {
        self.round_started_at.elapsed()
    }
}
