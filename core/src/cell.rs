use serde::{Deserialize, Serialize};

/// Canonical player-visible state of a single cell, kept apart from the
/// immutable puzzle values.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CellMark {
    Clear,
    Selected,
    /// Reserved for a remove-matched-cells rule; no current operation
    /// produces it.
    Locked,
}

impl CellMark {
    pub const fn is_selected(self) -> bool {
        matches!(self, Self::Selected)
    }

    pub const fn is_locked(self) -> bool {
        matches!(self, Self::Locked)
    }

    pub const fn is_selectable(self) -> bool {
        matches!(self, Self::Clear)
    }
}

impl Default for CellMark {
    fn default() -> Self {
        Self::Clear
    }
}
