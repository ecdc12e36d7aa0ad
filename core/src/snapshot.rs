use serde::{Deserialize, Serialize};

use crate::*;

/// Read-only view of one cell.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellView {
    pub coords: Coord2,
    pub value: Value,
    pub selected: bool,
    pub locked: bool,
}

/// Full state snapshot handed to UI collaborators: plain data with no
/// references into the session, rebuilt on demand.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub cells: Vec<CellView>,
    pub grid_rows: Coord,
    pub grid_cols: Coord,
    pub target_sum: SumValue,
    pub required_count: u8,
    pub selected: Vec<Coord2>,
    pub current_sum: SumValue,
    pub match_found: bool,
    pub error_state: bool,
}

impl GridSnapshot {
    pub fn from_session<G>(session: &GridSession<G>) -> Self {
        let (rows, cols) = session.size();
        let mut cells = Vec::with_capacity(session.puzzle().total_cells() as usize);

        for row in 0..rows {
            for col in 0..cols {
                let coords = (row, col);
                let mark = session.mark_at(coords);
                cells.push(CellView {
                    coords,
                    value: session.value_at(coords),
                    selected: mark.is_selected(),
                    locked: mark.is_locked(),
                });
            }
        }

        Self {
            cells,
            grid_rows: rows,
            grid_cols: cols,
            target_sum: session.target_sum(),
            required_count: session.required_count(),
            selected: session.selected().to_vec(),
            current_sum: session.current_sum(),
            match_found: session.match_found(),
            error_state: session.error_state(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Scripted(Puzzle);

    impl PuzzleGenerator for Scripted {
        fn generate(&mut self, _config: GridConfig) -> Result<Puzzle> {
            Ok(self.0.clone())
        }
    }

    fn session() -> GridSession<Scripted> {
        let puzzle = Puzzle::from_values((2, 2), vec![3, 4, 2, 5], 7, 2).unwrap();
        GridSession::new(GridConfig::new(2, 2), Scripted(puzzle)).unwrap()
    }

    #[test]
    fn snapshot_mirrors_session_state() {
        let mut session = session();
        session.select_cell((0, 1)).unwrap();

        let snapshot = GridSnapshot::from_session(&session);

        assert_eq!(snapshot.grid_rows, 2);
        assert_eq!(snapshot.grid_cols, 2);
        assert_eq!(snapshot.cells.len(), 4);
        assert_eq!(snapshot.target_sum, 7);
        assert_eq!(snapshot.required_count, 2);
        assert_eq!(snapshot.selected, vec![(0, 1)]);
        assert_eq!(snapshot.current_sum, 4);
        assert!(!snapshot.match_found);
        assert!(!snapshot.error_state);

        let cell = snapshot.cells[1];
        assert_eq!(cell.coords, (0, 1));
        assert_eq!(cell.value, 4);
        assert!(cell.selected);
        assert!(!cell.locked);
    }

    #[test]
    fn cells_are_listed_row_major() {
        let snapshot = GridSnapshot::from_session(&session());

        let coords: Vec<Coord2> = snapshot.cells.iter().map(|cell| cell.coords).collect();
        assert_eq!(coords, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let mut session = session();
        session.select_cell((0, 0)).unwrap();

        let json = serde_json::to_value(GridSnapshot::from_session(&session)).unwrap();

        assert_eq!(json["target_sum"], 7);
        assert_eq!(json["current_sum"], 3);
        assert_eq!(json["cells"][0]["selected"], true);
    }
}
