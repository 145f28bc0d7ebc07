use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Everything a presentation layer needs to draw one frame of a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub size: Coord2,
    pub state: GameState,
    pub elapsed_secs: u32,
    pub mines_remaining: isize,
    pub cells: Array2<CellView>,
}

impl Snapshot {
    pub fn from_session(session: &GameSession) -> Self {
        let size = session.size();
        let mut cells = Array2::from_elem(size.to_nd_index(), CellView::Hidden);

        let (rows, cols) = size;
        for row in 0..rows {
            for col in 0..cols {
                let coords = (row, col);
                if let Ok(view) = session.cell_view(coords) {
                    cells[coords.to_nd_index()] = view;
                }
            }
        }

        Self {
            size,
            state: session.state(),
            elapsed_secs: session.elapsed_secs(),
            mines_remaining: session.mines_remaining(),
            cells,
        }
    }

    pub fn cell(&self, coords: Coord2) -> Option<CellView> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    pub fn closed_count(&self) -> usize {
        self.cells.iter().filter(|view| view.is_closed()).count()
    }
}
