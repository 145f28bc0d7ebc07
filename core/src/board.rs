use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// The grid: mine layout, adjacency numbers and per-cell player state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
    revealed_count: CellCount,
}

impl Board {
    /// Allocates an all-hidden grid with no mines placed yet.
    pub fn new(config: GameConfig) -> Self {
        Self {
            cells: Array2::default(config.size().to_nd_index()),
            mine_count: config.mines(),
            revealed_count: 0,
        }
    }

    pub fn create(rows: usize, cols: usize, mine_count: usize) -> Result<Self> {
        GameConfig::new(rows, cols, mine_count).map(Self::new)
    }

    /// Builds a board with mines at exactly `mine_coords` and adjacency already computed.
    pub fn from_mines(rows: usize, cols: usize, mine_coords: &[Coord2]) -> Result<Self> {
        let placer = FixedMinePlacer::new(mine_coords);
        let mut board = Self::create(rows, cols, placer.mine_count())?;
        board.place_mines_with(placer)?;
        board.compute_adjacency();
        Ok(board)
    }

    pub fn config(&self) -> GameConfig {
        let (rows, cols) = self.size();
        GameConfig::new_unchecked(rows, cols, self.mine_count)
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        // `GameConfig` guarantees both dimensions fit `Coord`
        (rows as Coord, cols as Coord)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        self.config().total_cells()
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.config().safe_cells()
    }

    pub fn has_mines(&self) -> bool {
        self.cells.iter().any(Cell::is_mine)
    }

    pub fn flagged_count(&self) -> CellCount {
        // bounded by the cell count
        self.cells.iter().filter(|cell| cell.marker.is_flag()).count() as CellCount
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn cells(&self) -> &Array2<Cell> {
        &self.cells
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (rows, cols) = self.size();
        if coords.0 < rows && coords.1 < cols {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self[coords])
    }

    /// In-bounds neighbors of `coords`, in row-major order.
    pub fn neighbors_of(&self, coords: Coord2) -> Result<Neighbors> {
        let coords = self.validate_coords(coords)?;
        Ok(self.iter_neighbors(coords).collect())
    }

    /// Draws `mine_count` distinct positions uniformly, never at `excluding`.
    pub fn place_mines(&mut self, seed: u64, excluding: Option<Coord2>) -> Result<()> {
        if let Some(coords) = excluding {
            self.validate_coords(coords)?;
        }
        self.place_mines_with(RandomMinePlacer::new(seed, excluding))
    }

    /// Lays out mines with whatever `placer` produces. Only allowed once, before any reveal.
    pub fn place_mines_with(&mut self, placer: impl MinePlacer) -> Result<()> {
        if self.has_mines() || self.cells.iter().any(Cell::is_revealed) {
            return Err(GameError::InvalidConfiguration);
        }

        let mask = placer.mine_mask(self.config())?;
        if mask.dim() != self.cells.dim() {
            return Err(GameError::InvalidConfiguration);
        }

        let placed = mask.iter().filter(|&&is_mine| is_mine).count();
        if placed != usize::from(self.mine_count) {
            log::warn!(
                "Mine layout count mismatch, actual: {}, requested: {}",
                placed,
                self.mine_count
            );
            return Err(GameError::InvalidConfiguration);
        }

        for (cell, &is_mine) in self.cells.iter_mut().zip(mask.iter()) {
            cell.is_mine = is_mine;
        }
        Ok(())
    }

    /// Stores the neighbor mine tally on every safe cell.
    pub fn compute_adjacency(&mut self) {
        let (rows, cols) = self.size();
        for row in 0..rows {
            for col in 0..cols {
                let coords = (row, col);
                let count = if self[coords].is_mine {
                    0
                } else {
                    self.count_adjacent_mines(coords)
                };
                self.cells[coords.to_nd_index()].adjacent_mine_count = count;
            }
        }
    }

    pub fn count_adjacent_mines(&self, coords: Coord2) -> u8 {
        self.count_neighbors(coords, |cell| cell.is_mine)
    }

    pub fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        self.count_neighbors(coords, |cell| cell.marker.is_flag())
    }

    fn count_neighbors(&self, coords: Coord2, predicate: impl Fn(&Cell) -> bool) -> u8 {
        // at most eight neighbors
        self.iter_neighbors(coords)
            .filter(|&pos| predicate(&self[pos]))
            .count() as u8
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    /// Marks a hidden cell revealed. Returns false if it already was.
    pub(crate) fn reveal_cell(&mut self, coords: Coord2) -> bool {
        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.is_revealed() {
            return false;
        }
        cell.set_revealed();
        if !cell.is_mine {
            self.revealed_count += 1;
        }
        true
    }

    pub(crate) fn set_marker(&mut self, coords: Coord2, marker: Marker) {
        self.cells[coords.to_nd_index()].marker = marker;
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}
