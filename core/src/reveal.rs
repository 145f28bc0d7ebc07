use alloc::vec::Vec;
use core::ops::BitOr;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealResult {
    NoChange,
    /// Number of safe cells newly revealed, never zero.
    Revealed(CellCount),
    HitMine,
}

impl RevealResult {
    /// Whether this result could have caused an update to the board
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    pub const fn revealed(self) -> CellCount {
        match self {
            Self::Revealed(count) => count,
            _ => 0,
        }
    }
}

/// Used to merge results when revealing several cells at once
impl BitOr for RevealResult {
    type Output = RevealResult;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealResult::*;
        match (self, rhs) {
            // mine has priority
            (HitMine, _) => HitMine,
            (_, HitMine) => HitMine,
            (Revealed(a), Revealed(b)) => Revealed(a + b),
            (Revealed(n), NoChange) | (NoChange, Revealed(n)) => Revealed(n),
            (NoChange, NoChange) => NoChange,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed {
        marker: Marker,
        /// +1 entering `Flagged`, -1 leaving it, 0 otherwise.
        flag_delta: i8,
    },
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed { .. })
    }

    pub const fn flag_delta(self) -> i8 {
        match self {
            Self::NoChange => 0,
            Self::Changed { flag_delta, .. } => flag_delta,
        }
    }
}

/// Reveals a hidden, unmarked cell, flooding outward from zero cells.
///
/// Flagged and question-marked cells are left alone, so a marker protects
/// against an accidental reveal.
pub fn reveal(board: &mut Board, coords: Coord2) -> Result<RevealResult> {
    let coords = board.validate_coords(coords)?;
    Ok(reveal_single_cell(board, coords))
}

/// Reveals every hidden, unflagged neighbor of a revealed number once the
/// flags around it account for all of its mines.
///
/// A flag count mismatch is a no-op, not an error.
pub fn chord(board: &mut Board, coords: Coord2) -> Result<RevealResult> {
    let coords = board.validate_coords(coords)?;
    let cell = board[coords];

    if !cell.is_revealed() || cell.adjacent_mine_count == 0 {
        return Ok(RevealResult::NoChange);
    }

    let flagged = board.count_flagged_neighbors(coords);
    if flagged != cell.adjacent_mine_count {
        log::trace!(
            "Chord at {:?} skipped, {} flags around a {}",
            coords,
            flagged,
            cell.adjacent_mine_count
        );
        return Ok(RevealResult::NoChange);
    }

    let neighbors: Neighbors = board.iter_neighbors(coords).collect();
    Ok(neighbors
        .into_iter()
        .map(|neighbor| reveal_single_cell(board, neighbor))
        .fold(RevealResult::NoChange, BitOr::bitor))
}

/// Advances the marker of a hidden cell; revealed cells are left untouched.
pub fn cycle_marker(
    board: &mut Board,
    coords: Coord2,
    question_marks: bool,
) -> Result<MarkOutcome> {
    let coords = board.validate_coords(coords)?;
    let cell = board[coords];

    if cell.is_revealed() {
        return Ok(MarkOutcome::NoChange);
    }

    let marker = cell.marker.next(question_marks);
    let flag_delta = match (cell.marker.is_flag(), marker.is_flag()) {
        (false, true) => 1,
        (true, false) => -1,
        _ => 0,
    };
    board.set_marker(coords, marker);
    log::debug!("Marker at {:?} is now {:?}", coords, marker);

    Ok(MarkOutcome::Changed { marker, flag_delta })
}

fn reveal_single_cell(board: &mut Board, coords: Coord2) -> RevealResult {
    let cell = board[coords];

    if !cell.is_open_target() {
        return RevealResult::NoChange;
    }

    board.reveal_cell(coords);
    if cell.is_mine {
        log::debug!("Revealed mine at {:?}", coords);
        return RevealResult::HitMine;
    }

    log::debug!(
        "Revealed cell at {:?}, mine count: {}",
        coords,
        cell.adjacent_mine_count
    );

    let mut revealed: CellCount = 1;
    if cell.adjacent_mine_count == 0 {
        revealed += flood_fill(board, coords);
    }
    RevealResult::Revealed(revealed)
}

/// Opens the zero region around an already revealed zero cell.
///
/// Cells are revealed as they are pushed, so the revealed flag doubles as the
/// visited set and no position is queued twice.
fn flood_fill(board: &mut Board, origin: Coord2) -> CellCount {
    let mut revealed = 0;
    let mut to_visit = Vec::from([origin]);

    while let Some(visit_coords) = to_visit.pop() {
        let neighbors: Neighbors = board.iter_neighbors(visit_coords).collect();
        for neighbor in neighbors {
            let cell = board[neighbor];
            if !cell.is_open_target() || cell.is_mine {
                continue;
            }

            board.reveal_cell(neighbor);
            revealed += 1;
            log::trace!(
                "Flood opened cell at {:?}, mine count: {}",
                neighbor,
                cell.adjacent_mine_count
            );

            if cell.adjacent_mine_count == 0 {
                to_visit.push(neighbor);
            }
        }
    }

    revealed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: usize, cols: usize, mines: &[Coord2]) -> Board {
        Board::from_mines(rows, cols, mines).unwrap()
    }

    fn flag(board: &mut Board, coords: Coord2) {
        assert_eq!(cycle_marker(board, coords, true).unwrap().flag_delta(), 1);
    }

    #[test]
    fn reveal_number_opens_single_cell() {
        let mut board = board(3, 3, &[(0, 0)]);

        assert_eq!(reveal(&mut board, (1, 1)).unwrap(), RevealResult::Revealed(1));
        assert_eq!(board.revealed_count(), 1);
        assert!(!board[(1, 2)].is_revealed());
    }

    #[test]
    fn reveal_zero_floods_region_and_border() {
        let mut board = board(3, 3, &[(2, 2)]);

        assert_eq!(reveal(&mut board, (0, 0)).unwrap(), RevealResult::Revealed(8));
        assert_eq!(board[(1, 1)].adjacent_mine_count(), 1);
        assert!(board[(1, 1)].is_revealed());
        assert!(!board[(2, 2)].is_revealed());
    }

    #[test]
    fn reveal_mine_reports_hit() {
        let mut board = board(2, 2, &[(0, 0)]);

        assert_eq!(reveal(&mut board, (0, 0)).unwrap(), RevealResult::HitMine);
        assert!(board[(0, 0)].is_revealed());
        assert_eq!(board.revealed_count(), 0);
    }

    #[test]
    fn reveal_twice_is_no_change() {
        let mut board = board(3, 3, &[(0, 0)]);
        reveal(&mut board, (2, 2)).unwrap();

        assert_eq!(reveal(&mut board, (2, 2)).unwrap(), RevealResult::NoChange);
    }

    #[test]
    fn flagged_cell_is_protected_from_reveal() {
        let mut board = board(2, 2, &[(0, 0)]);
        flag(&mut board, (0, 0));

        assert_eq!(reveal(&mut board, (0, 0)).unwrap(), RevealResult::NoChange);
        assert!(!board[(0, 0)].is_revealed());
    }

    #[test]
    fn flood_stops_at_marked_cells() {
        let mut board = board(1, 5, &[(0, 4)]);
        cycle_marker(&mut board, (0, 1), true).unwrap();
        cycle_marker(&mut board, (0, 1), true).unwrap();
        assert_eq!(board[(0, 1)].marker(), Marker::Questioned);

        assert_eq!(reveal(&mut board, (0, 0)).unwrap(), RevealResult::Revealed(1));
        assert!(!board[(0, 1)].is_revealed());
        assert!(!board[(0, 2)].is_revealed());
    }

    #[test]
    fn reveal_out_of_bounds_is_an_error() {
        let mut board = board(2, 2, &[(0, 0)]);
        assert_eq!(reveal(&mut board, (2, 0)), Err(GameError::OutOfBounds));
    }

    #[test]
    fn chord_reveals_unflagged_neighbors() {
        let mut board = board(3, 3, &[(0, 1), (2, 1)]);
        reveal(&mut board, (1, 1)).unwrap();
        flag(&mut board, (0, 1));
        flag(&mut board, (2, 1));

        assert_eq!(chord(&mut board, (1, 1)).unwrap(), RevealResult::Revealed(6));
        assert_eq!(board[(1, 0)].adjacent_mine_count(), 2);
        assert!(board[(1, 2)].is_revealed());
        assert_eq!(board.revealed_count(), 7);
    }

    #[test]
    fn chord_with_wrong_flag_hits_mine() {
        let mut board = board(3, 3, &[(0, 1)]);
        reveal(&mut board, (1, 1)).unwrap();
        flag(&mut board, (2, 2));

        assert_eq!(chord(&mut board, (1, 1)).unwrap(), RevealResult::HitMine);
        assert!(board[(0, 1)].is_revealed());
    }

    #[test]
    fn chord_mismatch_leaves_board_unchanged() {
        let mut board = board(3, 3, &[(0, 1), (2, 1)]);
        reveal(&mut board, (1, 1)).unwrap();
        flag(&mut board, (0, 1));
        let before = board.clone();

        assert_eq!(chord(&mut board, (1, 1)).unwrap(), RevealResult::NoChange);
        assert_eq!(board, before);
    }

    #[test]
    fn chord_ignores_questioned_neighbors() {
        let mut board = board(3, 3, &[(0, 1)]);
        reveal(&mut board, (1, 1)).unwrap();
        cycle_marker(&mut board, (0, 0), true).unwrap();
        cycle_marker(&mut board, (0, 0), true).unwrap();

        assert_eq!(board.count_flagged_neighbors((1, 1)), 0);
        assert_eq!(chord(&mut board, (1, 1)).unwrap(), RevealResult::NoChange);
        assert!(!board[(0, 0)].is_revealed());

        flag(&mut board, (0, 1));
        assert_eq!(board.count_flagged_neighbors((1, 1)), 1);
        assert_eq!(chord(&mut board, (1, 1)).unwrap(), RevealResult::Revealed(6));
        assert!(!board[(0, 0)].is_revealed());
        assert_eq!(board[(0, 0)].marker(), Marker::Questioned);
    }

    #[test]
    fn chord_on_hidden_or_zero_cell_is_no_change() {
        let mut board = board(1, 4, &[(0, 3)]);
        assert_eq!(chord(&mut board, (0, 0)).unwrap(), RevealResult::NoChange);

        reveal(&mut board, (0, 0)).unwrap();
        assert_eq!(board[(0, 0)].adjacent_mine_count(), 0);
        assert_eq!(chord(&mut board, (0, 0)).unwrap(), RevealResult::NoChange);
    }

    #[test]
    fn cycle_marker_is_a_three_cycle() {
        let mut board = board(2, 2, &[(0, 0)]);
        let mut net = 0;
        let mut markers = Vec::new();

        for _ in 0..3 {
            let outcome = cycle_marker(&mut board, (1, 1), true).unwrap();
            net += outcome.flag_delta();
            if let MarkOutcome::Changed { marker, .. } = outcome {
                markers.push(marker);
            }
        }

        assert_eq!(markers, [Marker::Flagged, Marker::Questioned, Marker::None]);
        assert_eq!(net, 0);
    }

    #[test]
    fn cycle_marker_ignores_revealed_cell() {
        let mut board = board(2, 2, &[(0, 0)]);
        reveal(&mut board, (1, 1)).unwrap();

        assert_eq!(
            cycle_marker(&mut board, (1, 1), true).unwrap(),
            MarkOutcome::NoChange
        );
        assert_eq!(board[(1, 1)].marker(), Marker::None);
    }

    #[test]
    fn merged_results_sum_and_prioritize_mines() {
        use RevealResult::*;
        assert_eq!(Revealed(2) | Revealed(3), Revealed(5));
        assert_eq!(NoChange | Revealed(1), Revealed(1));
        assert_eq!(Revealed(4) | HitMine, HitMine);
        assert_eq!(NoChange | NoChange, NoChange);
    }
}
