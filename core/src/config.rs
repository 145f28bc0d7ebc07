use serde::{Deserialize, Serialize};

use crate::*;

/// Grid dimensions and mine count for one game. Only constructed through validation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGameConfig")]
pub struct GameConfig {
    rows: Coord,
    cols: Coord,
    mines: CellCount,
}

#[derive(Deserialize)]
struct RawGameConfig {
    rows: Coord,
    cols: Coord,
    mines: CellCount,
}

impl TryFrom<RawGameConfig> for GameConfig {
    type Error = GameError;

    fn try_from(raw: RawGameConfig) -> Result<Self> {
        Self::new(raw.rows.into(), raw.cols.into(), raw.mines.into())
    }
}

impl GameConfig {
    pub(crate) const fn new_unchecked(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self { rows, cols, mines }
    }

    /// Needs at least one row, one column, one mine, and one safe cell.
    pub fn new(rows: usize, cols: usize, mines: usize) -> Result<Self> {
        let rows = Coord::try_from(rows).map_err(|_| GameError::InvalidConfiguration)?;
        let cols = Coord::try_from(cols).map_err(|_| GameError::InvalidConfiguration)?;
        let mines = CellCount::try_from(mines).map_err(|_| GameError::InvalidConfiguration)?;

        if rows < 1 || cols < 1 || mines < 1 || mines >= mult(rows, cols) {
            return Err(GameError::InvalidConfiguration);
        }

        Ok(Self::new_unchecked(rows, cols, mines))
    }

    pub const fn rows(&self) -> Coord {
        self.rows
    }

    pub const fn cols(&self) -> Coord {
        self.cols
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }
}

/// When mines get placed relative to the first reveal.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FirstClick {
    /// Mines are placed when the session is created, so the first reveal can hit one.
    #[default]
    Unprotected,
    /// Placement waits for the first reveal and never lands on the clicked cell.
    Safe,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOptions {
    pub first_click: FirstClick,
    /// Whether marking cycles through a question mark after the flag.
    pub question_marks: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            first_click: FirstClick::Unprotected,
            question_marks: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_dimensions() {
        let config = GameConfig::new(9, 9, 10).unwrap();
        assert_eq!(config.size(), (9, 9));
        assert_eq!(config.total_cells(), 81);
        assert_eq!(config.safe_cells(), 71);
    }

    #[test]
    fn accepts_single_safe_cell() {
        assert!(GameConfig::new(1, 2, 1).is_ok());
    }

    #[test]
    fn rejects_empty_dimensions() {
        assert_eq!(GameConfig::new(0, 9, 1), Err(GameError::InvalidConfiguration));
        assert_eq!(GameConfig::new(9, 0, 1), Err(GameError::InvalidConfiguration));
    }

    #[test]
    fn rejects_full_or_empty_minefield() {
        assert_eq!(GameConfig::new(3, 3, 9), Err(GameError::InvalidConfiguration));
        assert_eq!(GameConfig::new(3, 3, 12), Err(GameError::InvalidConfiguration));
        assert_eq!(GameConfig::new(3, 3, 0), Err(GameError::InvalidConfiguration));
    }

    #[test]
    fn rejects_dimensions_wider_than_coord() {
        assert_eq!(GameConfig::new(300, 2, 1), Err(GameError::InvalidConfiguration));
    }

    #[test]
    fn deserializing_revalidates_dimensions() {
        let config: GameConfig = serde_json::from_str(r#"{"rows":2,"cols":2,"mines":3}"#).unwrap();
        assert_eq!(config.safe_cells(), 1);

        let overfull = serde_json::from_str::<GameConfig>(r#"{"rows":2,"cols":2,"mines":9}"#);
        assert!(overfull.is_err());
    }

    #[test]
    fn default_options_keep_reference_behavior() {
        let options = SessionOptions::default();
        assert_eq!(options.first_click, FirstClick::Unprotected);
        assert!(options.question_marks);
    }
}
