use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    #[default]
    Hidden,
    Revealed,
}

/// Player annotation on a hidden cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Marker {
    #[default]
    None,
    Flagged,
    Questioned,
}

impl Marker {
    /// Next marker in the cycle; question marks are skipped when disabled.
    pub const fn next(self, question_marks: bool) -> Self {
        match self {
            Self::None => Self::Flagged,
            Self::Flagged if question_marks => Self::Questioned,
            Self::Flagged => Self::None,
            Self::Questioned => Self::None,
        }
    }

    pub const fn is_flag(self) -> bool {
        matches!(self, Self::Flagged)
    }
}

/// One grid position. Mine placement and adjacency are fixed once the board is generated.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) is_mine: bool,
    pub(crate) adjacent_mine_count: u8,
    pub(crate) visibility: Visibility,
    pub(crate) marker: Marker,
}

impl Cell {
    pub const fn is_mine(&self) -> bool {
        self.is_mine
    }

    /// Always 0 for mine cells.
    pub const fn adjacent_mine_count(&self) -> u8 {
        self.adjacent_mine_count
    }

    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub const fn marker(&self) -> Marker {
        self.marker
    }

    pub const fn is_revealed(&self) -> bool {
        matches!(self.visibility, Visibility::Revealed)
    }

    /// Hidden with no marker, the only state a plain reveal acts on.
    pub const fn is_open_target(&self) -> bool {
        matches!(
            (self.visibility, self.marker),
            (Visibility::Hidden, Marker::None)
        )
    }

    pub(crate) fn set_revealed(&mut self) {
        self.visibility = Visibility::Revealed;
        self.marker = Marker::None;
    }
}

/// What the presentation layer is allowed to see of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Questioned,
    Revealed(u8),
    // only shown after the game ends:
    TriggeredMine,
    Mine,
    Misflagged,
}

impl CellView {
    /// Whether the cell is visually closed
    pub const fn is_closed(self) -> bool {
        use CellView::*;
        match self {
            Hidden => true,
            Flagged => true,
            Questioned => true,
            Revealed(_) => false,
            TriggeredMine => false,
            Mine => false,
            Misflagged => true,
        }
    }
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}
