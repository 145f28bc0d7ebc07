use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid board configuration")]
    InvalidConfiguration,
    #[error("Unknown difficulty preset")]
    UnknownDifficulty,
    #[error("Position is outside the grid")]
    OutOfBounds,
}

pub type Result<T> = core::result::Result<T, GameError>;
