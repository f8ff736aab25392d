use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board must have at least one row and one column")]
    EmptyBoard,
    #[error("Too many mines: requested {mines}, room for {capacity}")]
    TooManyMines {
        mines: CellCount,
        capacity: CellCount,
    },
    #[error("Board shape does not match its cells")]
    InvalidBoardShape,
}

pub type Result<T> = core::result::Result<T, GameError>;
