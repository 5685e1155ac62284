use gb_core::CellId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridError {
    #[error("board {width}x{height} exceeds the addressable cell range")]
    BoardTooLarge { width: u16, height: u16 },

    #[error("cell {0} is outside the board")]
    CellOutOfBounds(CellId),

    #[error("cell {0} is not part of the placeable region")]
    NotPlaceable(CellId),

    #[error("cell {0} is already occupied")]
    Occupied(CellId),
}

pub type GridResult<T> = Result<T, GridError>;
