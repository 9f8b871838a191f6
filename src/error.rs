use crate::Position;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Selection is full ({max} cells already chosen)")]
    SelectionFull { max: usize },
    #[error("Insufficient balance: {balance} available, {required} required")]
    InsufficientFunds { balance: u64, required: u64 },
    #[error("Position {0:?} is out of bounds")]
    OutOfBounds(Position),
    #[error("Position {0:?} appears more than once")]
    DuplicatePosition(Position),
    #[error("Mine at {0:?} lands on a cell that must stay safe")]
    MineOnExcludedCell(Position),
    #[error("Mines were already placed since the last reset")]
    MinesAlreadyPlaced,
    #[error("Too many mines ({mines}) for a {size}x{size} board with {excluded} excluded cells")]
    TooManyMines {
        size: usize,
        mines: usize,
        excluded: usize,
    },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(&'static str),
    #[error("Cell at {0:?} is already revealed")]
    AlreadyRevealed(Position),
    #[error("Cell at {0:?} is part of the selection and cannot be revealed")]
    CellSelected(Position),
    #[error("Action is not allowed in the current round phase")]
    InvalidGameState,
}

impl GameError {
    /// Errors the player can cause through normal input; everything else is misuse of the API.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GameError::SelectionFull { .. } | GameError::InsufficientFunds { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
