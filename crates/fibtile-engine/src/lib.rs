pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// A directional move that would leave the board unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("move does not change the board")]
pub struct IllegalMoveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum IllegalActionError {
    #[display("illegal move: {_0}")]
    Move(IllegalMoveError),
    #[display("cell {cell} is already occupied")]
    CellOccupied { cell: usize },
    #[display("cannot place rank {rank} at cell {cell}")]
    InvalidPlacement { rank: u8, cell: usize },
}

impl From<IllegalMoveError> for IllegalActionError {
    fn from(err: IllegalMoveError) -> Self {
        Self::Move(err)
    }
}
