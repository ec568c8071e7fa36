use serde::{Deserialize, Serialize};

use crate::IllegalActionError;

use super::{
    board::{Board, CELL_COUNT},
    rank::{EMPTY, RANK_LIMIT},
};

/// Direction of a player move.
///
/// The discriminants are the integer action codes used by agents and weight
/// files: `0 = up`, `1 = right`, `2 = down`, `3 = left`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[repr(u8)]
pub enum Direction {
    #[display("up")]
    Up = 0,
    #[display("right")]
    Right = 1,
    #[display("down")]
    Down = 2,
    #[display("left")]
    Left = 3,
}

impl Direction {
    pub const LEN: usize = 4;
    pub const ALL: [Self; Self::LEN] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Returns the direction of an integer action code.
    ///
    /// # Example
    ///
    /// ```
    /// use fibtile_engine::Direction;
    ///
    /// assert_eq!(Direction::from_code(3), Some(Direction::Left));
    /// assert_eq!(Direction::from_code(4), None);
    /// ```
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Up),
            1 => Some(Self::Right),
            2 => Some(Self::Down),
            3 => Some(Self::Left),
            _ => None,
        }
    }

    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// An action applied to a board by one of the agents.
///
/// The player slides tiles with [`Action::Move`]; the environment spawns a new
/// tile with [`Action::Place`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::IsVariant,
)]
pub enum Action {
    Move(Direction),
    Place { rank: u8, cell: usize },
}

impl Action {
    /// Creates a placement action.
    ///
    /// # Panics
    ///
    /// Panics if `rank` is empty or out of range, or if `cell` is not a board index.
    #[must_use]
    pub fn place(rank: u8, cell: usize) -> Self {
        assert!(
            rank != EMPTY && rank < RANK_LIMIT,
            "invalid placement rank {rank}"
        );
        assert!(cell < CELL_COUNT, "invalid placement cell {cell}");
        Self::Place { rank, cell }
    }

    /// Packs a placement as `(rank << 4) | cell`, or a move as its direction code.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub fn opcode(self) -> u32 {
        match self {
            Self::Move(direction) => u32::from(direction.code()),
            Self::Place { rank, cell } => (u32::from(rank) << 4) | (cell as u32),
        }
    }

    /// Applies the action to `board` and returns the reward.
    ///
    /// A move rewards the score of the merges it makes; a placement rewards 0.
    /// A placement must put a non-empty rank below [`RANK_LIMIT`] on an empty cell
    /// of the board. On error the board is left untouched.
    ///
    /// # Example
    ///
    /// ```
    /// use fibtile_engine::{Action, Board, Direction};
    ///
    /// let mut board = Board::EMPTY;
    /// assert_eq!(Action::place(1, 0).apply(&mut board), Ok(0));
    /// assert_eq!(Action::place(1, 3).apply(&mut board), Ok(0));
    /// assert_eq!(Action::Move(Direction::Left).apply(&mut board), Ok(2));
    /// assert_eq!(board.cell_at(0), 2);
    /// assert!(Action::place(1, 0).apply(&mut board).is_err());
    /// ```
    pub fn apply(self, board: &mut Board) -> Result<u32, IllegalActionError> {
        match self {
            Self::Move(direction) => Ok(board.try_move(direction)?),
            Self::Place { rank, cell } => {
                if cell >= CELL_COUNT || rank == EMPTY || rank >= RANK_LIMIT {
                    return Err(IllegalActionError::InvalidPlacement { rank, cell });
                }
                if board.cell_at(cell) != EMPTY {
                    return Err(IllegalActionError::CellOccupied { cell });
                }
                board.set_at(cell, rank);
                Ok(0)
            }
        }
    }
}
