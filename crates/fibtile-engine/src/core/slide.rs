//! Directional moves.
//!
//! There is a single primitive, [`slide_row_left`], which packs one row toward
//! its left edge while merging Fibonacci neighbors. The other directions
//! conjugate it with a board transform:
//!
//! ```text
//! right = reflect_horizontal, left, reflect_horizontal
//! up    = rotate_right, right, rotate_left
//! down  = rotate_right, left, rotate_left
//! ```
//!
//! # Merge rule
//!
//! Cells are scanned left to right with a single carried tile `hold`. For each
//! non-empty cell `t` met while `hold` is occupied:
//!
//! 1. `t == hold + 1`, or both are rank 1: emit `t + 1`
//! 2. `t == hold - 1`: emit `hold + 1`
//! 3. otherwise emit `hold` and carry `t`
//!
//! A merged tile is never merged again in the same pass.

use arrayvec::ArrayVec;

use crate::IllegalMoveError;

use super::{
    action::Direction,
    board::{BOARD_SIZE, Board},
    rank::{EMPTY, tile_value},
};

/// Board resulting from a simulated move, before any new tile is spawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Afterstate {
    /// The board after the move. Equal to the input board when the move is illegal.
    pub board: Board,
    /// Score gained by the move.
    pub reward: Result<u32, IllegalMoveError>,
}

impl Afterstate {
    #[must_use]
    pub fn is_legal(&self) -> bool {
        self.reward.is_ok()
    }
}

/// Slides one row toward its left edge and returns the new row with the score gained.
///
/// # Example
///
/// ```
/// use fibtile_engine::slide_row_left;
///
/// assert_eq!(slide_row_left([1, 0, 1, 0]), ([2, 0, 0, 0], 2));
/// assert_eq!(slide_row_left([2, 3, 0, 0]), ([4, 0, 0, 0], 5));
/// assert_eq!(slide_row_left([4, 1, 0, 2]), ([4, 3, 0, 0], 3));
/// ```
#[must_use]
pub fn slide_row_left(row: [u8; BOARD_SIZE]) -> ([u8; BOARD_SIZE], u32) {
    let mut packed = ArrayVec::<u8, BOARD_SIZE>::new();
    let mut score = 0;
    let mut hold = None;

    for tile in row.into_iter().filter(|&t| t != EMPTY) {
        let Some(held) = hold else {
            hold = Some(tile);
            continue;
        };
        if tile == held + 1 || (tile == 1 && held == 1) {
            packed.push(tile + 1);
            score += tile_value(tile + 1);
            hold = None;
        } else if tile + 1 == held {
            packed.push(held + 1);
            score += tile_value(held + 1);
            hold = None;
        } else {
            packed.push(held);
            hold = Some(tile);
        }
    }
    if let Some(held) = hold {
        packed.push(held);
    }

    let mut out = [EMPTY; BOARD_SIZE];
    out[..packed.len()].copy_from_slice(&packed);
    (out, score)
}

impl Board {
    fn slide_left(&mut self) -> u32 {
        let mut score = 0;
        for row in self.rows_mut() {
            let (packed, gained) = slide_row_left(*row);
            *row = packed;
            score += gained;
        }
        score
    }

    fn slide_right(&mut self) -> u32 {
        self.reflect_horizontal();
        let score = self.slide_left();
        self.reflect_horizontal();
        score
    }

    fn slide_up(&mut self) -> u32 {
        self.rotate_right();
        let score = self.slide_right();
        self.rotate_left();
        score
    }

    fn slide_down(&mut self) -> u32 {
        self.rotate_right();
        let score = self.slide_left();
        self.rotate_left();
        score
    }

    fn slide(&mut self, direction: Direction) -> u32 {
        match direction {
            Direction::Up => self.slide_up(),
            Direction::Right => self.slide_right(),
            Direction::Down => self.slide_down(),
            Direction::Left => self.slide_left(),
        }
    }

    /// Simulates a move without touching `self`.
    ///
    /// The move is illegal if and only if it leaves the board unchanged.
    #[must_use]
    pub fn simulate_move(&self, direction: Direction) -> Afterstate {
        let mut board = *self;
        let score = board.slide(direction);
        let reward = if board == *self {
            Err(IllegalMoveError)
        } else {
            Ok(score)
        };
        Afterstate { board, reward }
    }

    /// Applies a move in place and returns the score gained.
    ///
    /// On error the board is unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use fibtile_engine::{Board, Direction, IllegalMoveError};
    ///
    /// let mut board = Board::from_ranks([
    ///     [1, 1, 0, 0],
    ///     [0, 0, 0, 0],
    ///     [0, 0, 0, 0],
    ///     [0, 0, 0, 0],
    /// ]);
    /// assert_eq!(board.try_move(Direction::Left), Ok(2));
    /// assert_eq!(board.row(0), [2, 0, 0, 0]);
    /// assert_eq!(board.try_move(Direction::Left), Err(IllegalMoveError));
    /// ```
    pub fn try_move(&mut self, direction: Direction) -> Result<u32, IllegalMoveError> {
        let Afterstate { board, reward } = self.simulate_move(direction);
        *self = board;
        reward
    }

    /// Applies the move with the integer action code `opcode`.
    ///
    /// Returns the score gained, or `-1` when the move is illegal or the code
    /// is not a direction.
    pub fn move_reward(&mut self, opcode: u8) -> i64 {
        Direction::from_code(opcode)
            .and_then(|direction| self.try_move(direction).ok())
            .map_or(-1, i64::from)
    }

    /// Returns the directions whose move changes the board.
    #[must_use]
    pub fn legal_moves(&self) -> ArrayVec<Direction, { Direction::LEN }> {
        Direction::ALL
            .into_iter()
            .filter(|&direction| self.simulate_move(direction).is_legal())
            .collect()
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.legal_moves().is_empty()
    }
}
