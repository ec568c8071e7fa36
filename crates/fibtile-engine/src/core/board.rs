use std::fmt::{self, Write as _};

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use super::rank::{EMPTY, RANK_LIMIT, tile_value};

/// Number of rows and columns of the board.
pub const BOARD_SIZE: usize = 4;

/// Number of cells of the board.
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// Array-based 4x4 board holding one rank per cell.
///
/// # Addressing
///
/// Cells can be addressed by `(row, column)` or by their row-major index:
///
/// ```text
/// (2-d form)                         (1-d form)
/// [0][0] [0][1] [0][2] [0][3]         (0)  (1)  (2)  (3)
/// [1][0] [1][1] [1][2] [1][3]         (4)  (5)  (6)  (7)
/// [2][0] [2][1] [2][2] [2][3]         (8)  (9) (10) (11)
/// [3][0] [3][1] [3][2] [3][3]        (12) (13) (14) (15)
/// ```
///
/// Rank 0 means an empty cell. Boards are plain values: copying yields an
/// independent board, and the derived ordering compares the 16 ranks
/// lexicographically in row-major order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Board {
    cells: [[u8; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub const EMPTY: Self = Self {
        cells: [[EMPTY; BOARD_SIZE]; BOARD_SIZE],
    };

    /// Creates a board from its rows, top row first.
    ///
    /// # Panics
    ///
    /// Panics if any rank is `>= RANK_LIMIT`.
    ///
    /// # Example
    ///
    /// ```
    /// use fibtile_engine::Board;
    ///
    /// let board = Board::from_ranks([
    ///     [1, 0, 0, 0],
    ///     [0, 2, 0, 0],
    ///     [0, 0, 3, 0],
    ///     [0, 0, 0, 4],
    /// ]);
    /// assert_eq!(board.cell(1, 1), 2);
    /// assert_eq!(board.cell_at(15), 4);
    /// ```
    #[must_use]
    pub fn from_ranks(cells: [[u8; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        for rank in cells.iter().flatten() {
            assert!(*rank < RANK_LIMIT, "rank {rank} out of range");
        }
        Self { cells }
    }

    #[must_use]
    pub fn row(&self, row: usize) -> [u8; BOARD_SIZE] {
        self.cells[row]
    }

    /// Returns a column read from top to bottom.
    #[must_use]
    pub fn column(&self, col: usize) -> [u8; BOARD_SIZE] {
        std::array::from_fn(|row| self.cells[row][col])
    }

    #[inline]
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> u8 {
        self.cells[row][col]
    }

    #[inline]
    #[must_use]
    pub fn cell_at(&self, index: usize) -> u8 {
        self.cells[index / BOARD_SIZE][index % BOARD_SIZE]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, rank: u8) {
        assert!(rank < RANK_LIMIT, "rank {rank} out of range");
        self.cells[row][col] = rank;
    }

    #[inline]
    pub fn set_at(&mut self, index: usize, rank: u8) {
        self.set(index / BOARD_SIZE, index % BOARD_SIZE, rank);
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [[u8; BOARD_SIZE]; BOARD_SIZE] {
        &mut self.cells
    }

    /// Returns the indices of the empty cells in ascending order.
    #[must_use]
    pub fn empty_cells(&self) -> ArrayVec<usize, CELL_COUNT> {
        (0..CELL_COUNT)
            .filter(|&index| self.cell_at(index) == EMPTY)
            .collect()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|&rank| rank != EMPTY)
    }

    /// Returns the largest rank on the board (0 for an empty board).
    #[must_use]
    pub fn max_rank(&self) -> u8 {
        self.cells.iter().flatten().copied().max().unwrap_or(EMPTY)
    }

    /// Swaps cells across the main diagonal.
    pub fn transpose(&mut self) {
        for r in 0..BOARD_SIZE {
            for c in r + 1..BOARD_SIZE {
                let tmp = self.cells[r][c];
                self.cells[r][c] = self.cells[c][r];
                self.cells[c][r] = tmp;
            }
        }
    }

    /// Mirrors each row left to right.
    pub fn reflect_horizontal(&mut self) {
        for row in &mut self.cells {
            row.reverse();
        }
    }

    /// Mirrors the rows top to bottom.
    pub fn reflect_vertical(&mut self) {
        self.cells.reverse();
    }

    /// Rotates the board clockwise by a quarter turn.
    pub fn rotate_right(&mut self) {
        self.transpose();
        self.reflect_horizontal();
    }

    /// Rotates the board counterclockwise by a quarter turn.
    pub fn rotate_left(&mut self) {
        self.transpose();
        self.reflect_vertical();
    }

    /// Rotates the board by a half turn.
    pub fn reverse(&mut self) {
        self.reflect_horizontal();
        self.reflect_vertical();
    }

    /// Rotates the board clockwise by `turns` quarter turns.
    ///
    /// Negative values rotate counterclockwise.
    ///
    /// # Example
    ///
    /// ```
    /// use fibtile_engine::Board;
    ///
    /// let board = Board::from_ranks([
    ///     [1, 2, 0, 0],
    ///     [0, 0, 0, 0],
    ///     [0, 0, 0, 0],
    ///     [0, 0, 0, 3],
    /// ]);
    /// let mut rotated = board;
    /// rotated.rotate(1);
    /// assert_eq!(rotated.row(0), [0, 0, 0, 1]);
    /// rotated.rotate(-1);
    /// assert_eq!(rotated, board);
    /// ```
    pub fn rotate(&mut self, turns: i32) {
        match turns.rem_euclid(4) {
            1 => self.rotate_right(),
            2 => self.reverse(),
            3 => self.rotate_left(),
            _ => {}
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "+------------------------+")?;
        for row in &self.cells {
            f.write_char('|')?;
            for &rank in row {
                write!(f, "{:>6}", tile_value(rank))?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "+------------------------+")
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: "0,1,0,0,2,..." (row-major ranks)
        let mut s = String::with_capacity(CELL_COUNT * 3);
        for (i, rank) in self.cells.iter().flatten().enumerate() {
            if i > 0 {
                s.push(',');
            }
            write!(&mut s, "{rank}").unwrap();
        }
        serializer.serialize_str(&s)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;

        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != CELL_COUNT {
            return Err(serde::de::Error::custom(format!(
                "expected {} comma-separated ranks, got {}",
                CELL_COUNT,
                parts.len()
            )));
        }

        let mut board = Self::EMPTY;
        for (i, part) in parts.iter().enumerate() {
            let rank = part.trim().parse::<u8>().map_err(|e| {
                serde::de::Error::custom(format!("invalid rank at cell {i}: {part} ({e})"))
            })?;
            if rank >= RANK_LIMIT {
                return Err(serde::de::Error::custom(format!(
                    "rank at cell {i} out of range: {rank}"
                )));
            }
            board.set_at(i, rank);
        }
        Ok(board)
    }
}
