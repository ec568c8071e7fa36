//! Row and column tuple evaluation.
//!
//! Every row and every column of the board is a 4-tuple of ranks. A tuple is
//! encoded as a base-24 number, leftmost (or topmost) cell most significant:
//!
//! ```text
//! index = t₀·24³ + t₁·24² + t₂·24 + t₃
//! ```
//!
//! Rows `0..4` use tables `0..4`, columns `0..4` use tables `4..8`.

use std::{array, fmt, iter};

use fibtile_engine::{BOARD_SIZE, Board, RANK_LIMIT};

use crate::weight::WeightTable;

/// Radix of the tuple encoding.
pub const TUPLE_BASE: usize = RANK_LIMIT as usize;

/// Number of distinct tuple encodings, the default size of every table.
pub const TABLE_LEN: usize = TUPLE_BASE.pow(BOARD_SIZE as u32);

/// Number of tables: one per row and one per column.
pub const TABLE_COUNT: usize = 2 * BOARD_SIZE;

/// Scores a board position (higher is better for the player).
pub trait BoardEvaluator: fmt::Debug {
    fn evaluate(&self, board: &Board) -> f32;
}

/// Encodes a tuple of four ranks as a base-24 index.
///
/// # Panics
///
/// Panics if a rank is `>= 24`; such a rank has no digit in the encoding.
///
/// # Example
///
/// ```
/// use fibtile_evaluator::{decode_line, encode_line};
///
/// assert_eq!(encode_line([0, 0, 0, 1]), 1);
/// assert_eq!(encode_line([1, 0, 0, 0]), 24 * 24 * 24);
/// assert_eq!(decode_line(encode_line([3, 0, 23, 7])), [3, 0, 23, 7]);
/// ```
#[inline]
#[must_use]
pub fn encode_line(line: [u8; BOARD_SIZE]) -> usize {
    line.into_iter().fold(0, |index, rank| {
        assert!(
            rank < RANK_LIMIT,
            "rank {rank} cannot be encoded (limit {RANK_LIMIT})"
        );
        index * TUPLE_BASE + usize::from(rank)
    })
}

/// Decodes a base-24 index back into its four ranks.
///
/// # Panics
///
/// Panics if `index >= TABLE_LEN`.
#[must_use]
pub fn decode_line(index: usize) -> [u8; BOARD_SIZE] {
    assert!(index < TABLE_LEN, "tuple index {index} out of range");
    let mut line = [0; BOARD_SIZE];
    let mut rest = index;
    for digit in line.iter_mut().rev() {
        *digit = u8::try_from(rest % TUPLE_BASE).expect("digit is below the base");
        rest /= TUPLE_BASE;
    }
    line
}

/// Returns the table index selected by each row and column of `board`.
///
/// Position `i` of the result is the index into table `i`.
#[must_use]
pub fn tuple_indices(board: &Board) -> [usize; TABLE_COUNT] {
    array::from_fn(|i| {
        if i < BOARD_SIZE {
            encode_line(board.row(i))
        } else {
            encode_line(board.column(i - BOARD_SIZE))
        }
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum TableShapeError {
    #[display("expected {TABLE_COUNT} weight tables, got {_0}")]
    TableCount(#[error(not(source))] usize),
    #[display("weight table {table} has {len} entries, need at least {TABLE_LEN}")]
    TableTooShort { table: usize, len: usize },
}

/// Linear evaluator over the four row tuples and the four column tuples.
#[derive(Debug, Clone)]
pub struct LineTupleEvaluator {
    tables: Vec<WeightTable>,
}

impl Default for LineTupleEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl LineTupleEvaluator {
    /// Creates an evaluator with untrained tables (every entry 0.0).
    #[must_use]
    pub fn new() -> Self {
        Self {
            tables: iter::repeat_with(|| WeightTable::zeroed(TABLE_LEN))
                .take(TABLE_COUNT)
                .collect(),
        }
    }

    /// Creates an evaluator from loaded tables.
    ///
    /// There must be exactly [`TABLE_COUNT`] tables, each large enough for every
    /// tuple encoding.
    pub fn from_tables(tables: Vec<WeightTable>) -> Result<Self, TableShapeError> {
        if tables.len() != TABLE_COUNT {
            return Err(TableShapeError::TableCount(tables.len()));
        }
        if let Some((table, t)) = tables
            .iter()
            .enumerate()
            .find(|(_, t)| t.len() < TABLE_LEN)
        {
            return Err(TableShapeError::TableTooShort {
                table,
                len: t.len(),
            });
        }
        Ok(Self { tables })
    }

    #[must_use]
    pub fn tables(&self) -> &[WeightTable] {
        &self.tables
    }

    /// Adds `delta` to every entry selected by `board`.
    pub fn update(&mut self, board: &Board, delta: f32) {
        for (table, index) in iter::zip(&mut self.tables, tuple_indices(board)) {
            table[index] += delta;
        }
    }
}

impl BoardEvaluator for LineTupleEvaluator {
    #[inline]
    fn evaluate(&self, board: &Board) -> f32 {
        iter::zip(&self.tables, tuple_indices(board))
            .map(|(table, index)| table[index])
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_len() {
        assert_eq!(TABLE_LEN, 331_776);
    }

    #[test]
    fn test_encode_digit_weights() {
        assert_eq!(encode_line([0, 0, 0, 0]), 0);
        assert_eq!(encode_line([0, 0, 1, 0]), 24);
        assert_eq!(encode_line([0, 1, 0, 0]), 576);
        assert_eq!(encode_line([1, 0, 0, 0]), 13_824);
        assert_eq!(encode_line([23, 23, 23, 23]), TABLE_LEN - 1);
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        for a in (0..RANK_LIMIT).step_by(5) {
            for b in 0..RANK_LIMIT {
                for c in (0..RANK_LIMIT).rev().step_by(7) {
                    for d in [0, 1, 11, 23] {
                        let line = [a, b, c, d];
                        assert_eq!(decode_line(encode_line(line)), line);
                    }
                }
            }
        }
        for index in [0, 1, 23, 24, 13_823, TABLE_LEN - 1] {
            assert_eq!(encode_line(decode_line(index)), index);
        }
    }

    #[test]
    #[should_panic(expected = "cannot be encoded")]
    fn test_encode_rejects_out_of_range_rank() {
        let _ = encode_line([0, 24, 0, 0]);
    }

    #[test]
    fn test_tuple_indices_rows_then_columns() {
        let board = Board::from_ranks([[1, 2, 3, 4], [0; 4], [0; 4], [0, 0, 0, 5]]);
        let indices = tuple_indices(&board);
        assert_eq!(indices[0], encode_line([1, 2, 3, 4]));
        assert_eq!(indices[1], 0);
        assert_eq!(indices[3], encode_line([0, 0, 0, 5]));
        assert_eq!(indices[4], encode_line([1, 0, 0, 0]));
        assert_eq!(indices[7], encode_line([4, 0, 0, 5]));
    }

    #[test]
    fn test_untrained_evaluator_is_constant() {
        let evaluator = LineTupleEvaluator::new();
        assert_eq!(evaluator.tables().len(), TABLE_COUNT);
        for board in [
            Board::EMPTY,
            Board::from_ranks([[1, 2, 3, 4], [5, 6, 7, 8], [0; 4], [0, 0, 0, 23]]),
        ] {
            assert_eq!(evaluator.evaluate(&board), 0.0);
        }
    }

    #[test]
    fn test_evaluate_sums_row_and_column_entries() {
        let mut tables: Vec<_> = (0..TABLE_COUNT)
            .map(|_| WeightTable::zeroed(TABLE_LEN))
            .collect();
        let board = Board::from_ranks([[1, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        tables[0][encode_line([1, 0, 0, 0])] = 2.0;
        tables[1][0] = 0.25;
        tables[4][encode_line([1, 0, 0, 0])] = 10.0;
        tables[5][0] = -1.0;
        let evaluator = LineTupleEvaluator::from_tables(tables).unwrap();

        assert_eq!(evaluator.evaluate(&board), 2.0 + 0.25 + 10.0 - 1.0);
    }

    #[test]
    fn test_update_moves_only_selected_entries() {
        let mut evaluator = LineTupleEvaluator::new();
        let board = Board::from_ranks([[1, 0, 0, 0], [0, 2, 0, 0], [0; 4], [0; 4]]);
        let other = Board::from_ranks([[0, 0, 0, 3], [0; 4], [0; 4], [0; 4]]);

        evaluator.update(&board, 0.5);
        assert_eq!(evaluator.evaluate(&board), 4.0);
        // only rows 2-3 and column 2 of `other` match `board`
        assert_eq!(evaluator.evaluate(&other), 0.5 * 3.0);
    }

    #[test]
    fn test_from_tables_validates_shape() {
        let err =
            LineTupleEvaluator::from_tables(vec![WeightTable::zeroed(TABLE_LEN)]).unwrap_err();
        assert_eq!(err, TableShapeError::TableCount(1));

        let mut tables: Vec<_> = (0..TABLE_COUNT)
            .map(|_| WeightTable::zeroed(TABLE_LEN))
            .collect();
        tables[6] = WeightTable::zeroed(10);
        let err = LineTupleEvaluator::from_tables(tables).unwrap_err();
        assert_eq!(err, TableShapeError::TableTooShort { table: 6, len: 10 });
    }
}
