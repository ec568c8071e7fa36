//! Board evaluation for the Fibonacci tile game.
//!
//! The value of a board is a linear function of eight lookup tables:
//!
//! 1. **Line tuples** ([`line_tuple`]) - Each row and each column is a tuple of four
//!    ranks, encoded as a base-24 number and used as an index into its own table.
//! 2. **Weight tables** ([`weight`]) - The tables themselves and their binary file format.
//!
//! ```text
//! value = Σ rows  table[r][encode(row r)]
//!       + Σ cols  table[4 + c][encode(column c)]
//! ```
//!
//! Untrained tables hold 0.0 everywhere, so every board is worth 0.0 until
//! weights are loaded or learned.
//!
//! # Example
//!
//! ```
//! use fibtile_engine::Board;
//! use fibtile_evaluator::{BoardEvaluator, LineTupleEvaluator};
//!
//! let mut evaluator = LineTupleEvaluator::new();
//! let board = Board::from_ranks([[1, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
//! assert_eq!(evaluator.evaluate(&board), 0.0);
//!
//! evaluator.update(&board, 1.0);
//! assert_eq!(evaluator.evaluate(&board), 8.0);
//! ```

pub use self::{line_tuple::*, weight::*};

pub mod line_tuple;
pub mod weight;
