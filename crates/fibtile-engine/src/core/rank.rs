//! Fibonacci rank mapping.
//!
//! Cells store a small integer *rank* instead of the displayed tile value. The
//! displayed value of a rank is a Fibonacci number, with one quirk: ranks 0 and 1
//! map directly to `fib(0) = 0` and `fib(1) = 1`, while every rank `r >= 2` is
//! advanced by one extra step and maps to `fib(r + 1)`.
//!
//! ```text
//! rank   0  1  2  3  4  5   6   7   8 ...
//! tile   0  1  2  3  5  8  13  21  34 ...
//! ```
//!
//! Forming a tile of rank `r` by a merge scores exactly [`tile_value(r)`](tile_value).

/// Exclusive upper bound of the ranks a board may hold.
///
/// Rows and columns are encoded as base-24 numbers by the evaluator, so every
/// rank must be a single base-24 digit.
pub const RANK_LIMIT: u8 = 24;

/// Rank of an empty cell.
pub const EMPTY: u8 = 0;

#[expect(clippy::cast_possible_truncation)]
const TILE_VALUES: [u32; RANK_LIMIT as usize] = {
    let mut values = [0; RANK_LIMIT as usize];
    let mut rank = 0;
    while rank < RANK_LIMIT as usize {
        let n = if rank >= 2 { rank + 1 } else { rank };
        values[rank] = fib(n as u32) as u32;
        rank += 1;
    }
    values
};

/// Returns the `n`-th Fibonacci number with `fib(0) = 0` and `fib(1) = 1`.
///
/// # Example
///
/// ```
/// use fibtile_engine::fib;
///
/// assert_eq!(fib(0), 0);
/// assert_eq!(fib(1), 1);
/// assert_eq!(fib(10), 55);
/// ```
#[must_use]
pub const fn fib(n: u32) -> u64 {
    let (mut a, mut b) = (0_u64, 1_u64);
    let mut i = 0;
    while i < n {
        let next = a + b;
        a = b;
        b = next;
        i += 1;
    }
    a
}

/// Returns the displayed tile value of `rank`, which is also the score of forming it.
///
/// # Panics
///
/// Panics if `rank >= RANK_LIMIT`.
///
/// # Example
///
/// ```
/// use fibtile_engine::tile_value;
///
/// assert_eq!(tile_value(0), 0);
/// assert_eq!(tile_value(1), 1);
/// assert_eq!(tile_value(2), 2);
/// assert_eq!(tile_value(4), 5);
/// ```
#[inline]
#[must_use]
pub const fn tile_value(rank: u8) -> u32 {
    assert!(rank < RANK_LIMIT, "rank out of range");
    TILE_VALUES[rank as usize]
}
