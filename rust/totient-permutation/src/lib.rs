//! Totient permutations.
//!
//! Finds the n in `(1, N)` for which φ(n) is a permutation of the decimal
//! digits of n and the ratio n/φ(n) is smallest. A single totient sieve fills
//! φ for every integer below N, then a linear scan tests each (n, φ(n)) pair
//! with a fixed-size digit counter and keeps the running minimum.
//!
//! Example: φ(87109) = 79180, a permutation of 87109.

pub mod digits;
pub mod error;
pub mod search;
pub mod sieve;

pub use digits::{digit_count, is_permutation, DigitCounts};
pub use error::{parse_limit, TotientError};
pub use search::{
    find_min_ratio, find_min_ratio_with_progress, run_search, run_search_with_progress,
    BestRatio, SearchReport,
};
pub use sieve::{totient_naive, TotientTable, MAX_LIMIT};
