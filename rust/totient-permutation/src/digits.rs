//! Decimal digit multisets and the permutation test.

use crate::error::TotientError;

/// Signed per-digit counters, indexed by digit value 0-9.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DigitCounts {
    counts: [i32; 10],
}

impl DigitCounts {
    /// Count the decimal digits of `x`. Zero has the single digit `0`.
    pub fn of(x: u64) -> Self {
        let mut counts = DigitCounts::default();
        counts.add(x);
        counts
    }

    /// Increment the counter of every digit of `x`.
    pub fn add(&mut self, x: u64) {
        for d in Digits::new(x) {
            self.counts[d] += 1;
        }
    }

    /// Decrement the counter of every digit of `x`.
    ///
    /// Stops at the first counter that goes negative and returns `false`:
    /// `x` then holds some digit more often than the multiset does.
    pub fn remove(&mut self, x: u64) -> bool {
        for d in Digits::new(x) {
            self.counts[d] -= 1;
            if self.counts[d] < 0 {
                return false;
            }
        }
        true
    }

    pub fn count(&self, digit: usize) -> i32 {
        self.counts.get(digit).copied().unwrap_or(0)
    }

    /// All counters are back to zero.
    pub fn is_balanced(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }
}

/// Least-significant-first digits of a `u64`.
struct Digits {
    rest: u64,
    done: bool,
}

impl Digits {
    fn new(x: u64) -> Self {
        Digits {
            rest: x,
            done: false,
        }
    }
}

impl Iterator for Digits {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.done {
            return None;
        }
        let d = (self.rest % 10) as usize;
        self.rest /= 10;
        self.done = self.rest == 0;
        Some(d)
    }
}

/// Number of decimal digits of `x` (1 for zero).
pub fn digit_count(x: u64) -> u32 {
    match x.checked_ilog10() {
        Some(log) => log + 1,
        None => 1,
    }
}

/// Whether the decimal forms of `x` and `y` are permutations of each other.
///
/// Both arguments must be positive. Digits of `x` are counted, then the
/// digits of `y` are removed, failing as soon as one runs out. A final balance
/// check rejects a `y` that uses only a strict subset of `x`'s digits, which
/// keeps the test symmetric.
pub fn is_permutation(x: u64, y: u64) -> Result<bool, TotientError> {
    if x == 0 || y == 0 {
        return Err(TotientError::InvalidArgument { x, y });
    }
    if digit_count(x) != digit_count(y) {
        return Ok(false);
    }
    let mut counts = DigitCounts::of(x);
    if !counts.remove(y) {
        return Ok(false);
    }
    Ok(counts.is_balanced())
}
