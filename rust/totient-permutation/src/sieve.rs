//! Euler totient sieve over a contiguous range `[0, limit)`.
//!
//! Every entry starts equal to its index. Walking upward from 2, an entry that
//! still equals its index has never been discounted, which only happens for a
//! prime: a composite was already discounted by its smallest prime factor
//! before the walk reached it. Each prime `p` then applies
//! `phi[m] -= phi[m] / p` to all of its multiples, removing the `1/p` share of
//! φ(m), so every `m` is discounted exactly once per distinct prime factor.
//!
//! The primality check must read the entry before any discount at index `i`
//! is applied, otherwise the prime itself would no longer match its index.

use num_integer::Roots;
use num_traits::ToPrimitive;

use crate::error::TotientError;

/// Largest accepted limit. Entries are `u32`, and the biggest value stored is `limit - 1`.
pub const MAX_LIMIT: u64 = u32::MAX as u64;

/// Totient values for every integer in `[0, limit)`.
///
/// Indices 0 and 1 keep their own value and are never queried by the search.
#[derive(Debug, Clone)]
pub struct TotientTable {
    phi: Vec<u32>,
}

impl TotientTable {
    /// Run the sieve for all integers below `limit`.
    pub fn build(limit: u64) -> Result<Self, TotientError> {
        if limit <= 2 {
            return Err(TotientError::InvalidLimit(limit));
        }
        let too_large = TotientError::LimitTooLarge {
            limit,
            max: MAX_LIMIT,
        };
        if limit > MAX_LIMIT {
            return Err(too_large);
        }
        let size = limit.to_usize().ok_or(too_large)?;

        let mut phi: Vec<u32> = (0..limit as u32).collect();
        let mut primes_seen = 0usize;

        for i in 2..size {
            // Still undiscounted: i is prime.
            if phi[i] as usize != i {
                continue;
            }
            primes_seen += 1;
            let p = i as u32;
            for m in (i..size).step_by(i) {
                phi[m] -= phi[m] / p;
            }
        }

        log::debug!(
            "Totient sieve below {} done: {} primes discounted",
            limit,
            primes_seen
        );

        Ok(TotientTable { phi })
    }

    /// Exclusive upper bound of the table.
    pub fn limit(&self) -> u64 {
        self.phi.len() as u64
    }

    /// φ(i), or `None` when `i` lies outside the table.
    pub fn phi(&self, i: u64) -> Option<u32> {
        let idx = i.to_usize()?;
        self.phi.get(idx).copied()
    }

    /// Raw table; index `i` holds φ(i) for `i >= 1`.
    pub fn as_slice(&self) -> &[u32] {
        &self.phi
    }

    /// Primality falls out of the table: a prime p is the only n >= 2 with φ(n) = n - 1.
    pub fn is_prime(&self, i: u64) -> bool {
        i >= 2 && self.phi(i).map_or(false, |v| u64::from(v) == i - 1)
    }

    /// Iterate `(n, φ(n))` pairs for `n` in `[start, limit)`.
    pub fn iter_from(&self, start: u64) -> impl Iterator<Item = (u64, u32)> + '_ {
        let skip = start.to_usize().unwrap_or(usize::MAX);
        self.phi
            .iter()
            .enumerate()
            .skip(skip)
            .map(|(i, &v)| (i as u64, v))
    }
}

/// Euler's totient by trial division: φ(n) = n · ∏(1 - 1/p) over distinct primes p | n.
///
/// φ(0) = 0 and φ(1) = 1.
pub fn totient_naive(n: u64) -> u64 {
    if n == 0 {
        return 0;
    }
    let mut result = n;
    let mut remaining = n;
    let mut p = 2u64;
    while p <= Roots::sqrt(&remaining) {
        if remaining % p == 0 {
            while remaining % p == 0 {
                remaining /= p;
            }
            result -= result / p;
        }
        p += 1;
    }
    if remaining > 1 {
        result -= result / remaining;
    }
    result
}
