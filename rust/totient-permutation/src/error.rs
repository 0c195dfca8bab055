//! Errors raised by the sieve, the digit comparator and the search driver.

/// Errors that can occur while searching for totient permutations.
#[derive(Debug, thiserror::Error)]
pub enum TotientError {
    /// The search limit must be strictly greater than 2.
    #[error("limit must be an integer greater than 2, got {0}")]
    InvalidLimit(u64),

    /// Totient values are stored as `u32`, so the table cannot exceed that width.
    #[error("limit {limit} exceeds the largest supported limit {max}")]
    LimitTooLarge { limit: u64, max: u64 },

    /// The digit comparator only accepts positive integers.
    #[error("digit permutation test requires positive integers, got ({x}, {y})")]
    InvalidArgument { x: u64, y: u64 },

    /// The scan finished without any n whose totient is a permutation of n.
    #[error("no n below {limit} has a totient that is a digit permutation of n")]
    NoSolutionFound { limit: u64 },

    /// The sieve winner did not survive an independent re-check.
    #[error("verification failed for n = {n}: sieve gave phi = {sieve}, trial division gave {naive}")]
    VerificationFailed { n: u64, sieve: u64, naive: u64 },

    /// Input text could not be parsed as an integer.
    #[error("expected an integer, got {0:?}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TotientError {
    /// Whether the error stems from bad caller input rather than the computation
    /// or the environment. The binary exits with status 2 for these.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            TotientError::InvalidLimit(_)
                | TotientError::LimitTooLarge { .. }
                | TotientError::InvalidArgument { .. }
                | TotientError::InvalidInput(_)
        )
    }
}

/// Parse a search limit from user-supplied text.
///
/// Surrounding whitespace is ignored. The value must be an integer greater than 2.
pub fn parse_limit(text: &str) -> Result<u64, TotientError> {
    let trimmed = text.trim();
    let limit: u64 = trimmed
        .parse()
        .map_err(|_| TotientError::InvalidInput(trimmed.to_string()))?;
    if limit <= 2 {
        return Err(TotientError::InvalidLimit(limit));
    }
    Ok(limit)
}
