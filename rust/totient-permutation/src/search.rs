//! Scan for the n whose totient permutes its digits with the smallest n/φ(n).

use std::fmt;
use std::time::Instant;

use serde::Serialize;

use crate::digits::is_permutation;
use crate::error::TotientError;
use crate::sieve::TotientTable;

/// The winning candidate of a scan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BestRatio {
    pub n: u64,
    pub phi: u64,
    /// n / φ(n)
    pub ratio: f64,
}

impl fmt::Display for BestRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n = {}, phi(n) = {}, n/phi(n) = {:.10}",
            self.n, self.phi, self.ratio
        )
    }
}

/// Running minimum over candidates. Only a strictly smaller ratio replaces the held one.
#[derive(Debug, Default)]
struct BestTracker {
    best: Option<BestRatio>,
    improvements: usize,
}

impl BestTracker {
    fn offer(&mut self, n: u64, phi: u64) -> Option<BestRatio> {
        let ratio = n as f64 / phi as f64;
        let improves = match self.best {
            None => true,
            Some(held) => ratio < held.ratio,
        };
        if !improves {
            return None;
        }
        let candidate = BestRatio { n, phi, ratio };
        self.best = Some(candidate);
        self.improvements += 1;
        Some(candidate)
    }
}

/// Summary of a complete search run.
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    pub limit: u64,
    pub best: BestRatio,
    /// Candidates whose totient was a digit permutation.
    pub matches: usize,
    /// Times the running best was replaced.
    pub improvements: usize,
    pub sieve_seconds: f64,
    pub scan_seconds: f64,
}

impl fmt::Display for SearchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Value of `n`, where 1 < n < {},", self.limit)?;
        writeln!(f, "  where `φ(n)` is a permutation of `n`,")?;
        writeln!(f, "  having the least ratio `n/φ(n)`:")?;
        writeln!(f, "    n      = {}", self.best.n)?;
        writeln!(f, "    φ(n)   = {}", self.best.phi)?;
        write!(f, "    n/φ(n) = {:.10}", self.best.ratio)
    }
}

/// Find the n in `(1, limit)` with φ(n) a digit permutation of n and minimal n/φ(n).
pub fn find_min_ratio(limit: u64) -> Result<BestRatio, TotientError> {
    find_min_ratio_with_progress(limit, |_| {})
}

/// Like [`find_min_ratio`], calling `on_improvement` each time the running best improves.
///
/// Successive notifications carry strictly decreasing ratios.
pub fn find_min_ratio_with_progress(
    limit: u64,
    on_improvement: impl FnMut(&BestRatio),
) -> Result<BestRatio, TotientError> {
    run_search_with_progress(limit, on_improvement).map(|report| report.best)
}

/// Run the sieve and the scan, returning timings and counters alongside the winner.
pub fn run_search(limit: u64) -> Result<SearchReport, TotientError> {
    run_search_with_progress(limit, |_| {})
}

/// Like [`run_search`], calling `on_improvement` each time the running best improves.
pub fn run_search_with_progress(
    limit: u64,
    mut on_improvement: impl FnMut(&BestRatio),
) -> Result<SearchReport, TotientError> {
    let start = Instant::now();
    let table = TotientTable::build(limit)?;
    let sieve_seconds = start.elapsed().as_secs_f64();

    let scan_start = Instant::now();
    let mut tracker = BestTracker::default();
    let mut matches = 0usize;

    for (n, phi) in table.iter_from(2) {
        let phi = u64::from(phi);
        if !is_permutation(n, phi)? {
            continue;
        }
        matches += 1;
        if let Some(improved) = tracker.offer(n, phi) {
            log::info!("Found {} (ratio {:.10})", improved.n, improved.ratio);
            on_improvement(&improved);
        }
    }
    let scan_seconds = scan_start.elapsed().as_secs_f64();

    let best = tracker
        .best
        .ok_or(TotientError::NoSolutionFound { limit })?;

    log::debug!(
        "Scan below {} finished: {} matches, {} improvements, sieve {:.3}s, scan {:.3}s",
        limit,
        matches,
        tracker.improvements,
        sieve_seconds,
        scan_seconds
    );

    Ok(SearchReport {
        limit,
        best,
        matches,
        improvements: tracker.improvements,
        sieve_seconds,
        scan_seconds,
    })
}
