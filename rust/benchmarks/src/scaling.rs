//! Scaling benchmark for the totient permutation search.
//!
//! Runs the sieve and the scan at increasing limits, printing the time spent
//! in each phase and the empirical growth exponent between consecutive limits.

use num_traits::ToPrimitive;
use totient_permutation::{run_search, SearchReport, TotientError};

fn main() {
    println!("================================================================");
    println!("  SCALING: Totient Sieve + Permutation Scan");
    println!("================================================================\n");

    let limits: Vec<u64> = vec![
        1_000, 10_000, 100_000, 1_000_000, 2_000_000, 5_000_000, 10_000_000,
    ];

    println!(
        "  {:>10} {:>10} {:>10} {:>8} {:>6} {:>10} {:>14}",
        "limit", "sieve_ms", "scan_ms", "matches", "impr", "best_n", "ratio"
    );
    println!("  {}", "-".repeat(76));

    let mut previous: Option<(u64, f64)> = None;
    let mut exponents = Vec::new();

    for &limit in &limits {
        match run_search(limit) {
            Ok(report) => {
                print_row(&report);
                let total = report.sieve_seconds + report.scan_seconds;
                if let Some((prev_limit, prev_total)) = previous {
                    if let Some(k) = growth_exponent(prev_limit, prev_total, limit, total) {
                        exponents.push((limit, k));
                    }
                }
                previous = Some((limit, total));
            }
            Err(TotientError::NoSolutionFound { .. }) => {
                println!(
                    "  {:>10} {:>10} {:>10} {:>8} {:>6} {:>10} {:>14}",
                    limit, "-", "-", 0, 0, "-", "none"
                );
            }
            Err(e) => {
                eprintln!("  {:>10} failed: {}", limit, e);
            }
        }
    }

    println!("\n  Empirical exponent k in time ~ limit^k:");
    for (limit, k) in &exponents {
        println!("    up to {:>10}: k = {:.3}", limit, k);
    }
}

fn print_row(report: &SearchReport) {
    println!(
        "  {:>10} {:>10.2} {:>10.2} {:>8} {:>6} {:>10} {:>14.10}",
        report.limit,
        report.sieve_seconds * 1e3,
        report.scan_seconds * 1e3,
        report.matches,
        report.improvements,
        report.best.n,
        report.best.ratio
    );
}

/// Slope of log(time) against log(limit) between two measurements.
fn growth_exponent(l0: u64, t0: f64, l1: u64, t1: f64) -> Option<f64> {
    let (l0, l1) = (l0.to_f64()?, l1.to_f64()?);
    if t0 <= 0.0 || t1 <= 0.0 || l1 <= l0 {
        return None;
    }
    Some((t1 / t0).ln() / (l1 / l0).ln())
}
