//! totient-permutation CLI: minimal n/φ(n) over totient digit permutations.
//!
//! Usage:
//!   totient-permutation [--limit=N] [--json] [--output=<path>] [--quiet] [--verify]
//!
//! Options:
//!   --limit=<N>      Exclusive upper bound, N > 2 (prompted on stdin when absent)
//!   --json           Print the search report as JSON instead of text
//!   --output=<path>  Also write the JSON report to <path>
//!   --quiet          Do not print a "Found n" line for each improvement
//!   --verify         Re-check the winner with trial-division totient
//!
//! Set TOTIENT_LOG (e.g. TOTIENT_LOG=debug) to enable logging.
//!
//! Exit status: 0 on success, 2 for invalid input, 1 for any other error.

use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use totient_permutation::{
    is_permutation, parse_limit, run_search_with_progress, totient_naive, SearchReport,
    TotientError,
};

const PROMPT: &str = "Enter a natural number (greater than 2): ";

/// CLI configuration parsed from command-line arguments.
struct CliConfig {
    limit: Option<String>,
    json: bool,
    output: Option<PathBuf>,
    quiet: bool,
    verify: bool,
}

fn main() {
    if std::env::var("TOTIENT_LOG").is_ok() {
        let env = env_logger::Env::new()
            .filter("TOTIENT_LOG")
            .write_style("TOTIENT_LOG_STYLE");
        env_logger::init_from_env(env);
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = parse_args(&args);

    if let Err(e) = run(&config) {
        eprintln!("error: {}", e);
        std::process::exit(exit_code(&e));
    }
}

/// 2 for bad caller input, 1 for every other failure.
fn exit_code(e: &TotientError) -> i32 {
    if e.is_invalid_input() {
        2
    } else {
        1
    }
}

fn run(config: &CliConfig) -> Result<(), TotientError> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let limit = resolve_limit(config, &mut stdin.lock(), &mut stdout)?;
    log::debug!("Searching below {}", limit);

    let quiet = config.quiet || config.json;
    let report = run_search_with_progress(limit, |best| {
        if !quiet {
            println!("Found {}", best.n);
        }
    })?;

    if config.verify {
        verify(&report)?;
    }

    println!("{}", render(&report, config.json)?);

    if let Some(path) = &config.output {
        write_report(path, &report)?;
        if !config.json {
            println!("\nReport saved to {}", path.display());
        }
    }

    Ok(())
}

/// Take the limit from the command line, or prompt once and read a single line.
fn resolve_limit(
    config: &CliConfig,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<u64, TotientError> {
    if let Some(text) = &config.limit {
        return parse_limit(text);
    }
    write!(out, "{}", PROMPT)?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    parse_limit(&line)
}

fn render(report: &SearchReport, json: bool) -> Result<String, TotientError> {
    if json {
        Ok(serde_json::to_string_pretty(report)?)
    } else {
        Ok(report.to_string())
    }
}

fn write_report(path: &Path, report: &SearchReport) -> Result<(), TotientError> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Re-check the winner with trial division before it is reported.
fn verify(report: &SearchReport) -> Result<(), TotientError> {
    let best = &report.best;
    let naive = totient_naive(best.n);
    if naive == best.phi && is_permutation(best.n, naive)? {
        log::info!("Verified phi({}) = {} by trial division", best.n, naive);
        return Ok(());
    }
    log::error!(
        "Verification failed for n = {}: sieve gave {}, trial division gave {}",
        best.n,
        best.phi,
        naive
    );
    Err(TotientError::VerificationFailed {
        n: best.n,
        sieve: best.phi,
        naive,
    })
}

// ---------------------------------------------------------------------------
// Argument parsing helpers
// ---------------------------------------------------------------------------

fn parse_args(args: &[String]) -> CliConfig {
    let mut map = HashMap::new();
    for arg in args {
        if let Some(kv) = arg.strip_prefix("--") {
            if let Some((k, v)) = kv.split_once('=') {
                map.insert(k.to_string(), v.to_string());
            } else {
                map.insert(kv.to_string(), "true".to_string());
            }
        } else {
            // A bare positional argument is taken as the limit.
            map.entry("limit".to_string()).or_insert_with(|| arg.clone());
        }
    }

    CliConfig {
        limit: map.get("limit").cloned(),
        json: flag(&map, "json"),
        output: map.get("output").map(PathBuf::from),
        quiet: flag(&map, "quiet"),
        verify: flag(&map, "verify"),
    }
}

fn flag(map: &HashMap<String, String>, key: &str) -> bool {
    map.get(key).map_or(false, |v| v != "false")
}

#[cfg(test)]
mod tests {
    use super::*;

    use totient_permutation::run_search;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args_flags() {
        let config = parse_args(&args(&["--limit=87110", "--json", "--output=out.json"]));
        assert_eq!(config.limit.as_deref(), Some("87110"));
        assert!(config.json);
        assert!(!config.quiet);
        assert!(!config.verify);
        assert_eq!(config.output, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn test_parse_args_positional_limit() {
        let config = parse_args(&args(&["10000000", "--quiet", "--verify"]));
        assert_eq!(config.limit.as_deref(), Some("10000000"));
        assert!(config.quiet);
        assert!(config.verify);
    }

    #[test]
    fn test_parse_args_empty_prompts() {
        let config = parse_args(&[]);
        assert!(config.limit.is_none());
        assert!(!config.json);
    }

    #[test]
    fn test_verify_accepts_sieve_winner() {
        let report = run_search(1000).unwrap();
        assert!(verify(&report).is_ok());
    }

    #[test]
    fn test_verify_rejects_wrong_totient() {
        let mut report = run_search(1000).unwrap();
        assert_eq!(report.best.n, 291);
        report.best.phi = 1;
        match verify(&report) {
            Err(TotientError::VerificationFailed { n, sieve, naive }) => {
                assert_eq!((n, sieve, naive), (291, 1, 192));
            }
            other => panic!("expected VerificationFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_verify_rejects_non_permutation() {
        // phi(22) = 10 is correct, but 10 does not permute 22.
        let mut report = run_search(1000).unwrap();
        report.best.n = 22;
        report.best.phi = 10;
        assert!(matches!(
            verify(&report),
            Err(TotientError::VerificationFailed { n: 22, sieve: 10, naive: 10 })
        ));
    }

    #[test]
    fn test_resolve_limit_prompts_once() {
        let config = parse_args(&[]);
        let mut input = io::Cursor::new(b"87110\n".to_vec());
        let mut out = Vec::new();
        assert_eq!(resolve_limit(&config, &mut input, &mut out).unwrap(), 87110);
        assert_eq!(String::from_utf8(out).unwrap(), PROMPT);
    }

    #[test]
    fn test_resolve_limit_prefers_argument() {
        let config = parse_args(&args(&["--limit=100"]));
        let mut input = io::Cursor::new(Vec::new());
        let mut out = Vec::new();
        assert_eq!(resolve_limit(&config, &mut input, &mut out).unwrap(), 100);
        assert!(out.is_empty(), "no prompt when the limit is given");
    }

    #[test]
    fn test_resolve_limit_rejects_bad_line() {
        let config = parse_args(&[]);
        let mut input = io::Cursor::new(b"two\n".to_vec());
        let mut out = Vec::new();
        let err = resolve_limit(&config, &mut input, &mut out).unwrap_err();
        assert!(matches!(err, TotientError::InvalidInput(_)));
        assert_eq!(exit_code(&err), 2);
    }

    #[test]
    fn test_exit_codes() {
        let no_solution = run_search(3).unwrap_err();
        assert!(matches!(no_solution, TotientError::NoSolutionFound { limit: 3 }));
        assert_eq!(exit_code(&no_solution), 1);
        assert_eq!(exit_code(&parse_limit("2").unwrap_err()), 2);
        let failed = TotientError::VerificationFailed { n: 21, sieve: 1, naive: 12 };
        assert_eq!(exit_code(&failed), 1);
    }

    #[test]
    fn test_run_surfaces_no_solution() {
        let config = parse_args(&args(&["--limit=3", "--quiet"]));
        assert!(matches!(
            run(&config),
            Err(TotientError::NoSolutionFound { limit: 3 })
        ));
    }

    #[test]
    fn test_render_text_report() {
        let report = run_search(87110).unwrap();
        let text = render(&report, false).unwrap();
        assert!(text.starts_with("Value of `n`, where 1 < n < 87110,"));
        assert!(text.contains("n      = 75841"));
        assert!(text.contains("φ(n)   = 75184"));
        assert!(text.contains("n/φ(n) = 1.0087385614"));
    }

    #[test]
    fn test_render_json_report() {
        let report = run_search(87110).unwrap();
        let json: serde_json::Value = serde_json::from_str(&render(&report, true).unwrap()).unwrap();
        assert_eq!(json["best"]["n"].as_u64(), Some(75841));
        assert_eq!(json["limit"].as_u64(), Some(87110));
    }

    #[test]
    fn test_write_report_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let report = run_search(1000).unwrap();
        write_report(&path, &report).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["best"]["n"].as_u64(), Some(291));
        assert_eq!(json["best"]["phi"].as_u64(), Some(192));
    }

    #[test]
    fn test_run_writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let output = format!("--output={}", path.display());
        let config = parse_args(&args(&["--limit=1000", "--json", "--verify", output.as_str()]));
        run(&config).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["limit"].as_u64(), Some(1000));
        assert_eq!(json["best"]["n"].as_u64(), Some(291));
    }

    #[test]
    fn test_run_write_fails_on_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.json");
        let output = format!("--output={}", path.display());
        let config = parse_args(&args(&["--limit=1000", "--quiet", output.as_str()]));
        let err = run(&config).unwrap_err();
        assert!(matches!(err, TotientError::Io(_)));
        assert_eq!(exit_code(&err), 1);
    }
}
