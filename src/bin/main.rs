use anyhow::{Context, Result};
use crossterm::style::Stylize;
use decipher_core::config::AppConfig;
use decipher_core::core::decoder::RankedSolution;
use decipher_core::persistence::{save_solutions, AttemptLog};
use decipher_core::{DecipherEngine, DecipherError, SolveReport};
use std::io::{stdin, stdout, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const EXIT_BAD_INPUT: u8 = 1;
const EXIT_NO_SOLUTION: u8 = 2;
const EXIT_FAILURE: u8 = 3;

fn main() -> ExitCode {
    init_tracing();

    match run() {
        Ok(report) if report.solutions.is_empty() => {
            println!("{}", "No solution found.".yellow());
            ExitCode::from(EXIT_NO_SOLUTION)
        }
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "[ERROR]".red().bold(), e);
            let bad_input = e
                .downcast_ref::<DecipherError>()
                .is_some_and(|e| matches!(e, DecipherError::Io { .. }))
                || e.downcast_ref::<std::io::Error>().is_some();
            if bad_input {
                ExitCode::from(EXIT_BAD_INPUT)
            } else {
                ExitCode::from(EXIT_FAILURE)
            }
        }
    }
}

fn run() -> Result<SolveReport> {
    let config = AppConfig::from_env().context("reading DECIPHER_* settings")?;
    let engine = DecipherEngine::from_config(config)?;

    let cipher_path = prompt("cipher text file: ")?;
    let corpus = engine.load_corpus(&cipher_path)?;

    let mut attempt_log = AttemptLog::open(&engine.config().attempt_log)?;
    let report = engine.solve(&corpus, &mut attempt_log)?;
    attempt_log.flush()?;

    let output_path = prompt("Save solutions to: ")?;
    save_solutions(&output_path, &report.solutions)?;
    println!(
        "Saved {} solution(s) to '{}'",
        report.solutions.len(),
        output_path.display()
    );

    print_solutions(&engine.rank(&corpus, &report));
    print_stats(&report);
    Ok(report)
}

fn prompt(label: &str) -> Result<PathBuf> {
    print!("{}", label.bold());
    stdout().flush()?;
    let mut input = String::new();
    stdin().read_line(&mut input)?;
    Ok(PathBuf::from(input.trim()))
}

fn print_solutions(ranked: &[RankedSolution]) {
    if ranked.is_empty() {
        return;
    }
    println!("\n{}", "Solutions (best first):".green().bold());
    for (i, solution) in ranked.iter().enumerate() {
        println!(
            "  {:>3}: {}  {}",
            i + 1,
            solution.text.as_str().cyan(),
            format!("(score: {:.3e})", solution.score).dark_grey()
        );
    }
}

fn print_stats(report: &SolveReport) {
    let stats = &report.stats;
    println!(
        "\nnodes: {}  dead ends: {}  leaves: {}  max depth: {}",
        stats.nodes, stats.dead_ends, stats.leaves, stats.max_depth
    );
    if !report.exhausted {
        println!(
            "{}",
            "Search stopped at the branch budget; results may be incomplete.".yellow()
        );
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
