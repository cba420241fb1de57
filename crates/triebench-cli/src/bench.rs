//! Benchmark driver: runs timed build + search iterations and renders the
//! results as a table or JSON.

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use triebench_core::{AlgorithmKind, BenchmarkSession, PreciseDuration, RunStatistics};

/// Output format for reports.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Summary of the runs for one algorithm.
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkReport {
    pub algorithm: AlgorithmKind,
    pub word_length: usize,
    pub corpus_size: usize,
    pub query: Option<String>,
    #[serde(flatten)]
    pub statistics: RunStatistics,
}

/// Create progress bar
fn create_progress_bar(total: usize, show: bool) -> Result<ProgressBar> {
    if !show {
        return Ok(ProgressBar::hidden());
    }
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} {msg:>16} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );
    Ok(pb)
}

/// Runs `runs` iterations of `algorithm` on the session's corpus.
///
/// Switching algorithm starts a fresh run list; the report covers every run
/// recorded for `algorithm` on the current corpus.
///
/// With a fixed `query` every iteration searches it; otherwise each iteration
/// searches a fresh random word.
pub fn run_algorithm(
    session: &mut BenchmarkSession,
    algorithm: AlgorithmKind,
    runs: usize,
    query: Option<&str>,
    show_progress: bool,
) -> Result<BenchmarkReport> {
    session.select_algorithm(algorithm);

    let pb = create_progress_bar(runs, show_progress)?;
    pb.set_message(algorithm.to_string());

    for _ in 0..runs {
        match query {
            Some(q) => {
                session.run_once(q)?;
            }
            None => {
                session.run_random(1)?;
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    Ok(BenchmarkReport {
        algorithm,
        word_length: session.word_length(),
        corpus_size: session.corpus().len(),
        query: query.map(str::to_string),
        statistics: session.statistics(),
    })
}

/// Prints the creation summary of a corpus.
pub fn print_generation(word_length: usize, count: usize, elapsed: PreciseDuration) {
    println!("{}", "Corpus generated".green().bold());
    println!("  Word length:      {word_length}");
    println!("  Words:            {}", count.to_string().green());
    println!("  Creation time:    {elapsed}");
}

/// Print reports in the specified format
pub fn print_reports(reports: &[BenchmarkReport], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(reports)?);
        }
        OutputFormat::Table => {
            if reports.is_empty() {
                println!("{}", "No runs.".dimmed());
                return Ok(());
            }
            print_table(reports);
        }
    }
    Ok(())
}

fn print_table(reports: &[BenchmarkReport]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let header: Vec<Cell> = [
        "Algorithm",
        "Words",
        "Runs",
        "Last build",
        "Avg build",
        "Last search",
        "Avg search",
        "Results",
    ]
    .iter()
    .map(|c| Cell::new(c).fg(Color::Cyan))
    .collect();
    table.set_header(header);

    for report in reports {
        let stats = &report.statistics;
        table.add_row(vec![
            Cell::new(report.algorithm).fg(Color::Green),
            Cell::new(report.corpus_size),
            Cell::new(stats.count),
            Cell::new(stats.last_build),
            Cell::new(stats.average_build),
            Cell::new(stats.last_search),
            Cell::new(stats.average_search),
            Cell::new(stats.last_result_count),
        ]);
    }

    println!("{table}");
}

/// Prints the words matching a query.
pub fn print_search(
    algorithm: AlgorithmKind,
    query: &str,
    mut results: Vec<String>,
    elapsed: PreciseDuration,
    format: OutputFormat,
) -> Result<()> {
    results.sort_unstable();
    match format {
        OutputFormat::Json => {
            let body = serde_json::json!({
                "algorithm": algorithm,
                "query": query,
                "elapsed_us": elapsed,
                "count": results.len(),
                "results": results,
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        OutputFormat::Table => {
            for word in &results {
                println!("{word}");
            }
            println!(
                "{} result(s) for {} with {} in {}",
                results.len().to_string().green(),
                format!("{query:?}").bold(),
                algorithm,
                elapsed
            );
        }
    }
    Ok(())
}
