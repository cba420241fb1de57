#![allow(clippy::doc_markdown)]
//! `triebench` CLI - prefix-search benchmarks over generated word corpora
//!
//! Usage:
//!   `triebench generate --word-length 4 --parallel`
//!   `triebench run --word-length 4 --algorithm own-parallel --runs 10`
//!   `triebench auto`
//!   `triebench search --word-length 2 --algorithm radix QA`

mod bench;

use anyhow::Context;
use bench::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use triebench_core::{AlgorithmKind, BenchmarkSession, TrieBenchConfig};

#[derive(Parser)]
#[command(name = "triebench")]
#[command(
    author,
    version,
    about = "triebench CLI - Prefix-search benchmarks over generated word corpora"
)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to a configuration file
    #[arg(long, global = true, env = "TRIEBENCH_CONFIG", default_value = "triebench.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a corpus and report its size and creation time
    Generate {
        /// Characters per word (defaults to benchmark.word_length)
        #[arg(short = 'n', long)]
        word_length: Option<usize>,

        /// Generate with one worker per first character
        #[arg(long)]
        parallel: bool,

        /// Allow word lengths at or above benchmark.dangerous_word_length
        #[arg(long)]
        force: bool,
    },

    /// Benchmark one algorithm
    Run {
        /// Characters per word (defaults to benchmark.word_length)
        #[arg(short = 'n', long)]
        word_length: Option<usize>,

        /// Algorithm to benchmark (defaults to algorithms.default)
        #[arg(short, long)]
        algorithm: Option<AlgorithmKind>,

        /// Number of build + search iterations (defaults to benchmark.runs)
        #[arg(short, long)]
        runs: Option<usize>,

        /// Fixed query; a random word per run when omitted
        #[arg(short, long)]
        query: Option<String>,

        /// Generate the corpus in parallel
        #[arg(long)]
        parallel_generate: bool,

        /// Allow word lengths at or above benchmark.dangerous_word_length
        #[arg(long)]
        force: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Benchmark every enabled algorithm with random queries
    Auto {
        /// Characters per word (defaults to benchmark.word_length)
        #[arg(short = 'n', long)]
        word_length: Option<usize>,

        /// Number of iterations per algorithm (defaults to benchmark.runs)
        #[arg(short, long)]
        runs: Option<usize>,

        /// Allow word lengths at or above benchmark.dangerous_word_length
        #[arg(long)]
        force: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Print the corpus words matching a query
    Search {
        /// Characters per word (defaults to benchmark.word_length)
        #[arg(short = 'n', long)]
        word_length: Option<usize>,

        /// Algorithm to search with (defaults to algorithms.default)
        #[arg(short, long)]
        algorithm: Option<AlgorithmKind>,

        /// Prefix to search for
        query: String,

        /// Allow word lengths at or above benchmark.dangerous_word_length
        #[arg(long)]
        force: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
}

fn init_logging(config: &TrieBenchConfig) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.logging.level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(path: &Path) -> anyhow::Result<TrieBenchConfig> {
    let config = TrieBenchConfig::load_from_path(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

/// Refuses very large corpora unless `--force` was given.
fn check_word_length(config: &TrieBenchConfig, word_length: usize, force: bool) -> anyhow::Result<()> {
    let dangerous = config.benchmark.dangerous_word_length;
    if word_length >= dangerous && !force {
        anyhow::bail!(
            "Word length {} builds a very large corpus and may take a long time; pass --force to continue",
            word_length
        );
    }
    Ok(())
}

fn prepare_session(
    config: &TrieBenchConfig,
    word_length: Option<usize>,
    parallel: bool,
    force: bool,
) -> anyhow::Result<BenchmarkSession> {
    let word_length = word_length.unwrap_or(config.benchmark.word_length);
    check_word_length(config, word_length, force)?;

    let mut session = BenchmarkSession::new(config)?;
    let elapsed = session.generate_corpus(word_length, parallel)?;
    tracing::debug!(words = session.corpus().len(), elapsed = %elapsed, "Corpus ready");
    Ok(session)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;
    init_logging(&config);

    match cli.command {
        Commands::Generate {
            word_length,
            parallel,
            force,
        } => {
            let word_length = word_length.unwrap_or(config.benchmark.word_length);
            check_word_length(&config, word_length, force)?;

            let mut session = BenchmarkSession::new(&config)?;
            let elapsed = session.generate_corpus(word_length, parallel)?;
            bench::print_generation(word_length, session.corpus().len(), elapsed);
        }
        Commands::Run {
            word_length,
            algorithm,
            runs,
            query,
            parallel_generate,
            force,
            format,
        } => {
            let mut session = prepare_session(&config, word_length, parallel_generate, force)?;
            let algorithm = algorithm.unwrap_or(config.algorithms.default);
            let runs = runs.unwrap_or(config.benchmark.runs);

            let report = bench::run_algorithm(
                &mut session,
                algorithm,
                runs,
                query.as_deref(),
                format == OutputFormat::Table,
            )?;
            bench::print_reports(&[report], format)?;
        }
        Commands::Auto {
            word_length,
            runs,
            force,
            format,
        } => {
            let mut session = prepare_session(&config, word_length, true, force)?;
            let runs = runs.unwrap_or(config.benchmark.runs);

            let mut reports = Vec::with_capacity(config.algorithms.enabled.len());
            for &algorithm in &config.algorithms.enabled {
                reports.push(bench::run_algorithm(
                    &mut session,
                    algorithm,
                    runs,
                    None,
                    format == OutputFormat::Table,
                )?);
            }
            bench::print_reports(&reports, format)?;
        }
        Commands::Search {
            word_length,
            algorithm,
            query,
            force,
            format,
        } => {
            let mut session = prepare_session(&config, word_length, true, force)?;
            let algorithm = algorithm.unwrap_or(config.algorithms.default);
            session.select_algorithm(algorithm);

            let run = session.run_once(&query)?;
            bench::print_search(
                algorithm,
                &query,
                run.results.clone(),
                run.search_time,
                format,
            )?;
        }
    }

    Ok(())
}
