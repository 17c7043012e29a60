//! Tokengauge - token accounting for language-model evaluation
//!
//! Command line entry point. Text inputs are read from a file or stdin and
//! results are printed as JSON on stdout; logs go to stderr.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use tokengauge::{Config, Request, Sequence, TokenCounter, TokenError, TruncationPolicy};

#[derive(Parser)]
#[command(name = "tokengauge")]
#[command(about = "Count, estimate and truncate prompt tokens")]
#[command(version)]
struct Cli {
    /// Model whose vocabulary and context window are used
    #[arg(long, global = true)]
    model: Option<String>,

    /// Override the model's context window
    #[arg(long, global = true)]
    context_window: Option<usize>,

    /// Truncation policy: words or characters
    #[arg(long, global = true)]
    policy: Option<TruncationPolicy>,

    /// Print Prometheus metrics to stderr on exit
    #[arg(long, global = true)]
    print_metrics: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Count prompt and completion tokens of `{"request": ..., "completions": [...]}`
    Count { file: PathBuf },
    /// Estimate the worst-case token usage of a request
    Estimate { file: PathBuf },
    /// Check whether a text fits the context window
    Fits {
        file: Option<PathBuf>,
        /// Tokens reserved for the completion
        #[arg(long, default_value_t = 0)]
        completion_tokens: usize,
    },
    /// Cut a text until it fits the context window
    Truncate { file: Option<PathBuf> },
    /// Print the token ids of a text
    Tokenize { file: Option<PathBuf> },
}

/// Input of the `count` command
#[derive(Debug, Deserialize)]
struct CountInput {
    request: Request,
    #[serde(default)]
    completions: Vec<Sequence>,
}

fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tokengauge=warn".into()),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        match e.downcast_ref::<TokenError>() {
            Some(token_error) => eprintln!("error[{}]: {:#}", token_error.code(), e),
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::from_env()?;
    if let Some(model) = cli.model {
        config.model = model;
    }
    if cli.context_window.is_some() {
        config.context_window = cli.context_window;
    }
    if let Some(policy) = cli.policy {
        config.truncation = policy;
    }
    debug!(?config, "Configuration loaded");

    if cli.print_metrics {
        tokengauge::metrics::init_metrics()?;
    }

    let counter = TokenCounter::from_config(&config)?;
    info!(
        model = %config.model,
        tokenizer = counter.tokenizer().name(),
        context_window = counter.context_window(),
        "Token counter ready"
    );

    match cli.command {
        Command::Count { file } => {
            let input: CountInput = serde_json::from_str(&read_input(Some(file.as_path()))?)
                .with_context(|| format!("Invalid count input in {}", file.display()))?;
            let tokens = counter.count_tokens(&input.request, &input.completions)?;
            print_json(&json!({ "tokens": tokens }))?;
        }
        Command::Estimate { file } => {
            let request: Request = serde_json::from_str(&read_input(Some(file.as_path()))?)
                .with_context(|| format!("Invalid request in {}", file.display()))?;
            let estimated = counter.estimate_tokens(&request)?;
            print_json(&json!({ "estimated_tokens": estimated }))?;
        }
        Command::Fits {
            file,
            completion_tokens,
        } => {
            let text = read_input(file.as_deref())?;
            let fits = counter.fits_within_context_window(&text, completion_tokens)?;
            print_json(&json!({
                "fits": fits,
                "tokens": counter.tokenizer().count(&text)?,
                "completion_tokens": completion_tokens,
                "context_window": counter.context_window(),
            }))?;
        }
        Command::Truncate { file } => {
            let text = read_input(file.as_deref())?;
            print!("{}", counter.truncate(&text)?);
        }
        Command::Tokenize { file } => {
            let text = read_input(file.as_deref())?;
            let tokens = counter.tokenizer().tokenize(&text)?;
            print_json(&json!({
                "tokenizer": counter.tokenizer().name(),
                "tokens": tokens,
            }))?;
        }
    }

    if cli.print_metrics {
        if let Some(rendered) = tokengauge::metrics::render() {
            eprint!("{}", rendered);
        }
    }

    Ok(())
}

/// Read a file, or stdin when no file is given
fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
