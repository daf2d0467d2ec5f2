//! Word Rank CLI Application
//!
//! Fetches a list of article URLs under a global request-rate ceiling,
//! extracts article body text, counts reference-vocabulary words in a
//! parallel worker pool, and prints the ten most frequent words.

use clap::Parser;
use console::style;
use std::process;
use tokio_util::sync::CancellationToken;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use word_rank_lib::{load_env_config, EnvConfig, RunConfig, RunReport, WordRank, WordRankError};

/// CLI arguments for word-rank
#[derive(Parser, Debug)]
#[command(name = "word-rank")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Rank the most frequent vocabulary words across a list of articles")]
#[command(
    long_about = "Fetches a list of article URLs under a global request-rate ceiling, extracts \
article body text, counts reference-vocabulary words in parallel, and prints the ten most \
frequent words.\n\nEvery flag can also be set through WR_* environment variables; flags win."
)]
pub struct Args {
    /// Parallel extraction workers (default: logical CPU count)
    #[arg(
        short = 'w',
        long = "workers",
        value_name = "N",
        help_heading = "Performance"
    )]
    pub workers: Option<usize>,

    /// Maximum article requests per minute (default: 10)
    #[arg(
        short = 'r',
        long = "rpm",
        value_name = "COUNT",
        help_heading = "Performance"
    )]
    pub requests_per_minute: Option<u32>,

    /// Vocabulary source URL (one candidate word per line)
    #[arg(long = "vocab-url", value_name = "URL", help_heading = "Sources")]
    pub vocabulary_url: Option<String>,

    /// Article URL list source URL (one URL per line)
    #[arg(long = "urls-url", value_name = "URL", help_heading = "Sources")]
    pub url_list_url: Option<String>,

    /// Show debug messages (per-request logging)
    #[arg(short = 'd', long = "debug", help_heading = "Configuration")]
    pub debug: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    init_tracing(args.debug);

    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Route log output to stderr so the ranked report stays clean on stdout.
fn init_tracing(debug: bool) {
    let default_filter = if debug {
        "word_rank=debug,word_rank_lib=debug"
    } else {
        "word_rank=warn,word_rank_lib=warn"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: Args) -> Result<(), WordRankError> {
    let config = build_config(&args, &load_env_config());
    let pipeline = WordRank::with_config(config)?;

    let cancel = CancellationToken::new();
    spawn_interrupt_handler(cancel.clone());

    let report = pipeline.run(cancel).await?;
    render_report(&report);
    Ok(())
}

/// First ctrl-c cancels the run; the pipeline then finishes with whatever
/// was fetched so far and the report is still printed.
fn spawn_interrupt_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, finishing with the articles fetched so far");
            cancel.cancel();
        }
    });
}

/// Build the run configuration with CLI > environment > defaults precedence.
fn build_config(args: &Args, env: &EnvConfig) -> RunConfig {
    let mut config = RunConfig::default();

    // Environment overrides the built-in defaults.
    if let Some(workers) = env.workers {
        config = config.with_workers(workers);
    }
    if let Some(rpm) = env.requests_per_minute {
        config = config.with_requests_per_minute(rpm);
    }
    if let Some(url) = &env.vocabulary_url {
        config = config.with_vocabulary_url(url.clone());
    }
    if let Some(url) = &env.url_list_url {
        config = config.with_url_list_url(url.clone());
    }

    // CLI flags win. An unset --workers falls back to the logical CPU
    // count unless the environment already chose a pool size.
    if let Some(workers) = args.workers {
        config = config.with_workers(workers);
    } else if env.workers.is_none() {
        config = config.with_workers(num_cpus::get());
    }
    if let Some(rpm) = args.requests_per_minute {
        config = config.with_requests_per_minute(rpm);
    }
    if let Some(url) = &args.vocabulary_url {
        config = config.with_vocabulary_url(url.clone());
    }
    if let Some(url) = &args.url_list_url {
        config = config.with_url_list_url(url.clone());
    }

    config
}

fn render_report(report: &RunReport) {
    if report.fetch.cancelled {
        eprintln!("Run cancelled; the ranking covers the articles fetched before the interrupt.");
    }
    if report.fetch.skipped() > 0 {
        eprintln!("{} article(s) skipped.", report.fetch.skipped());
    }

    let heading = style("Top 10 words that occurred the most in the provided articles:").bold();
    println!("{}", heading);

    match serde_json::to_string_pretty(&report.rankings) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            warn!("unable to display result in json form: {}", e);
            for entry in &report.rankings {
                println!("{}: {}", entry.word, entry.count);
            }
        }
    }
}
