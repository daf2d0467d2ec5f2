//! # Word Rank Library
//!
//! Retrieves a list of article URLs under a global request-rate ceiling,
//! extracts article body text, counts reference-vocabulary words in a
//! parallel worker pool, and reports the ten most frequent words.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tokio_util::sync::CancellationToken;
//! use word_rank_lib::{RunConfig, WordRank};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pipeline = WordRank::with_config(RunConfig::default())?;
//!     let report = pipeline.run(CancellationToken::new()).await?;
//!
//!     println!("{} articles counted", report.fetch.fetched);
//!     for entry in &report.rankings {
//!         println!("{}: {}", entry.word, entry.count);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline shape
//!
//! One producer task fetches articles in URL-list order, paced by a shared
//! [`RateLimiter`]; a fixed pool of workers pulls parsed documents off a
//! bounded channel, each accumulating counts privately; after the pool
//! drains, the partial maps are merged and the top ten selected with a
//! deterministic tie-break. Individual article failures are skips
//! ([`SkipReason`]), never aborts; only the two input sources are fatal.

// Re-export main public API types and functions
pub use config::{load_env_config, EnvConfig};
pub use counter::{run_worker, WordCounter};
pub use error::WordRankError;
pub use extract::{find_content_region, paragraph_texts};
pub use fetcher::Fetcher;
pub use limiter::RateLimiter;
pub use pipeline::WordRank;
pub use rank::{merge, top_k, TOP_WORDS};
pub use sources::fetch_url_list;
pub use types::{
    ContentSpec, Document, FetchReport, RankedEntry, RunConfig, RunReport, Skip, SkipReason,
    WordCountMap, DEFAULT_URL_LIST_URL, DEFAULT_VOCABULARY_URL,
};
pub use vocabulary::{Vocabulary, MIN_WORD_LENGTH};

// Internal modules - these are not part of the public API surface beyond
// the re-exports above.
mod config;
mod counter;
mod error;
mod extract;
mod fetcher;
mod limiter;
mod pipeline;
mod rank;
mod sources;
mod types;
mod vocabulary;

// Type alias for convenience
pub type Result<T> = std::result::Result<T, WordRankError>;

// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
