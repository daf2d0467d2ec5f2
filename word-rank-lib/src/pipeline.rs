//! Pipeline orchestration.
//!
//! Wires the stages together: concurrent vocabulary/URL-list startup, the
//! rate-limited fetcher, the extraction worker pool, and the final
//! merge-and-rank. The document channel is the only concurrently shared
//! mutable structure in the whole run; worker count maps are single-owner
//! and the vocabulary is read-only after construction.

use std::sync::Arc;

use futures::future::join_all;
use reqwest::Client;
use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::counter::run_worker;
use crate::error::WordRankError;
use crate::fetcher::Fetcher;
use crate::limiter::RateLimiter;
use crate::rank::{merge, top_k, TOP_WORDS};
use crate::sources::fetch_url_list;
use crate::types::{RunConfig, RunReport, CHANNEL_DEPTH_PER_WORKER};
use crate::vocabulary::Vocabulary;

const USER_AGENT: &str = concat!("word-rank/", env!("CARGO_PKG_VERSION"));

/// The whole pipeline behind one entry point.
///
/// # Example
///
/// ```rust,no_run
/// use tokio_util::sync::CancellationToken;
/// use word_rank_lib::{RunConfig, WordRank};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let pipeline = WordRank::with_config(RunConfig::default().with_workers(8))?;
///     let report = pipeline.run(CancellationToken::new()).await?;
///
///     for entry in &report.rankings {
///         println!("{}: {}", entry.word, entry.count);
///     }
///     Ok(())
/// }
/// ```
pub struct WordRank {
    config: RunConfig,
    client: Client,
}

impl WordRank {
    /// Pipeline with default configuration.
    pub fn new() -> Result<Self, WordRankError> {
        Self::with_config(RunConfig::default())
    }

    /// Pipeline with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`WordRankError::Config`] for values the pipeline cannot
    /// run with (zero workers, zero request rate).
    pub fn with_config(config: RunConfig) -> Result<Self, WordRankError> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| WordRankError::internal(format!("failed to create http client: {}", e)))?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Execute one full run: fetch, extract, count, merge, rank.
    ///
    /// Cancelling `cancel` interrupts the fetcher's next rate-limiter
    /// wait; the workers then drain whatever was already buffered and the
    /// run completes normally with `report.fetch.cancelled` set.
    ///
    /// # Errors
    ///
    /// Fatal only: vocabulary or URL-list source failure, or an internal
    /// task failure. Per-article problems surface as skips in the report.
    pub async fn run(&self, cancel: CancellationToken) -> Result<RunReport, WordRankError> {
        // The two startup inputs build concurrently. The fetcher needs
        // only the URL list; the workers need only the vocabulary.
        let vocabulary_task = {
            let client = self.client.clone();
            let url = self.config.vocabulary_url.clone();
            tokio::spawn(async move { Vocabulary::fetch(&client, &url).await })
        };

        let urls = match fetch_url_list(&self.client, &self.config.url_list_url).await {
            Ok(urls) => urls,
            Err(e) => {
                vocabulary_task.abort();
                return Err(e);
            }
        };
        info!(urls = urls.len(), "url list ready");

        let capacity = self.config.workers * CHANNEL_DEPTH_PER_WORKER;
        let (tx, rx) = mpsc::channel(capacity);

        let limiter = Arc::new(RateLimiter::new(self.config.requests_per_minute));
        let fetch_task = tokio::spawn(Fetcher::new(self.client.clone(), limiter).run(
            urls,
            tx,
            cancel.clone(),
        ));

        let vocabulary = match vocabulary_task.await {
            Ok(Ok(vocabulary)) => Arc::new(vocabulary),
            Ok(Err(e)) => {
                self.abandon_fetch(&cancel, rx, fetch_task).await;
                return Err(e);
            }
            Err(join_err) => {
                self.abandon_fetch(&cancel, rx, fetch_task).await;
                return Err(WordRankError::internal(format!(
                    "vocabulary task failed: {}",
                    join_err
                )));
            }
        };
        info!(words = vocabulary.len(), "vocabulary ready");

        let rx = Arc::new(Mutex::new(rx));
        let worker_tasks: Vec<_> = (0..self.config.workers)
            .map(|id| {
                tokio::spawn(run_worker(
                    id,
                    Arc::clone(&rx),
                    Arc::clone(&vocabulary),
                    self.config.content.clone(),
                ))
            })
            .collect();
        drop(rx);

        let fetch_report = fetch_task
            .await
            .map_err(|e| WordRankError::internal(format!("fetcher task failed: {}", e)))?;
        debug!(
            fetched = fetch_report.fetched,
            skipped = fetch_report.skipped(),
            "fetch loop finished"
        );

        // Join barrier: counts are only read together once every worker
        // has returned its map.
        let mut partials = Vec::with_capacity(worker_tasks.len());
        for joined in join_all(worker_tasks).await {
            partials.push(
                joined
                    .map_err(|e| WordRankError::internal(format!("worker task failed: {}", e)))?,
            );
        }

        let global = merge(partials);
        let rankings = top_k(&global, TOP_WORDS);

        Ok(RunReport {
            rankings,
            fetch: fetch_report,
            workers: self.config.workers,
        })
    }

    /// Wind down an in-flight fetcher after a fatal startup error.
    ///
    /// Dropping the receiver unblocks a sender parked on a full channel;
    /// cancelling covers a fetcher parked on the rate limiter.
    async fn abandon_fetch(
        &self,
        cancel: &CancellationToken,
        rx: mpsc::Receiver<crate::types::Document>,
        fetch_task: tokio::task::JoinHandle<crate::types::FetchReport>,
    ) {
        cancel.cancel();
        drop(rx);
        let _ = fetch_task.await;
    }
}
