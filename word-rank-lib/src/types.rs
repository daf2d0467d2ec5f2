//! Core data types for the word ranking pipeline.
//!
//! This module defines the run configuration, the document payload carried
//! on the pipeline channel, the per-worker count map, and the report types
//! produced by a run.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::error::WordRankError;

/// Default vocabulary source: one candidate word per line.
pub const DEFAULT_VOCABULARY_URL: &str =
    "https://raw.githubusercontent.com/dwyl/english-words/master/words.txt";

/// Default article URL list source: one URL per line.
pub const DEFAULT_URL_LIST_URL: &str =
    "https://drive.google.com/uc?export=download&id=1TF4RPuj8iFwpa-lyhxG67V8NDlktmTGi";

/// Channel slots reserved per extraction worker.
pub const CHANNEL_DEPTH_PER_WORKER: usize = 5;

/// Upper bound on the extraction worker pool.
pub const MAX_WORKERS: usize = 64;

/// Mapping of case-folded vocabulary word to occurrence count.
///
/// Each extraction worker owns exactly one instance; maps are only read
/// together after every worker has returned.
pub type WordCountMap = HashMap<String, u64>;

/// A successfully retrieved article, waiting on the channel for exactly
/// one worker to claim it.
#[derive(Debug, Clone)]
pub struct Document {
    /// Where the payload came from, for log context.
    pub url: String,
    /// The raw markup; the claiming worker parses and discards it.
    pub html: String,
}

/// Identifies the content region and paragraph elements inside a document.
#[derive(Debug, Clone)]
pub struct ContentSpec {
    /// Tag of the block container holding the article body.
    pub region_tag: String,
    /// Substring that must appear in the container's class attribute.
    pub region_marker: String,
    /// Tag of the text-bearing elements inside the region.
    pub paragraph_tag: String,
}

impl Default for ContentSpec {
    fn default() -> Self {
        Self {
            region_tag: "div".to_string(),
            region_marker: "caas-body".to_string(),
            paragraph_tag: "p".to_string(),
        }
    }
}

/// Configuration for a pipeline run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Number of parallel extraction workers.
    /// Default: 4, Range: 1-64
    pub workers: usize,

    /// Global ceiling on article requests per minute.
    /// Default: 10
    pub requests_per_minute: u32,

    /// Where to fetch the vocabulary list from.
    pub vocabulary_url: String,

    /// Where to fetch the article URL list from.
    pub url_list_url: String,

    /// Content region and paragraph selection.
    pub content: ContentSpec,

    /// Timeout for each individual HTTP request.
    /// Default: 30 seconds
    pub request_timeout: Duration,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            requests_per_minute: 10,
            vocabulary_url: DEFAULT_VOCABULARY_URL.to_string(),
            url_list_url: DEFAULT_URL_LIST_URL.to_string(),
            content: ContentSpec::default(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl RunConfig {
    /// Set the extraction worker count, clamped to 1-64.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.clamp(1, MAX_WORKERS);
        self
    }

    /// Set the global request-rate ceiling in requests per minute.
    pub fn with_requests_per_minute(mut self, rpm: u32) -> Self {
        self.requests_per_minute = rpm;
        self
    }

    /// Set the vocabulary source URL.
    pub fn with_vocabulary_url<U: Into<String>>(mut self, url: U) -> Self {
        self.vocabulary_url = url.into();
        self
    }

    /// Set the article URL list source URL.
    pub fn with_url_list_url<U: Into<String>>(mut self, url: U) -> Self {
        self.url_list_url = url.into();
        self
    }

    /// Set the class-attribute marker identifying the content region.
    pub fn with_region_marker<M: Into<String>>(mut self, marker: M) -> Self {
        self.content.region_marker = marker.into();
        self
    }

    /// Set the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Check the configuration for values the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), WordRankError> {
        if self.workers == 0 {
            return Err(WordRankError::config("worker count must be at least 1"));
        }
        if self.workers > MAX_WORKERS {
            return Err(WordRankError::config(format!(
                "worker count must be at most {}",
                MAX_WORKERS
            )));
        }
        if self.requests_per_minute == 0 {
            return Err(WordRankError::config(
                "request rate must be at least 1 per minute",
            ));
        }
        Ok(())
    }
}

/// Why a single article was dropped from the run.
///
/// Skips are data, not just log lines, so callers and tests can assert on
/// them without capturing output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The URL list entry did not parse as an http(s) URL.
    InvalidUrl,
    /// Transport-level failure (connect, timeout, TLS, ...).
    Transport(String),
    /// The server answered with a non-success status.
    HttpStatus(u16),
    /// The response body could not be read as text.
    UnreadableBody(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUrl => write!(f, "not a valid http(s) url"),
            Self::Transport(message) => write!(f, "transport error: {}", message),
            Self::HttpStatus(code) => write!(f, "unexpected response status {}", code),
            Self::UnreadableBody(message) => write!(f, "unreadable body: {}", message),
        }
    }
}

/// One skipped article: the URL and why it was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skip {
    pub url: String,
    pub reason: SkipReason,
}

/// What the fetcher did over the whole URL list.
#[derive(Debug, Clone, Default)]
pub struct FetchReport {
    /// Articles retrieved and handed to the worker pool.
    pub fetched: usize,
    /// Articles dropped, with their reasons, in URL-list order.
    pub skips: Vec<Skip>,
    /// Whether the run was cut short by the cancellation signal.
    pub cancelled: bool,
}

impl FetchReport {
    /// Number of articles dropped.
    pub fn skipped(&self) -> usize {
        self.skips.len()
    }
}

/// One (word, count) pair in the final ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    pub word: String,
    pub count: u64,
}

/// The immutable output of a completed run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// At most ten entries, count descending, ties lexicographic.
    pub rankings: Vec<RankedEntry>,
    /// Fetch-side accounting for the run.
    pub fetch: FetchReport,
    /// Size of the worker pool that produced the counts.
    pub workers: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(RunConfig::default().validate().is_ok());
    }

    #[test]
    fn with_workers_clamps_range() {
        let config = RunConfig::default().with_workers(0);
        assert_eq!(config.workers, 1);

        let config = RunConfig::default().with_workers(500);
        assert_eq!(config.workers, MAX_WORKERS);
    }

    #[test]
    fn validate_rejects_zero_workers() {
        let config = RunConfig {
            workers: 0,
            ..RunConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_rate() {
        let config = RunConfig {
            requests_per_minute: 0,
            ..RunConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn skip_reason_displays_status_code() {
        let reason = SkipReason::HttpStatus(503);
        assert!(reason.to_string().contains("503"));
    }
}
