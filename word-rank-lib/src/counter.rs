//! Per-worker word counting.
//!
//! Each extraction worker owns one [`WordCounter`]: no locks guard the
//! count map because nothing else can reach it until the worker returns it
//! at the join point.

use std::sync::Arc;

use scraper::Html;
use tokio::sync::{mpsc, Mutex};
use tracing::debug;

use crate::extract::{find_content_region, paragraph_texts};
use crate::types::{ContentSpec, Document, WordCountMap};
use crate::vocabulary::Vocabulary;

/// Accumulates vocabulary-word occurrences for a single worker.
pub struct WordCounter {
    vocabulary: Arc<Vocabulary>,
    content: ContentSpec,
    counts: WordCountMap,
}

impl WordCounter {
    pub fn new(vocabulary: Arc<Vocabulary>, content: ContentSpec) -> Self {
        Self {
            vocabulary,
            content,
            counts: WordCountMap::new(),
        }
    }

    /// Count one document: locate the content region, walk its paragraphs,
    /// and tally vocabulary words.
    ///
    /// A document without a content region contributes nothing; that is an
    /// expected shape, not an error.
    pub fn consume(&mut self, document: &Document) {
        let html = Html::parse_document(&document.html);

        let Some(region) = find_content_region(
            &html,
            &self.content.region_tag,
            &self.content.region_marker,
        ) else {
            debug!(url = %document.url, "document has no content region");
            return;
        };

        for text in paragraph_texts(region, &self.content.paragraph_tag) {
            self.ingest(&text);
        }
    }

    /// Tokenize on whitespace, case-fold, and count tokens present in the
    /// vocabulary.
    ///
    /// This is the only filtering: no stemming, no punctuation stripping.
    /// A token with punctuation attached fails the exact vocabulary match
    /// and is dropped.
    pub fn ingest(&mut self, text: &str) {
        for token in text.split_whitespace() {
            let folded = token.to_lowercase();
            if self.vocabulary.contains(&folded) {
                *self.counts.entry(folded).or_insert(0) += 1;
            }
        }
    }

    pub fn counts(&self) -> &WordCountMap {
        &self.counts
    }

    pub fn into_counts(self) -> WordCountMap {
        self.counts
    }
}

/// One extraction worker: receive documents until the channel is closed and
/// drained, then hand back the private count map.
///
/// Workers share the single receiver end behind a mutex; whichever worker
/// holds it when a document arrives claims that document, so each document
/// is processed exactly once. `recv` returning `None` is the fetcher's
/// close signal.
pub async fn run_worker(
    worker_id: usize,
    input: Arc<Mutex<mpsc::Receiver<Document>>>,
    vocabulary: Arc<Vocabulary>,
    content: ContentSpec,
) -> WordCountMap {
    let mut counter = WordCounter::new(vocabulary, content);

    loop {
        let document = { input.lock().await.recv().await };
        let Some(document) = document else { break };
        counter.consume(&document);
    }

    debug!(
        worker = worker_id,
        distinct = counter.counts().len(),
        "worker drained"
    );
    counter.into_counts()
}
