//! The producer side of the pipeline.
//!
//! Walks the URL list in order, acquiring one rate-limiter permit per
//! request and pushing retrieved articles onto the bounded document
//! channel. Individual failures are skips, never aborts; the whole run
//! tolerates losing any single article.

use std::sync::Arc;

use reqwest::Client;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use url::Url;

use crate::limiter::RateLimiter;
use crate::types::{Document, FetchReport, Skip, SkipReason};

/// Retrieves articles under the global rate ceiling.
pub struct Fetcher {
    client: Client,
    limiter: Arc<RateLimiter>,
}

impl Fetcher {
    pub fn new(client: Client, limiter: Arc<RateLimiter>) -> Self {
        Self { client, limiter }
    }

    /// Fetch every URL in list order, pushing successes onto `tx`.
    ///
    /// The channel is bounded, so a slow consumer blocks the loop here
    /// rather than letting documents pile up. Cancellation interrupts the
    /// permit wait; the loop then stops without touching the remaining
    /// URLs. Dropping `tx` on return closes the channel exactly once,
    /// which is the only termination signal the workers see.
    pub async fn run(
        self,
        urls: Vec<String>,
        tx: mpsc::Sender<Document>,
        cancel: CancellationToken,
    ) -> FetchReport {
        let mut report = FetchReport::default();

        for url in urls {
            if self.limiter.acquire(&cancel).await.is_err() {
                report.cancelled = true;
                break;
            }

            debug!(%url, "requesting article");
            match self.fetch_document(&url).await {
                Ok(document) => {
                    if tx.send(document).await.is_err() {
                        // Every receiver is gone; nothing left to feed.
                        break;
                    }
                    report.fetched += 1;
                }
                Err(reason) => {
                    warn!(%url, %reason, "skipping article");
                    report.skips.push(Skip { url, reason });
                }
            }
        }

        report
    }

    async fn fetch_document(&self, raw_url: &str) -> Result<Document, SkipReason> {
        let parsed = Url::parse(raw_url).map_err(|_| SkipReason::InvalidUrl)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SkipReason::InvalidUrl);
        }

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| SkipReason::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SkipReason::HttpStatus(status.as_u16()));
        }

        let html = response
            .text()
            .await
            .map_err(|e| SkipReason::UnreadableBody(e.to_string()))?;

        Ok(Document {
            url: raw_url.to_string(),
            html,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fast_fetcher() -> Fetcher {
        Fetcher::new(
            Client::new(),
            Arc::new(RateLimiter::with_period(Duration::from_millis(1))),
        )
    }

    #[tokio::test]
    async fn failing_url_is_skipped_not_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ok"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/broken"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let urls = vec![
            format!("{}/ok", server.uri()),
            format!("{}/broken", server.uri()),
            format!("{}/ok", server.uri()),
        ];

        let (tx, mut rx) = mpsc::channel(16);
        let report = fast_fetcher()
            .run(urls, tx, CancellationToken::new())
            .await;

        assert_eq!(report.fetched, 2);
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.skips[0].reason, SkipReason::HttpStatus(500));
        assert!(!report.cancelled);

        // The channel closed after the loop, with both documents buffered.
        assert!(rx.recv().await.is_some());
        assert!(rx.recv().await.is_some());
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn malformed_urls_are_skipped() {
        let (tx, _rx) = mpsc::channel(4);
        let report = fast_fetcher()
            .run(
                vec!["not a url".to_string(), "ftp://a.example/x".to_string()],
                tx,
                CancellationToken::new(),
            )
            .await;

        assert_eq!(report.fetched, 0);
        assert_eq!(report.skipped(), 2);
        assert!(report
            .skips
            .iter()
            .all(|s| s.reason == SkipReason::InvalidUrl));
    }

    #[tokio::test]
    async fn full_channel_applies_backpressure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;

        let urls: Vec<String> = (0..5).map(|i| format!("{}/doc/{}", server.uri(), i)).collect();

        // Capacity 2 and no consumer: the fetcher must park on the third
        // send instead of buffering unboundedly.
        let (tx, mut rx) = mpsc::channel(2);
        let handle = tokio::spawn(fast_fetcher().run(urls, tx, CancellationToken::new()));

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(!handle.is_finished());

        // Draining the channel releases the producer.
        let mut received = 0;
        while rx.recv().await.is_some() {
            received += 1;
        }
        let report = handle.await.unwrap();
        assert_eq!(received, 5);
        assert_eq!(report.fetched, 5);
    }

    #[tokio::test]
    async fn cancellation_stops_the_loop_and_closes_the_channel() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;

        // One permit is immediate; the second is an hour away.
        let limiter = Arc::new(RateLimiter::with_period(Duration::from_secs(3600)));
        let fetcher = Fetcher::new(Client::new(), limiter);

        let urls: Vec<String> = (0..3).map(|i| format!("{}/doc/{}", server.uri(), i)).collect();
        let (tx, mut rx) = mpsc::channel(8);
        let cancel = CancellationToken::new();

        let handle = tokio::spawn(fetcher.run(urls, tx, cancel.clone()));
        tokio::time::sleep(Duration::from_millis(200)).await;
        cancel.cancel();

        let report = tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("fetcher must stop promptly after cancellation")
            .unwrap();

        assert!(report.cancelled);
        assert_eq!(report.fetched, 1);

        // Exactly one document made it through before the channel closed.
        assert!(rx.recv().await.is_some());
        assert!(rx.recv().await.is_none());
    }
}
