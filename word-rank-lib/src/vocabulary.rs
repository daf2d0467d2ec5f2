//! The reference vocabulary extracted tokens are filtered against.

use std::collections::HashSet;

use reqwest::Client;

use crate::error::WordRankError;
use crate::sources::fetch_source_text;

/// Shortest candidate the vocabulary will accept.
pub const MIN_WORD_LENGTH: usize = 3;

/// The set of accepted, case-folded words.
///
/// Built once at startup and shared read-only by every extraction worker.
/// A candidate line is accepted iff it is at least [`MIN_WORD_LENGTH`]
/// characters long and entirely alphabetic; accepted words are stored
/// lowercased, so `Apple` and `apple` count as the same word.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    words: HashSet<String>,
}

impl Vocabulary {
    /// Fetch and build the vocabulary from a line-delimited remote source.
    ///
    /// # Errors
    ///
    /// Returns [`WordRankError::VocabularySource`] when the resource cannot
    /// be retrieved or answers with a non-success status. This is fatal to
    /// the run.
    pub async fn fetch(client: &Client, url: &str) -> Result<Self, WordRankError> {
        let body = fetch_source_text(client, url)
            .await
            .map_err(WordRankError::vocabulary_source)?;
        Ok(Self::from_lines(body.lines()))
    }

    /// Build a vocabulary from candidate lines, applying the acceptance rule.
    pub fn from_lines<'a, I>(lines: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut words = HashSet::new();
        for line in lines {
            let candidate = line.trim();
            if accepts(candidate) {
                words.insert(candidate.to_lowercase());
            }
        }
        Self { words }
    }

    /// Convenience constructor from a word slice (tests, embedding).
    pub fn from_words(words: &[&str]) -> Self {
        Self::from_lines(words.iter().copied())
    }

    /// Whether a case-folded token is an accepted word.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of accepted words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether no line survived the acceptance rule.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// The acceptance rule: length >= 3, alphabetic characters only.
fn accepts(candidate: &str) -> bool {
    candidate.chars().count() >= MIN_WORD_LENGTH
        && candidate.chars().all(char::is_alphabetic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn short_words_are_rejected() {
        let vocab = Vocabulary::from_lines(["a", "of", "sea"]);
        assert_eq!(vocab.len(), 1);
        assert!(vocab.contains("sea"));
    }

    #[test]
    fn non_alphabetic_words_are_rejected() {
        let vocab = Vocabulary::from_lines(["whale", "whale,", "3rd", "don't", "one-off"]);
        assert_eq!(vocab.len(), 1);
        assert!(vocab.contains("whale"));
    }

    #[test]
    fn words_are_case_folded() {
        let vocab = Vocabulary::from_lines(["Apple", "APPLE", "apple"]);
        assert_eq!(vocab.len(), 1);
        assert!(vocab.contains("apple"));
        assert!(!vocab.contains("Apple"));
    }

    #[test]
    fn lines_are_trimmed_before_the_rule_applies() {
        // CRLF sources leave a trailing \r that must not fail the
        // alphabetic check.
        let vocab = Vocabulary::from_lines(["ocean\r", "  whale  "]);
        assert_eq!(vocab.len(), 2);
        assert!(vocab.contains("ocean"));
        assert!(vocab.contains("whale"));
    }

    #[tokio::test]
    async fn fetch_builds_from_remote_lines() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/words"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Ocean\nab\nwhale\nx9y\n"))
            .mount(&server)
            .await;

        let client = Client::new();
        let vocab = Vocabulary::fetch(&client, &format!("{}/words", server.uri()))
            .await
            .unwrap();

        assert_eq!(vocab.len(), 2);
        assert!(vocab.contains("ocean"));
        assert!(vocab.contains("whale"));
    }

    #[tokio::test]
    async fn fetch_failure_is_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/words"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = Client::new();
        let err = Vocabulary::fetch(&client, &format!("{}/words", server.uri()))
            .await
            .unwrap_err();

        assert!(matches!(err, WordRankError::VocabularySource { .. }));
    }
}
