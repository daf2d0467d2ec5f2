//! Remote line-delimited input sources.
//!
//! The vocabulary and the article URL list both arrive as flat text files
//! from static resources. Unlike per-article failures, a source that cannot
//! be retrieved is fatal to the whole run.

use reqwest::Client;

use crate::error::WordRankError;

/// Retrieve a source body, reducing transport and status failures to a
/// message the caller attributes to its source.
pub(crate) async fn fetch_source_text(client: &Client, url: &str) -> Result<String, String> {
    let response = client.get(url).send().await.map_err(|e| e.to_string())?;

    let status = response.status();
    if !status.is_success() {
        return Err(format!("response code: {}", status));
    }

    response
        .text()
        .await
        .map_err(|e| format!("failed reading body: {}", e))
}

/// Fetch the article URL list: one URL per non-empty line, order preserved.
///
/// # Errors
///
/// Returns [`WordRankError::UrlListSource`] when the resource cannot be
/// retrieved, answers with a non-success status, or yields no URLs at all.
pub async fn fetch_url_list(client: &Client, url: &str) -> Result<Vec<String>, WordRankError> {
    let body = fetch_source_text(client, url)
        .await
        .map_err(WordRankError::url_list_source)?;

    let urls: Vec<String> = body
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    if urls.is_empty() {
        return Err(WordRankError::url_list_source("no urls found in source"));
    }

    Ok(urls)
}
