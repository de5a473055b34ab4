// src/corpus/client.rs
use crate::utils::error::FetchError;
use once_cell::sync::Lazy;
use reqwest::header;

// One client for the whole process so concurrent requests share the
// connection pool.
static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .user_agent(concat!("cts_textservice/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("Failed to build HTTP client")
});

/// Downloads a CEX document from its URL and returns the body text.
/// The caller owns the returned document; nothing is cached or retried.
pub async fn fetch_document(url: &str) -> Result<String, FetchError> {
    tracing::debug!("Fetching CEX document from: {}", url);

    let response = HTTP_CLIENT
        .get(url)
        // Corpus hosts serve CEX as plain text, occasionally with odd content types
        .header(header::ACCEPT, "text/plain,*/*")
        .send()
        .await?; // Propagates reqwest::Error as FetchError::Network

    // Check if the request was successful (status code 2xx)
    let status = response.status();
    if !status.is_success() {
        tracing::warn!("HTTP error status: {} for URL: {}", status, url);
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::DocNotFound(url.to_string()));
        }
        return Err(FetchError::Http(status));
    }

    let body = response.text().await?;
    tracing::debug!("Successfully fetched {} bytes from {}", body.len(), url);

    Ok(body)
}
