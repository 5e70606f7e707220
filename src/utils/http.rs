// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use crate::error::Result;
use crate::models::SourceConfig;

/// Create a configured asynchronous HTTP client.
pub fn create_client(config: &SourceConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Fetch a document as raw bytes.
///
/// The metadata file is not reliably UTF-8, so decoding is left to the
/// caller.
pub async fn fetch_bytes(client: &reqwest::Client, url: &str) -> Result<Vec<u8>> {
    let response = client.get(url).send().await?.error_for_status()?;
    Ok(response.bytes().await?.to_vec())
}

/// Submit a form and return the response body as text.
pub async fn post_form(
    client: &reqwest::Client,
    url: &str,
    params: &[(&str, String)],
) -> Result<String> {
    let response = client
        .post(url)
        .form(params)
        .send()
        .await?
        .error_for_status()?;
    Ok(response.text().await?)
}
