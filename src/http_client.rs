use crate::error::Result;
use reqwest::{Client, ClientBuilder, header};
use std::time::Duration;

/// Identifying User-Agent sent with every audit request
pub const DEFAULT_USER_AGENT: &str = "SEO Analyzer Bot";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const ACCEPT: &str = "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Creates a reqwest client with the auditor's identifying header and timeout
pub fn build_http_client(timeout_secs: u64, user_agent: &str) -> Result<Client> {
    let mut headers = header::HeaderMap::new();
    headers.insert(header::ACCEPT, header::HeaderValue::from_static(ACCEPT));
    headers.insert(
        header::ACCEPT_LANGUAGE,
        header::HeaderValue::from_static(ACCEPT_LANGUAGE),
    );

    let client = ClientBuilder::new()
        .user_agent(user_agent)
        .default_headers(headers)
        .timeout(Duration::from_secs(timeout_secs))
        .redirect(reqwest::redirect::Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .deflate(true)
        .build()?;

    Ok(client)
}
