use crate::error::{AuditError, Result};
use crate::http_client::build_http_client;
use reqwest::Client;
use std::time::{Duration, Instant};
use url::Url;

/// Raw result of the single GET issued for an audit
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub url: String,
    pub status_code: u16,
    pub content_type: Option<String>,
    pub body: String,
    pub elapsed: Duration,
}

/// Turns user input into an absolute http(s) URL.
///
/// Input without a scheme gets `https://` prepended. When `trailing_slash`
/// is set, a path that does not already end in `/` gets one appended.
pub fn normalize_url(input: &str, trailing_slash: bool) -> Result<Url> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AuditError::InvalidUrl("URL is empty".to_string()));
    }

    let lower = trimmed.to_ascii_lowercase();
    let candidate = if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else if let Some(scheme) = explicit_scheme(trimmed) {
        return Err(AuditError::InvalidUrl(format!(
            "unsupported scheme '{}': only http and https are supported",
            scheme
        )));
    } else {
        format!("https://{}", trimmed)
    };

    let mut url = Url::parse(&candidate)
        .map_err(|e| AuditError::InvalidUrl(format!("{}: {}", trimmed, e)))?;

    if url.host_str().is_none_or(str::is_empty) {
        return Err(AuditError::InvalidUrl(format!("{}: missing host", trimmed)));
    }

    if trailing_slash && !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

/// Scheme named at the start of `input`, if any.
///
/// Catches `mailto:` style schemes without `//`. A `host:port` prefix is not
/// a scheme.
fn explicit_scheme(input: &str) -> Option<&str> {
    let (scheme, rest) = input.split_once(':')?;
    let mut chars = scheme.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    let is_port = rest.starts_with(|c: char| c.is_ascii_digit());
    (valid && !is_port).then_some(scheme)
}

pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self> {
        Ok(Self {
            client: build_http_client(timeout_secs, user_agent)?,
        })
    }

    pub async fn fetch(&self, url: &Url) -> Result<FetchedPage> {
        let started = Instant::now();
        let response = self.client.get(url.clone()).send().await?;
        let elapsed = started.elapsed();

        let status = response.status();
        if !status.is_success() {
            return Err(AuditError::Network {
                message: format!("{} returned HTTP {}", url, status),
                status: Some(status.as_u16()),
            });
        }

        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let body = response.text().await?;

        tracing::info!(
            url = %final_url,
            status = status.as_u16(),
            elapsed_ms = elapsed.as_millis() as u64,
            bytes = body.len(),
            "Fetched page"
        );

        Ok(FetchedPage {
            url: final_url,
            status_code: status.as_u16(),
            content_type,
            body,
            elapsed,
        })
    }
}
