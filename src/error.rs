//! Error types for the audit pipeline.
//!
//! Every stage returns `Result<T>` with an [`AuditError`] tagged by the kind
//! of failure, so the caller can tell a network problem from a renderer one
//! without inspecting message text.

use crate::auditor::Stage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuditError {
    /// The input could not be turned into an http(s) URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Timeout, DNS failure, refused connection or a non-success status
    #[error("Network error: {message}")]
    Network {
        message: String,
        status: Option<u16>,
    },

    /// The response could not be treated as an HTML document
    #[error("Parse error: {0}")]
    Parse(String),

    /// The external PDF renderer is missing or failed
    #[error("Render error: {0}")]
    Render(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AuditError {
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network {
            message: msg.into(),
            status: None,
        }
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// HTTP status code of the failed response, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Network { status, .. } => *status,
            _ => None,
        }
    }

    /// The pipeline stage this kind of failure belongs to.
    pub fn stage(&self) -> Stage {
        match self {
            Self::InvalidUrl(_) | Self::Network { .. } => Stage::Fetching,
            Self::Parse(_) => Stage::Parsing,
            Self::Render(_) | Self::Io(_) => Stage::Exporting,
        }
    }

    /// Whether an interactive session may ask for another URL after this error.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::InvalidUrl(_) | Self::Network { .. })
    }
}

impl From<reqwest::Error> for AuditError {
    fn from(err: reqwest::Error) -> Self {
        let status = err.status().map(|s| s.as_u16());
        let message = if err.is_timeout() {
            format!("request timed out: {}", err)
        } else if err.is_connect() {
            format!("could not connect: {}", err)
        } else {
            err.to_string()
        };
        Self::Network { message, status }
    }
}

pub type Result<T> = std::result::Result<T, AuditError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_mapping() {
        assert_eq!(AuditError::network("down").stage(), Stage::Fetching);
        assert_eq!(
            AuditError::InvalidUrl("x".to_string()).stage(),
            Stage::Fetching
        );
        assert_eq!(AuditError::Parse("empty".to_string()).stage(), Stage::Parsing);
        assert_eq!(AuditError::render("missing").stage(), Stage::Exporting);
    }

    #[test]
    fn test_retryable_only_for_fetch_failures() {
        assert!(AuditError::network("down").is_retryable());
        assert!(AuditError::InvalidUrl("x".to_string()).is_retryable());
        assert!(!AuditError::Parse("empty".to_string()).is_retryable());
        assert!(!AuditError::render("missing").is_retryable());
    }

    #[test]
    fn test_status_only_on_network_errors() {
        let err = AuditError::Network {
            message: "HTTP 404".to_string(),
            status: Some(404),
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(AuditError::render("x").status(), None);
    }

    #[test]
    fn test_display_includes_kind() {
        assert_eq!(
            AuditError::Parse("empty document".to_string()).to_string(),
            "Parse error: empty document"
        );
    }
}
