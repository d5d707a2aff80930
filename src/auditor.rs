use crate::catalog::MetricCatalog;
use crate::error::{AuditError, Result};
use crate::extractor::MetricExtractor;
use crate::fetcher::{Fetcher, normalize_url};
use crate::html_report::HtmlReport;
use crate::http_client::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use crate::models::AuditReport;
use crate::pdf::{self, DEFAULT_RENDERER, PdfRenderer, Wkhtmltopdf};
use crate::recommendations::RecommendationEngine;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Pipeline position of an [`Auditor`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Fetching,
    Parsing,
    Evaluating,
    Rendering,
    Exporting,
    Done,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Idle => "idle",
            Stage::Fetching => "fetching",
            Stage::Parsing => "parsing",
            Stage::Evaluating => "evaluating",
            Stage::Rendering => "rendering",
            Stage::Exporting => "exporting",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Everything one audit run needs, resolved from CLI flags and config files
#[derive(Debug, Clone, PartialEq)]
pub struct AuditConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
    pub trailing_slash: bool,
    /// `None` skips PDF export
    pub pdf_path: Option<PathBuf>,
    pub html_path: Option<PathBuf>,
    /// Path or name of the wkhtmltopdf binary
    pub renderer: PathBuf,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            trailing_slash: false,
            pdf_path: pdf::default_output_path(),
            html_path: None,
            renderer: PathBuf::from(DEFAULT_RENDERER),
        }
    }
}

/// Output of a successful run
#[derive(Debug, Clone)]
pub struct AuditOutcome {
    pub report: AuditReport,
    pub html: String,
    pub pdf_path: Option<PathBuf>,
}

/// Drives one URL through fetch, parse, evaluate, render and export.
pub struct Auditor {
    config: AuditConfig,
    catalog: MetricCatalog,
    fetcher: Fetcher,
    renderer: Arc<dyn PdfRenderer>,
    stage: Stage,
    failure: Option<String>,
}

impl Auditor {
    pub fn new(config: AuditConfig) -> Result<Self> {
        let fetcher = Fetcher::new(config.timeout_secs, &config.user_agent)?;
        let renderer: Arc<dyn PdfRenderer> = Arc::new(Wkhtmltopdf::new(config.renderer.clone()));
        Ok(Self {
            config,
            catalog: MetricCatalog::standard(),
            fetcher,
            renderer,
            stage: Stage::Idle,
            failure: None,
        })
    }

    pub fn with_renderer(mut self, renderer: Box<dyn PdfRenderer>) -> Self {
        self.renderer = renderer.into();
        self
    }

    pub fn with_catalog(mut self, catalog: MetricCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Message of the error that moved the auditor to [`Stage::Failed`]
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    /// Runs the whole pipeline for `input`.
    ///
    /// The auditor can be reused: every call starts again from [`Stage::Idle`].
    pub async fn run(&mut self, input: &str) -> Result<AuditOutcome> {
        self.stage = Stage::Idle;
        self.failure = None;

        let result = self.run_stages(input).await;
        match &result {
            Ok(_) => self.advance(Stage::Done),
            Err(e) => {
                tracing::debug!(stage = %self.stage, error = %e, "Audit failed");
                self.failure = Some(e.to_string());
                self.advance(Stage::Failed);
            }
        }
        result
    }

    async fn run_stages(&mut self, input: &str) -> Result<AuditOutcome> {
        self.advance(Stage::Fetching);
        let url = normalize_url(input, self.config.trailing_slash)?;
        tracing::info!(url = %url, "Analyzing URL");
        let page = self.fetcher.fetch(&url).await?;

        self.advance(Stage::Parsing);
        let metrics = MetricExtractor::parse(&page)?;

        self.advance(Stage::Evaluating);
        let recommendations = RecommendationEngine::evaluate(&metrics);
        tracing::debug!(count = recommendations.len(), "Recommendations generated");

        self.advance(Stage::Rendering);
        let report = AuditReport::new(url.as_str(), Some(metrics), recommendations);
        let html = HtmlReport::render(&report, &self.catalog);

        self.advance(Stage::Exporting);
        if let Some(html_path) = &self.config.html_path {
            if let Some(parent) = html_path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(html_path, &html)?;
            tracing::info!(path = %html_path.display(), "HTML report saved");
        }

        let pdf_path = match &self.config.pdf_path {
            Some(path) => {
                self.export_pdf(&html, path).await?;
                Some(path.clone())
            }
            None => None,
        };

        Ok(AuditOutcome {
            report,
            html,
            pdf_path,
        })
    }

    /// Runs the blocking renderer on tokio's blocking pool.
    async fn export_pdf(&self, html: &str, path: &Path) -> Result<()> {
        let renderer = Arc::clone(&self.renderer);
        let html = html.to_string();
        let path = path.to_path_buf();

        tokio::task::spawn_blocking(move || pdf::export(renderer.as_ref(), &html, &path))
            .await
            .map_err(|e| AuditError::render(format!("renderer task failed: {}", e)))?
    }

    fn advance(&mut self, next: Stage) {
        tracing::debug!(from = %self.stage, to = %next, "Stage transition");
        self.stage = next;
    }
}
