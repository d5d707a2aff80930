use crate::auditor::AuditConfig;
use crate::http_client::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use crate::pdf::{self, DEFAULT_RENDERER};
use anyhow::{Result, bail};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "pageaudit")]
#[command(about = "Audit the on-page SEO of a single URL and export a PDF report", long_about = None)]
pub struct Cli {
    /// The URL to analyze (prompted for when omitted)
    #[arg(value_name = "URL")]
    pub url: Option<String>,

    /// Output format: text or json
    #[arg(short, long, default_value = "text")]
    pub output: String,

    /// Save the JSON report to file
    #[arg(short, long)]
    pub save: Option<String>,

    /// Where to write the PDF report (default: ~/Downloads/seo_analysis_report.pdf)
    #[arg(long, value_name = "PATH")]
    pub pdf: Option<String>,

    /// Also write the rendered HTML report to this path
    #[arg(long, value_name = "PATH")]
    pub html: Option<String>,

    /// Skip PDF export
    #[arg(long)]
    pub no_pdf: bool,

    /// Append a trailing slash to the URL path before fetching
    #[arg(long)]
    pub trailing_slash: bool,

    /// Request timeout in seconds (default: 10)
    #[arg(short, long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// User-Agent header sent with the request
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Path or name of the wkhtmltopdf binary
    #[arg(long, default_value = DEFAULT_RENDERER)]
    pub renderer: String,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to configuration file (JSON, TOML, or YAML)
    #[arg(long)]
    pub config: Option<String>,
}

impl Cli {
    /// Resolves the pipeline configuration from the parsed arguments.
    pub fn audit_config(&self) -> Result<AuditConfig> {
        if self.timeout == 0 {
            bail!("Timeout must be at least 1 second");
        }

        let pdf_path = if self.no_pdf {
            None
        } else if let Some(path) = &self.pdf {
            Some(PathBuf::from(path))
        } else {
            match pdf::default_output_path() {
                Some(path) => Some(path),
                None => bail!("Could not determine the home directory; pass --pdf <PATH>"),
            }
        };

        Ok(AuditConfig {
            timeout_secs: self.timeout,
            user_agent: self.user_agent.clone(),
            trailing_slash: self.trailing_slash,
            pdf_path,
            html_path: self.html.as_ref().map(PathBuf::from),
            renderer: PathBuf::from(&self.renderer),
        })
    }
}
