use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::http_client::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use crate::pdf::DEFAULT_RENDERER;

/// Configuration file structure that mirrors CLI arguments
/// All fields are optional to allow partial configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// The URL to analyze when none is given on the command line
    pub url: Option<String>,

    /// Output format: text or json
    pub output: Option<String>,

    /// Save the JSON report to file
    pub save: Option<String>,

    /// Where to write the PDF report
    pub pdf_path: Option<String>,

    /// Also write the rendered HTML report
    pub html_path: Option<String>,

    /// Skip PDF export
    pub no_pdf: Option<bool>,

    /// Append a trailing slash to the URL path
    pub trailing_slash: Option<bool>,

    /// Request timeout in seconds
    pub timeout: Option<u64>,

    /// User-Agent header
    pub user_agent: Option<String>,

    /// Path or name of the wkhtmltopdf binary
    pub renderer: Option<String>,

    /// Verbose output
    pub verbose: Option<bool>,
}

/// Configuration file format based on file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
    Yaml,
}

impl ConfigFormat {
    pub const ALL: [ConfigFormat; 3] = [ConfigFormat::Json, ConfigFormat::Toml, ConfigFormat::Yaml];

    /// Detect format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "json" => Some(ConfigFormat::Json),
                "toml" => Some(ConfigFormat::Toml),
                "yaml" | "yml" => Some(ConfigFormat::Yaml),
                _ => None,
            })
    }

    pub fn extensions(&self) -> &[&str] {
        match self {
            ConfigFormat::Json => &["json"],
            ConfigFormat::Toml => &["toml"],
            ConfigFormat::Yaml => &["yaml", "yml"],
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let format = ConfigFormat::from_path(path)
            .with_context(|| format!("Unsupported config file format: {}", path.display()))?;

        let config = match format {
            ConfigFormat::Json => serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?,
            ConfigFormat::Toml => toml::from_str(&contents)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?,
            ConfigFormat::Yaml => serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?,
        };

        tracing::debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Default configuration file paths, highest priority first:
    /// `./pageaudit.*`, then `$XDG_CONFIG_HOME/pageaudit/config.*` (or `~/.config`)
    pub fn default_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        for format in ConfigFormat::ALL {
            for ext in format.extensions() {
                paths.push(PathBuf::from(format!("pageaudit.{}", ext)));
            }
        }

        let config_home = std::env::var("XDG_CONFIG_HOME")
            .ok()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")));

        if let Some(config_home) = config_home {
            let app_dir = config_home.join("pageaudit");
            for format in ConfigFormat::ALL {
                for ext in format.extensions() {
                    paths.push(app_dir.join(format!("config.{}", ext)));
                }
            }
        }

        paths
    }

    /// Returns the first configuration file found, or None if no config exists
    pub fn from_default_paths() -> Result<Option<Self>> {
        for path in Self::default_paths() {
            if path.exists() {
                return Ok(Some(Self::from_file(&path)?));
            }
        }
        Ok(None)
    }

    /// Loads `--config` when given, otherwise the first default path that exists.
    pub fn load(explicit: Option<&str>) -> Result<Option<Self>> {
        match explicit {
            Some(path) => Ok(Some(Self::from_file(Path::new(path))?)),
            None => Self::from_default_paths(),
        }
    }

    /// Merge this configuration with CLI arguments
    /// CLI arguments take precedence over config file values
    pub fn merge_with_cli(&self, cli: &Cli) -> Cli {
        Cli {
            url: cli.url.clone().or_else(|| self.url.clone()),
            output: if cli.output != "text" {
                cli.output.clone()
            } else {
                self.output.clone().unwrap_or_else(|| cli.output.clone())
            },
            save: cli.save.clone().or_else(|| self.save.clone()),
            pdf: cli.pdf.clone().or_else(|| self.pdf_path.clone()),
            html: cli.html.clone().or_else(|| self.html_path.clone()),
            no_pdf: cli.no_pdf || self.no_pdf.unwrap_or(false),
            trailing_slash: cli.trailing_slash || self.trailing_slash.unwrap_or(false),
            timeout: if cli.timeout != DEFAULT_TIMEOUT_SECS {
                cli.timeout
            } else {
                self.timeout.unwrap_or(cli.timeout)
            },
            user_agent: if cli.user_agent != DEFAULT_USER_AGENT {
                cli.user_agent.clone()
            } else {
                self.user_agent
                    .clone()
                    .unwrap_or_else(|| cli.user_agent.clone())
            },
            renderer: if cli.renderer != DEFAULT_RENDERER {
                cli.renderer.clone()
            } else {
                self.renderer.clone().unwrap_or_else(|| cli.renderer.clone())
            },
            verbose: cli.verbose || self.verbose.unwrap_or(false),
            config: cli.config.clone(),
        }
    }
}
