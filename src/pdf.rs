use crate::error::{AuditError, Result};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

pub const REPORT_FILENAME: &str = "seo_analysis_report.pdf";
pub const DEFAULT_RENDERER: &str = "wkhtmltopdf";

/// Fixed page geometry used for every exported report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLayout {
    pub page_size: String,
    pub margin: String,
    pub encoding: String,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            page_size: "Letter".to_string(),
            margin: "0.5in".to_string(),
            encoding: "UTF-8".to_string(),
        }
    }
}

/// Converts a rendered HTML document into a PDF file.
pub trait PdfRenderer: Send + Sync {
    fn render(&self, html: &str, output: &Path) -> Result<()>;
}

/// Renders through the external `wkhtmltopdf` binary, feeding the HTML on stdin.
pub struct Wkhtmltopdf {
    binary: PathBuf,
    layout: PageLayout,
}

impl Wkhtmltopdf {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            layout: PageLayout::default(),
        }
    }

    pub fn with_layout(mut self, layout: PageLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Flags before the output path; `-` makes wkhtmltopdf read HTML from stdin
    fn layout_args(&self) -> Vec<String> {
        let layout = &self.layout;
        vec![
            "--quiet".to_string(),
            "--page-size".to_string(),
            layout.page_size.clone(),
            "--margin-top".to_string(),
            layout.margin.clone(),
            "--margin-right".to_string(),
            layout.margin.clone(),
            "--margin-bottom".to_string(),
            layout.margin.clone(),
            "--margin-left".to_string(),
            layout.margin.clone(),
            "--encoding".to_string(),
            layout.encoding.clone(),
            "-".to_string(),
        ]
    }

    fn command(&self, output: &Path) -> Command {
        let mut command = Command::new(&self.binary);
        command.args(self.layout_args()).arg(output);
        command
    }
}

impl Default for Wkhtmltopdf {
    fn default() -> Self {
        Self::new(DEFAULT_RENDERER)
    }
}

impl PdfRenderer for Wkhtmltopdf {
    fn render(&self, html: &str, output: &Path) -> Result<()> {
        let mut child = self
            .command(output)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => AuditError::render(format!(
                    "'{}' was not found. Install wkhtmltopdf or point --renderer at it",
                    self.binary.display()
                )),
                _ => AuditError::render(format!(
                    "failed to start '{}': {}",
                    self.binary.display(),
                    e
                )),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            // A renderer that exits early closes the pipe; its exit status says why.
            if let Err(e) = stdin.write_all(html.as_bytes()) {
                tracing::debug!(error = %e, "Renderer closed stdin early");
            }
        }

        let result = child
            .wait_with_output()
            .map_err(|e| AuditError::render(format!("renderer did not finish: {}", e)))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(AuditError::render(format!(
                "'{}' exited with {}: {}",
                self.binary.display(),
                result.status,
                stderr.trim()
            )));
        }

        Ok(())
    }
}

/// `<home>/Downloads/seo_analysis_report.pdf`
pub fn default_output_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join("Downloads").join(REPORT_FILENAME))
}

/// Writes the PDF through `renderer`, replacing any file already at `output`.
pub fn export(renderer: &dyn PdfRenderer, html: &str, output: &Path) -> Result<()> {
    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    renderer.render(html, output)?;
    tracing::info!(path = %output.display(), "PDF report saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    struct CopyRenderer;

    impl PdfRenderer for CopyRenderer {
        fn render(&self, html: &str, output: &Path) -> Result<()> {
            fs::write(output, html)?;
            Ok(())
        }
    }

    #[test]
    fn test_default_layout_is_letter_with_uniform_margins() {
        let joined = Wkhtmltopdf::default().layout_args().join(" ");
        assert!(joined.contains("--page-size Letter"));
        assert!(joined.contains("--encoding UTF-8"));
        for side in ["top", "right", "bottom", "left"] {
            assert!(joined.contains(&format!("--margin-{} 0.5in", side)));
        }
        assert!(joined.ends_with(" -"));
    }

    #[cfg(unix)]
    #[test]
    fn test_output_path_is_passed_unchanged() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let raw = OsStr::from_bytes(b"/tmp/report-\xff.pdf");
        let command = Wkhtmltopdf::default().command(Path::new(raw));
        let args: Vec<&OsStr> = command.get_args().collect();

        assert_eq!(args.last().copied(), Some(raw));
        assert_eq!(args[args.len() - 2], OsStr::new("-"));
    }

    #[test]
    fn test_default_output_path_is_in_downloads() {
        if let Some(path) = default_output_path() {
            assert!(path.ends_with("Downloads/seo_analysis_report.pdf"));
        }
    }

    #[test]
    fn test_missing_renderer_is_render_error() {
        let dir = tempdir().unwrap();
        let renderer = Wkhtmltopdf::new("/nonexistent/wkhtmltopdf-binary");
        let err = renderer
            .render("<html></html>", &dir.path().join("out.pdf"))
            .unwrap_err();
        assert!(matches!(err, AuditError::Render(_)));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_export_creates_parent_dirs_and_overwrites() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("nested").join("report.pdf");

        export(&CopyRenderer, "first", &output).unwrap();
        export(&CopyRenderer, "second", &output).unwrap();

        assert_eq!(fs::read_to_string(&output).unwrap(), "second");
    }
}
