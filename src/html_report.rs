use crate::catalog::{Metric, MetricCatalog};
use crate::models::{AuditReport, PageMetrics};
use crate::recommendations::RecommendationEngine;
use std::fmt::Write;

const STYLE: &str = r#"
body { font-family: Arial, Helvetica, sans-serif; margin: 20px; line-height: 1.5; color: #333; }
h1 { color: #1a4d8f; margin-bottom: 4px; }
h2 { margin-top: 28px; margin-bottom: 10px; border-bottom: 2px solid #1a4d8f; padding-bottom: 4px; }
.meta { color: #666; font-size: 0.9em; margin: 2px 0; }
table { width: 100%; border-collapse: collapse; margin: 16px 0; font-size: 0.85em; }
th, td { border: 1px solid #ddd; padding: 6px 8px; text-align: left; vertical-align: top; }
th { background-color: #f4f4f4; text-align: center; }
.good { color: #1e7b34; font-weight: bold; }
.bad { color: #b3261e; font-weight: bold; }
.error { border: 1px solid #b3261e; background: #fdecea; color: #b3261e; padding: 12px; }
ul { margin-top: 12px; }
li { margin-bottom: 6px; }
"#;

const NOT_AVAILABLE: &str = "N/A";

pub struct HtmlReport;

impl HtmlReport {
    /// Renders a self-contained HTML document for the report.
    ///
    /// When the report has no metrics an error notice takes the place of the
    /// results table.
    pub fn render(report: &AuditReport, catalog: &MetricCatalog) -> String {
        let mut html = String::with_capacity(8 * 1024);

        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str("<title>SEO Analysis Report</title>\n<style>");
        html.push_str(STYLE);
        html.push_str("</style>\n</head>\n<body>\n");

        html.push_str("<h1>SEO Analysis Report</h1>\n");
        let _ = writeln!(
            html,
            "<p class=\"meta\"><strong>URL Analyzed:</strong> {}</p>",
            escape_html(&report.url)
        );
        let _ = writeln!(
            html,
            "<p class=\"meta\"><strong>Generated:</strong> {}</p>",
            escape_html(&report.timestamp)
        );

        html.push_str("<h2>Analysis Results</h2>\n");
        match &report.metrics {
            Some(metrics) => Self::push_metrics_table(&mut html, metrics, catalog),
            None => html.push_str(
                "<p class=\"error\">The page could not be analyzed, so no metrics are available.</p>\n",
            ),
        }

        html.push_str("<h2>Recommendations</h2>\n");
        if report.recommendations.is_empty() {
            if report.metrics.is_some() {
                html.push_str("<p>No issues found.</p>\n");
            } else {
                html.push_str("<p>No recommendations could be generated.</p>\n");
            }
        } else {
            html.push_str("<ul>\n");
            for recommendation in &report.recommendations {
                let _ = writeln!(html, "<li>{}</li>", escape_html(&recommendation.message));
            }
            html.push_str("</ul>\n");
        }

        html.push_str("</body>\n</html>\n");
        html
    }

    fn push_metrics_table(html: &mut String, metrics: &PageMetrics, catalog: &MetricCatalog) {
        html.push_str("<table>\n<tr><th>Metric</th><th>Value</th><th>Status</th><th>Definition</th><th>Importance</th><th>Best Practice</th></tr>\n");

        for metric in Metric::ALL {
            let details = catalog.get(metric);
            let (status_class, status_text) = if RecommendationEngine::is_good(metric, metrics) {
                ("good", "Good")
            } else {
                ("bad", "Needs work")
            };

            let _ = writeln!(
                html,
                "<tr><td>{}</td><td>{}</td><td class=\"{}\">{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                metric.name(),
                escape_html(&metric_value(metric, metrics)),
                status_class,
                status_text,
                escape_html(details.map_or(NOT_AVAILABLE, |d| d.definition.as_str())),
                escape_html(details.map_or(NOT_AVAILABLE, |d| d.importance.as_str())),
                escape_html(details.map_or(NOT_AVAILABLE, |d| d.criteria.as_str())),
            );
        }

        html.push_str("</table>\n");
    }
}

/// Human readable value for a metric, as shown in the report and the terminal.
pub fn metric_value(metric: Metric, metrics: &PageMetrics) -> String {
    match metric {
        Metric::Title => format!(
            "{} ({} characters)",
            metrics.title_or_sentinel(),
            metrics.title_length
        ),
        Metric::MetaDescription => format!(
            "{} ({} characters)",
            metrics.meta_description_or_sentinel(),
            metrics.meta_description_length
        ),
        Metric::WordCount => format!("{} words", group_thousands(metrics.word_count)),
        Metric::TotalLinks => format!("{} links", group_thousands(metrics.link_count)),
        Metric::AltTagsMissing => format!(
            "{} images without alt tags",
            group_thousands(metrics.missing_alt_count)
        ),
        Metric::H1Tags => format!("{} H1 tags", group_thousands(metrics.h1_count)),
        Metric::MobileFriendly => {
            if metrics.has_viewport_tag {
                "Yes".to_string()
            } else {
                "No".to_string()
            }
        }
        Metric::CanonicalTag => metrics.canonical_or_sentinel().to_string(),
        Metric::LoadTime => format!("{:.2} seconds", metrics.load_time_seconds),
    }
}

fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MetricDetails;
    use crate::models::{Recommendation, RecommendationKind};

    fn sample_metrics() -> PageMetrics {
        PageMetrics {
            title: Some("Widgets & <Gadgets>".to_string()),
            title_length: 19,
            meta_description: None,
            meta_description_length: 0,
            word_count: 12345,
            link_count: 42,
            missing_alt_count: 0,
            h1_count: 1,
            has_viewport_tag: true,
            canonical_url: None,
            load_time_seconds: 0.456,
        }
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_metric_values() {
        let metrics = sample_metrics();
        assert_eq!(
            metric_value(Metric::Title, &metrics),
            "Widgets & <Gadgets> (19 characters)"
        );
        assert_eq!(
            metric_value(Metric::MetaDescription, &metrics),
            "No Description (0 characters)"
        );
        assert_eq!(metric_value(Metric::WordCount, &metrics), "12,345 words");
        assert_eq!(metric_value(Metric::MobileFriendly, &metrics), "Yes");
        assert_eq!(metric_value(Metric::CanonicalTag, &metrics), "None");
        assert_eq!(metric_value(Metric::LoadTime, &metrics), "0.46 seconds");
    }

    #[test]
    fn test_render_escapes_page_text() {
        let report = AuditReport::new("https://example.com/?a=1&b=2", Some(sample_metrics()), vec![]);
        let html = HtmlReport::render(&report, &MetricCatalog::standard());

        assert!(html.contains("Widgets &amp; &lt;Gadgets&gt;"));
        assert!(html.contains("https://example.com/?a=1&amp;b=2"));
        assert!(!html.contains("<Gadgets>"));
    }

    #[test]
    fn test_render_lists_every_metric_with_annotations() {
        let catalog = MetricCatalog::standard();
        let report = AuditReport::new("https://example.com/", Some(sample_metrics()), vec![]);
        let html = HtmlReport::render(&report, &catalog);

        for metric in Metric::ALL {
            assert!(html.contains(&format!("<td>{}</td>", metric.name())));
            let details = catalog.get(metric).unwrap();
            assert!(html.contains(&escape_html(&details.criteria)));
        }
        assert!(html.contains("No issues found."));
    }

    #[test]
    fn test_render_recommendations_in_order() {
        let recommendations = vec![
            Recommendation {
                kind: RecommendationKind::TitleTooShort,
                message: "first".to_string(),
            },
            Recommendation {
                kind: RecommendationKind::MissingCanonical,
                message: "second".to_string(),
            },
        ];
        let report = AuditReport::new("https://example.com/", Some(sample_metrics()), recommendations);
        let html = HtmlReport::render(&report, &MetricCatalog::standard());

        let first = html.find("<li>first</li>").unwrap();
        let second = html.find("<li>second</li>").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_render_without_metrics_shows_error_notice() {
        let report = AuditReport::new("https://example.com/", None, vec![]);
        let html = HtmlReport::render(&report, &MetricCatalog::standard());

        assert!(html.contains("class=\"error\""));
        assert!(!html.contains("<table>"));
    }

    #[test]
    fn test_render_with_partial_catalog_uses_placeholder() {
        let catalog = MetricCatalog::new([(
            Metric::Title,
            MetricDetails {
                definition: "Title definition".to_string(),
                importance: "Title importance".to_string(),
                criteria: "Title criteria".to_string(),
            },
        )]);
        let report = AuditReport::new("https://example.com/", Some(sample_metrics()), vec![]);
        let html = HtmlReport::render(&report, &catalog);

        assert!(html.contains("Title criteria"));
        assert!(html.contains("<td>N/A</td>"));
    }
}
